//! Classic Sorting CLI
//!
//! Benchmarks the four textbook sorts on ten input shapes, or narrates every
//! step of one sort on a small input.
//!
//! Usage:
//!   classic-sorting bench <algorithm|all> [--size N] [--runs N] [--seed N]
//!                         [--shape NAME]... [--lino PATH] [--markdown PATH]
//!   classic-sorting steps <algorithm> <value>...
//!   classic-sorting shapes

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::info;

use classic_sorting::benchmark::{self, BenchmarkConfig};
use classic_sorting::{Algorithm, InputShape};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("bench") => bench(&args[1..]),
        Some("steps") => steps(&args[1..]),
        Some("shapes") => {
            list_shapes();
            Ok(())
        }
        _ => usage(),
    }
}

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  classic-sorting bench <algorithm|all> [options]");
    eprintln!("  classic-sorting steps <algorithm> <value>...");
    eprintln!("  classic-sorting shapes");
    eprintln!();
    eprintln!("Algorithms: bucket, heap, merge, quick");
    eprintln!();
    eprintln!("Bench options:");
    eprintln!("  --size N          Elements per array (default {})", benchmark::DEFAULT_ARRAY_SIZE);
    eprintln!("  --runs N          Timed runs per shape (default {})", benchmark::DEFAULT_RUNS);
    eprintln!("  --seed N          RNG seed (default {})", benchmark::DEFAULT_SEED);
    eprintln!("  --shape NAME      Only this shape; repeatable (see `shapes`)");
    eprintln!("  --lino PATH       Also write a Links Notation report");
    eprintln!("  --markdown PATH   Also write a Markdown report");
    process::exit(1);
}

struct BenchArgs {
    algorithms: Vec<Algorithm>,
    config: BenchmarkConfig,
    lino: Option<PathBuf>,
    markdown: Option<PathBuf>,
}

fn parse_bench_args(args: &[String]) -> Result<BenchArgs, Box<dyn Error>> {
    let Some(target) = args.first() else {
        usage();
    };
    let algorithms = if target == "all" {
        Algorithm::ALL.to_vec()
    } else {
        vec![target.parse::<Algorithm>()?]
    };

    let mut config = BenchmarkConfig::default();
    let mut shapes = Vec::new();
    let mut lino = None;
    let mut markdown = None;

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let Some(value) = rest.next() else {
            return Err(format!("missing value for {}", flag).into());
        };
        match flag.as_str() {
            "--size" => config.size = value.parse()?,
            "--runs" => config.runs = value.parse()?,
            "--seed" => config.seed = value.parse()?,
            "--shape" => shapes.push(value.parse::<InputShape>()?),
            "--lino" => lino = Some(PathBuf::from(value)),
            "--markdown" => markdown = Some(PathBuf::from(value)),
            other => return Err(format!("unknown option {}", other).into()),
        }
    }
    if !shapes.is_empty() {
        config.shapes = shapes;
    }

    Ok(BenchArgs {
        algorithms,
        config,
        lino,
        markdown,
    })
}

fn bench(args: &[String]) -> Result<(), Box<dyn Error>> {
    let BenchArgs {
        algorithms,
        config,
        lino,
        markdown,
    } = parse_bench_args(args)?;

    let report = benchmark::run_all(&algorithms, &config);
    print!("{}", report.to_text_table());

    if let Some(path) = lino {
        report.save_lino(&path)?;
        info!("Links Notation report written to {}", path.display());
    }
    if let Some(path) = markdown {
        report.save_markdown(&path)?;
        info!("Markdown report written to {}", path.display());
    }
    Ok(())
}

fn steps(args: &[String]) -> Result<(), Box<dyn Error>> {
    let Some(name) = args.first() else {
        usage();
    };
    let algorithm: Algorithm = name.parse()?;
    let values = args[1..]
        .iter()
        .map(|v| v.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()?;

    let recording = algorithm.record(&values)?;

    println!("{} on {:?}", algorithm.title(), recording.original());
    println!();
    for (index, frame) in recording.frames().enumerate() {
        let marker = if frame.step.is_comparison() {
            '?'
        } else if frame.step.is_mutation() {
            '*'
        } else {
            ' '
        };
        println!("{:>5} {} {:<60} {:?}", index + 1, marker, frame.step.to_string(), frame.values);
    }
    println!();
    println!(
        "{:>12} | {:>12} | {:>12}",
        "Steps", "Comparisons", "Mutations"
    );
    println!("{:-<12}-+-{:-<12}-+-{:-<12}", "", "", "");
    println!(
        "{:>12} | {:>12} | {:>12}",
        recording.len(),
        recording.comparisons(),
        recording.mutations()
    );
    println!();
    println!("Sorted: {:?}", recording.replay());
    Ok(())
}

fn list_shapes() {
    println!("{:<16} | Label", "Name");
    println!("{:-<16}-+-{:-<30}", "", "");
    for shape in InputShape::ALL {
        println!("{:<16} | {}", shape.slug(), shape.label());
    }
}

//! Lino to Markdown Converter
//!
//! Converts a Links Notation benchmark report written by `classic-sorting
//! bench --lino` into a Markdown report.
//!
//! Usage:
//!   lino2md input.lino [output.md]
//!
//! If output is not specified, prints to stdout.

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use classic_sorting::report::parse_lino_report;
use log::debug;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.lino> [output.md]", args[0]);
        eprintln!();
        eprintln!("Converts a Links Notation benchmark report to Markdown format.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  input.lino    Path to the Links Notation report file");
        eprintln!("  output.md     Optional output path (prints to stdout if not specified)");
        process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let content = match fs::read_to_string(input_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path.display(), e);
            process::exit(1);
        }
    };

    let report = match parse_lino_report(&content) {
        Some(r) => r,
        None => {
            eprintln!("Error: {} holds no benchmark results", input_path.display());
            process::exit(1);
        }
    };
    debug!(
        "Parsed {} results for {} algorithms",
        report.results.len(),
        report.algorithms().len()
    );

    let markdown = report.to_markdown_table();

    if let Some(output) = args.get(2) {
        let output_path = Path::new(output);
        if let Err(e) = report.save_markdown(output_path) {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            process::exit(1);
        }
        println!("Markdown report written to: {}", output_path.display());
    } else {
        print!("{}", markdown);
    }
}

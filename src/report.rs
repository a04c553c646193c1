//! Benchmark Report Generation
//!
//! Formats benchmark results three ways:
//!
//! - **Links Notation (Lino)**: an indentation-based `name: value` format
//!   that can be parsed back with [`parse_lino_report`].
//! - **Markdown**: one row per input shape, one column per algorithm.
//! - **Text**: the boxed terminal table with an average row, a
//!   fastest/slowest summary and a relative-speed bar chart.
//!
//! Lino layout:
//!   ```text
//!   benchmark_report:
//!     timestamp '2026-01-01T00:00:00Z'
//!     size 5000
//!   results:
//!     quick:
//!       shape_1:
//!         label '1. Random integers'
//!         time_ms 1.234
//!   ```

use std::fmt::{self, Write};
use std::fs;
use std::io;
use std::path::Path;

use crate::algorithm::Algorithm;

/// One algorithm timed on one input shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Algorithm name (e.g. "quick", "merge")
    pub algorithm: String,
    /// Input shape label (e.g. "2. Already sorted")
    pub shape: String,
    /// Expected difficulty of the shape for this algorithm
    pub note: String,
    /// Array size in elements
    pub array_size: usize,
    /// Mean execution time in milliseconds
    pub time_ms: f64,
    /// Whether the output matched the reference ordering
    pub verified: bool,
    /// Why the algorithm refused the input, if it did
    pub error: Option<String>,
}

impl BenchmarkResult {
    /// True when the row carries a usable timing.
    pub fn is_timed(&self) -> bool {
        self.error.is_none()
    }
}

/// A complete benchmark run, possibly covering several algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Timestamp of when the benchmark was run (ISO 8601 format)
    pub timestamp: String,
    pub description: String,
    pub array_size: usize,
    pub runs: usize,
    pub seed: u64,
    pub system_info: SystemInfo,
    pub results: Vec<BenchmarkResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    /// Worker threads available to rayon
    pub threads: usize,
}

impl Default for SystemInfo {
    fn default() -> Self {
        SystemInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            threads: rayon::current_num_threads(),
        }
    }
}

impl BenchmarkReport {
    /// Create a new empty benchmark report
    pub fn new(description: &str, array_size: usize, runs: usize, seed: u64) -> Self {
        BenchmarkReport {
            timestamp: chrono_lite_timestamp(),
            description: description.to_string(),
            array_size,
            runs,
            seed,
            system_info: SystemInfo::default(),
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Append every result of `other`, keeping this report's metadata.
    pub fn merge(&mut self, other: BenchmarkReport) {
        self.results.extend(other.results);
    }

    /// Algorithm names in order of first appearance.
    pub fn algorithms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for result in &self.results {
            if !names.contains(&result.algorithm.as_str()) {
                names.push(&result.algorithm);
            }
        }
        names
    }

    /// Shape labels in order of first appearance.
    pub fn shapes(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for result in &self.results {
            if !labels.contains(&result.shape.as_str()) {
                labels.push(&result.shape);
            }
        }
        labels
    }

    /// Timed results of one algorithm.
    pub fn timed(&self, algorithm: &str) -> impl Iterator<Item = &BenchmarkResult> {
        let algorithm = algorithm.to_string();
        self.results
            .iter()
            .filter(move |r| r.algorithm == algorithm && r.is_timed())
    }

    pub fn fastest(&self, algorithm: &str) -> Option<&BenchmarkResult> {
        self.timed(algorithm)
            .min_by(|a, b| a.time_ms.total_cmp(&b.time_ms))
    }

    pub fn slowest(&self, algorithm: &str) -> Option<&BenchmarkResult> {
        self.timed(algorithm)
            .max_by(|a, b| a.time_ms.total_cmp(&b.time_ms))
    }

    /// Mean of the timed results of one algorithm.
    pub fn average_ms(&self, algorithm: &str) -> Option<f64> {
        let times: Vec<f64> = self.timed(algorithm).map(|r| r.time_ms).collect();
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<f64>() / times.len() as f64)
        }
    }

    /// Ratio between the slowest and the fastest timed shape.
    pub fn slowdown(&self, algorithm: &str) -> Option<f64> {
        let fastest = self.fastest(algorithm)?;
        let slowest = self.slowest(algorithm)?;
        if fastest.time_ms > 0.0 {
            Some(slowest.time_ms / fastest.time_ms)
        } else {
            None
        }
    }

    /// Generate the report in Links Notation format
    pub fn to_lino(&self) -> String {
        let mut output = String::new();
        // writing into a String cannot fail
        let _ = self.write_lino(&mut output);
        output
    }

    pub fn write_lino<W: Write>(&self, output: &mut W) -> fmt::Result {
        writeln!(output, "benchmark_report:")?;
        writeln!(output, "  timestamp '{}'", self.timestamp)?;
        writeln!(output, "  description '{}'", escape_lino_string(&self.description))?;
        writeln!(output, "  size {}", self.array_size)?;
        writeln!(output, "  runs {}", self.runs)?;
        writeln!(output, "  seed {}", self.seed)?;

        writeln!(output)?;
        writeln!(output, "system_info:")?;
        writeln!(output, "  os '{}'", escape_lino_string(&self.system_info.os))?;
        writeln!(output, "  arch '{}'", escape_lino_string(&self.system_info.arch))?;
        writeln!(output, "  threads {}", self.system_info.threads)?;

        writeln!(output)?;
        writeln!(output, "results:")?;
        for algorithm in self.algorithms() {
            writeln!(output, "  {}:", algorithm)?;
            let rows = self.results.iter().filter(|r| r.algorithm == algorithm);
            for (index, result) in rows.enumerate() {
                writeln!(output, "    shape_{}:", index + 1)?;
                writeln!(output, "      label '{}'", escape_lino_string(&result.shape))?;
                writeln!(output, "      note '{}'", escape_lino_string(&result.note))?;
                writeln!(output, "      size {}", result.array_size)?;
                writeln!(output, "      time_ms {:.3}", result.time_ms)?;
                writeln!(output, "      verified {}", result.verified)?;
                if let Some(ref error) = result.error {
                    writeln!(output, "      error '{}'", escape_lino_string(error))?;
                }
            }
        }

        writeln!(output)?;
        writeln!(output, "summary:")?;
        for algorithm in self.algorithms() {
            let (Some(fastest), Some(slowest)) = (self.fastest(algorithm), self.slowest(algorithm))
            else {
                continue;
            };
            writeln!(output, "  {}:", algorithm)?;
            writeln!(output, "    fastest '{}'", escape_lino_string(&fastest.shape))?;
            writeln!(output, "    slowest '{}'", escape_lino_string(&slowest.shape))?;
            if let Some(average) = self.average_ms(algorithm) {
                writeln!(output, "    average_ms {:.3}", average)?;
            }
            if let Some(slowdown) = self.slowdown(algorithm) {
                writeln!(output, "    slowdown {:.1}", slowdown)?;
            }
        }
        Ok(())
    }

    /// Save the report to a file in Links Notation format
    pub fn save_lino(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_lino())
    }

    /// Generate a markdown report: one row per shape, one column per algorithm.
    pub fn to_markdown_table(&self) -> String {
        let mut output = String::new();
        let _ = self.write_markdown(&mut output);
        output
    }

    pub fn write_markdown<W: Write>(&self, output: &mut W) -> fmt::Result {
        let algorithms = self.algorithms();

        writeln!(output, "# Sorting Benchmark Report")?;
        writeln!(output)?;
        writeln!(output, "**Timestamp:** {}", self.timestamp)?;
        writeln!(output, "**Description:** {}", self.description)?;
        writeln!(
            output,
            "**Array size:** {} | **Runs per shape:** {} | **Seed:** {}",
            format_size(self.array_size),
            self.runs,
            self.seed
        )?;
        writeln!(output)?;

        writeln!(output, "## System Information")?;
        writeln!(output)?;
        writeln!(output, "| Property | Value |")?;
        writeln!(output, "|----------|-------|")?;
        writeln!(output, "| OS | {} |", self.system_info.os)?;
        writeln!(output, "| Arch | {} |", self.system_info.arch)?;
        writeln!(output, "| Threads | {} |", self.system_info.threads)?;
        writeln!(output)?;

        writeln!(output, "## Benchmark Results")?;
        writeln!(output)?;
        write!(output, "| Array type |")?;
        for algorithm in &algorithms {
            write!(output, " {} (ms) |", display_title(algorithm))?;
        }
        writeln!(output)?;
        write!(output, "|------------|")?;
        for _ in &algorithms {
            write!(output, "--------------|")?;
        }
        writeln!(output)?;

        for shape in self.shapes() {
            write!(output, "| {} |", shape)?;
            for algorithm in &algorithms {
                let cell = self
                    .results
                    .iter()
                    .find(|r| r.algorithm == *algorithm && r.shape == shape)
                    .map(markdown_cell)
                    .unwrap_or_else(|| "N/A".to_string());
                write!(output, " {} |", cell)?;
            }
            writeln!(output)?;
        }
        writeln!(output)?;

        writeln!(output, "## Summary")?;
        writeln!(output)?;
        writeln!(output, "| Algorithm | Fastest | Slowest | Average (ms) | Slowdown |")?;
        writeln!(output, "|-----------|---------|---------|--------------|----------|")?;
        for algorithm in &algorithms {
            let fastest = self
                .fastest(algorithm)
                .map(|r| format!("{} ({:.3} ms)", r.shape, r.time_ms))
                .unwrap_or_else(|| "N/A".to_string());
            let slowest = self
                .slowest(algorithm)
                .map(|r| format!("{} ({:.3} ms)", r.shape, r.time_ms))
                .unwrap_or_else(|| "N/A".to_string());
            let average = self
                .average_ms(algorithm)
                .map(|a| format!("{:.3}", a))
                .unwrap_or_else(|| "N/A".to_string());
            let slowdown = self
                .slowdown(algorithm)
                .map(|s| format!("{:.1}x", s))
                .unwrap_or_else(|| "N/A".to_string());
            writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                display_title(algorithm),
                fastest,
                slowest,
                average,
                slowdown
            )?;
        }

        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output, "*Report generated by classic-sorting benchmark tool*")?;
        Ok(())
    }

    /// Save the report as a markdown file
    pub fn save_markdown(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_markdown_table())
    }

    /// Terminal table and bar chart for every algorithm in the report.
    pub fn to_text_table(&self) -> String {
        let mut output = String::new();
        for algorithm in self.algorithms() {
            let _ = self.write_text_table(&mut output, algorithm);
        }
        output
    }

    fn write_text_table<W: Write>(&self, output: &mut W, algorithm: &str) -> fmt::Result {
        const COL1: usize = 32;
        const COL2: usize = 46;
        const COL3: usize = 13;
        const COL4: usize = 9;
        const MAX_BAR: usize = 40;

        let width = COL1 + COL2 + COL3 + COL4 + 11;
        let divider = format!(
            "+{}+{}+{}+{}+",
            "-".repeat(COL1 + 2),
            "-".repeat(COL2 + 2),
            "-".repeat(COL3 + 2),
            "-".repeat(COL4 + 2)
        );

        writeln!(output)?;
        writeln!(output, "{}", "=".repeat(width))?;
        writeln!(
            output,
            "  {} Benchmark  -  n = {}  |  {} runs per array",
            display_title(algorithm),
            format_size(self.array_size),
            self.runs
        )?;
        writeln!(output, "{}", "=".repeat(width))?;
        writeln!(output, "{}", divider)?;
        writeln!(
            output,
            "| {:<COL1$} | {:<COL2$} | {:>COL3$} | {:<COL4$} |",
            "Array type", "Difficulty / notes", "Avg time (ms)", "Correct?"
        )?;
        writeln!(output, "{}", divider.replace('-', "="))?;

        let rows: Vec<&BenchmarkResult> = self
            .results
            .iter()
            .filter(|r| r.algorithm == algorithm)
            .collect();
        for result in &rows {
            let (time, status) = match (&result.error, result.verified) {
                (Some(_), _) => ("-".to_string(), "rejected"),
                (None, true) => (format!("{:.3}", result.time_ms), "yes"),
                (None, false) => (format!("{:.3}", result.time_ms), "NO"),
            };
            writeln!(
                output,
                "| {:<COL1$} | {:<COL2$} | {:>COL3$} | {:<COL4$} |",
                truncate(&result.shape, COL1),
                truncate(&result.note, COL2),
                time,
                status
            )?;
        }
        writeln!(output, "{}", divider)?;

        let (Some(average), Some(fastest), Some(slowest)) = (
            self.average_ms(algorithm),
            self.fastest(algorithm),
            self.slowest(algorithm),
        ) else {
            return Ok(());
        };

        writeln!(
            output,
            "| {:<COL1$} | {:<COL2$} | {:>COL3$.3} | {:<COL4$} |",
            "AVERAGE", "", average, ""
        )?;
        writeln!(output, "{}", divider)?;

        writeln!(output)?;
        writeln!(output, "  Fastest : {}  ({:.3} ms)", fastest.shape, fastest.time_ms)?;
        writeln!(output, "  Slowest : {}  ({:.3} ms)", slowest.shape, slowest.time_ms)?;
        if let Some(slowdown) = self.slowdown(algorithm) {
            writeln!(
                output,
                "  Slowdown: {:.1}x difference between fastest and slowest",
                slowdown
            )?;
        }
        writeln!(output)?;

        writeln!(output, "{}", "-".repeat(70))?;
        writeln!(output, "  Relative speed (bar length follows time, shortest = fastest)")?;
        writeln!(output, "{}", "-".repeat(70))?;
        for result in rows.iter().filter(|r| r.is_timed()) {
            let bar = "█".repeat(bar_length(result.time_ms, slowest.time_ms, MAX_BAR));
            writeln!(
                output,
                "  {:<30}  {:<MAX_BAR$}  {:.2} ms",
                truncate(&result.shape, 28),
                bar,
                result.time_ms
            )?;
        }
        Ok(())
    }
}

fn markdown_cell(result: &BenchmarkResult) -> String {
    match (&result.error, result.verified) {
        (Some(_), _) => "rejected".to_string(),
        (None, true) => format!("{:.3}", result.time_ms),
        (None, false) => format!("{:.3} (wrong)", result.time_ms),
    }
}

/// Display title for an algorithm name, falling back to the name itself.
fn display_title(algorithm: &str) -> String {
    algorithm
        .parse::<Algorithm>()
        .map(|a| a.title().to_string())
        .unwrap_or_else(|_| algorithm.to_string())
}

/// At least one block, at most `max_bar`, proportional to `time_ms / max_ms`.
fn bar_length(time_ms: f64, max_ms: f64, max_bar: usize) -> usize {
    if max_ms <= 0.0 {
        return 1;
    }
    ((time_ms / max_ms * max_bar as f64) as usize).clamp(1, max_bar)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Escape a string for use in Links Notation (handle single quotes)
fn escape_lino_string(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Format a size as a human-readable string (e.g., "5K", "1M")
fn format_size(size: usize) -> String {
    if size >= 1_000_000_000 {
        format!("{}G", size / 1_000_000_000)
    } else if size >= 1_000_000 {
        format!("{}M", size / 1_000_000)
    } else if size >= 1_000 && size % 1_000 == 0 {
        format!("{}K", size / 1_000)
    } else {
        size.to_string()
    }
}

/// Generate a simple UTC timestamp without external dependencies
fn chrono_lite_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days_since_epoch = secs / 86400;
    let time_of_day = secs % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;

    let mut year = 1970i64;
    let mut remaining_days = days_since_epoch as i64;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let days_in_months = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1;
    for days in days_in_months {
        if remaining_days < days {
            break;
        }
        remaining_days -= days;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        remaining_days + 1,
        hours,
        minutes,
        seconds
    )
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Parse a Links Notation report produced by [`BenchmarkReport::to_lino`].
///
/// Returns `None` when the content holds no results.
pub fn parse_lino_report(content: &str) -> Option<BenchmarkReport> {
    let mut report = BenchmarkReport::new("Parsed report", 0, 0, 0);
    let mut section = "";
    let mut current_algorithm: Option<String> = None;
    let mut current_result: Option<BenchmarkResult> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start().len();

        if indent == 0 {
            if let Some(result) = current_result.take() {
                report.results.push(result);
            }
            section = trimmed.trim_end_matches(':');
            continue;
        }

        match (section, indent) {
            ("benchmark_report", _) => {
                if let Some(ts) = extract_quoted_value(trimmed, "timestamp") {
                    report.timestamp = ts;
                } else if let Some(desc) = extract_quoted_value(trimmed, "description") {
                    report.description = desc;
                } else if let Some(size) = extract_number(trimmed, "size") {
                    report.array_size = size;
                } else if let Some(runs) = extract_number(trimmed, "runs") {
                    report.runs = runs;
                } else if let Some(seed) = extract_number(trimmed, "seed") {
                    report.seed = seed;
                }
            }
            ("system_info", _) => {
                if let Some(os) = extract_quoted_value(trimmed, "os") {
                    report.system_info.os = os;
                } else if let Some(arch) = extract_quoted_value(trimmed, "arch") {
                    report.system_info.arch = arch;
                } else if let Some(threads) = extract_number(trimmed, "threads") {
                    report.system_info.threads = threads;
                }
            }
            ("results", 2) if trimmed.ends_with(':') => {
                if let Some(result) = current_result.take() {
                    report.results.push(result);
                }
                current_algorithm = Some(trimmed.trim_end_matches(':').to_string());
            }
            ("results", 4) if trimmed.starts_with("shape_") && trimmed.ends_with(':') => {
                if let Some(result) = current_result.take() {
                    report.results.push(result);
                }
                if let Some(ref algorithm) = current_algorithm {
                    current_result = Some(BenchmarkResult {
                        algorithm: algorithm.clone(),
                        shape: String::new(),
                        note: String::new(),
                        array_size: 0,
                        time_ms: 0.0,
                        verified: false,
                        error: None,
                    });
                }
            }
            ("results", _) => {
                let Some(ref mut result) = current_result else {
                    continue;
                };
                if let Some(label) = extract_quoted_value(trimmed, "label") {
                    result.shape = label;
                } else if let Some(note) = extract_quoted_value(trimmed, "note") {
                    result.note = note;
                } else if let Some(size) = extract_number(trimmed, "size") {
                    result.array_size = size;
                } else if let Some(time) = extract_number(trimmed, "time_ms") {
                    result.time_ms = time;
                } else if let Some(verified) = trimmed.strip_prefix("verified ") {
                    result.verified = verified == "true";
                } else if let Some(error) = extract_quoted_value(trimmed, "error") {
                    result.error = Some(error);
                }
            }
            _ => {}
        }
    }

    if let Some(result) = current_result {
        report.results.push(result);
    }

    if report.results.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn extract_quoted_value(line: &str, key: &str) -> Option<String> {
    let value = line.strip_prefix(key)?.strip_prefix(' ')?.trim();
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        Some(value[1..value.len() - 1].replace("\\'", "'"))
    } else {
        None
    }
}

fn extract_number<T: std::str::FromStr>(line: &str, key: &str) -> Option<T> {
    line.strip_prefix(key)?.strip_prefix(' ')?.trim().parse().ok()
}

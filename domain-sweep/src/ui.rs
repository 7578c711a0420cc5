//! Console output for the sweep CLI.
//!
//! Progress lines during a run, a styled summary afterwards. Uses only the
//! `console` crate; styles degrade to plain text when stdout is not a
//! terminal.

use console::style;
use domain_sweep_lib::{ProgressObserver, ProgressSnapshot, RunReport, SweepConfig};
use std::path::Path;

/// Progress observer that prints periodic status lines to stdout.
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, s: ProgressSnapshot) {
        println!(
            "Progress: {}/{} domains ({:.1}%) {} {} {}",
            style(s.processed).bold(),
            s.total,
            s.percent(),
            style("|").dim(),
            style(format!("{} available", s.available)).green(),
            style(format!("{} errors", s.errors)).yellow(),
        );
    }
}

/// Print a styled header at the start of a verbose run.
pub fn print_header(input_file: &str, config: &SweepConfig) {
    println!(
        "{} {} {}",
        style("domain-sweep").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!("sweeping {}", input_file)).dim(),
    );
    println!(
        "{}",
        style(format!(
            "Threads: {} | Timeout: {}s",
            config.workers,
            config.timeout.as_secs()
        ))
        .dim()
    );
    println!();
}

/// Print the final summary and the report location.
pub fn print_summary(report: &RunReport, report_path: &Path) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(report.checked).bold(),
        if report.checked == 1 { "" } else { "s" },
        report.elapsed_seconds,
        style("|").dim(),
        style(format!("{} available", report.available_count)).green(),
        style("|").dim(),
        style(format!("{} taken", report.taken)).red(),
        style("|").dim(),
        style(format!("{} errors", report.errors)).yellow(),
    );
    if report.rejected_lines > 0 {
        println!(
            "  {}",
            style(format!(
                "{} input line{} rejected by validation",
                report.rejected_lines,
                if report.rejected_lines == 1 { "" } else { "s" }
            ))
            .dim()
        );
    }
    println!();
    println!("Results saved to {}", report_path.display());
}

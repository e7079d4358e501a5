use std::io::Write;

use colored::Colorize;

use super::{ComparisonReport, ReportError, Reporter};
use crate::stats::SampleStats;

/// A reporter that prints a short comparison summary to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format a per-operation time in nanoseconds to a human-readable string.
    fn format_time(ns: f64) -> String {
        if ns.abs() >= 1_000_000.0 {
            format!("{:.3} ms", ns / 1_000_000.0)
        } else if ns.abs() >= 1_000.0 {
            format!("{:.3} us", ns / 1_000.0)
        } else {
            format!("{:.5} ns", ns)
        }
    }

    /// Format a mean with its standard deviation.
    fn format_time_with_stddev(stats: &SampleStats) -> String {
        let mean = Self::format_time(stats.mean);
        let stddev = Self::format_time(stats.std_dev);
        format!("{} (+/- {})", mean, stddev)
    }

    /// Share of the operation time left after subtracting overhead.
    fn format_share(report: &ComparisonReport) -> String {
        let operation = report.operation_stats.mean;
        if operation == 0.0 {
            return "n/a".to_string();
        }
        format!("{:.2}%", report.difference_stats.mean / operation * 100.0)
    }

    fn print_header(
        &self,
        writer: &mut dyn Write,
        report: &ComparisonReport,
    ) -> std::io::Result<()> {
        writeln!(writer)?;
        let title = format!(
            "Per-operation cost over {} trials of {} operations",
            report.trial_count(),
            report.operation_count
        );
        if self.use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        writeln!(writer, "{}", "-".repeat(60))?;
        Ok(())
    }

    fn print_row(
        &self,
        writer: &mut dyn Write,
        label: &str,
        stats: &SampleStats,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "{:<12} {:>40}",
            label,
            Self::format_time_with_stddev(stats)
        )
    }

    fn print_summary(
        &self,
        writer: &mut dyn Write,
        report: &ComparisonReport,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", "-".repeat(60))?;

        let cost = Self::format_time(report.difference_stats.mean);
        let share = Self::format_share(report);
        let summary_label = "Cost:";

        if self.use_colors {
            let cost = if report.difference_stats.mean < 0.0 {
                cost.red().bold()
            } else {
                cost.green().bold()
            };
            writeln!(
                writer,
                "{} {} per operation ({} of measured time)",
                summary_label.bold(),
                cost,
                share.yellow()
            )?;
        } else {
            writeln!(
                writer,
                "{} {} per operation ({} of measured time)",
                summary_label, cost, share
            )?;
        }

        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(
        &self,
        report: &ComparisonReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        self.print_header(writer, report)?;
        self.print_row(writer, "Operation", &report.operation_stats)?;
        self.print_row(writer, "Overhead", &report.overhead_stats)?;
        self.print_row(writer, "Difference", &report.difference_stats)?;
        self.print_summary(writer, report)?;
        Ok(())
    }
}

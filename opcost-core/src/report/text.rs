use std::io::Write;

use super::{ComparisonReport, ComparisonRow, ReportError, Reporter};

const HEADER: &str = "Operation Time (ns)\t|\tOverhead Time (ns)\t|\tDifference (ns)";

/// Renders the tab-delimited report file.
///
/// Lines are joined with `\n` and the last line has no terminator:
///
/// ```text
/// Operation Time (ns)	|	Overhead Time (ns)	|	Difference (ns)
/// 3.00000 ns	|	1.00000 ns	|	2.00000 ns
///
/// Mean
/// 3.00000 ns	|	1.00000 ns	|	2.00000 ns
///
/// Standard Deviation
/// 0.00000 ns	|	0.00000 ns	|	0.00000 ns
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter;

impl TextReporter {
    pub fn new() -> Self {
        Self
    }

    /// Format one value with five fractional digits and its unit.
    fn format_value(ns: f64) -> String {
        format!("{:.5} ns", ns)
    }

    fn format_row(row: &ComparisonRow) -> String {
        format!(
            "{}\t|\t{}\t|\t{}",
            Self::format_value(row.operation_ns),
            Self::format_value(row.overhead_ns),
            Self::format_value(row.difference_ns)
        )
    }

    /// Render the whole report as a string.
    pub fn render(&self, report: &ComparisonReport) -> String {
        let mut lines = Vec::with_capacity(report.trial_count() + 7);
        lines.push(HEADER.to_string());
        lines.extend(report.rows.iter().map(Self::format_row));
        lines.push(String::new());
        lines.push("Mean".to_string());
        lines.push(Self::format_row(&report.mean_row()));
        lines.push(String::new());
        lines.push("Standard Deviation".to_string());
        lines.push(Self::format_row(&report.std_dev_row()));
        lines.join("\n")
    }
}

impl Reporter for TextReporter {
    fn report(
        &self,
        report: &ComparisonReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        writer.write_all(self.render(report).as_bytes())?;
        Ok(())
    }
}

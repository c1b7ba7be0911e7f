//! Batch conversion summary

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::converter::ConversionResult;
use crate::utils::{format_duration, format_file_size};

/// Per-file outcomes of a run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total_count: usize,
    pub results: Vec<ConversionResult>,
}

impl BatchReport {
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            ..Default::default()
        }
    }

    /// Record one finished conversion.
    pub fn record(&mut self, result: ConversionResult) {
        self.results.push(result);
    }

    pub fn succeeded(&self) -> Vec<&ConversionResult> {
        self.results.iter().filter(|r| r.succeeded()).collect()
    }

    pub fn failed(&self) -> Vec<&ConversionResult> {
        self.results.iter().filter(|r| !r.succeeded()).collect()
    }

    pub fn processed_count(&self) -> usize {
        self.results.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(ConversionResult::succeeded)
            && self.processed_count() == self.total_count
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
            Cell::new("Size").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);

        for result in &self.results {
            let row = match &result.failure {
                None => vec![
                    Cell::new(result.file_name()),
                    Cell::new("✅ converted").fg(Color::Green),
                    Cell::new(
                        result
                            .duration_seconds
                            .map(format_duration)
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::new(
                        result
                            .output_size_bytes
                            .map(format_file_size)
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::new(format!("{:.1}s", result.elapsed.as_secs_f64())),
                ],
                Some(error) => vec![
                    Cell::new(result.file_name()),
                    Cell::new(format!("❌ {}", error.kind())).fg(Color::Red),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("{:.1}s", result.elapsed.as_secs_f64())),
                ],
            };
            table.add_row(row);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        let succeeded = self.succeeded().len();
        let failed = self.failed().len();
        let color = if failed == 0 {
            Color::Green
        } else {
            Color::Yellow
        };
        let mut totals = Table::new();
        totals.load_preset(UTF8_FULL_CONDENSED);
        totals.add_row(vec![Cell::new("📁 Total"), Cell::new(self.total_count)]);
        totals.add_row(vec![
            Cell::new("✅ Succeeded"),
            Cell::new(succeeded).fg(color).add_attribute(Attribute::Bold),
        ]);
        let failed_color = if failed == 0 {
            Color::White
        } else {
            Color::Red
        };
        totals.add_row(vec![Cell::new("❌ Failed"), Cell::new(failed).fg(failed_color)]);

        println!();
        for line in totals.to_string().lines() {
            println!("    {}", line);
        }

        if failed > 0 {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for result in self.failed() {
                if let Some(error) = &result.failure {
                    println!(
                        "      {} {}: {}",
                        style("•").dim(),
                        style(result.file_name()).yellow(),
                        error
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConvertError;
    use std::path::PathBuf;
    use std::time::Duration;

    fn ok(name: &str) -> ConversionResult {
        ConversionResult::success(
            PathBuf::from(name),
            PathBuf::from(name).with_extension("mp3"),
            Some(10.0),
            Some(2048),
            Duration::from_millis(5),
        )
    }

    fn err(name: &str) -> ConversionResult {
        ConversionResult::failure(
            PathBuf::from(name),
            None,
            ConvertError::SourceNotFound {
                path: PathBuf::from(name),
            },
            Duration::ZERO,
        )
    }

    #[test]
    fn test_report_keeps_processing_order() {
        let mut report = BatchReport::new(3);
        report.record(ok("a.mp4"));
        report.record(err("b.mp4"));
        report.record(ok("c.mp4"));

        let names: Vec<String> = report.results.iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["a.mp4", "b.mp4", "c.mp4"]);
        assert_eq!(report.succeeded().len(), 2);
        assert_eq!(report.failed()[0].file_name(), "b.mp4");
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_report_incomplete_is_not_success() {
        let mut report = BatchReport::new(2);
        report.record(ok("a.mp4"));

        assert!(report.failed().is_empty());
        assert!(!report.all_succeeded());
    }
}

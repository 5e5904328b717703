//! Output formatting and writing utilities
//!
//! This module writes documents, transformation reports, and status
//! messages in the selected format (human, JSON, YAML).

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tartan_core::mapping::{SkippedEntry, TransformReport};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a transformation report
    fn format_report(&self, report: &TransformReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_report(&self, report: &TransformReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Switch compact JSON output to pretty-printed JSON
    pub fn set_pretty(&mut self, pretty: bool) {
        if pretty && self.format == OutputFormat::Json {
            self.format = OutputFormat::JsonPretty;
        }
    }

    /// Turn progress indicators off
    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let value_json = serde_json::to_value(value)?;
        trace!(data = %redaction::redacted(&value_json), "Outputting data");

        let formatted = self.format.format(value)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a transformation report
    pub fn report(&mut self, report: &TransformReport) -> Result<()> {
        let formatted = self.format.format_report(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Write skipped entries as a table (human format only)
    pub fn skipped_table(&mut self, skipped: &[SkippedEntry]) -> Result<()> {
        let rows = skipped
            .iter()
            .map(|entry| {
                vec![
                    entry.index.to_string(),
                    entry.source_path.clone(),
                    entry.dest_path.clone(),
                    entry.reason.to_string(),
                ]
            })
            .collect();
        self.table(&["#", "Source", "Destination", "Reason"], rows)
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = render_row(headers.iter().map(|h| h.to_string()), &widths);
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            self.writeln(&render_row(row.into_iter(), &widths))?;
        }

        Ok(())
    }
}

fn render_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(width) => format!("{:width$}", cell, width = *width),
            None => cell,
        })
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}

/// Spinner style for batch transforms
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format a transformation report for human reading
fn format_report_human(report: &TransformReport) -> String {
    let mut output = String::new();
    let invalid = report.invalid().count();
    let absent = report.absent().count();

    output.push_str(&format!(
        "Applied {} of {} entries\n",
        report.applied,
        report.applied + report.skipped.len()
    ));

    if report.is_complete() {
        output.push_str("No entries skipped\n");
        return output;
    }

    if absent > 0 {
        output.push_str(&format!("  Source absent: {}\n", absent));
    }
    if invalid > 0 {
        output.push_str(&format!("  Malformed paths: {}\n", invalid));
    }
    for entry in &report.skipped {
        output.push_str(&format!("  • {}\n", entry));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tartan_core::mapping::{Mapper, MappingTable};

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
        (writer, buffer)
    }

    fn sample_report() -> TransformReport {
        let table = MappingTable::new()
            .with_entry("employeeId", "employee_number")
            .with_entry("manager", "manager_id")
            .with_entry("a..b", "broken")
            .compile();
        Mapper::new(&table).apply(&json!({"employeeId": "EMP-1042"})).report
    }

    #[test]
    fn test_human_report() {
        let formatted = format_report_human(&sample_report());
        assert!(formatted.contains("Applied 1 of 3 entries"));
        assert!(formatted.contains("Source absent: 1"));
        assert!(formatted.contains("Malformed paths: 1"));
        assert!(formatted.contains("manager -> manager_id"));
    }

    #[test]
    fn test_human_report_complete() {
        let report = TransformReport {
            applied: 4,
            skipped: Vec::new(),
        };
        let formatted = format_report_human(&report);
        assert!(formatted.contains("Applied 4 of 4 entries"));
        assert!(formatted.contains("No entries skipped"));
    }

    #[test]
    fn test_json_report() {
        let formatted = OutputFormat::Json.format_report(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed["applied"], json!(1));
        assert_eq!(parsed["skipped"][0]["reason"]["kind"], json!("source_absent"));
        assert_eq!(parsed["skipped"][1]["reason"]["kind"], json!("invalid_source_path"));
    }

    #[test]
    fn test_data_formats() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        out.data(&json!({"employee_number": "EMP-1042"})).unwrap();
        assert_eq!(buffer.contents(), "{\"employee_number\":\"EMP-1042\"}\n");

        let (mut out, buffer) = writer(OutputFormat::Yaml);
        out.data(&json!({"employee_number": "EMP-1042"})).unwrap();
        assert_eq!(buffer.contents(), "employee_number: EMP-1042\n");
    }

    #[test]
    fn test_set_pretty() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        out.set_pretty(true);
        assert_eq!(out.format(), OutputFormat::JsonPretty);
        out.data(&json!({"a": 1})).unwrap();
        assert_eq!(buffer.contents(), "{\n  \"a\": 1\n}\n");

        let (mut out, _) = writer(OutputFormat::Yaml);
        out.set_pretty(true);
        assert_eq!(out.format(), OutputFormat::Yaml);
    }

    #[test]
    fn test_messages_only_in_human_format() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        out.info("Loading table").unwrap();
        out.success("Done").unwrap();
        out.section("Report").unwrap();
        assert_eq!(buffer.contents(), "");

        let (mut out, buffer) = writer(OutputFormat::Human);
        out.info("Loading table").unwrap();
        out.warning("Careful").unwrap();
        assert_eq!(buffer.contents(), "INFO: Loading table\nWARNING: Careful\n");
    }

    #[test]
    fn test_quiet_suppresses_info() {
        let buffer = SharedBuffer::default();
        let mut out = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
        out.info("hidden").unwrap();
        out.error("shown").unwrap();
        assert_eq!(buffer.contents(), "ERROR: shown\n");
    }

    #[test]
    fn test_skipped_table() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        out.skipped_table(&sample_report().skipped).unwrap();

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#"));
        assert!(lines[1].contains("┼"));
        assert!(lines[2].contains("manager_id"));
        assert!(lines[3].contains("a..b"));
    }

    #[test]
    fn test_no_spinner_for_custom_writer() {
        let (out, _) = writer(OutputFormat::Human);
        assert!(out.spinner("Transforming").is_none());
    }
}

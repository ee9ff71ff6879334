//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use verdict_core::OutcomeView;

use crate::input::Document;

/// Markdown formatter - outputs one table row per document
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    document_count: usize,
    failure_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document_count: 0,
            failure_count: 0,
        }
    }
}

/// Keep table cells on one line and pipes literal
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, document: &Document) -> Result<()> {
        if self.document_count == 0 {
            writeln!(self.writer, "| Source | State | Status | Errors | First error |")?;
            writeln!(self.writer, "|---|---|---|---|---|")?;
        }
        self.document_count += 1;

        let outcome = &document.outcome;
        let state = if outcome.is_success() {
            "success"
        } else {
            self.failure_count += 1;
            "**failure**"
        };
        writeln!(
            self.writer,
            "| {} | {} | {} | {} | {} |",
            cell(&document.source),
            state,
            cell(&outcome.status().to_string()),
            outcome.errors().len(),
            cell(outcome.first_error_message().unwrap_or("")),
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Documents: {}, failures: {}*",
            self.document_count, self.failure_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::capture::Capture;
    use verdict_core::{ErrorInfo, Outcome};

    #[test]
    fn test_table_and_footer() {
        let capture = Capture::default();
        let mut formatter = MarkdownFormatter::new(capture.clone());
        formatter
            .format_document(&Document {
                source: "ok.json".to_string(),
                outcome: Outcome::success().into(),
            })
            .unwrap();
        formatter
            .format_document(&Document {
                source: "bad.json".to_string(),
                outcome: Outcome::failure(ErrorInfo::validation("V", "a | b\nc")).into(),
            })
            .unwrap();
        formatter.finish().unwrap();

        let text = capture.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "| Source | State | Status | Errors | First error |");
        assert_eq!(lines[2], "| ok.json | success | 200 OK | 0 |  |");
        assert_eq!(lines[3], "| bad.json | **failure** | 400 Bad Request | 1 | a \\| b c |");
        assert!(text.ends_with("---\n*Documents: 2, failures: 1*\n"));
    }
}

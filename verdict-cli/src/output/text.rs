//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::{self, Write};
use verdict_core::{ErrorInfo, OutcomeView};

use crate::input::Document;

/// Plain text formatter - one block per document with the error tree
/// indented by depth
pub struct TextFormatter<W: Write> {
    writer: W,
    show_extensions: bool,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_extensions: true,
            documents: 0,
        }
    }

    /// Include extension entries under each error
    pub fn show_extensions(mut self, show: bool) -> Self {
        self.show_extensions = show;
        self
    }

    fn write_error(&mut self, node: &ErrorInfo, depth: usize) -> io::Result<()> {
        let indent = "  ".repeat(depth + 2);
        write!(
            self.writer,
            "{indent}[{}] {}: {}",
            node.category(),
            node.code(),
            node.message()
        )?;
        if let Some(detail) = node.detail() {
            write!(self.writer, " ({detail})")?;
        }
        writeln!(self.writer)?;
        if let Some(data) = node.data() {
            writeln!(self.writer, "{indent}  data: {data}")?;
        }
        if self.show_extensions {
            for (key, value) in node.extensions() {
                writeln!(self.writer, "{indent}  {key} = {value}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &Document) -> Result<()> {
        let outcome = &document.outcome;
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;

        writeln!(self.writer, "{}", document.source)?;
        let state = if outcome.is_success() { "success" } else { "failure" };
        writeln!(self.writer, "  state:  {state}")?;
        writeln!(self.writer, "  status: {}", outcome.status())?;
        writeln!(self.writer, "  shape:  {}", outcome.shape())?;
        if let Some(value) = outcome.value() {
            writeln!(self.writer, "  value:  {value}")?;
        }
        for message in outcome.messages() {
            writeln!(self.writer, "  message: {message}")?;
        }
        if !outcome.errors().is_empty() {
            writeln!(self.writer, "  errors:")?;
            for root in outcome.errors() {
                for (node, depth) in root.walk() {
                    self.write_error(node, depth)?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::capture::Capture;
    use verdict_core::{Outcome, ValueOutcome};

    fn render(documents: &[Document], show_extensions: bool) -> String {
        let capture = Capture::default();
        let mut formatter = TextFormatter::new(capture.clone()).show_extensions(show_extensions);
        for document in documents {
            formatter.format_document(document).unwrap();
        }
        formatter.finish().unwrap();
        capture.text()
    }

    #[test]
    fn test_success_block() {
        let document = Document {
            source: "ok.json".to_string(),
            outcome: ValueOutcome::success(serde_json::json!(42)).with_message("ok").into(),
        };
        let text = render(&[document], true);
        assert!(text.starts_with("ok.json\n  state:  success\n  status: 200 OK\n"));
        assert!(text.contains("  shape:  valued<"));
        assert!(text.contains("  value:  42\n"));
        assert!(text.ends_with("  message: ok\n"));
        assert!(!text.contains("errors:"));
    }

    #[test]
    fn test_error_tree_is_indented() {
        let tree = ErrorInfo::validation("Order.Invalid", "Order is invalid")
            .with_extension("traceId", "abc")
            .with_inner(ErrorInfo::validation("Line.Qty", "Quantity must be positive").with_detail("line 3"));
        let document = Document {
            source: "bad.json".to_string(),
            outcome: Outcome::failure(tree).into(),
        };

        let text = render(&[document.clone()], true);
        assert!(text.contains("  state:  failure\n"));
        assert!(text.contains("  status: 400 Bad Request\n"));
        assert!(text.contains("    [Validation] Order.Invalid: Order is invalid\n"));
        assert!(text.contains("      traceId = \"abc\"\n"));
        assert!(text.contains("      [Validation] Line.Qty: Quantity must be positive (line 3)\n"));

        let hidden = render(&[document], false);
        assert!(!hidden.contains("traceId"));
    }

    #[test]
    fn test_documents_separated_by_blank_line() {
        let document = Document {
            source: "x.json".to_string(),
            outcome: Outcome::success().into(),
        };
        let text = render(&[document.clone(), document], true);
        assert_eq!(text.matches("x.json\n").count(), 2);
        assert!(text.contains("\n\nx.json\n"));
    }
}

//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use verdict_core::{ErrorInfo, OutcomeView, Status};

use crate::input::Document;

/// JSON formatter - collects one record per document and writes them as a
/// single array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<DocumentRecord>,
}

/// Summary of one document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Where the document came from
    pub source: String,
    /// `valueless` or `valued<T>`
    pub shape: String,
    /// Derived success flag
    pub is_success: bool,
    /// Resolved status
    pub status: Status,
    /// Informational messages
    pub messages: Vec<String>,
    /// First error message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Number of nodes across all error trees
    pub error_count: usize,
    /// Depth of the deepest error tree
    pub max_depth: usize,
    /// The error trees
    pub errors: Vec<ErrorInfo>,
}

impl DocumentRecord {
    /// Summarize a document
    pub fn from_document(document: &Document) -> Self {
        let outcome = &document.outcome;
        Self {
            source: document.source.clone(),
            shape: outcome.shape().to_string(),
            is_success: outcome.is_success(),
            status: outcome.status().clone(),
            messages: outcome.messages().to_vec(),
            error_message: outcome.first_error_message().map(str::to_owned),
            error_count: outcome.errors().iter().map(|root| root.walk().count()).sum(),
            max_depth: outcome.errors().iter().map(ErrorInfo::depth).max().unwrap_or(0),
            errors: outcome.errors().to_vec(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &Document) -> Result<()> {
        self.records.push(DocumentRecord::from_document(document));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

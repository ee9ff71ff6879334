//! File reading utilities

use anyhow::{Context, Result};
use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One JSON value, checked for syntax and discarded. Nesting grows the
/// stack on demand so arbitrarily deep documents can be split.
struct SkippedValue;

impl<'de> Deserialize<'de> for SkippedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(serde_stacker::Deserializer::new(deserializer))?;
        Ok(SkippedValue)
    }
}

/// Reads outcome documents from files
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Split text holding one or more concatenated JSON values (a single
    /// document, JSON Lines, or pretty-printed blocks) into one slice per
    /// value. Only syntax is checked here.
    pub fn split_documents(text: &str) -> serde_json::Result<Vec<&str>> {
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let mut stream = de.into_iter::<SkippedValue>();

        let mut documents = Vec::new();
        let mut start = 0;
        while let Some(item) = stream.next() {
            item?;
            let end = stream.byte_offset();
            documents.push(text[start..end].trim());
            start = end;
        }
        Ok(documents)
    }
}

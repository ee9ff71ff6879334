//! Input handling module
//!
//! Files are resolved from patterns, split into documents and decoded in
//! parallel. Output order follows the sorted file list, then the position of
//! each document inside its file.

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use verdict_core::{AnyOutcome, JsonCodec};

use crate::error::CliError;
use crate::progress::ProgressReporter;

/// One decoded outcome document
#[derive(Debug, Clone)]
pub struct Document {
    /// File path, suffixed with `#n` when the file holds several documents
    pub source: String,
    /// The decoded outcome
    pub outcome: AnyOutcome,
}

/// Decode every document in `path`
pub fn decode_file(path: &Path, codec: &JsonCodec) -> Result<Vec<Document>> {
    let text = FileReader::read_text(path)?;
    let display = path.display().to_string();

    let slices = FileReader::split_documents(&text).map_err(|e| CliError::DecodeError {
        source: display.clone(),
        message: e.to_string(),
    })?;
    let many = slices.len() > 1;

    slices
        .into_iter()
        .enumerate()
        .map(|(index, slice)| {
            let source = if many {
                format!("{display}#{}", index + 1)
            } else {
                display.clone()
            };
            let outcome = codec.decode_any(slice).map_err(|e| CliError::DecodeError {
                source: source.clone(),
                message: e.to_string(),
            })?;
            Ok(Document { source, outcome })
        })
        .collect()
}

/// Decode all files on a pool of `threads` workers
pub fn decode_files(
    files: &[PathBuf],
    codec: &JsonCodec,
    threads: usize,
    progress: &ProgressReporter,
) -> Result<Vec<Document>> {
    log::info!("Decoding {} file(s) on {} thread(s)", files.len(), threads);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let per_file: Vec<Vec<Document>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let documents = decode_file(path, codec)?;
                log::debug!("{}: {} document(s)", path.display(), documents.len());
                progress.file_completed(&path.display().to_string());
                Ok(documents)
            })
            .collect::<Result<_>>()
    })?;

    Ok(per_file.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use verdict_core::OutcomeView;

    #[test]
    fn test_decode_file_single_document_keeps_plain_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.json");
        fs::write(&path, r#"{"value": 1, "status": {"code": 200}}"#).unwrap();

        let docs = decode_file(&path, &JsonCodec::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, path.display().to_string());
        assert!(docs[0].outcome.is_success());
    }

    #[test]
    fn test_decode_file_numbers_multiple_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("many.jsonl");
        fs::write(&path, "{\"status\": {\"code\": 200}}\n{}\n").unwrap();

        let docs = decode_file(&path, &JsonCodec::default()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].source.ends_with("many.jsonl#1"));
        assert!(docs[1].source.ends_with("many.jsonl#2"));
        assert!(docs[1].outcome.is_failure());
    }

    #[test]
    fn test_non_object_document_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("array.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = decode_file(&path, &JsonCodec::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::DecodeError { .. })
        ));
    }

    #[test]
    fn test_decode_file_with_very_deep_error_tree() {
        let depth = 100_000;
        let mut text = String::from(r#"{"status": {"code": 422}, "errors": ["#);
        for _ in 0..depth {
            text.push_str(r#"{"code": "E", "message": "m", "innerErrors": ["#);
        }
        text.push_str(&"]}".repeat(depth));
        text.push_str("]}");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep.json");
        fs::write(&path, text).unwrap();

        let docs = decode_file(&path, &JsonCodec::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].outcome.status().code(), 422);
        assert_eq!(docs[0].outcome.errors()[0].depth(), depth);
    }

    #[test]
    fn test_decode_files_preserves_order() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for code in [200, 404, 201, 500] {
            let path = dir.path().join(format!("{code}.json"));
            fs::write(&path, format!(r#"{{"status": {{"code": {code}}}}}"#)).unwrap();
            files.push(path);
        }

        let docs = decode_files(&files, &JsonCodec::default(), 3, &ProgressReporter::new(true)).unwrap();
        let codes: Vec<u32> = docs.iter().map(|d| d.outcome.status().code()).collect();
        assert_eq!(codes, vec![200, 404, 201, 500]);
    }
}

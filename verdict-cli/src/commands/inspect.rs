//! Inspect command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use verdict_core::{JsonCodec, OutcomeView};

use super::{init_logging, open_output};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{decode_files, resolve_patterns};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Report format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with status 2 when any document is a failure
    #[arg(long)]
    pub fail_on_failure: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let codec = JsonCodec::new(config.codec.clone());
        let files = resolve_patterns(&self.input)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);
        let documents = decode_files(
            &files,
            &codec,
            config.performance.effective_threads(),
            &progress,
        )?;
        progress.finish();

        let format = self.format.unwrap_or(config.output.default_format);
        let out = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(format, out, config.output.show_extensions);
        for document in &documents {
            formatter.format_document(document)?;
        }
        formatter.finish()?;

        let failed = documents.iter().filter(|d| d.outcome.is_failure()).count();
        log::info!("Inspected {} document(s), {} failure(s)", documents.len(), failed);

        if self.fail_on_failure && failed > 0 {
            return Err(CliError::FailedOutcomes {
                failed,
                total: documents.len(),
            }
            .into());
        }
        Ok(())
    }
}

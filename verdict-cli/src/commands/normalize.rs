//! Normalize command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use verdict_core::json::{CategoryFormat, ExtensionLayout};
use verdict_core::{CodecOptions, JsonCodec, NamingPolicy};

use super::{init_logging, open_output};
use crate::config::CliConfig;
use crate::input::{decode_files, resolve_patterns};
use crate::progress::ProgressReporter;

/// Arguments for the normalize command
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Property naming policy (camel_case, pascal_case, snake_case, kebab_case, verbatim)
    #[arg(long, value_name = "POLICY")]
    pub naming: Option<NamingPolicy>,

    /// Write categories as names or ordinals
    #[arg(long, value_name = "FORMAT")]
    pub category_format: Option<CategoryFormat>,

    /// Keep error extensions nested or flatten them into the error object
    #[arg(long, value_name = "LAYOUT")]
    pub extension_layout: Option<ExtensionLayout>,

    /// Pretty-print each document
    #[arg(long)]
    pub pretty: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let codec = JsonCodec::new(self.codec_options(config.codec));
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

        let mut out = open_output(self.output.as_deref())?;
        for document in &documents {
            let encoded = codec
                .encode_any(&document.outcome)
                .with_context(|| format!("Failed to encode {}", document.source))?;
            writeln!(out, "{encoded}")?;
        }
        out.flush()?;

        log::info!("Normalized {} document(s)", documents.len());
        Ok(())
    }

    /// Command-line flags override the configuration file
    fn codec_options(&self, base: CodecOptions) -> CodecOptions {
        let mut options = base;
        if let Some(naming) = self.naming {
            options = options.naming_policy(naming);
        }
        if let Some(format) = self.category_format {
            options = options.category_format(format);
        }
        if let Some(layout) = self.extension_layout {
            options = options.extension_layout(layout);
        }
        if self.pretty {
            options = options.pretty(true);
        }
        options
    }
}

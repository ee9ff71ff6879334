//! CLI command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub mod generate_config;
pub mod inspect;
pub mod list;
pub mod normalize;

use crate::error::CliResult;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode outcome documents and re-encode them with the configured options
    Normalize(normalize::NormalizeArgs),

    /// Report the state, status and error tree of outcome documents
    Inspect(inspect::InspectArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List property naming policies
    NamingPolicies,

    /// List report formats
    Formats,

    /// List registered statuses
    Statuses,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Normalize(args) => args.execute(),
            Commands::Inspect(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand, &mut io::stdout().lock()),
        }
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Writer for command output: the given file, or stdout
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

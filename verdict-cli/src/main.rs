//! verdict command-line tool

use clap::Parser;
use std::process::ExitCode;
use verdict_cli::commands::Commands;
use verdict_cli::CliError;

/// Normalize and inspect outcome documents
#[derive(Debug, Parser)]
#[command(name = "verdict", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<CliError>() {
                Some(CliError::FailedOutcomes { .. }) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_inspect() {
        let cli = Cli::try_parse_from(["verdict", "inspect", "-i", "a.json", "-f", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }
}

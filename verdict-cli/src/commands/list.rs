//! List command implementation

use anyhow::Result;
use std::io::Write;
use verdict_core::{NamingPolicy, StatusRegistry};

use super::ListCommands;
use crate::output::OutputFormat;

/// Write the requested listing to `out`
pub fn execute<W: Write>(subcommand: ListCommands, out: &mut W) -> Result<()> {
    match subcommand {
        ListCommands::NamingPolicies => {
            writeln!(out, "Naming policies:")?;
            for policy in NamingPolicy::ALL {
                writeln!(out, "  {:<12} {}", policy.as_str(), policy.apply("errorMessage"))?;
            }
        }
        ListCommands::Formats => {
            writeln!(out, "Report formats:")?;
            for format in OutputFormat::ALL {
                writeln!(out, "  {}", format.as_str())?;
            }
        }
        ListCommands::Statuses => {
            writeln!(out, "Registered statuses:")?;
            for status in StatusRegistry::global().snapshot() {
                writeln!(out, "  {status}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(subcommand: ListCommands) -> String {
        let mut out = Vec::new();
        execute(subcommand, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_naming_policies_show_example() {
        let text = listing(ListCommands::NamingPolicies);
        assert!(text.contains("snake_case   error_message"));
        assert!(text.contains("pascal_case  ErrorMessage"));
        assert_eq!(text.lines().count(), 1 + NamingPolicy::ALL.len());
    }

    #[test]
    fn test_formats() {
        let text = listing(ListCommands::Formats);
        assert!(text.contains("  markdown\n"));
    }

    #[test]
    fn test_statuses_include_well_known() {
        let text = listing(ListCommands::Statuses);
        assert!(text.contains("  200 OK\n"));
        assert!(text.contains("  404 Not Found\n"));
    }
}

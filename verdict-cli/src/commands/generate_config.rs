//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

const TEMPLATE: &str = r#"# verdict configuration

[codec]
# Property naming: camel_case, pascal_case, snake_case, kebab_case, verbatim
naming_policy = "camel_case"

# Error categories on the wire: name ("Validation") or ordinal (2)
category_format = "name"

# Error extensions: nested (under "extensions") or flattened (into the error)
extension_layout = "nested"

# Pretty-print re-encoded documents
pretty = false

# Decode error trees of any depth; false keeps serde_json's limit of 128
unbounded_depth = true

[output]
# Default report format for `inspect`: text, json, markdown
default_format = "text"

# Show extension entries under each error in text reports
show_extensions = true

[performance]
# Worker threads for decoding (0 = one per CPU)
worker_threads = 0
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it with:");
        println!("   verdict inspect -i 'outcomes/*.json' -c {}", self.output.display());
        Ok(())
    }
}

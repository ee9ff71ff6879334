//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use verdict_core::CodecOptions;

use crate::error::CliError;
use crate::output::OutputFormat;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Codec options used to decode and re-encode documents
    #[serde(default)]
    pub codec: CodecOptions,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format for `inspect`
    pub default_format: OutputFormat,

    /// Show extension entries of each error in text reports
    pub show_extensions: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            show_extensions: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = one per CPU)
    pub worker_threads: usize,
}

impl PerformanceConfig {
    /// Worker threads after resolving `0`
    pub fn effective_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("{}: {}", path.display(), e.message()))
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the file when one is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use verdict_core::json::ExtensionLayout;
    use verdict_core::NamingPolicy;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.codec, CodecOptions::default());
        assert_eq!(config.output.default_format, OutputFormat::Text);
        assert!(config.output.show_extensions);
        assert_eq!(config.performance.worker_threads, 0);
        assert!(config.performance.effective_threads() >= 1);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[codec]
naming_policy = "snake_case"
extension_layout = "flattened"

[output]
default_format = "markdown"
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.codec.naming_policy, NamingPolicy::SnakeCase);
        assert_eq!(config.codec.extension_layout, ExtensionLayout::Flattened);
        assert!(config.codec.unbounded_depth);
        assert_eq!(config.output.default_format, OutputFormat::Markdown);
        assert!(config.output.show_extensions);
        assert_eq!(config.performance, PerformanceConfig::default());
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[codec]\nnaming_policy = \"shouting\"\n").unwrap();

        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/verdict.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
        assert_eq!(CliConfig::load_or_default(None).unwrap(), CliConfig::default());
    }
}

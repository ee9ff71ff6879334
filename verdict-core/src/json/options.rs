//! Codec configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::naming::NamingPolicy;

/// How error categories are written
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFormat {
    /// Symbolic name, e.g. `"Validation"`
    #[default]
    Name,
    /// Numeric ordinal, e.g. `2`
    Ordinal,
}

/// Where error extension entries are written
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionLayout {
    /// Under a nested `extensions` object
    #[default]
    Nested,
    /// As top-level properties of the error object. Keys that collide with
    /// fixed field names stay nested.
    Flattened,
}

/// Options for [`JsonCodec`](super::JsonCodec)
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```toml
/// naming_policy = "snake_case"
/// extension_layout = "flattened"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Naming policy applied to every property name
    pub naming_policy: NamingPolicy,
    /// Wire form of error categories
    pub category_format: CategoryFormat,
    /// Placement of error extension entries
    pub extension_layout: ExtensionLayout,
    /// Pretty-print encoded documents
    pub pretty: bool,
    /// Lift serde_json's nesting limit so error trees of any depth decode
    pub unbounded_depth: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            naming_policy: NamingPolicy::default(),
            category_format: CategoryFormat::default(),
            extension_layout: ExtensionLayout::default(),
            pretty: false,
            unbounded_depth: true,
        }
    }
}

impl CodecOptions {
    /// Set the naming policy
    pub fn naming_policy(mut self, policy: NamingPolicy) -> Self {
        self.naming_policy = policy;
        self
    }

    /// Set the category format
    pub fn category_format(mut self, format: CategoryFormat) -> Self {
        self.category_format = format;
        self
    }

    /// Set the extension layout
    pub fn extension_layout(mut self, layout: ExtensionLayout) -> Self {
        self.extension_layout = layout;
        self
    }

    /// Enable or disable pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable the nesting limit lift
    pub fn unbounded_depth(mut self, unbounded: bool) -> Self {
        self.unbounded_depth = unbounded;
        self
    }
}

/// Error returned when parsing an unknown option value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
}

impl FromStr for CategoryFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "symbolic" => Ok(CategoryFormat::Name),
            "ordinal" | "number" | "numeric" => Ok(CategoryFormat::Ordinal),
            _ => Err(UnknownOption {
                kind: "category format",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ExtensionLayout {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(ExtensionLayout::Nested),
            "flattened" | "flat" => Ok(ExtensionLayout::Flattened),
            _ => Err(UnknownOption {
                kind: "extension layout",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CategoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CategoryFormat::Name => "name",
            CategoryFormat::Ordinal => "ordinal",
        })
    }
}

impl fmt::Display for ExtensionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtensionLayout::Nested => "nested",
            ExtensionLayout::Flattened => "flattened",
        })
    }
}

//! Property naming policies
//!
//! Field names are declared once in camelCase and passed through the
//! configured policy before they hit the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How property names are written
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// `errorMessage`
    #[default]
    CamelCase,
    /// `ErrorMessage`
    PascalCase,
    /// `error_message`
    SnakeCase,
    /// `error-message`
    KebabCase,
    /// Names are written exactly as declared
    Verbatim,
}

impl NamingPolicy {
    /// Every policy
    pub const ALL: [NamingPolicy; 5] = [
        NamingPolicy::CamelCase,
        NamingPolicy::PascalCase,
        NamingPolicy::SnakeCase,
        NamingPolicy::KebabCase,
        NamingPolicy::Verbatim,
    ];

    /// Configuration name of the policy
    pub const fn as_str(self) -> &'static str {
        match self {
            NamingPolicy::CamelCase => "camel_case",
            NamingPolicy::PascalCase => "pascal_case",
            NamingPolicy::SnakeCase => "snake_case",
            NamingPolicy::KebabCase => "kebab_case",
            NamingPolicy::Verbatim => "verbatim",
        }
    }

    /// Rewrite `name` according to the policy
    pub fn apply(self, name: &str) -> String {
        if self == NamingPolicy::Verbatim {
            return name.to_owned();
        }

        let words = split_words(name);
        let mut out = String::with_capacity(name.len() + words.len());
        for (index, word) in words.iter().enumerate() {
            match self {
                NamingPolicy::CamelCase if index == 0 => out.push_str(&word.to_lowercase()),
                NamingPolicy::CamelCase | NamingPolicy::PascalCase => {
                    push_capitalized(&mut out, word)
                }
                NamingPolicy::SnakeCase | NamingPolicy::KebabCase => {
                    if index > 0 {
                        out.push(if self == NamingPolicy::SnakeCase { '_' } else { '-' });
                    }
                    out.push_str(&word.to_lowercase());
                }
                NamingPolicy::Verbatim => unreachable!("handled above"),
            }
        }
        out
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown naming policy '{0}' (expected one of: camel_case, pascal_case, snake_case, kebab_case, verbatim)")]
pub struct UnknownNamingPolicy(pub String);

impl FromStr for NamingPolicy {
    type Err = UnknownNamingPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "camel" | "camelcase" => Ok(NamingPolicy::CamelCase),
            "pascal" | "pascalcase" => Ok(NamingPolicy::PascalCase),
            "snake" | "snakecase" => Ok(NamingPolicy::SnakeCase),
            "kebab" | "kebabcase" => Ok(NamingPolicy::KebabCase),
            "verbatim" | "none" => Ok(NamingPolicy::Verbatim),
            _ => Err(UnknownNamingPolicy(s.to_string())),
        }
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

/// Split on separators and case transitions. A run of capitals stays one
/// word unless it is followed by a lowercase letter (`HTTPStatus` ->
/// `HTTP`, `Status`).
fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ' | '.') {
            if let Some(s) = start.take() {
                words.push(&name[s..pos]);
            }
            continue;
        }
        match start {
            None => start = Some(pos),
            Some(s) if c.is_uppercase() => {
                let prev = chars[i - 1].1;
                let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());
                if !prev.is_uppercase() || next_is_lower {
                    words.push(&name[s..pos]);
                    start = Some(pos);
                }
            }
            Some(_) => {}
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

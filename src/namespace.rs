//! Namespace paths locating a section of a token document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// A non-empty sequence of keys, e.g. `["base/colors", "figma"]`.
///
/// Written as a YAML/JSON list in config, or as a `.`-separated string on the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    pub fn new(segments: Vec<String>) -> Result<Self, TokenError> {
        if segments.is_empty() {
            return Err(TokenError::InvalidNamespace("namespace path is empty".to_string()));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::InvalidNamespace(format!(
                "namespace path '{}' contains an empty key",
                segments.join(".")
            )));
        }
        Ok(Self { segments })
    }

    /// The terminal key and the ancestors leading to it.
    pub fn split_last(&self) -> (&String, &[String]) {
        // new() guarantees at least one segment
        match self.segments.split_last() {
            Some(parts) => parts,
            None => unreachable!("namespace path is never empty"),
        }
    }

    /// Default target for extracted colors.
    pub fn figma_colors() -> Self {
        Self {
            segments: vec!["base/colors".to_string(), "figma".to_string()],
        }
    }

    /// Default target for whole-document passthrough.
    pub fn figma() -> Self {
        Self {
            segments: vec!["figma".to_string()],
        }
    }
}

impl TryFrom<Vec<String>> for NamespacePath {
    type Error = TokenError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<NamespacePath> for Vec<String> {
    fn from(path: NamespacePath) -> Self {
        path.segments
    }
}

impl FromStr for NamespacePath {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split('.').map(str::to_string).collect())
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

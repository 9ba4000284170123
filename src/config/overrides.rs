//! Command-line overrides.
//!
//! Values given on the command line win over anything loaded from a config file.

use std::path::PathBuf;

use crate::namespace::NamespacePath;

/// Configuration overrides for a single run.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override the base token document path.
    pub base: Option<PathBuf>,

    /// Override the extracted document path.
    pub extracted: Option<PathBuf>,

    /// Override the target namespace.
    pub namespace: Option<NamespacePath>,

    /// Override the source label in descriptions.
    pub source: Option<String>,

    /// Override the CSS output path.
    pub css_output: Option<PathBuf>,

    /// Override the CSS property prefix.
    pub css_prefix: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides (no overrides applied).
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.extracted.is_none()
            && self.namespace.is_none()
            && self.source.is_none()
            && self.css_output.is_none()
            && self.css_prefix.is_none()
    }
}

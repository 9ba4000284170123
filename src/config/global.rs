//! Global configuration.
//!
//! Loaded from .tokmerge.yml or ~/.config/tokmerge/tokmerge.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::overrides::ConfigOverrides;
use crate::css::CssOptions;
use crate::merge::{DEFAULT_SOURCE, MergeOptions};
use crate::namespace::NamespacePath;

/// Configuration for tokmerge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Default log filter when RUST_LOG is unset.
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Input and output file locations.
    pub paths: PathsConfig,

    /// Merge targets and labels.
    pub merge: MergeConfig,

    /// CSS output settings.
    pub css: CssConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            paths: PathsConfig::default(),
            merge: MergeConfig::default(),
            css: CssConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .tokmerge.yml in current directory
    /// 3. ~/.config/tokmerge/tokmerge.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project config
        let project_config = PathBuf::from(".tokmerge.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .tokmerge.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .tokmerge.yml: {:#}", e);
                    eprintln!("Warning: ignoring .tokmerge.yml: {:#}", e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tokmerge").join("tokmerge.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {:#}", user_config.display(), e);
                        eprintln!("Warning: ignoring {}: {:#}", user_config.display(), e);
                    }
                }
            }
        }

        // Use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.merge.source.trim().is_empty() {
            eyre::bail!("merge.source must not be empty");
        }
        if self.css.selector.trim().is_empty() {
            eyre::bail!("css.selector must not be empty");
        }
        Ok(())
    }

    /// Apply command-line overrides on top of loaded values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base) = &overrides.base {
            self.paths.base = base.clone();
        }
        if let Some(extracted) = &overrides.extracted {
            self.paths.extracted = extracted.clone();
            self.paths.export = extracted.clone();
        }
        if let Some(namespace) = &overrides.namespace {
            self.merge.namespace = namespace.clone();
            self.merge.passthrough_namespace = namespace.clone();
        }
        if let Some(source) = &overrides.source {
            self.merge.source = source.clone();
        }
        if let Some(output) = &overrides.css_output {
            self.paths.css_output = Some(output.clone());
        }
        if let Some(prefix) = &overrides.css_prefix {
            self.css.prefix = Some(prefix.clone());
        }
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions::with_source(self.merge.source.clone())
    }

    pub fn css_options(&self) -> CssOptions {
        CssOptions {
            prefix: self.css.prefix.clone(),
            selector: self.css.selector.clone(),
        }
    }
}

/// Input and output file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Token document that receives merged colors.
    pub base: PathBuf,

    /// Extracted document with a top-level `colors` map.
    pub extracted: PathBuf,

    /// Full design-file export for passthrough.
    pub export: PathBuf,

    /// CSS output file; stdout when unset.
    #[serde(rename = "css-output")]
    pub css_output: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("tokens/tokens.json"),
            extracted: PathBuf::from("tokens/figma-extracted.json"),
            export: PathBuf::from("tokens/figma-export.json"),
            css_output: None,
        }
    }
}

/// Merge targets and labels.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Where extracted colors are written.
    pub namespace: NamespacePath,

    /// Where a full export is written.
    #[serde(rename = "passthrough-namespace")]
    pub passthrough_namespace: NamespacePath,

    /// Source named in token descriptions.
    pub source: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            namespace: NamespacePath::figma_colors(),
            passthrough_namespace: NamespacePath::figma(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

/// CSS output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CssConfig {
    pub prefix: Option<String>,
    pub selector: String,
}

impl Default for CssConfig {
    fn default() -> Self {
        let defaults = CssOptions::default();
        Self {
            prefix: defaults.prefix,
            selector: defaults.selector,
        }
    }
}

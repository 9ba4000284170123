//! Configuration system for tokmerge.
//!
//! Two layers:
//! 1. Config file (.tokmerge.yml or ~/.config/tokmerge/tokmerge.yml)
//! 2. Command-line overrides

use eyre::Result;
use std::path::PathBuf;

pub use self::global::{Config, CssConfig, MergeConfig, PathsConfig};
pub use self::overrides::ConfigOverrides;

mod global;
mod overrides;

/// Load configuration and apply overrides.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. .tokmerge.yml in current directory (project config)
/// 3. ~/.config/tokmerge/tokmerge.yml (user config)
/// 4. Default values
pub fn load_config(explicit_path: Option<&PathBuf>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::load(explicit_path)?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        // Should succeed with defaults when no config file exists
        let config = load_config(None, &ConfigOverrides::none()).unwrap();
        assert_eq!(config.merge.source, "Figma");
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let overrides = ConfigOverrides {
            source: Some("Penpot".to_string()),
            ..Default::default()
        };
        let config = load_config(None, &overrides).unwrap();
        assert_eq!(config.merge.source, "Penpot");
    }
}

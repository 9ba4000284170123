//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - colors: merge the extracted color map (default)
//! - passthrough: insert a whole design-file export
//! - css: render tokens as CSS custom properties

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tokmerge::config::ConfigOverrides;
use tokmerge::namespace::NamespacePath;

/// tokmerge - merge extracted design-file colors into a token document
#[derive(Parser, Debug)]
#[command(name = "tokmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base token document to merge into
    #[arg(long, global = true)]
    pub base: Option<PathBuf>,

    /// Extracted document to merge from
    #[arg(long, global = true)]
    pub extracted: Option<PathBuf>,

    /// Target namespace, keys separated by '.' (e.g. base/colors.figma)
    #[arg(short, long, global = true)]
    pub namespace: Option<NamespacePath>,

    /// Print the merged document instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Collect config overrides from flags.
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            base: self.base.clone(),
            extracted: self.extracted.clone(),
            namespace: self.namespace.clone(),
            ..Default::default()
        };
        match &self.command {
            Some(Commands::Colors { source }) => overrides.source = source.clone(),
            Some(Commands::Css { output, prefix }) => {
                overrides.css_output = output.clone();
                overrides.css_prefix = prefix.clone();
            }
            Some(Commands::Passthrough) | None => {}
        }
        overrides
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge the extracted color map into the base document (default)
    Colors {
        /// Source named in token descriptions
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Insert a whole design-file export into the base document
    Passthrough,

    /// Render the base document as CSS custom properties
    Css {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix for every property name
        #[arg(short, long)]
        prefix: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        // No args should result in None command (color merge)
        let cli = Cli::try_parse_from(["tokmerge"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
        assert!(cli.overrides().is_empty());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["tokmerge", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["tokmerge", "-c", "/path/to/tokmerge.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/tokmerge.yml")));
    }

    #[test]
    fn test_cli_namespace_option() {
        let cli = Cli::try_parse_from(["tokmerge", "--namespace", "base/colors.figma"]).unwrap();
        assert_eq!(cli.namespace, Some(NamespacePath::figma_colors()));
    }

    #[test]
    fn test_cli_rejects_empty_namespace() {
        assert!(Cli::try_parse_from(["tokmerge", "--namespace", "a..b"]).is_err());
    }

    #[test]
    fn test_colors_source() {
        let cli = Cli::try_parse_from(["tokmerge", "colors", "--source", "Penpot", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.overrides().source.as_deref(), Some("Penpot"));
    }

    #[test]
    fn test_passthrough() {
        let cli = Cli::try_parse_from(["tokmerge", "passthrough", "--extracted", "export.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Passthrough)));
        assert_eq!(cli.overrides().extracted, Some(PathBuf::from("export.json")));
    }

    #[test]
    fn test_css_options() {
        let cli = Cli::try_parse_from(["tokmerge", "css", "-o", "tokens.css", "-p", "ds"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.css_output, Some(PathBuf::from("tokens.css")));
        assert_eq!(overrides.css_prefix.as_deref(), Some("ds"));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}

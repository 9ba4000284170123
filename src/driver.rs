//! One run of the tool: load inputs, merge, write the base file back.
//!
//! Both inputs are loaded and validated before anything is written, so a
//! missing or malformed input leaves the base file untouched.

use std::path::PathBuf;

use log::info;

use crate::config::Config;
use crate::css;
use crate::error::Result;
use crate::extract::{self, ExtractedColorMap};
use crate::merge::{self, MergeOutcome, MergeReport};
use crate::store;

/// Where a run's result went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Written to this file.
    Written(PathBuf),
    /// Returned for printing instead of being written.
    Stdout(String),
}

/// Result of a merge run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: MergeReport,
    pub output: Output,
}

/// Merge the extracted color map into the base document.
pub fn run_colors(config: &Config, dry_run: bool) -> Result<RunSummary> {
    info!(
        "Merging colors from {} into {}",
        config.paths.extracted.display(),
        config.paths.base.display()
    );
    let base = store::load_document(&config.paths.base)?;
    let extracted = ExtractedColorMap::from_document(&store::read_json(&config.paths.extracted)?)?;
    info!("Read {} extracted colors", extracted.len());

    let outcome = merge::merge_extracted_colors(base, &extracted, &config.merge.namespace, &config.merge_options())?;
    finish(config, outcome, dry_run)
}

/// Insert the whole design-file export into the base document.
pub fn run_passthrough(config: &Config, dry_run: bool) -> Result<RunSummary> {
    info!(
        "Inserting {} into {}",
        config.paths.export.display(),
        config.paths.base.display()
    );
    let base = store::load_document(&config.paths.base)?;
    let export = extract::passthrough_document(store::read_json(&config.paths.export)?)?;

    let outcome = merge::merge_passthrough(base, export, &config.merge.passthrough_namespace)?;
    finish(config, outcome, dry_run)
}

/// Render the base document as CSS custom properties.
pub fn run_css(config: &Config) -> Result<Output> {
    let document = store::load_document(&config.paths.base)?;
    let content = css::to_css(&document, &config.css_options());
    info!("Rendered {} CSS properties", document.leaves().len());

    match &config.paths.css_output {
        Some(path) => {
            store::write_atomic(path, content.as_bytes())?;
            info!("Wrote {}", path.display());
            Ok(Output::Written(path.clone()))
        }
        None => Ok(Output::Stdout(content)),
    }
}

fn finish(config: &Config, outcome: MergeOutcome, dry_run: bool) -> Result<RunSummary> {
    let output = if dry_run {
        info!("Dry run, not writing {}", config.paths.base.display());
        Output::Stdout(outcome.document.to_pretty_json()?)
    } else {
        store::write_document(&config.paths.base, &outcome.document)?;
        Output::Written(config.paths.base.clone())
    };
    Ok(RunSummary {
        report: outcome.report,
        output,
    })
}

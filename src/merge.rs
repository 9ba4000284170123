//! Token merger.
//!
//! Both merge flavors end in the same place: build one subtree and replace
//! whatever sits at the target namespace with it. Keys outside the namespace
//! are never touched.

use std::fmt;

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};

use crate::error::Result;
use crate::extract::ExtractedColorMap;
use crate::namespace::NamespacePath;
use crate::normalize::normalize_name;
use crate::token::{TokenDocument, TokenGroup, TokenNode, TokenValue};

/// Default label for where extracted colors came from.
pub const DEFAULT_SOURCE: &str = "Figma";

/// Settings for a color merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Named in each token's description.
    pub source: String,
    /// Run date stamped into each token's description.
    pub date: NaiveDate,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            date: Utc::now().date_naive(),
        }
    }
}

impl MergeOptions {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn description(&self) -> String {
        format!("Extracted from {} on {}", self.source, self.date.format("%Y-%m-%d"))
    }
}

/// What a merge did with each incoming entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Entries that created a new key.
    pub added: usize,
    /// Entries that overwrote a key with a different value.
    pub overwritten: usize,
    /// Entries whose key already held the same value.
    pub duplicates: usize,
    /// Entries whose name normalized to nothing.
    pub skipped: usize,
}

impl MergeReport {
    pub fn total(&self) -> usize {
        self.added + self.overwritten + self.duplicates + self.skipped
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} overwritten, {} duplicates, {} skipped",
            self.added, self.overwritten, self.duplicates, self.skipped
        )
    }
}

/// A merged document and the tally of how it got there.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub document: TokenDocument,
    pub report: MergeReport,
}

/// Fold a flat color map into `namespace`, replacing its previous contents.
///
/// Raw names are normalized with [`normalize_name`]. When several names land
/// on the same key, an entry is only written if its value differs from the
/// one already recorded, so the last differing value in iteration order wins.
pub fn merge_extracted_colors(
    base: TokenDocument,
    extracted: &ExtractedColorMap,
    namespace: &NamespacePath,
    options: &MergeOptions,
) -> Result<MergeOutcome> {
    let description = options.description();
    let mut colors = TokenGroup::new();
    let mut report = MergeReport::default();

    for (raw_name, value) in extracted.iter() {
        let key = normalize_name(raw_name);
        if key.is_empty() {
            warn!("Skipping extracted color '{}': name is empty after normalization", raw_name);
            report.skipped += 1;
            continue;
        }

        let existing = colors.get(&key).and_then(TokenNode::as_leaf).and_then(TokenValue::value_str);
        match existing {
            Some(current) if current == value => {
                debug!("'{}' duplicates '{}' = {}", raw_name, key, value);
                report.duplicates += 1;
                continue;
            }
            Some(current) => {
                debug!("'{}' overwrites '{}': {} -> {}", raw_name, key, current, value);
                report.overwritten += 1;
            }
            None => report.added += 1,
        }
        colors.insert(key, TokenNode::Leaf(TokenValue::color(value, description.as_str())));
    }

    info!(
        "Merging {} colors into '{}' ({})",
        colors.len(),
        namespace,
        report
    );

    let mut document = base;
    document.replace_at(namespace, TokenNode::Group(colors))?;
    Ok(MergeOutcome { document, report })
}

/// Insert a whole extracted document at `namespace` without normalization.
pub fn merge_passthrough(base: TokenDocument, extracted: TokenNode, namespace: &NamespacePath) -> Result<MergeOutcome> {
    let report = MergeReport {
        added: extracted.as_group().map_or(1, TokenGroup::len),
        ..Default::default()
    };
    info!("Replacing '{}' with extracted document ({} top-level keys)", namespace, report.added);

    let mut document = base;
    document.replace_at(namespace, extracted)?;
    Ok(MergeOutcome { document, report })
}

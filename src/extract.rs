//! Extracted document readers.
//!
//! Two shapes come out of the design-file export step: a flat color map under
//! a top-level `colors` key, and a full `{variables, styles}` export that is
//! inserted as-is.

use serde_json::Value;

use crate::error::{Result, TokenError};
use crate::token::TokenNode;

/// Raw export names mapped to color strings, in fold order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedColorMap {
    entries: Vec<(String, String)>,
}

impl ExtractedColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `colors` section of an extracted document.
    ///
    /// Entries are sorted by raw name so colliding names resolve the same way
    /// on every run.
    pub fn from_document(document: &Value) -> Result<Self> {
        let root = document
            .as_object()
            .ok_or_else(|| TokenError::MalformedInput("extracted document root must be an object".to_string()))?;
        let colors = root
            .get("colors")
            .ok_or_else(|| TokenError::MalformedInput("extracted document has no 'colors' field".to_string()))?
            .as_object()
            .ok_or_else(|| TokenError::MalformedInput("'colors' must be an object".to_string()))?;

        let mut entries = colors
            .iter()
            .map(|(name, value)| match value {
                Value::String(color) => Ok((name.clone(), color.clone())),
                _ => Err(TokenError::MalformedInput(format!("colors.{} is not a string", name))),
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtractedColorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Validate a full export for passthrough insertion.
pub fn passthrough_document(document: Value) -> Result<TokenNode> {
    if !document.is_object() {
        return Err(TokenError::MalformedInput(
            "design-file export root must be an object".to_string(),
        ));
    }
    Ok(TokenNode::from_value(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_colors_sorted() {
        let doc = json!({ "colors": { "foo-9": "#ffffff", ".Bar": "#000", "foo-3": "#000000" } });
        let map = ExtractedColorMap::from_document(&doc).unwrap();
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![".Bar", "foo-3", "foo-9"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_empty_colors_is_valid() {
        let map = ExtractedColorMap::from_document(&json!({ "colors": {} })).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_missing_colors_field() {
        let err = ExtractedColorMap::from_document(&json!({ "variables": {} })).unwrap_err();
        assert!(matches!(err, TokenError::MalformedInput(_)));
    }

    #[test]
    fn test_non_string_color() {
        let err = ExtractedColorMap::from_document(&json!({ "colors": { "a": 1 } })).unwrap_err();
        assert!(err.to_string().contains("colors.a"));
    }

    #[test]
    fn test_non_object_root() {
        assert!(ExtractedColorMap::from_document(&json!(["colors"])).is_err());
        assert!(passthrough_document(json!("export")).is_err());
    }

    #[test]
    fn test_from_iter_keeps_caller_order() {
        let map: ExtractedColorMap = [("b", "#2"), ("a", "#1")].into_iter().collect();
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_passthrough_keeps_export() {
        let export = json!({ "variables": { "v1": { "name": "x" } }, "styles": [] });
        let node = passthrough_document(export.clone()).unwrap();
        assert_eq!(node.to_value(), export);
    }
}

//! CSS custom property output.
//!
//! Downstream styles consume tokens as CSS variables. Every token becomes one
//! `--<path>: <value>;` declaration, where `<path>` is its key path joined
//! with `-`. The token's `value` is emitted as-is.

use log::debug;
use serde_json::Value;

use crate::token::{TokenDocument, TokenValue};

/// Settings for CSS output.
#[derive(Debug, Clone)]
pub struct CssOptions {
    /// Prepended to every property name, e.g. `ds` gives `--ds-...`.
    pub prefix: Option<String>,
    /// Selector the declarations are scoped to.
    pub selector: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            selector: ":root".to_string(),
        }
    }
}

/// Render every scalar token in the document as a CSS custom property.
pub fn to_css(document: &TokenDocument, options: &CssOptions) -> String {
    let mut out = format!("{} {{\n", options.selector);
    for (path, token) in document.leaves() {
        let Some(value) = css_value(token) else {
            debug!("Skipping non-scalar token {}", path.join("."));
            continue;
        };
        out.push_str(&format!("  {}: {};\n", property_name(&path, options.prefix.as_deref()), value));
    }
    out.push_str("}\n");
    out
}

/// Build a custom property name from a key path.
pub fn property_name(path: &[&str], prefix: Option<&str>) -> String {
    let segments = prefix
        .into_iter()
        .chain(path.iter().copied())
        .map(sanitize_segment)
        .collect::<Vec<_>>();
    format!("--{}", segments.join("-"))
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

fn css_value(token: &TokenValue) -> Option<String> {
    match &token.value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_name() {
        assert_eq!(property_name(&["base/colors", "figma", "frame-header"], None), "--base-colors-figma-frame-header");
        assert_eq!(property_name(&["Spacing", "Small Gap"], Some("ds")), "--ds-spacing-small-gap");
    }

    #[test]
    fn test_to_css() {
        let doc = TokenDocument::from_value(json!({
            "base/colors": {
                "figma": { "frame-header": { "value": "#ABCDEF", "type": "color" } }
            },
            "size": { "value": 4 },
            "shadow": { "value": { "x": 1 } },
            "$themes": []
        }))
        .unwrap();

        let css = to_css(&doc, &CssOptions::default());
        assert_eq!(css, ":root {\n  --base-colors-figma-frame-header: #ABCDEF;\n  --size: 4;\n}\n");
    }

    #[test]
    fn test_empty_document() {
        let options = CssOptions {
            prefix: Some("ds".to_string()),
            selector: ".theme".to_string(),
        };
        assert_eq!(to_css(&TokenDocument::new(), &options), ".theme {\n}\n");
    }
}

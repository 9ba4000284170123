//! Token document model.
//!
//! A token document is a tree of groups whose leaves are tokens. Parsing is
//! validating at the root and lossless below it: anything that is neither a
//! token nor a group is kept verbatim as [`TokenNode::Raw`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Result, TokenError};
use crate::namespace::NamespacePath;

/// Children of a group, keyed by name.
pub type TokenGroup = BTreeMap<String, TokenNode>;

/// A single design token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenValue {
    /// The authoritative output value, usually a color string.
    pub value: Value,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any other keys on the token (e.g. `$extensions`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenValue {
    /// Create a color token.
    pub fn color(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: Value::String(value.into()),
            token_type: Some("color".to_string()),
            description: Some(description.into()),
            extra: Map::new(),
        }
    }

    /// The value as a string, if it is one.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let value = map.remove("value").unwrap_or_default();
        let token_type = match map.remove("type") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let description = match map.remove("description") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        Self {
            value,
            token_type,
            description,
            extra: map,
        }
    }

    fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert("value".to_string(), self.value.clone());
        if let Some(token_type) = &self.token_type {
            map.insert("type".to_string(), Value::String(token_type.clone()));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), Value::String(description.clone()));
        }
        Value::Object(map)
    }
}

/// A node in the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(TokenValue),
    Group(TokenGroup),
    Raw(Value),
}

/// An object is a token when it has a `value` and its `type`/`description`
/// are strings when present. Anything else would not survive the round trip.
fn is_leaf(map: &Map<String, Value>) -> bool {
    let string_or_absent = |key: &str| matches!(map.get(key), None | Some(Value::String(_)));
    map.contains_key("value") && string_or_absent("type") && string_or_absent("description")
}

impl TokenNode {
    /// Classify a JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if is_leaf(&map) => TokenNode::Leaf(TokenValue::from_map(map)),
            Value::Object(map) => TokenNode::Group(group_from_map(map)),
            other => TokenNode::Raw(other),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            TokenNode::Leaf(token) => token.to_value(),
            TokenNode::Group(children) => Value::Object(group_to_map(children)),
            TokenNode::Raw(value) => value.clone(),
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenValue> {
        match self {
            TokenNode::Leaf(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TokenNode::Group(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            TokenNode::Leaf(_) => "token",
            TokenNode::Group(_) => "group",
            TokenNode::Raw(_) => "raw value",
        }
    }
}

fn group_from_map(map: Map<String, Value>) -> TokenGroup {
    map.into_iter()
        .map(|(key, value)| (key, TokenNode::from_value(value)))
        .collect()
}

fn group_to_map(group: &TokenGroup) -> Map<String, Value> {
    group
        .iter()
        .map(|(key, node)| (key.clone(), node.to_value()))
        .collect()
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TokenNode::Leaf(token) => token.serialize(serializer),
            TokenNode::Group(children) => children.serialize(serializer),
            TokenNode::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TokenNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(TokenNode::from_value)
    }
}

/// The root of a token tree. Always a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDocument {
    root: TokenGroup,
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validating parse: the root must be a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                root: group_from_map(map),
            }),
            other => Err(TokenError::MalformedInput(format!(
                "token document root must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse JSON text. Syntax errors are reported as malformed input.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| TokenError::MalformedInput(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(group_to_map(&self.root))
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        Ok(content)
    }

    pub fn root(&self) -> &TokenGroup {
        &self.root
    }

    /// Look up the node at a namespace path.
    pub fn get(&self, namespace: &NamespacePath) -> Option<&TokenNode> {
        let (terminal, ancestors) = namespace.split_last();
        let mut group = &self.root;
        for key in ancestors {
            group = group.get(key)?.as_group()?;
        }
        group.get(terminal)
    }

    /// Replace the node at `namespace`, creating missing intermediate groups.
    ///
    /// Returns the node previously stored there. Fails without touching the
    /// document when an intermediate key holds something other than a group.
    pub fn replace_at(&mut self, namespace: &NamespacePath, node: TokenNode) -> Result<Option<TokenNode>> {
        let (terminal, ancestors) = namespace.split_last();

        let mut group = &self.root;
        for (depth, key) in ancestors.iter().enumerate() {
            match group.get(key) {
                Some(TokenNode::Group(children)) => group = children,
                Some(other) => {
                    return Err(TokenError::NamespaceConflict(format!(
                        "'{}' is a {}, not a group",
                        ancestors[..=depth].join("."),
                        other.kind()
                    )));
                }
                None => break,
            }
        }

        let mut group = &mut self.root;
        for key in ancestors {
            let child = group
                .entry(key.clone())
                .or_insert_with(|| TokenNode::Group(TokenGroup::new()));
            group = match child {
                TokenNode::Group(children) => children,
                other => {
                    return Err(TokenError::NamespaceConflict(format!(
                        "'{}' is a {}, not a group",
                        key,
                        other.kind()
                    )));
                }
            };
        }

        Ok(group.insert(terminal.clone(), node))
    }

    /// Every token in the document with its key path, in key order.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &TokenValue)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

fn collect_leaves<'a>(
    group: &'a TokenGroup,
    path: &mut Vec<&'a str>,
    out: &mut Vec<(Vec<&'a str>, &'a TokenValue)>,
) {
    for (key, node) in group {
        path.push(key.as_str());
        match node {
            TokenNode::Leaf(token) => out.push((path.clone(), token)),
            TokenNode::Group(children) => collect_leaves(children, path, out),
            TokenNode::Raw(_) => {}
        }
        path.pop();
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for TokenDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TokenDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TokenDocument::from_value(value).map_err(serde::de::Error::custom)
    }
}

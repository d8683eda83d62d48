//! YAML parsing and emitting for document trees.
//!
//! This module is the text-facing edge of the crate. It uses `serde_yaml` to
//! read a YAML string into a [`Node`] tree and to render a tree back to text.
//! The patch engine itself never sees text.
//!
//! # Example
//!
//! ```
//! use yamlpatch::document::parser::{parse_yaml, to_yaml_string};
//!
//! let yaml = "name: web\ninstances: 2\n";
//! let node = parse_yaml(yaml).unwrap();
//!
//! assert!(node.as_mapping().unwrap().matches("name", "web"));
//! assert_eq!(to_yaml_string(&node).unwrap(), yaml);
//! ```

use super::node::{convert_native, Node};
use anyhow::{Context, Result};
use serde_yaml::Value as SerdeValue;

/// Parses a YAML string into a [`Node`].
///
/// Empty input (or input holding only whitespace and comments) yields a
/// `null` scalar. Custom tags are dropped and their inner value is kept.
///
/// # Errors
///
/// This function will return an error if:
/// - The input is not valid YAML
/// - The input holds more than one document
/// - A mapping uses a sequence or mapping as a key
///
/// # Examples
///
/// ```
/// use yamlpatch::document::parser::parse_yaml;
///
/// let node = parse_yaml("[1, 2, 3]").unwrap();
/// assert_eq!(node.as_sequence().unwrap().len(), 3);
///
/// assert!(parse_yaml("key: [unclosed").is_err());
/// ```
pub fn parse_yaml(yaml_str: &str) -> Result<Node> {
    let value: SerdeValue = if yaml_str.trim().is_empty() {
        SerdeValue::Null
    } else {
        serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?
    };

    parse_value(&value)
}

/// Parses raw bytes holding UTF-8 YAML into a [`Node`].
pub fn parse_yaml_bytes(bytes: &[u8]) -> Result<Node> {
    let yaml_str = std::str::from_utf8(bytes).context("YAML input is not valid UTF-8")?;
    parse_yaml(yaml_str)
}

/// Converts an already-parsed `serde_yaml::Value` into a [`Node`].
pub fn parse_value(value: &SerdeValue) -> Result<Node> {
    convert_native(value, true).context("Failed to convert YAML into a document tree")
}

/// Renders a [`Node`] as a YAML string.
///
/// The output always ends with a newline.
pub fn to_yaml_string(node: &Node) -> Result<String> {
    let mut yaml = serde_yaml::to_string(&node.to_native()).context("Failed to serialize YAML")?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(yaml)
}

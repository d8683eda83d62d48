//! Ops files: operations written down as YAML.
//!
//! An ops file is a YAML sequence of mappings:
//!
//! ```yaml
//! - type: replace
//!   path: /jobs/name=web/instances
//!   value: 3
//! - type: remove
//!   path: /jobs/name=worker?
//! - type: test
//!   path: /jobs/name=db
//!   absent: true
//! ```
//!
//! A malformed entry does not stop the file from loading. It becomes an
//! [`ErrOp`] in its slot and fails when the ops are applied, so earlier
//! entries still report their own errors first.

use super::descriptive::DescriptiveOp;
use super::err_op::ErrOp;
use super::error::PatchError;
use super::ops::{Op, Ops};
use super::remove::RemoveOp;
use super::replace::ReplaceOp;
use super::test_op::TestOp;
use crate::pointer::Pointer;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// One entry of an ops file.
///
/// Fields are kept as loose YAML so that a wrongly typed field is reported by
/// [`OpDefinition::to_op`] instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,

    /// `Some(Value::Null)` for an explicit `value: null`, `None` when the key
    /// is left out.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absent: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Problems with an individual ops file entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Missing operation type")]
    MissingType,

    #[error("Expected operation type to be a string")]
    InvalidType,

    #[error("Unknown operation type '{kind}'")]
    UnknownType { kind: String },

    #[error("Missing path for '{kind}' operation")]
    MissingPath { kind: String },

    #[error("Missing value for '{kind}' operation")]
    MissingValue { kind: String },

    #[error("Cannot specify value for '{kind}' operation")]
    UnexpectedValue { kind: String },

    #[error("Cannot specify absent for '{kind}' operation")]
    UnexpectedAbsent { kind: String },

    #[error("Expected {field} for '{kind}' operation to be {expected}")]
    InvalidField {
        field: &'static str,
        kind: String,
        expected: &'static str,
    },

    #[error("Expected either value or absent for 'test' operation, but not both")]
    TestExpectation,
}

impl OpDefinition {
    /// Builds a definition from its typed parts.
    pub fn new(kind: &str, path: &str) -> Self {
        Self {
            kind: Some(Value::from(kind)),
            path: Some(Value::from(path)),
            ..Self::default()
        }
    }

    /// Builds the op this entry describes.
    pub fn to_op(&self) -> Result<Op, PatchError> {
        let kind = match &self.kind {
            None => return Err(DefinitionError::MissingType.into()),
            Some(Value::String(kind)) => kind.as_str(),
            Some(_) => return Err(DefinitionError::InvalidType.into()),
        };
        if !matches!(kind, "replace" | "remove" | "test") {
            return Err(DefinitionError::UnknownType {
                kind: kind.to_string(),
            }
            .into());
        }

        let path = match &self.path {
            None => {
                return Err(DefinitionError::MissingPath {
                    kind: kind.to_string(),
                }
                .into())
            }
            Some(Value::String(path)) => Pointer::parse(path)?,
            Some(_) => return Err(invalid_field("path", kind, "a string")),
        };
        let absent = match &self.absent {
            None => false,
            Some(Value::Bool(absent)) => *absent,
            Some(_) => return Err(invalid_field("absent", kind, "a boolean")),
        };

        let op: Op = match kind {
            "replace" => {
                if absent {
                    return Err(unexpected_absent(kind));
                }
                let value = self.value.clone().ok_or_else(|| DefinitionError::MissingValue {
                    kind: kind.to_string(),
                })?;
                ReplaceOp::new(path, value).into()
            }
            "remove" => {
                if absent {
                    return Err(unexpected_absent(kind));
                }
                if self.value.is_some() {
                    return Err(DefinitionError::UnexpectedValue {
                        kind: kind.to_string(),
                    }
                    .into());
                }
                RemoveOp::new(path).into()
            }
            _ => match (&self.value, absent) {
                (Some(value), false) => TestOp::value(path, value.clone()).into(),
                (None, true) => TestOp::absent(path).into(),
                _ => return Err(DefinitionError::TestExpectation.into()),
            },
        };
        Ok(op)
    }
}

fn invalid_field(field: &'static str, kind: &str, expected: &'static str) -> PatchError {
    DefinitionError::InvalidField {
        field,
        kind: kind.to_string(),
        expected,
    }
    .into()
}

fn unexpected_absent(kind: &str) -> PatchError {
    DefinitionError::UnexpectedAbsent {
        kind: kind.to_string(),
    }
    .into()
}

/// Parses ops file text into entries. Blank text holds no entries.
///
/// Only the overall shape is checked here: a sequence of mappings.
pub fn parse_definitions(text: &str) -> Result<Vec<OpDefinition>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(text).context("Failed to parse operation definitions")
}

/// Turns entries into ops, labelling each with its position in `source`.
pub fn ops_from_definitions(definitions: &[OpDefinition], source: &str) -> Ops {
    definitions
        .iter()
        .enumerate()
        .map(|(idx, definition)| {
            let op = definition
                .to_op()
                .unwrap_or_else(|err| ErrOp::new(err).into());
            DescriptiveOp::new(op, format!("operation [{}] in {} failed", idx, source)).into()
        })
        .collect()
}

/// Parses ops file text straight into ops.
pub fn parse_ops(text: &str, source: &str) -> Result<Ops> {
    let definitions = parse_definitions(text)?;
    Ok(ops_from_definitions(&definitions, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(text: &str) -> OpDefinition {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_present_null_differs_from_missing_value() {
        let with_null = definition("type: replace\npath: /a\nvalue: null\n");
        assert_eq!(with_null.value, Some(Value::Null));

        let without = definition("type: replace\npath: /a\n");
        assert_eq!(without.value, None);
    }

    #[test]
    fn test_builds_each_kind() {
        let replace = definition("type: replace\npath: /a\nvalue: 1\n").to_op().unwrap();
        assert_eq!(replace, ReplaceOp::new(Pointer::parse("/a").unwrap(), 1).into());

        let remove = definition("type: remove\npath: /a\n").to_op().unwrap();
        assert_eq!(remove, RemoveOp::new(Pointer::parse("/a").unwrap()).into());

        let absent = definition("type: test\npath: /a\nabsent: true\n").to_op().unwrap();
        assert_eq!(absent, TestOp::absent(Pointer::parse("/a").unwrap()).into());
    }

    #[test]
    fn test_rejects_bad_entries() {
        let cases = [
            ("type: add\npath: /a\n", "Unknown operation type 'add'"),
            ("path: /a\n", "Missing operation type"),
            ("type: [remove]\npath: /a\n", "Expected operation type to be a string"),
            ("type: remove\npath: [a]\n", "Expected path for 'remove' operation to be a string"),
            (
                "type: test\npath: /a\nabsent: yes please\n",
                "Expected absent for 'test' operation to be a boolean",
            ),
            ("type: remove\n", "Missing path for 'remove' operation"),
            ("type: replace\npath: /a\n", "Missing value for 'replace' operation"),
            ("type: remove\npath: /a\nvalue: 1\n", "Cannot specify value for 'remove' operation"),
            ("type: remove\npath: /a\nabsent: true\n", "Cannot specify absent for 'remove' operation"),
            (
                "type: test\npath: /a\nvalue: 1\nabsent: true\n",
                "Expected either value or absent for 'test' operation, but not both",
            ),
            (
                "type: test\npath: /a\n",
                "Expected either value or absent for 'test' operation, but not both",
            ),
        ];

        for (text, message) in cases {
            let err = definition(text).to_op().unwrap_err();
            assert_eq!(err.to_string(), message, "for {:?}", text);
        }
    }

    #[test]
    fn test_invalid_entries_become_err_ops() {
        let ops = parse_ops("- type: remove\n  path: /a\n- type: bogus\n", "ops").unwrap();
        assert_eq!(ops.len(), 2);

        let labels: Vec<_> = ops
            .iter()
            .map(|op| match op {
                Op::Descriptive(op) => op.label().to_string(),
                other => panic!("unexpected op {:?}", other),
            })
            .collect();
        assert_eq!(
            labels,
            vec!["operation [0] in ops failed", "operation [1] in ops failed"]
        );

        match ops.iter().nth(1) {
            Some(Op::Descriptive(op)) => assert!(matches!(op.inner(), Op::Err(_))),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_blank_text_holds_no_entries() {
        assert!(parse_definitions("").unwrap().is_empty());
        assert!(parse_definitions("a: 1").is_err());
    }
}

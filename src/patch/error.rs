//! Error types for patch operations.
//!
//! Every variant renders a stable message; callers and ops-file authors rely
//! on the exact wording, so changes here are breaking.

use crate::document::node::{CloneError, Mapping, Node, NodeKind};
use crate::pointer::{Modifier, Pointer, PointerError, TokenKind};
use std::fmt;
use thiserror::Error;

use super::definitions::DefinitionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("Expected to find {} at path '{path}' but found '{}'", .expected.with_article(), .found.kind())]
    MismatchType {
        expected: NodeKind,
        path: Pointer,
        found: Node,
    },

    #[error("Expected to find a map key '{key}' for path '{path}' ({siblings})")]
    MissingMapKey {
        key: String,
        path: Pointer,
        siblings: SiblingKeys,
    },

    #[error("Expected to find array index '{index}' but found array of length '{length}' for path '{path}'")]
    MissingIndex {
        /// The index after applying modifiers, before negative wrapping.
        index: isize,
        length: usize,
        path: Pointer,
    },

    #[error("Expected to find exactly one matching array item for path '{path}' but found {}", .indices.len())]
    MultipleMatchingIndex { path: Pointer, indices: Vec<usize> },

    #[error("Expected to not find token '{kind}' at path '{path}'")]
    UnexpectedToken { kind: TokenKind, path: Pointer },

    #[error("Expected to find one of the following modifiers: 'prev', 'next', but found modifier '{found}'")]
    UnexpectedModifier { found: Modifier },

    #[error("Expected to not find any modifiers after '{placement}' modifier, but found modifier '{found}'")]
    ModifierAfterPlacement { placement: Modifier, found: Modifier },

    #[error("Cannot remove entire document")]
    RemoveRoot,

    #[error("Expected to not find '{path}'")]
    TestPresent { path: Pointer },

    #[error("Found value does not match expected value for path '{path}'")]
    TestMismatch { path: Pointer },

    #[error("Cloning value: {0}")]
    CloneValue(#[from] CloneError),

    #[error(transparent)]
    Pointer(#[from] PointerError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Error '{label}': {source}")]
    Descriptive {
        label: String,
        source: Box<PatchError>,
    },
}

impl PatchError {
    pub(crate) fn missing_map_key(key: &str, path: Pointer, mapping: &Mapping) -> Self {
        PatchError::MissingMapKey {
            key: key.to_string(),
            path,
            siblings: SiblingKeys::of(mapping),
        }
    }

    /// Returns the path at which resolution failed, for the errors that carry one.
    pub fn path(&self) -> Option<&Pointer> {
        match self {
            PatchError::MismatchType { path, .. }
            | PatchError::MissingMapKey { path, .. }
            | PatchError::MissingIndex { path, .. }
            | PatchError::MultipleMatchingIndex { path, .. }
            | PatchError::UnexpectedToken { path, .. }
            | PatchError::TestPresent { path }
            | PatchError::TestMismatch { path } => Some(path),
            _ => None,
        }
    }

    /// Returns true for the "nothing there" errors that an absence test accepts.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            PatchError::MissingMapKey { .. } | PatchError::MissingIndex { .. }
        )
    }
}

/// The string keys next to a missing key, reported to help spot typos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingKeys {
    /// Sorted string keys of the mapping.
    pub keys: Vec<String>,
    /// Entry count including non-string keys.
    pub total: usize,
}

impl SiblingKeys {
    pub fn of(mapping: &Mapping) -> Self {
        let mut keys = Vec::new();
        mapping.for_each_key(|key| keys.push(key.to_string()));
        keys.sort();
        Self {
            keys,
            total: mapping.len(),
        }
    }
}

impl fmt::Display for SiblingKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "found no other map keys");
        }
        write!(f, "found map keys: '{}'", self.keys.join("', '"))
    }
}

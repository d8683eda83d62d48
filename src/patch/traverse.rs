//! Per-token checks shared by the find, replace, and remove walks.
//!
//! Walks index tokens by their absolute position in the pointer, so the
//! path naming the current location is always `path.prefix(i + 1)`.

use super::error::PatchError;
use crate::document::node::{Mapping, Node, NodeKind, Sequence};
use crate::pointer::{Pointer, Token};
use log::debug;

/// Requires `node` to be a sequence for token `i`.
pub(crate) fn expect_sequence<'n>(
    node: &'n Node,
    path: &Pointer,
    i: usize,
) -> Result<&'n Sequence, PatchError> {
    node.as_sequence().ok_or_else(|| PatchError::MismatchType {
        expected: NodeKind::Sequence,
        path: path.prefix(i + 1),
        found: node.clone(),
    })
}

/// Requires `node` to be a mapping for token `i`.
pub(crate) fn expect_mapping<'n>(
    node: &'n Node,
    path: &Pointer,
    i: usize,
) -> Result<&'n Mapping, PatchError> {
    node.as_mapping().ok_or_else(|| PatchError::MismatchType {
        expected: NodeKind::Mapping,
        path: path.prefix(i + 1),
        found: node.clone(),
    })
}

/// Positions of the mapping elements whose `key` holds the string `value`.
pub(crate) fn matching_indices(seq: &Sequence, key: &str, value: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    seq.for_each(|item, idx| {
        if let Some(map) = item.as_mapping() {
            if map.matches(key, value) {
                indices.push(idx);
            }
        }
    });
    indices
}

/// Reduces a match list to its only element.
pub(crate) fn single_match(
    indices: Vec<usize>,
    path: &Pointer,
    i: usize,
) -> Result<isize, PatchError> {
    match indices.as_slice() {
        [only] => Ok(*only as isize),
        _ => Err(PatchError::MultipleMatchingIndex {
            path: path.prefix(i + 1),
            indices,
        }),
    }
}

/// Which walk is asking for a stand-in container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Walk {
    Find,
    Replace,
}

/// Builds the empty container that stands in for the missing optional key at
/// token `i`, shaped by the token after it.
///
/// A following key needs a mapping and a following matching index needs a
/// sequence. Replace also accepts `-`, which appends to a fresh sequence.
pub(crate) fn placeholder(path: &Pointer, i: usize, walk: Walk) -> Result<Node, PatchError> {
    let next = &path.tokens()[i + 1];
    let node = match next {
        Token::Key { .. } => Node::empty_mapping(),
        Token::MatchingIndex { .. } => Node::empty_sequence(),
        Token::AfterLastIndex if walk == Walk::Replace => Node::empty_sequence(),
        other => {
            return Err(PatchError::UnexpectedToken {
                kind: other.kind(),
                path: path.prefix(i + 2),
            })
        }
    };
    debug!(
        "missing optional segment at '{}', continuing with empty {}",
        path.prefix(i + 1),
        node.kind()
    );
    Ok(node)
}

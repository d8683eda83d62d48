//! Resolution of the write position for replace operations.

use super::array_index::ArrayIndex;
use super::error::PatchError;
use crate::document::node::{Node, Sequence};
use crate::pointer::{Modifier, Pointer};

/// A base index plus its full modifier chain, including an optional trailing
/// `before`/`after`.
#[derive(Debug, Clone, Copy)]
pub struct ArrayInsertion<'a> {
    pub index: isize,
    pub modifiers: &'a [Modifier],
    pub length: usize,
    pub path: &'a Pointer,
}

/// Where and how a value lands in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayInsertionIndex {
    position: usize,
    insert: bool,
}

impl ArrayInsertion<'_> {
    /// Splits off a trailing `before`/`after`, resolves the rest through
    /// [`ArrayIndex`], then picks the insertion side.
    pub fn concrete(&self) -> Result<ArrayInsertionIndex, PatchError> {
        let mut relative = Vec::with_capacity(self.modifiers.len());
        let mut placement = None;

        for modifier in self.modifiers {
            if let Some(placement) = placement {
                return Err(PatchError::ModifierAfterPlacement {
                    placement,
                    found: *modifier,
                });
            }
            if modifier.is_relative() {
                relative.push(*modifier);
            } else {
                placement = Some(*modifier);
            }
        }

        let mut position = ArrayIndex {
            index: self.index,
            modifiers: &relative,
            length: self.length,
            path: self.path,
        }
        .concrete()?;

        if placement == Some(Modifier::After) && position != self.length {
            position += 1;
        }

        Ok(ArrayInsertionIndex {
            position,
            insert: placement.is_some(),
        })
    }
}

impl ArrayInsertionIndex {
    pub fn new(position: usize, insert: bool) -> Self {
        Self { position, insert }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// True when the value is spliced in rather than overwriting an element.
    pub fn is_insert(&self) -> bool {
        self.insert
    }

    /// Applies the write to `seq`, returning the updated sequence.
    pub fn update(&self, seq: &Sequence, node: Node) -> Sequence {
        if self.insert {
            seq.insert_at(self.position, node)
        } else {
            seq.replace_at(self.position, node)
        }
    }
}

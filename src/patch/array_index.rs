//! Resolution of a sequence index under `prev`/`next` modifiers.

use super::error::PatchError;
use crate::pointer::{Modifier, Pointer};

/// A base index plus its modifier chain, ready to be resolved against a
/// sequence of `length` elements.
#[derive(Debug, Clone, Copy)]
pub struct ArrayIndex<'a> {
    pub index: isize,
    pub modifiers: &'a [Modifier],
    pub length: usize,
    pub path: &'a Pointer,
}

impl ArrayIndex<'_> {
    /// Resolves to a concrete, in-bounds position.
    ///
    /// Modifiers are applied left to right on the raw value; only the final
    /// value is bounds-checked, against both the positive and the
    /// from-the-end reading. Negative values wrap once, after the check.
    pub fn concrete(&self) -> Result<usize, PatchError> {
        let mut result = self.index;

        for modifier in self.modifiers {
            match modifier {
                Modifier::Previous => result = result.saturating_sub(1),
                Modifier::Next => result = result.saturating_add(1),
                other => return Err(PatchError::UnexpectedModifier { found: *other }),
            }
        }

        let length = isize::try_from(self.length).unwrap_or(isize::MAX);
        let from_end_out_of_bounds = result
            .checked_neg()
            .map_or(true, |negated| negated - 1 >= length);

        if result >= length || from_end_out_of_bounds {
            return Err(PatchError::MissingIndex {
                index: result,
                length: self.length,
                path: self.path.clone(),
            });
        }

        if result < 0 {
            result += length;
        }

        Ok(result as usize)
    }
}

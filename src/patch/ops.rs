//! The operation type and the sequencing combinator.

use super::descriptive::DescriptiveOp;
use super::err_op::ErrOp;
use super::error::PatchError;
use super::find::FindOp;
use super::remove::RemoveOp;
use super::replace::ReplaceOp;
use super::test_op::TestOp;
use crate::document::node::Node;
use log::debug;

/// A single patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Find(FindOp),
    Replace(ReplaceOp),
    Remove(RemoveOp),
    Test(TestOp),
    Descriptive(DescriptiveOp),
    Err(ErrOp),
}

impl Op {
    /// Applies the op, returning the updated document. `doc` is never modified.
    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        match self {
            Op::Find(op) => op.apply(doc),
            Op::Replace(op) => op.apply(doc),
            Op::Remove(op) => op.apply(doc),
            Op::Test(op) => op.apply(doc),
            Op::Descriptive(op) => op.apply(doc),
            Op::Err(op) => op.apply(doc),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Op::Find(_) => "find",
            Op::Replace(_) => "replace",
            Op::Remove(_) => "remove",
            Op::Test(_) => "test",
            Op::Descriptive(op) => op.inner().name(),
            Op::Err(_) => "invalid",
        }
    }
}

impl From<FindOp> for Op {
    fn from(op: FindOp) -> Self {
        Op::Find(op)
    }
}

impl From<ReplaceOp> for Op {
    fn from(op: ReplaceOp) -> Self {
        Op::Replace(op)
    }
}

impl From<RemoveOp> for Op {
    fn from(op: RemoveOp) -> Self {
        Op::Remove(op)
    }
}

impl From<TestOp> for Op {
    fn from(op: TestOp) -> Self {
        Op::Test(op)
    }
}

impl From<DescriptiveOp> for Op {
    fn from(op: DescriptiveOp) -> Self {
        Op::Descriptive(op)
    }
}

impl From<ErrOp> for Op {
    fn from(op: ErrOp) -> Self {
        Op::Err(op)
    }
}

/// An ordered list of ops applied one after another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ops(Vec<Op>);

impl Ops {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: impl Into<Op>) {
        self.0.push(op.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.0.iter()
    }

    /// Folds every op over `doc`, stopping at the first failure.
    ///
    /// On failure nothing is returned but the error; `doc` is untouched.
    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        let mut current = doc.clone();
        for (idx, op) in self.0.iter().enumerate() {
            debug!("applying {} op [{}] of {}", op.name(), idx, self.0.len());
            current = op.apply(&current)?;
        }
        Ok(current)
    }
}

impl From<Vec<Op>> for Ops {
    fn from(ops: Vec<Op>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Op> for Ops {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Op> for Ops {
    fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Ops {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ops {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

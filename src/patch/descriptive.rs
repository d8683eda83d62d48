use super::error::PatchError;
use super::ops::Op;
use crate::document::node::Node;

/// Labels the failure of the op it wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveOp {
    op: Box<Op>,
    label: String,
}

impl DescriptiveOp {
    pub fn new(op: Op, label: impl Into<String>) -> Self {
        Self {
            op: Box::new(op),
            label: label.into(),
        }
    }

    pub fn inner(&self) -> &Op {
        &self.op
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        self.op.apply(doc).map_err(|err| PatchError::Descriptive {
            label: self.label.clone(),
            source: Box::new(err),
        })
    }
}

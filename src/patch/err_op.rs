use super::error::PatchError;
use crate::document::node::Node;

/// An op that was known to be invalid when it was built. Applying it always
/// fails with the stored error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrOp {
    error: PatchError,
}

impl ErrOp {
    pub fn new(error: impl Into<PatchError>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn error(&self) -> &PatchError {
        &self.error
    }

    pub fn apply(&self, _doc: &Node) -> Result<Node, PatchError> {
        Err(self.error.clone())
    }
}

//! Assertions against a document, applied in line with other ops.

use super::error::PatchError;
use super::find::FindOp;
use crate::document::node::Node;
use crate::pointer::Pointer;
use serde_yaml::Value;

/// What a [`TestOp`] expects to see at its path.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The node at the path equals this value.
    Value(Value),
    /// Nothing is there: the lookup stops exactly at the path.
    Absent,
}

/// Checks the document and passes it through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOp {
    path: Pointer,
    expectation: Expectation,
}

impl TestOp {
    pub fn value(path: Pointer, value: impl Into<Value>) -> Self {
        Self {
            path,
            expectation: Expectation::Value(value.into()),
        }
    }

    pub fn absent(path: Pointer) -> Self {
        Self {
            path,
            expectation: Expectation::Absent,
        }
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        let find = FindOp::new(self.path.clone());

        match &self.expectation {
            Expectation::Absent => match find.find(doc) {
                Ok(_) => Err(PatchError::TestPresent {
                    path: self.path.clone(),
                }),
                // A miss above the tested path is reported as is.
                Err(err) if err.is_missing() && err.path() == Some(&self.path) => {
                    Ok(doc.clone())
                }
                Err(err) => Err(err),
            },
            Expectation::Value(value) => {
                let expected = Node::from_native(value)?;
                let found = find.find(doc)?.unwrap_or_else(Node::null);
                if found != expected {
                    return Err(PatchError::TestMismatch {
                        path: self.path.clone(),
                    });
                }
                Ok(doc.clone())
            }
        }
    }
}

//! Patch operations over document trees.
//!
//! Each op takes a document and returns a new one; the input is never
//! modified, so a failed op leaves the caller's tree exactly as it was.
//!
//! # Examples
//!
//! ```
//! use yamlpatch::document::parser::{parse_yaml, to_yaml_string};
//! use yamlpatch::patch::{Ops, RemoveOp, ReplaceOp};
//! use yamlpatch::pointer::Pointer;
//!
//! let doc = parse_yaml("jobs:\n- name: web\n- name: worker\n").unwrap();
//!
//! let mut ops = Ops::new();
//! ops.push(RemoveOp::new(Pointer::parse("/jobs/name=worker").unwrap()));
//! ops.push(ReplaceOp::new(Pointer::parse("/jobs/0:after").unwrap(), "db"));
//!
//! let patched = ops.apply(&doc).unwrap();
//! assert_eq!(to_yaml_string(&patched).unwrap(), "jobs:\n- name: web\n- db\n");
//! ```

pub mod array_index;
pub mod array_insertion;
pub mod definitions;
pub mod descriptive;
pub mod err_op;
pub mod error;
pub mod find;
pub mod ops;
pub mod remove;
pub mod replace;
pub mod test_op;
mod traverse;

pub use array_index::ArrayIndex;
pub use array_insertion::{ArrayInsertion, ArrayInsertionIndex};
pub use definitions::{ops_from_definitions, parse_definitions, parse_ops, DefinitionError, OpDefinition};
pub use descriptive::DescriptiveOp;
pub use err_op::ErrOp;
pub use error::{PatchError, SiblingKeys};
pub use find::FindOp;
pub use ops::{Op, Ops};
pub use remove::RemoveOp;
pub use replace::ReplaceOp;
pub use test_op::{Expectation, TestOp};

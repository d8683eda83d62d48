//! Path-addressed patching of YAML documents.
//!
//! A document is parsed into a copy-on-write [`Node`](document::node::Node)
//! tree, edited by [`patch`] operations addressed with [`pointer`] paths,
//! and written back out.

pub mod config;
pub mod document;
pub mod file;
pub mod patch;
pub mod pointer;

pub use document::node::Node;
pub use patch::{Op, Ops, PatchError};
pub use pointer::Pointer;

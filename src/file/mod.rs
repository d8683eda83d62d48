//! File I/O for documents and ops files.
//!
//! Documents and ops files are read from disk or stdin, gunzipping `.gz`
//! input. Patched documents are written back atomically, with an optional
//! backup of the previous contents.

pub mod loader;
pub mod saver;

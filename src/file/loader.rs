//! Loading documents and ops files.
//!
//! Every loader accepts `-` for stdin. Files ending in `.gz` are gunzipped,
//! and stdin is gunzipped when it starts with the gzip magic bytes.

use crate::document::node::Node;
use crate::document::parser::parse_yaml;
use crate::patch::{parse_ops, Ops};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// The path that stands for stdin.
pub const STDIN_PATH: &str = "-";

/// Loads and parses a YAML document.
///
/// # Examples
///
/// ```no_run
/// use yamlpatch::file::loader::load_document;
///
/// let doc = load_document("deployment.yml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The contents are not valid YAML
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    let content = read_input(path)?;
    parse_yaml(&content).with_context(|| format!("Failed to load document '{}'", path.display()))
}

/// Loads an ops file, labelling each op with the file's name.
///
/// Malformed entries do not fail the load; see
/// [`ops_from_definitions`](crate::patch::ops_from_definitions).
pub fn load_ops_file<P: AsRef<Path>>(path: P) -> Result<Ops> {
    let path = path.as_ref();
    let content = read_input(path)?;
    let source = path.display().to_string();
    parse_ops(&content, &source).with_context(|| format!("Failed to load ops file '{}'", source))
}

/// Reads the whole input as text, handling stdin and gzip.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        return read_stdin();
    }

    if !is_gzipped(path) {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read file '{}'", path.display()));
    }

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    gunzip(file).with_context(|| format!("'{}' is not valid gzip", path.display()))
}

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("Failed to read stdin")?;

    if bytes.starts_with(&GZIP_MAGIC) {
        gunzip(bytes.as_slice()).context("stdin is not valid gzip")
    } else {
        String::from_utf8(bytes).context("stdin is not valid UTF-8")
    }
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn gunzip<R: Read>(reader: R) -> Result<String> {
    let mut text = String::new();
    GzDecoder::new(reader).read_to_string(&mut text)?;
    Ok(text)
}

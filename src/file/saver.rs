//! Saving patched documents.

use super::loader::is_gzipped;
use crate::config::Config;
use crate::document::node::Node;
use crate::document::parser::to_yaml_string;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders `node` as YAML text, honoring `trailing_newline`.
pub fn render_document(node: &Node, config: &Config) -> Result<String> {
    let mut yaml = to_yaml_string(node)?;
    if !config.trailing_newline {
        let trimmed = yaml.trim_end_matches('\n').len();
        yaml.truncate(trimmed);
    }
    Ok(yaml)
}

/// Saves a document, gzipping when `path` ends in `.gz`.
///
/// The write goes to a temporary file that is then renamed over `path`, so
/// the target is never left half written. With `create_backup` set, the
/// previous contents are copied to `<path>.bak` first.
///
/// # Examples
///
/// ```no_run
/// use yamlpatch::config::Config;
/// use yamlpatch::document::node::Node;
/// use yamlpatch::file::saver::save_document;
///
/// save_document("out.yml", &Node::empty_mapping(), &Config::default()).unwrap();
/// ```
pub fn save_document<P: AsRef<Path>>(path: P, node: &Node, config: &Config) -> Result<()> {
    let target = path.as_ref();

    if config.create_backup && target.exists() {
        let backup = sibling_path(target, ".bak");
        fs::copy(target, &backup)
            .with_context(|| format!("Failed to back up '{}'", target.display()))?;
    }

    let yaml = render_document(node, config)?;
    write_file_atomic(target, yaml.as_bytes(), is_gzipped(target))
        .with_context(|| format!("Failed to save '{}'", target.display()))
}

/// `path` with `suffix` appended to its file name.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let temp = sibling_path(path, ".tmp");
    let mut out = fs::File::create(&temp)
        .with_context(|| format!("Failed to create '{}'", temp.display()))?;

    if compress {
        let mut gz = GzEncoder::new(out, Compression::default());
        gz.write_all(data)?;
        gz.finish()?.sync_all()?;
    } else {
        out.write_all(data)?;
        out.sync_all()?;
    }

    fs::rename(&temp, path)
        .with_context(|| format!("Failed to move '{}' into place", temp.display()))
}

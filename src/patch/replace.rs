//! Writing a value at the location a pointer addresses.

use super::array_index::ArrayIndex;
use super::array_insertion::ArrayInsertion;
use super::error::PatchError;
use super::traverse::{
    expect_mapping, expect_sequence, matching_indices, placeholder, single_match, Walk,
};
use crate::document::node::Node;
use crate::pointer::{Pointer, Token};
use log::{debug, trace};
use serde_yaml::Value;

/// Installs a copy of `value` at `path`, rebuilding every ancestor.
///
/// Missing optional segments are created on the way down. The value is
/// deep-copied on each apply, so the op can be reused across documents.
///
/// # Examples
///
/// ```
/// use yamlpatch::document::parser::{parse_yaml, to_yaml_string};
/// use yamlpatch::patch::ReplaceOp;
/// use yamlpatch::pointer::Pointer;
///
/// let doc = parse_yaml("jobs:\n- name: web\n").unwrap();
/// let op = ReplaceOp::new(Pointer::parse("/jobs/name=web/port?").unwrap(), 80);
///
/// let patched = op.apply(&doc).unwrap();
/// assert_eq!(to_yaml_string(&patched).unwrap(), "jobs:\n- name: web\n  port: 80\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOp {
    path: Pointer,
    value: Value,
}

impl ReplaceOp {
    pub fn new(path: Pointer, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        let value = Node::from_native(&self.value)?;

        if self.path.is_root() {
            debug!("replace: swapping whole document");
            return Ok(value);
        }

        self.walk(doc, 1, &value)
    }

    /// Returns `node` rebuilt with the write applied below token `i`.
    fn walk(&self, node: &Node, i: usize, value: &Node) -> Result<Node, PatchError> {
        let tokens = self.path.tokens();
        let token = &tokens[i];
        let is_last = i + 1 == tokens.len();
        trace!("replace: token {} ({}) at '{}'", i, token.kind(), self.path.prefix(i));

        match token {
            Token::Index { index, modifiers } => {
                let seq = expect_sequence(node, &self.path, i)?;
                let curr = self.path.prefix(i + 1);

                if is_last {
                    let at = ArrayInsertion {
                        index: *index,
                        modifiers,
                        length: seq.len(),
                        path: &curr,
                    }
                    .concrete()?;
                    return Ok(at.update(seq, value.clone()).into());
                }

                let idx = ArrayIndex {
                    index: *index,
                    modifiers,
                    length: seq.len(),
                    path: &curr,
                }
                .concrete()?;
                let child = self.walk(&seq[idx], i + 1, value)?;
                Ok(seq.replace_at(idx, child).into())
            }

            Token::AfterLastIndex => {
                let seq = expect_sequence(node, &self.path, i)?;
                if !is_last {
                    return Err(PatchError::UnexpectedToken {
                        kind: token.kind(),
                        path: self.path.prefix(i + 1),
                    });
                }
                Ok(seq.append(value.clone()).into())
            }

            Token::MatchingIndex {
                key,
                value: expected,
                optional,
                modifiers,
            } => {
                let seq = expect_sequence(node, &self.path, i)?;
                let indices = matching_indices(seq, key, expected);

                if *optional && indices.is_empty() {
                    debug!(
                        "replace: no item matches '{}', appending",
                        self.path.prefix(i + 1)
                    );
                    if is_last {
                        return Ok(seq.append(value.clone()).into());
                    }
                    let synthetic = Node::single_key_mapping(key, expected);
                    let child = self.walk(&synthetic, i + 1, value)?;
                    return Ok(seq.append(child).into());
                }

                let base = single_match(indices, &self.path, i)?;
                let curr = self.path.prefix(i + 1);

                if is_last {
                    let at = ArrayInsertion {
                        index: base,
                        modifiers,
                        length: seq.len(),
                        path: &curr,
                    }
                    .concrete()?;
                    return Ok(at.update(seq, value.clone()).into());
                }

                let idx = ArrayIndex {
                    index: base,
                    modifiers,
                    length: seq.len(),
                    path: &curr,
                }
                .concrete()?;
                let child = self.walk(&seq[idx], i + 1, value)?;
                Ok(seq.replace_at(idx, child).into())
            }

            Token::Key { key, optional } => {
                let map = expect_mapping(node, &self.path, i)?;
                let existing = map.get(key);

                if existing.is_none() && !optional {
                    return Err(PatchError::missing_map_key(
                        key,
                        self.path.prefix(i + 1),
                        map,
                    ));
                }

                if is_last {
                    return Ok(map.replace(key, value.clone()).into());
                }

                let child = match existing {
                    Some(child) => self.walk(child, i + 1, value)?,
                    None => {
                        let stand_in = placeholder(&self.path, i, Walk::Replace)?;
                        self.walk(&stand_in, i + 1, value)?
                    }
                };
                Ok(map.replace(key, child).into())
            }

            Token::Root => Err(PatchError::UnexpectedToken {
                kind: token.kind(),
                path: self.path.prefix(i + 1),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    fn replace(doc: &str, path: &str, value: &str) -> Result<Node, PatchError> {
        let value: Value = serde_yaml::from_str(value).unwrap();
        ReplaceOp::new(Pointer::parse(path).unwrap(), value).apply(&parse_yaml(doc).unwrap())
    }

    fn yaml(text: &str) -> Node {
        parse_yaml(text).unwrap()
    }

    #[test]
    fn test_root_replaces_document() {
        assert_eq!(replace("a: 1", "", "[1]"), Ok(yaml("[1]")));
    }

    #[test]
    fn test_original_is_untouched() {
        let doc = yaml("a: [1, 2]");
        let op = ReplaceOp::new(Pointer::parse("/a/0").unwrap(), 10);

        let patched = op.apply(&doc).unwrap();
        assert_eq!(patched, yaml("a: [10, 2]"));
        assert_eq!(doc, yaml("a: [1, 2]"));
    }

    #[test]
    fn test_append_through_missing_optional_key() {
        assert_eq!(replace("{}", "/list?/-", "1"), Ok(yaml("list: [1]")));
    }

    #[test]
    fn test_append_must_be_last() {
        assert_eq!(
            replace("a: []", "/a/-/b", "1"),
            Err(PatchError::UnexpectedToken {
                kind: crate::pointer::TokenKind::AfterLastIndex,
                path: Pointer::parse("/a/-").unwrap()
            })
        );
    }

    #[test]
    fn test_tagged_value_cannot_be_cloned() {
        let err = replace("a: 1", "/a", "!custom x").unwrap_err();
        assert!(matches!(err, PatchError::CloneValue(_)));
        assert!(err.to_string().starts_with("Cloning value: unexpected node kind 'tagged'"));
    }
}

//! Read-only lookup of the node a pointer addresses.

use super::array_index::ArrayIndex;
use super::error::PatchError;
use super::traverse::{
    expect_mapping, expect_sequence, matching_indices, placeholder, single_match, Walk,
};
use crate::document::node::Node;
use crate::pointer::{Pointer, Token};
use log::trace;

/// Looks up the node at `path`.
///
/// # Examples
///
/// ```
/// use yamlpatch::document::node::Node;
/// use yamlpatch::document::parser::parse_yaml;
/// use yamlpatch::patch::FindOp;
/// use yamlpatch::pointer::Pointer;
///
/// let doc = parse_yaml("jobs:\n- name: web\n  port: 80\n").unwrap();
/// let op = FindOp::new(Pointer::parse("/jobs/name=web/port").unwrap());
///
/// assert_eq!(op.find(&doc).unwrap(), Some(Node::from(80i64)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FindOp {
    path: Pointer,
}

impl FindOp {
    pub fn new(path: Pointer) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    /// Returns the addressed node, or `None` when the final segment is an
    /// optional key that is not there.
    pub fn find(&self, doc: &Node) -> Result<Option<Node>, PatchError> {
        self.walk(doc, 1)
    }

    /// Same as [`find`](Self::find), reporting absence as a `null` scalar.
    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        Ok(self.find(doc)?.unwrap_or_else(Node::null))
    }

    fn walk(&self, node: &Node, i: usize) -> Result<Option<Node>, PatchError> {
        let tokens = self.path.tokens();
        let Some(token) = tokens.get(i) else {
            return Ok(Some(node.clone()));
        };
        let is_last = i + 1 == tokens.len();
        trace!("find: token {} ({}) at '{}'", i, token.kind(), self.path.prefix(i));

        match token {
            Token::Index { index, modifiers } => {
                let seq = expect_sequence(node, &self.path, i)?;
                let idx = ArrayIndex {
                    index: *index,
                    modifiers,
                    length: seq.len(),
                    path: &self.path.prefix(i + 1),
                }
                .concrete()?;
                self.walk(&seq[idx], i + 1)
            }

            Token::MatchingIndex {
                key,
                value,
                optional,
                modifiers,
            } => {
                let seq = expect_sequence(node, &self.path, i)?;
                let indices = matching_indices(seq, key, value);

                if *optional && indices.is_empty() {
                    let synthetic = Node::single_key_mapping(key, value);
                    return self.walk(&synthetic, i + 1);
                }

                let idx = ArrayIndex {
                    index: single_match(indices, &self.path, i)?,
                    modifiers,
                    length: seq.len(),
                    path: &self.path.prefix(i + 1),
                }
                .concrete()?;
                self.walk(&seq[idx], i + 1)
            }

            Token::Key { key, optional } => {
                let map = expect_mapping(node, &self.path, i)?;
                match map.get(key) {
                    Some(child) => self.walk(child, i + 1),
                    None if !optional => Err(PatchError::missing_map_key(
                        key,
                        self.path.prefix(i + 1),
                        map,
                    )),
                    None if is_last => Ok(None),
                    None => {
                        let stand_in = placeholder(&self.path, i, Walk::Find)?;
                        self.walk(&stand_in, i + 1)
                    }
                }
            }

            Token::Root | Token::AfterLastIndex => Err(PatchError::UnexpectedToken {
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

    fn find(doc: &str, path: &str) -> Result<Option<Node>, PatchError> {
        FindOp::new(Pointer::parse(path).unwrap()).find(&parse_yaml(doc).unwrap())
    }

    #[test]
    fn test_root_returns_document() {
        assert_eq!(find("[1, 2]", ""), Ok(Some(parse_yaml("[1, 2]").unwrap())));
    }

    #[test]
    fn test_index_and_key() {
        assert_eq!(find("a: [1, 2, 3]", "/a/1"), Ok(Some(Node::from(2i64))));
        assert_eq!(find("a: [1, 2, 3]", "/a/-1"), Ok(Some(Node::from(3i64))));
        assert_eq!(find("a: [1, 2, 3]", "/a/0:prev"), Ok(Some(Node::from(3i64))));
    }

    #[test]
    fn test_missing_optional_key_is_absent() {
        assert_eq!(find("a: 1", "/b?"), Ok(None));
        assert_eq!(find("a: 1", "/b?/c"), Ok(None));
    }

    #[test]
    fn test_after_last_index_is_rejected() {
        let err = find("[1]", "/-").unwrap_err();
        assert_eq!(err.to_string(), "Expected to not find token 'after last index' at path '/-'");
    }

    #[test]
    fn test_apply_reports_absence_as_null() {
        let op = FindOp::new(Pointer::parse("/missing?").unwrap());
        assert_eq!(op.apply(&Node::empty_mapping()), Ok(Node::null()));
    }
}

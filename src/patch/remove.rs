//! Deleting the node a pointer addresses.

use super::array_index::ArrayIndex;
use super::error::PatchError;
use super::traverse::{expect_mapping, expect_sequence, matching_indices, single_match};
use crate::document::node::Node;
use crate::pointer::{Pointer, Token};
use log::{debug, trace};

/// Removes the node at `path`.
///
/// A missing optional segment anywhere along the path turns the op into a
/// no-op that returns the document unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOp {
    path: Pointer,
}

impl RemoveOp {
    pub fn new(path: Pointer) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        if self.path.is_root() {
            return Err(PatchError::RemoveRoot);
        }

        match self.walk(doc, 1)? {
            Some(updated) => Ok(updated),
            None => Ok(doc.clone()),
        }
    }

    /// Returns `node` rebuilt without the target, or `None` for a no-op.
    fn walk(&self, node: &Node, i: usize) -> Result<Option<Node>, PatchError> {
        let tokens = self.path.tokens();
        let token = &tokens[i];
        let is_last = i + 1 == tokens.len();
        trace!("remove: token {} ({}) at '{}'", i, token.kind(), self.path.prefix(i));

        let base = match token {
            Token::Index { index, .. } => *index,

            Token::MatchingIndex {
                key,
                value,
                optional,
                ..
            } => {
                let seq = expect_sequence(node, &self.path, i)?;
                let indices = matching_indices(seq, key, value);
                if *optional && indices.is_empty() {
                    debug!(
                        "remove: no item matches '{}', nothing to do",
                        self.path.prefix(i + 1)
                    );
                    return Ok(None);
                }
                single_match(indices, &self.path, i)?
            }

            Token::Key { key, optional } => {
                let map = expect_mapping(node, &self.path, i)?;
                let Some(child) = map.get(key) else {
                    if *optional {
                        debug!(
                            "remove: key '{}' is missing, nothing to do",
                            self.path.prefix(i + 1)
                        );
                        return Ok(None);
                    }
                    return Err(PatchError::missing_map_key(
                        key,
                        self.path.prefix(i + 1),
                        map,
                    ));
                };

                if is_last {
                    return Ok(Some(map.remove(key).into()));
                }
                return Ok(self
                    .walk(child, i + 1)?
                    .map(|child| map.replace(key, child).into()));
            }

            Token::Root | Token::AfterLastIndex => {
                return Err(PatchError::UnexpectedToken {
                    kind: token.kind(),
                    path: self.path.prefix(i + 1),
                })
            }
        };

        let seq = expect_sequence(node, &self.path, i)?;
        let idx = ArrayIndex {
            index: base,
            modifiers: token.modifiers(),
            length: seq.len(),
            path: &self.path.prefix(i + 1),
        }
        .concrete()?;

        if is_last {
            return Ok(Some(seq.remove_at(idx).into()));
        }
        Ok(self
            .walk(&seq[idx], i + 1)?
            .map(|child| seq.replace_at(idx, child).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    fn remove(doc: &str, path: &str) -> Result<Node, PatchError> {
        RemoveOp::new(Pointer::parse(path).unwrap()).apply(&parse_yaml(doc).unwrap())
    }

    fn yaml(text: &str) -> Node {
        parse_yaml(text).unwrap()
    }

    #[test]
    fn test_removes_from_sequence() {
        assert_eq!(remove("[1, 2, 3]", "/0"), Ok(yaml("[2, 3]")));
        assert_eq!(remove("[1, 2, 3]", "/-1"), Ok(yaml("[1, 2]")));
        assert_eq!(remove("[1, 2, 3]", "/3:prev"), Ok(yaml("[1, 2]")));
    }

    #[test]
    fn test_removes_nested() {
        assert_eq!(remove("abc: [1, 2, 3]", "/abc/1"), Ok(yaml("abc: [1, 3]")));
        assert_eq!(
            remove("- {name: a, x: 1}\n- {name: b, x: 2}\n", "/name=b/x"),
            Ok(yaml("- {name: a, x: 1}\n- {name: b}\n"))
        );
    }

    #[test]
    fn test_root_cannot_be_removed() {
        assert_eq!(remove("a: 1", ""), Err(PatchError::RemoveRoot));
    }

    #[test]
    fn test_missing_optional_is_noop() {
        assert_eq!(remove("a: 1", "/b?"), Ok(yaml("a: 1")));
        assert_eq!(remove("a: 1", "/b?/c/d"), Ok(yaml("a: 1")));
        assert_eq!(remove("[{name: a}]", "/name=b?"), Ok(yaml("[{name: a}]")));
    }

    #[test]
    fn test_after_last_index_is_rejected() {
        assert_eq!(
            remove("[1]", "/-"),
            Err(PatchError::UnexpectedToken {
                kind: crate::pointer::TokenKind::AfterLastIndex,
                path: Pointer::parse("/-").unwrap()
            })
        );
    }
}

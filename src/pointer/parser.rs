//! Pointer string parser.

use super::error::PointerError;
use super::token::{Modifier, Token};
use super::Pointer;

/// Parser for pointer strings such as `/instance_groups/name=web/jobs/-`.
pub struct Parser<'a> {
    input: &'a str,
    /// Set once a segment carries `?`; every later key or match inherits it.
    optional: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given pointer text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            optional: false,
        }
    }

    /// Parses pointer text into a [`Pointer`].
    pub fn parse(input: &str) -> Result<Pointer, PointerError> {
        Parser::new(input).parse_pointer()
    }

    fn parse_pointer(&mut self) -> Result<Pointer, PointerError> {
        let mut tokens = vec![Token::Root];

        if self.input.is_empty() {
            return Pointer::new(tokens);
        }

        let rest =
            self.input
                .strip_prefix('/')
                .ok_or_else(|| PointerError::MissingLeadingSlash {
                    input: self.input.to_string(),
                })?;

        for segment in rest.split('/') {
            tokens.push(self.parse_segment(segment)?);
        }

        Pointer::new(tokens)
    }

    fn parse_segment(&mut self, segment: &str) -> Result<Token, PointerError> {
        let mut pieces = segment.split(':');
        let raw = pieces.next().unwrap_or_default();
        let modifiers = pieces
            .map(|name| {
                Modifier::from_name(name).ok_or_else(|| PointerError::UnknownModifier {
                    segment: segment.to_string(),
                    modifier: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let text = unescape(raw);

        if text == "-" {
            if !modifiers.is_empty() {
                return Err(PointerError::ModifiersOnAfterLastIndex {
                    segment: segment.to_string(),
                });
            }
            return Ok(Token::AfterLastIndex);
        }

        if is_numeric(&text) {
            let index = text
                .parse::<isize>()
                .map_err(|_| PointerError::InvalidIndex {
                    segment: segment.to_string(),
                })?;
            return Ok(Token::Index { index, modifiers });
        }

        let text = match text.strip_suffix('?') {
            Some(stripped) => {
                self.optional = true;
                stripped
            }
            None => text.as_str(),
        };

        if let Some((key, value)) = text.split_once('=') {
            return Ok(Token::MatchingIndex {
                key: key.to_string(),
                value: value.to_string(),
                optional: self.optional,
                modifiers,
            });
        }

        if !modifiers.is_empty() {
            return Err(PointerError::ModifiersOnKey {
                segment: segment.to_string(),
            });
        }

        Ok(Token::Key {
            key: text.to_string(),
            optional: self.optional,
        })
    }
}

/// Returns true for an optionally signed run of ASCII digits.
fn is_numeric(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decodes RFC 6901 escapes (`~1` is `/`, `~0` is `~`).
pub(crate) fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Encodes a key or value so it survives a parse.
pub(crate) fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

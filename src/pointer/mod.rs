//! Pointers addressing a location inside a document tree.
//!
//! A pointer is the `/`-delimited path used by every patch operation.
//!
//! # Supported Syntax
//!
//! - `` (empty) - the whole document
//! - `/name` - mapping key, `/name?` tolerates a missing key
//! - `/3`, `/-1` - sequence index, negative values count from the end
//! - `/-` - one past the last element (append)
//! - `/name=web` - the sequence element whose `name` field is `web`
//! - `:prev`, `:next`, `:before`, `:after` - chainable modifiers on indices
//!   and matching indices
//!
//! `~1` and `~0` escape `/` and `~` inside keys and values.
//!
//! # Examples
//!
//! ```
//! use yamlpatch::pointer::{Pointer, Token};
//!
//! let pointer = Pointer::parse("/jobs/name=web/instances").unwrap();
//! assert_eq!(pointer.tokens().len(), 4);
//! assert_eq!(pointer.tokens()[1], Token::key("jobs"));
//! assert_eq!(pointer.to_string(), "/jobs/name=web/instances");
//! ```

pub mod error;
pub mod parser;
pub mod token;

pub use error::PointerError;
pub use parser::Parser;
pub use token::{Modifier, Token, TokenKind};

use parser::escape;
use std::fmt;
use std::str::FromStr;

/// An immutable, parsed pointer: a root token followed by path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<Token>,
}

impl Pointer {
    /// Builds a pointer from tokens, checking that `Root` appears once and first.
    ///
    /// Keys are not checked against the text grammar. A key such as `"0"` or
    /// `"-"` renders the same as an index or `-` segment, so the rendered
    /// form of such a pointer does not parse back to the same tokens.
    pub fn new(tokens: Vec<Token>) -> Result<Self, PointerError> {
        let root_first = matches!(tokens.first(), Some(Token::Root));
        let roots = tokens.iter().filter(|t| matches!(t, Token::Root)).count();
        if !root_first || roots != 1 {
            return Err(PointerError::MisplacedRoot);
        }
        Ok(Self { tokens })
    }

    /// The pointer addressing the whole document.
    pub fn root() -> Self {
        Self {
            tokens: vec![Token::Root],
        }
    }

    /// Parses pointer text. See the module docs for the grammar.
    pub fn parse(input: &str) -> Result<Self, PointerError> {
        Parser::parse(input)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns true if the pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Returns the pointer made of the first `len` tokens.
    ///
    /// Used to name the location where resolution stopped. `len` is clamped
    /// to `1..=self.tokens().len()`.
    pub fn prefix(&self, len: usize) -> Pointer {
        let len = len.clamp(1, self.tokens.len());
        Self {
            tokens: self.tokens[..len].to_vec(),
        }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::root()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Optionality is sticky when parsing, so only the first optional
        // segment needs the marker.
        let mut optional_written = false;
        let mut mark_optional = |optional: bool| {
            if optional && !optional_written {
                optional_written = true;
                "?"
            } else {
                ""
            }
        };

        let mut segments = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let segment = match token {
                Token::Root => String::new(),
                Token::Key { key, optional } => {
                    format!("{}{}", escape(key), mark_optional(*optional))
                }
                Token::Index { index, modifiers } => {
                    format!("{}{}", index, modifiers_suffix(modifiers))
                }
                Token::AfterLastIndex => "-".to_string(),
                Token::MatchingIndex {
                    key,
                    value,
                    optional,
                    modifiers,
                } => format!(
                    "{}={}{}{}",
                    escape(key),
                    escape(value),
                    mark_optional(*optional),
                    modifiers_suffix(modifiers)
                ),
            };
            segments.push(segment);
        }

        write!(f, "{}", segments.join("/"))
    }
}

fn modifiers_suffix(modifiers: &[Modifier]) -> String {
    modifiers.iter().map(|m| format!(":{}", m)).collect()
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Pointer::parse(value)
    }
}

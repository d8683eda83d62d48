//! Token and modifier types for parsed pointers.

use std::fmt;

/// A qualifier attached to an index or matching-index segment.
///
/// `Previous` and `Next` shift the resolved index. `Before` and `After` only
/// matter when a value is being written: they switch a replace into an
/// insertion on the chosen side of the resolved element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `:prev`
    Previous,
    /// `:next`
    Next,
    /// `:before`
    Before,
    /// `:after`
    After,
}

impl Modifier {
    /// Looks up a modifier by the name used in pointer text.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "prev" => Some(Modifier::Previous),
            "next" => Some(Modifier::Next),
            "before" => Some(Modifier::Before),
            "after" => Some(Modifier::After),
            _ => None,
        }
    }

    /// Returns the name used in pointer text.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Previous => "prev",
            Modifier::Next => "next",
            Modifier::Before => "before",
            Modifier::After => "after",
        }
    }

    /// Returns true for the modifiers that shift an index (`prev`, `next`).
    pub fn is_relative(&self) -> bool {
        matches!(self, Modifier::Previous | Modifier::Next)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single segment of a parsed pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// The whole document. Always the first token and never repeated.
    Root,
    /// A mapping key (`/name`, `/name?`).
    Key { key: String, optional: bool },
    /// A sequence position, negative values count from the end (`/0`, `/-1:prev`).
    Index {
        index: isize,
        modifiers: Vec<Modifier>,
    },
    /// One past the last element of a sequence (`/-`).
    AfterLastIndex,
    /// The sequence element whose `key` field equals `value` (`/name=web`).
    MatchingIndex {
        key: String,
        value: String,
        optional: bool,
        modifiers: Vec<Modifier>,
    },
}

/// The variant of a [`Token`] without its payload, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Root,
    Key,
    Index,
    AfterLastIndex,
    MatchingIndex,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Root => "root",
            TokenKind::Key => "key",
            TokenKind::Index => "index",
            TokenKind::AfterLastIndex => "after last index",
            TokenKind::MatchingIndex => "matching index",
        };
        write!(f, "{}", name)
    }
}

impl Token {
    pub fn key(key: impl Into<String>) -> Self {
        Token::Key {
            key: key.into(),
            optional: false,
        }
    }

    pub fn index(index: isize) -> Self {
        Token::Index {
            index,
            modifiers: Vec::new(),
        }
    }

    pub fn matching(key: impl Into<String>, value: impl Into<String>) -> Self {
        Token::MatchingIndex {
            key: key.into(),
            value: value.into(),
            optional: false,
            modifiers: Vec::new(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Root => TokenKind::Root,
            Token::Key { .. } => TokenKind::Key,
            Token::Index { .. } => TokenKind::Index,
            Token::AfterLastIndex => TokenKind::AfterLastIndex,
            Token::MatchingIndex { .. } => TokenKind::MatchingIndex,
        }
    }

    /// Returns true if the segment tolerates a missing key or match.
    pub fn is_optional(&self) -> bool {
        match self {
            Token::Key { optional, .. } | Token::MatchingIndex { optional, .. } => *optional,
            _ => false,
        }
    }

    /// Returns the modifier chain, empty for tokens that cannot carry one.
    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Token::Index { modifiers, .. } | Token::MatchingIndex { modifiers, .. } => modifiers,
            _ => &[],
        }
    }
}

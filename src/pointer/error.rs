//! Error types for pointer parsing.

use thiserror::Error;

/// Errors produced while turning pointer text into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("Expected pointer '{input}' to start with '/'")]
    MissingLeadingSlash { input: String },

    #[error(
        "Expected to find one of the following modifiers: 'prev', 'next', 'before', or 'after' but found '{modifier}' in segment '{segment}'"
    )]
    UnknownModifier { segment: String, modifier: String },

    #[error("Expected segment '{segment}' to be an array index within the supported integer range")]
    InvalidIndex { segment: String },

    #[error("Expected not to find any modifiers with key token in segment '{segment}'")]
    ModifiersOnKey { segment: String },

    #[error("Expected not to find any modifiers with after last index token in segment '{segment}'")]
    ModifiersOnAfterLastIndex { segment: String },

    #[error("Expected pointer tokens to start with a single root token")]
    MisplacedRoot,
}

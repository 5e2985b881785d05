//! Error types for named polyhedral objects.
//!
//! Every failure is surfaced as a typed result; nothing is retried or
//! silently recovered, and no operation has partial success.

use crate::polyhedral::space::DimKind;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamedPolyError {
    /// A positional dimension carried no name tag while building a name table.
    #[error("unnamed {kind} dimension at index {index}")]
    UnnamedDimension {
        /// Kind of the offending dimension
        kind: DimKind,
        /// Index of the offending dimension within its kind
        index: usize,
    },

    /// Two dimensions (of any kind) share the same name.
    #[error("non-unique dimension name: {0}")]
    DuplicateName(String),

    /// An alignment target does not cover a name the object possesses.
    #[error("incompatible space: {0}")]
    IncompatibleSpace(String),

    /// A dimension name was looked up but is absent from the name table.
    #[error("no dimension named {0}")]
    NameNotFound(String),

    /// Per-kind dimension counts of two positional objects disagree.
    #[error("space mismatch: {0}")]
    SpaceMismatch(String),

    /// Error while parsing the textual constraint grammar.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Error during parsing of the constraint language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Byte offset into the source text
    pub offset: usize,
}

impl ParseError {
    /// Create a new parse error at the given byte offset.
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

/// Result type using [`NamedPolyError`].
pub type Result<T> = std::result::Result<T, NamedPolyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NamedPolyError::UnnamedDimension {
            kind: DimKind::Out,
            index: 2,
        };
        assert_eq!(format!("{}", err), "unnamed out dimension at index 2");

        let err = NamedPolyError::DuplicateName("i".to_string());
        assert!(format!("{}", err).contains("i"));
    }

    #[test]
    fn test_parse_error_display() {
        let err: NamedPolyError = ParseError::new("unexpected token", 7).into();
        let s = format!("{}", err);
        assert!(s.contains("unexpected token"));
        assert!(s.contains("7"));
    }
}

//! Error types for SDLang parsing and serialization.
//!
//! Every malformed-input failure carries the 1-indexed line and column of the
//! offending character so callers can produce editor-style diagnostics. The
//! rendered message has the shape
//! `"<description> Line <line-or-unknown>, Position <position-or-unknown>"`.
//!
//! Two failure classes exist:
//!
//! - [`SdlError::Lex`]: a malformed token — bad escape, unterminated literal,
//!   invalid numeric suffix, invalid base64, malformed date/time.
//! - [`SdlError::Parse`]: a structural problem — unbalanced braces, a misplaced
//!   token, a duplicate attribute key.
//!
//! Both abort the current parse at the first error; there is no resynchronization.
//! I/O failures from an underlying reader propagate unchanged via
//! [`SdlError::Io`].
//!
//! ```rust
//! let err = sdlang::parse_str("greeting \"unterminated").unwrap_err();
//! assert_eq!(err.line(), Some(1));
//! assert!(err.to_string().contains("Line 1"));
//! ```

use thiserror::Error;

/// Formats an optional 1-indexed position, using the `unknown` sentinel.
fn fmt_pos(pos: &Option<usize>) -> String {
    match pos {
        Some(n) => n.to_string(),
        None => "unknown".to_string(),
    }
}

/// All errors that can occur while reading or writing SDLang documents.
#[derive(Debug, Error)]
pub enum SdlError {
    /// A malformed token in the input text.
    #[error("{description} Line {}, Position {}", fmt_pos(.line), fmt_pos(.column))]
    Lex {
        description: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A structurally invalid document.
    #[error("{description} Line {}, Position {}", fmt_pos(.line), fmt_pos(.column))]
    Parse {
        description: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// An I/O failure from the underlying source or sink, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SdlError {
    /// Creates a lexical error at a known line and column (both 1-indexed).
    pub fn lex(line: usize, column: usize, description: impl Into<String>) -> Self {
        SdlError::Lex {
            description: description.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Creates a structural parse error at a known line and column (both 1-indexed).
    pub fn parse(line: usize, column: usize, description: impl Into<String>) -> Self {
        SdlError::Parse {
            description: description.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Creates a parse error with no usable location.
    pub fn parse_unlocated(description: impl Into<String>) -> Self {
        SdlError::Parse {
            description: description.into(),
            line: None,
            column: None,
        }
    }

    /// The 1-indexed line on which the error occurred, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            SdlError::Lex { line, .. } | SdlError::Parse { line, .. } => *line,
            SdlError::Io(_) => None,
        }
    }

    /// The 1-indexed position within the line, if known.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            SdlError::Lex { column, .. } | SdlError::Parse { column, .. } => *column,
            SdlError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SdlError>;

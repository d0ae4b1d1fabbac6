//! Fault reporting for the parser.
//!
//! A [`ParseError`] records the *first* grammar violation found in a document,
//! together with the byte offset and 1-based line/column where scanning
//! stopped. Later violations are suppressed: the parser keeps the first fault
//! for its remaining lifetime and answers every further query with
//! [`NodeKind::None`](crate::NodeKind::None), so drain loops never see a
//! cascade of follow-up errors.

use thiserror::Error;

/// The reason a document was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The buffer contained no JSON value at all.
    #[error("empty document")]
    EmptyDocument,
    /// The buffer ended in the middle of a value or container.
    #[error("unexpected end of document")]
    UnexpectedEnd,
    /// Non-whitespace input remained after the top-level value.
    #[error("data at end of document")]
    TrailingData,
    /// A byte that cannot start any JSON token.
    #[error("unexpected character in document")]
    UnexpectedCharacter,
    /// An object member name that is not a string literal.
    #[error("not a string")]
    NotAString,
    /// A string literal with no closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A string literal containing ill-formed UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// An unescaped control character inside a string literal.
    #[error("disallowed control character in string literal")]
    ControlCharacter,
    /// A backslash followed by anything outside the escape table.
    #[error("unknown escape sequence")]
    UnknownEscape,
    /// A `\u` escape with fewer than four hex digits.
    #[error("invalid Unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A lone or mismatched UTF-16 surrogate half.
    #[error("invalid UTF-16 surrogate pair")]
    InvalidSurrogatePair,
    /// A token starting like a number but violating the number grammar.
    #[error("not a valid number")]
    InvalidNumber,
    /// A syntactically valid number too large for an `f64`.
    #[error("number out of range")]
    NumberOutOfRange,
    /// A missing `,` between object members.
    #[error("expected a ',' to separate object members")]
    ExpectedObjectComma,
    /// A missing `,` between array elements.
    #[error("expected a ',' to separate array elements")]
    ExpectedArrayComma,
    /// A missing `:` after an object member name.
    #[error("missing ':' after member name")]
    MissingColon,
    /// A separator where a value should have been.
    #[error("expected a value")]
    MissingValue,
}

/// The first fault found in a document, with its location.
///
/// Returned by [`Parser::error`](crate::Parser::error) once the sticky fault
/// has been set. Line and column are 1-based; the column counts bytes from the
/// start of the line, and a CRLF pair is one line break.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    kind: SyntaxError,
    offset: usize,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: SyntaxError, offset: usize, line: usize, column: usize) -> Self {
        ParseError {
            kind,
            offset,
            line,
            column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> SyntaxError {
        self.kind
    }

    /// Byte offset at which scanning stopped.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the fault.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based byte column of the fault.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

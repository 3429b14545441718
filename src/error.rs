//! Lexer error types.
//!
//! One `thiserror`-derived enum for every fault the recognizers can attach
//! to a lexeme, plus the `{kind, offset}` pair that carries it. Nothing here
//! is ever printed during normal operation — `Display`/`Debug` exist so
//! downstream consumers and tests get them for free, the way the grounding
//! crate's own per-concern error enums do.

use thiserror::Error;

/// A single malformation recognized while producing a lexeme. `Display`
/// messages are for tests and downstream diagnostics; the lexer itself
/// never renders one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("invalid octal digit")]
    InvalidOctalDigit,
    #[error("invalid binary digit")]
    InvalidBinaryDigit,
    #[error("invalid hexadecimal digit")]
    InvalidHexDigit,
    #[error("invalid decimal digit")]
    InvalidDecimalDigit,
    #[error("expected a digit in floating-point literal")]
    ExpectedDigitInFloat,
    #[error("invalid character in floating-point exponent")]
    InvalidFloatingPointExponentCharacter,
    #[error("invalid digit in floating-point exponent")]
    InvalidFloatingPointExponentDigit,
    #[error("hexadecimal floating-point literal requires a binary exponent")]
    ExpectedBinaryExponentInHexFloat,

    #[error("unterminated string literal")]
    UnterminatedStringLiteral,
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,

    #[error("unterminated block comment")]
    UnterminatedBlockComment,

    #[error("malformed UTF-8 sequence")]
    MalformedUtf8,
}

/// A lexer error attached to a lexeme: which fault, and where within the
/// lexeme's text it begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset relative to the owning lexeme's text start, matching the
    /// data model's `{kind, byteOffsetFromLexemeStart}` pair. The one
    /// exception is `UnterminatedBlockComment`, which is found while
    /// scanning trivia rather than a lexeme's text; its offset is relative
    /// to the start of that trivia span instead.
    pub offset: u32,
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: u32) -> Self {
        Self { kind, offset }
    }
}

//! vela-lex - Byte-Level Lexical Analyzer for Vela
//!
//! ============================================================================
//! SCOPE
//! ============================================================================
//!
//! This crate turns a raw source buffer into a stream of lexemes: a token
//! kind plus the four contiguous byte ranges that make up
//! `leadingTrivia || text || trailingTrivia`. It works directly over `&[u8]`
//! rather than a validated `&str` — malformed UTF-8 is a recoverable lexing
//! fault, not a precondition violation — and it never allocates per token.
//!
//! The scanner is a small state machine ([`state::ScannerState`]) rather than
//! a single recursive-descent function: string literals, raw-string
//! delimiters, and their interpolated expressions each leave the scanner in
//! a different state, and [`driver::Lexer`] dispatches on that state instead
//! of recursing. This is what lets a caller resume lexing mid-buffer (e.g. an
//! editor re-lexing only the lines that changed) by feeding back the state
//! the previous session ended in.
//!
//! ============================================================================
//! MODULE MAP
//! ============================================================================
//!
//! - [`cursor`] / [`utf8`]: the byte-cursor primitive and UTF-8 scalar
//!   decoder every recognizer is built on.
//! - [`state`]: the scanner automaton.
//! - [`boundness`]: the left/right-bound oracle that disambiguates prefix,
//!   postfix, and binary operator forms.
//! - [`trivia`]: whitespace, comments, BOM, shebang, and conflict-marker
//!   handling.
//! - [`number`], [`identifier`], [`operator`]: the literal and name
//!   recognizers.
//! - [`string`] / [`interpolation`]: the string-literal engine and the
//!   skip-scan used to validate an interpolation's extent before the driver
//!   detours into it.
//! - [`regex`]: the speculative regex-literal recognizer.
//! - [`placeholder`]: editor placeholders (`<#...#>`) and the fixed
//!   pound-directive vocabulary.
//! - [`driver`]: [`Lexer`], the top-level loop tying all of the above
//!   together.
//! - [`token_kind`]: [`TokenKind`], [`LexemeFlags`], and the
//!   [`KeywordCatalogue`] seam an embedding parser uses to layer its own
//!   reserved-word list on top of the lexer's plain identifiers.
//! - [`error`]: [`LexError`]/[`LexErrorKind`].
//! - [`lexeme`]: [`Lexeme`], the value produced per call.

pub mod boundness;
pub mod cursor;
pub mod driver;
mod edge_cases;
pub mod error;
pub mod identifier;
pub mod interpolation;
pub mod lexeme;
pub mod number;
pub mod operator;
pub mod placeholder;
pub mod regex;
pub mod state;
pub mod string;
pub mod token_kind;
pub mod trivia;
pub mod utf8;

pub use cursor::Cursor;
pub use driver::Lexer;
pub use error::{LexError, LexErrorKind};
pub use lexeme::Lexeme;
pub use state::{ScannerState, StringLiteralKind};
pub use token_kind::{KeywordCatalogue, LexemeFlags, NullCatalogue, TokenKind};

//! The scanner state sum type.
//!
//! The lexer's dispatch in [`crate::driver`] switches on [`ScannerState`] to
//! decide which recognizer handles the next lexeme, and which recognizer's
//! return value decides the *next* state. Nothing outside a recognizer's own
//! return value ever mutates this — see the cursor contract in
//! [`crate::cursor`].

/// Which flavor of string body the scanner is currently inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringLiteralKind {
    /// `"..."`, terminated by a bare newline.
    SingleLine,
    /// `"""..."""`, newlines are body content.
    MultiLine,
    /// `'...'`, single-quoted (used for extended-grapheme-cluster literals).
    SingleQuote,
}

/// The five-state scanner automaton (§3 of the lexer specification).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// Default mode: dispatch on the current byte's class.
    Normal,
    /// `n` leading `#` seen; the opening quote is still expected.
    AfterRawStringDelimiter(u16),
    /// Inside a string body of `kind`, with `n` raw delimiter hashes.
    InStringLiteral(StringLiteralKind, u16),
    /// Body closed; a closing quote is still expected. `is_raw` is whether
    /// the opening used `n > 0` raw hashes (so the closer must additionally
    /// be followed by `#`s before returning to `Normal`).
    AfterStringLiteral { is_raw: bool },
    /// Closing quote seen; trailing `#`s are still expected.
    AfterClosingStringQuote,
}

impl ScannerState {
    /// Whether the trivia scanner may run right now, given whether the
    /// cursor currently sits on a newline byte.
    ///
    /// Always `true` in `Normal`. Always `false` in
    /// `AfterRawStringDelimiter`, `AfterStringLiteral`, and
    /// `AfterClosingStringQuote`. Inside a single-line or single-quote
    /// string body, only `true` at a newline (so the newline cleanly
    /// terminates the literal). Never `true` inside a multi-line body —
    /// newlines there are body content, not trivia.
    pub fn admits_trivia(self, at_newline: bool) -> bool {
        match self {
            ScannerState::Normal => true,
            ScannerState::AfterRawStringDelimiter(_)
            | ScannerState::AfterStringLiteral { .. }
            | ScannerState::AfterClosingStringQuote => false,
            ScannerState::InStringLiteral(StringLiteralKind::MultiLine, _) => false,
            ScannerState::InStringLiteral(_, _) => at_newline,
        }
    }
}

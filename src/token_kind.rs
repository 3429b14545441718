//! Token kinds, lexeme flags, and the keyword catalogue seam.

use bitflags::bitflags;

bitflags! {
    /// Per-lexeme bit flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LexemeFlags: u8 {
        /// Set when the leading trivia contains at least one newline, or
        /// the lexeme sits at buffer offset 0.
        const IS_AT_START_OF_LINE = 0b0000_0001;
    }
}

/// Opaque token-kind tag (§6). The catalogue of reserved words is owned by
/// an external, parser-side component (see [`KeywordCatalogue`]); this enum
/// only carries the kinds the lexer itself is responsible for recognizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    At,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Colon,
    Backslash,
    Backtick,
    Period,
    Arrow,
    Equal,
    PrefixAmpersand,
    ExclamationMark,
    PostfixQuestionMark,
    InfixQuestionMark,

    // Literals
    IntegerLiteral,
    FloatingLiteral,
    StringQuote,
    MultilineStringQuote,
    SingleQuote,
    RawStringDelimiter,
    StringLiteralContents,
    RegexLiteral,

    // Operators (maximal-munch runs other than the single-character
    // distinguished forms above)
    BinaryOperator,
    PrefixOperator,
    PostfixOperator,

    // Names
    Identifier,
    DollarIdentifier,
    Wildcard,

    // Pound directives
    PoundAssert,
    PoundSourceLocation,
    PoundWarning,
    PoundError,
    PoundIf,
    PoundElse,
    PoundElseif,
    PoundEndif,
    PoundAvailable,
    PoundUnavailable,
    PoundHasSymbol,
    /// `#` followed by a name outside the fixed vocabulary, or a bare `#`.
    Pound,

    /// A byte (or resynchronized run) that cannot begin a token or
    /// identifier, and fell through every recognizer.
    Unknown,
    /// Terminating lexeme; always zero text length.
    Eof,
}

/// Fixed vocabulary recognized after a lone `#` (§4.9). Order matches the
/// produced [`TokenKind`] variants.
const POUND_VOCABULARY: &[(&[u8], TokenKind)] = &[
    (b"assert", TokenKind::PoundAssert),
    (b"sourceLocation", TokenKind::PoundSourceLocation),
    (b"warning", TokenKind::PoundWarning),
    (b"error", TokenKind::PoundError),
    (b"elseif", TokenKind::PoundElseif),
    (b"endif", TokenKind::PoundEndif),
    (b"available", TokenKind::PoundAvailable),
    (b"unavailable", TokenKind::PoundUnavailable),
    (b"_hasSymbol", TokenKind::PoundHasSymbol),
    (b"if", TokenKind::PoundIf),
    (b"else", TokenKind::PoundElse),
];

/// Looks up `name` (the ASCII letters following a `#`) against the fixed
/// pound-directive vocabulary. Returns `None` for anything else, in which
/// case the caller emits a bare [`TokenKind::Pound`] without consuming
/// `name`.
pub fn lookup_pound_directive(name: &[u8]) -> Option<TokenKind> {
    POUND_VOCABULARY
        .iter()
        .find(|&&(candidate, _)| candidate == name)
        .map(|&(_, kind)| kind)
}

/// Seam for asking whether identifier-shaped text is actually a reserved
/// word with its own token kind. The lexer core is deliberately ignorant of
/// any concrete keyword list; that knowledge belongs to the catalogue the
/// embedder supplies.
pub trait KeywordCatalogue {
    fn lookup(&self, text: &[u8]) -> Option<TokenKind>;
}

/// Default catalogue: every identifier-shaped token is
/// [`TokenKind::Identifier`] (modulo the `_` wildcard and dollar-identifier
/// special forms handled directly by the identifier recognizer).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCatalogue;

impl KeywordCatalogue for NullCatalogue {
    fn lookup(&self, _text: &[u8]) -> Option<TokenKind> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_catalogue_never_matches() {
        let cat = NullCatalogue;
        assert_eq!(cat.lookup(b"let"), None);
        assert_eq!(cat.lookup(b""), None);
    }

    #[test]
    fn test_pound_vocabulary_hits() {
        assert_eq!(lookup_pound_directive(b"if"), Some(TokenKind::PoundIf));
        assert_eq!(
            lookup_pound_directive(b"_hasSymbol"),
            Some(TokenKind::PoundHasSymbol)
        );
    }

    #[test]
    fn test_pound_vocabulary_miss_falls_through() {
        assert_eq!(lookup_pound_directive(b"selector"), None);
    }

    #[test]
    fn test_flags_roundtrip() {
        let mut flags = LexemeFlags::empty();
        assert!(!flags.contains(LexemeFlags::IS_AT_START_OF_LINE));
        flags.insert(LexemeFlags::IS_AT_START_OF_LINE);
        assert!(flags.contains(LexemeFlags::IS_AT_START_OF_LINE));
    }
}

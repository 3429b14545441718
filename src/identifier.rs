//! Identifier recognizer, including the backtick-escaped and dollar forms
//! (§4.6).

use crate::cursor::Cursor;
use crate::token_kind::{KeywordCatalogue, TokenKind};

pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '_' || (c.is_ascii() && c.is_ascii_alphabetic()) || (!c.is_ascii() && unicode_ident::is_xid_start(c))
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c == '_' || (c.is_ascii() && c.is_ascii_alphanumeric()) || (!c.is_ascii() && unicode_ident::is_xid_continue(c))
}

/// Lexes a plain identifier. The cursor must currently sit on a scalar
/// satisfying [`is_identifier_start`]. Looks the text up against `catalogue`
/// before falling back to `identifier`/`wildcard`.
pub fn lex_identifier<K: KeywordCatalogue>(cursor: &mut Cursor<'_>, catalogue: &K) -> TokenKind {
    let start = cursor.position();
    let consumed_start = cursor.advance_if(is_identifier_start);
    debug_assert!(consumed_start.is_some(), "caller must dispatch only on identifier-start scalars");
    cursor.advance_while(is_identifier_continue);

    let text = cursor.slice_from(start);
    if let Some(kind) = catalogue.lookup(text) {
        return kind;
    }
    if text == b"_" {
        return TokenKind::Wildcard;
    }
    TokenKind::Identifier
}

/// Lexes `` `ident` `` or the special form `` `$` ``. A lone backtick with
/// no matching close yields the `backtick` punctuation token instead, and
/// the cursor only consumes that one byte.
pub fn lex_backtick_identifier(cursor: &mut Cursor<'_>) -> TokenKind {
    let snapshot = *cursor;
    debug_assert_eq!(cursor.current(), Some(b'`'));
    cursor.advance();

    if cursor.current() == Some(b'$') && cursor.peek(1) == Some(b'`') {
        cursor.advance();
        cursor.advance();
        return TokenKind::Identifier;
    }

    let consumed = cursor.advance_while(is_identifier_continue);
    if consumed > 0 && cursor.current() == Some(b'`') {
        cursor.advance();
        TokenKind::Identifier
    } else {
        *cursor = snapshot;
        cursor.advance();
        TokenKind::Backtick
    }
}

/// Lexes `$digits` (→ `dollarIdentifier`), `$name` (→ `identifier`), or a
/// bare `$` (→ `identifier`).
pub fn lex_dollar_identifier(cursor: &mut Cursor<'_>) -> TokenKind {
    debug_assert_eq!(cursor.current(), Some(b'$'));
    cursor.advance();

    match cursor.current() {
        Some(b) if b.is_ascii_digit() => {
            cursor.advance_while(|c| c.is_ascii_digit());
            TokenKind::DollarIdentifier
        }
        _ => {
            cursor.advance_while(is_identifier_continue);
            TokenKind::Identifier
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_kind::NullCatalogue;

    fn lex_ident(src: &'static [u8]) -> (TokenKind, usize) {
        let mut c = Cursor::new(src);
        let kind = lex_identifier(&mut c, &NullCatalogue);
        (kind, c.position())
    }

    #[test]
    fn test_plain_identifier() {
        let (kind, pos) = lex_ident(b"let x");
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_let_is_identifier_under_null_catalogue() {
        // A keyword catalogue is out of scope for this core; under the
        // default the whole identifier stays `identifier`.
        let (kind, _) = lex_ident(b"let");
        assert_eq!(kind, TokenKind::Identifier);
    }

    #[test]
    fn test_wildcard() {
        let (kind, pos) = lex_ident(b"_ ");
        assert_eq!(kind, TokenKind::Wildcard);
        assert_eq!(pos, 1);
    }

    #[test]
    fn test_unicode_identifier() {
        let (kind, pos) = lex_ident("café!".as_bytes());
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(pos, "café".len());
    }

    #[test]
    fn test_backtick_escaped_identifier() {
        let mut c = Cursor::new(b"`let` ");
        let kind = lex_backtick_identifier(&mut c);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn test_backtick_dollar_special_form() {
        let mut c = Cursor::new(b"`$`");
        let kind = lex_backtick_identifier(&mut c);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn test_lone_backtick_yields_punctuation() {
        let mut c = Cursor::new(b"`foo");
        let kind = lex_backtick_identifier(&mut c);
        assert_eq!(kind, TokenKind::Backtick);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_dollar_digits() {
        let mut c = Cursor::new(b"$0 ");
        let kind = lex_dollar_identifier(&mut c);
        assert_eq!(kind, TokenKind::DollarIdentifier);
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn test_dollar_name() {
        let mut c = Cursor::new(b"$foo ");
        let kind = lex_dollar_identifier(&mut c);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn test_bare_dollar() {
        let mut c = Cursor::new(b"$ ");
        let kind = lex_dollar_identifier(&mut c);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(c.position(), 1);
    }
}

//! Editor placeholder and pound-directive dispatch (§4.9).

use crate::cursor::Cursor;
use crate::token_kind::{self, TokenKind};

/// What a run of `#` bytes starting at `pos` should be handed off to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoundDispatch {
    /// `n` hashes followed by a quote: the string engine's raw prefix.
    RawStringDelimiter(u16),
    /// `#`s followed by `/`: a candidate regex literal.
    Regex,
    /// A single `#` (or a run with nothing recognizable after it): try the
    /// fixed directive vocabulary, falling back to a bare `pound`.
    Directive,
}

/// Classifies a `#` run without consuming anything — the driver uses this
/// to pick which recognizer handles the lexeme.
pub fn classify_pound(buf: &[u8], pos: usize) -> PoundDispatch {
    let mut i = pos;
    let mut n: u32 = 0;
    while buf.get(i) == Some(&b'#') {
        i += 1;
        n += 1;
    }
    match buf.get(i) {
        Some(b'"') | Some(b'\'') => PoundDispatch::RawStringDelimiter(n as u16),
        Some(b'/') => PoundDispatch::Regex,
        _ => PoundDispatch::Directive,
    }
}

/// Lexes `<#...#>` as a single-line editor placeholder. The cursor must sit
/// on `<`. Returns `None` (cursor untouched) if there is no embedded
/// newline-free `#>` later on the line, so the caller can fall back to
/// [`crate::operator::lex_operator`].
pub fn try_lex_placeholder(cursor: &mut Cursor<'_>) -> Option<TokenKind> {
    if cursor.current() != Some(b'<') || cursor.peek(1) != Some(b'#') {
        return None;
    }
    let buf = cursor.buffer();
    let mut i = cursor.position() + 2;
    loop {
        match buf.get(i) {
            None | Some(b'\n') => return None,
            Some(b'#') if buf.get(i + 1) == Some(&b'>') => {
                let end = i + 2;
                while cursor.position() < end {
                    cursor.advance();
                }
                return Some(TokenKind::Identifier);
            }
            _ => i += 1,
        }
    }
}

/// Lexes a single `#` followed by an optional ASCII-letter/underscore name
/// against the fixed directive vocabulary. The cursor must sit on `#`. An
/// unrecognized name is left unconsumed, per §4.9.
pub fn lex_pound_directive(cursor: &mut Cursor<'_>) -> TokenKind {
    debug_assert_eq!(cursor.current(), Some(b'#'));
    cursor.advance();

    let buf = cursor.buffer();
    let start = cursor.position();
    let mut end = start;
    while buf.get(end).is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_') {
        end += 1;
    }
    if end == start {
        return TokenKind::Pound;
    }

    match token_kind::lookup_pound_directive(&buf[start..end]) {
        Some(kind) => {
            while cursor.position() < end {
                cursor.advance();
            }
            kind
        }
        None => TokenKind::Pound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_raw_string_delimiter() {
        assert_eq!(
            classify_pound(b"##\"x\"##", 0),
            PoundDispatch::RawStringDelimiter(2)
        );
    }

    #[test]
    fn test_classify_regex() {
        assert_eq!(classify_pound(b"#/abc/#", 0), PoundDispatch::Regex);
    }

    #[test]
    fn test_classify_directive_default() {
        assert_eq!(classify_pound(b"#if x", 0), PoundDispatch::Directive);
        assert_eq!(classify_pound(b"#", 0), PoundDispatch::Directive);
    }

    #[test]
    fn test_placeholder_basic() {
        let mut c = Cursor::new(b"<#name#>)");
        let kind = try_lex_placeholder(&mut c);
        assert_eq!(kind, Some(TokenKind::Identifier));
        assert_eq!(c.position(), 8);
    }

    #[test]
    fn test_placeholder_no_close_falls_back() {
        let mut c = Cursor::new(b"<#name\nmore");
        let kind = try_lex_placeholder(&mut c);
        assert_eq!(kind, None);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_placeholder_requires_hash() {
        let mut c = Cursor::new(b"<name#>");
        let kind = try_lex_placeholder(&mut c);
        assert_eq!(kind, None);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_pound_directive_recognized() {
        let mut c = Cursor::new(b"#if true");
        let kind = lex_pound_directive(&mut c);
        assert_eq!(kind, TokenKind::PoundIf);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn test_pound_directive_unrecognized_not_consumed() {
        let mut c = Cursor::new(b"#selector(foo)");
        let kind = lex_pound_directive(&mut c);
        assert_eq!(kind, TokenKind::Pound);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_bare_pound() {
        let mut c = Cursor::new(b"#(");
        let kind = lex_pound_directive(&mut c);
        assert_eq!(kind, TokenKind::Pound);
        assert_eq!(c.position(), 1);
    }
}

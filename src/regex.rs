//! Regex speculator (§4.8): attempts to read `/…/` or `#+/…/#+` as one
//! regex literal token, restoring the cursor and falling back to operator
//! lexing on any failure.

use crate::boundness::is_left_bound;
use crate::cursor::Cursor;
use crate::token_kind::TokenKind;

fn is_horizontal_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

/// Looks ahead (without consuming) past horizontal whitespace from `pos` to
/// see whether a newline follows — this is how the opening `/` decides
/// whether the literal is multi-line.
fn opens_multiline(buf: &[u8], pos: usize) -> bool {
    let mut i = pos;
    while buf.get(i).is_some_and(|&b| is_horizontal_space(b)) {
        i += 1;
    }
    matches!(buf.get(i), Some(b'\n') | Some(b'\r'))
}

/// Attempts to lex a regex literal starting at the cursor's current
/// position (which must be `#` or `/`). Returns `None` — with the cursor
/// restored to its original position — on any malformed input, so the
/// caller can fall back to [`crate::operator::lex_operator`].
pub fn try_lex_regex(cursor: &mut Cursor<'_>, buffer_begin: usize) -> Option<TokenKind> {
    let snapshot = *cursor;

    if is_left_bound(cursor, buffer_begin) {
        return None;
    }

    let mut pound_count: u32 = 0;
    while cursor.current() == Some(b'#') {
        cursor.advance();
        pound_count += 1;
    }
    if !cursor.advance_matching(b'/') {
        *cursor = snapshot;
        return None;
    }

    if pound_count == 0 {
        match cursor.current() {
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | None => {
                *cursor = snapshot;
                return None;
            }
            _ => {}
        }
    }

    let is_multiline = opens_multiline(cursor.buffer(), cursor.position());

    let mut paren_depth: i32 = 0;
    loop {
        let buf = cursor.buffer();
        let pos = cursor.position();
        match buf.get(pos) {
            None => {
                *cursor = snapshot;
                return None;
            }
            Some(b'\\') => {
                cursor.advance();
                if cursor.advance().is_none() {
                    *cursor = snapshot;
                    return None;
                }
            }
            Some(b'(') => {
                paren_depth += 1;
                cursor.advance();
            }
            Some(b')') => {
                if paren_depth == 0 {
                    *cursor = snapshot;
                    return None;
                }
                paren_depth -= 1;
                cursor.advance();
            }
            Some(b'\n') | Some(b'\r') => {
                if !is_multiline {
                    *cursor = snapshot;
                    return None;
                }
                cursor.advance();
            }
            Some(b'/') => {
                let preceded_by_space = cursor.previous_byte() == b' ' || cursor.previous_byte() == b'\t';
                let hashes_ok = (0..pound_count).all(|i| buf.get(pos + 1 + i as usize) == Some(&b'#'))
                    && buf.get(pos + 1 + pound_count as usize) != Some(&b'#');
                let followed_by_comment = matches!(
                    buf.get(pos + 1 + pound_count as usize),
                    Some(b'/') | Some(b'*')
                );

                if hashes_ok
                    && !(pound_count == 0 && preceded_by_space)
                    && !(pound_count == 0 && followed_by_comment)
                {
                    cursor.advance();
                    for _ in 0..pound_count {
                        cursor.advance();
                    }
                    return Some(TokenKind::RegexLiteral);
                }
                cursor.advance();
            }
            Some(_) => {
                if crate::utf8::advance_validating_utf8_character(cursor).is_none() {
                    cursor.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &'static [u8]) -> (Option<TokenKind>, usize) {
        let mut c = Cursor::new(src);
        let kind = try_lex_regex(&mut c, 0);
        (kind, c.position())
    }

    #[test]
    fn test_simple_regex() {
        let (kind, pos) = lex(b"/abc/ ");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 5);
    }

    #[test]
    fn test_left_bound_prefers_division() {
        let mut c = Cursor::new(b"x/y/");
        c.advance();
        let kind = try_lex_regex(&mut c, 0);
        assert_eq!(kind, None);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_bare_slash_space_is_division() {
        let (kind, pos) = lex(b"/ y");
        assert_eq!(kind, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_raw_regex_allows_leading_space() {
        let (kind, pos) = lex(b"#/ y/#");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 6);
    }

    #[test]
    fn test_escaped_slash_inside_body() {
        let (kind, pos) = lex(b"/a\\/b/ ");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 6);
    }

    #[test]
    fn test_parens_balanced() {
        let (kind, pos) = lex(b"/(a)(b)/ ");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 8);
    }

    #[test]
    fn test_unmatched_closing_paren_aborts() {
        let (kind, pos) = lex(b"/a)b/ ");
        assert_eq!(kind, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_unterminated_aborts_and_restores() {
        let (kind, pos) = lex(b"/abc");
        assert_eq!(kind, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_newline_aborts_non_multiline() {
        let (kind, pos) = lex(b"/abc\ndef/");
        assert_eq!(kind, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_multiline_regex_allows_newline() {
        // A bare `/` followed by whitespace always aborts (division takes
        // precedence), so a multi-line regex needs at least one `#`.
        let (kind, pos) = lex(b"#/ \nabc\n/#");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_closing_followed_by_comment_rejected_for_plain_regex() {
        // The `/` right after the body looks like a close, but it's
        // immediately followed by `*`, which reads as a block comment —
        // so it isn't accepted as the closer, and since no further `/`
        // exists the whole literal aborts.
        let (kind, pos) = lex(b"/abc/*oops");
        assert_eq!(kind, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_raw_regex_hash_mismatch_keeps_scanning() {
        // One closing `#` isn't enough for a `##/.../##` literal; the
        // scanner must keep going to the real close.
        let (kind, pos) = lex(b"##/a/#b/##");
        assert_eq!(kind, Some(TokenKind::RegexLiteral));
        assert_eq!(pos, 10);
    }
}

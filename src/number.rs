//! Number recognizer (§4.5): decimal/hex/octal/binary integers and floats.

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::token_kind::TokenKind;

/// Consumes a run of digit/underscore bytes. Bytes that are alphanumeric
/// but outside the radix class are still consumed (as identifier-
/// continuation bytes would be) and reported as a single error at the
/// first invalid position, per the recovery rule in §7. `exponent_markers`
/// (`e`/`E` for decimal, `p`/`P` for hex) stop the run cleanly instead of
/// being swallowed as invalid digits, so the exponent itself can be lexed
/// afterward.
fn consume_digit_run(
    cursor: &mut Cursor<'_>,
    start: usize,
    is_radix_digit: impl Fn(u8) -> bool,
    err_kind: LexErrorKind,
    exponent_markers: &[u8],
) -> Option<LexError> {
    let mut first_invalid: Option<u32> = None;
    loop {
        match cursor.current() {
            Some(b'_') => {
                cursor.advance();
            }
            Some(b) if is_radix_digit(b) => {
                cursor.advance();
            }
            Some(b) if exponent_markers.contains(&b) => break,
            Some(b) if b.is_ascii_alphanumeric() => {
                if first_invalid.is_none() {
                    first_invalid = Some((cursor.position() - start) as u32);
                }
                cursor.advance();
            }
            _ => break,
        }
    }
    first_invalid.map(|offset| LexError::new(err_kind, offset))
}

/// Length of a contiguous run of hex-digit/underscore bytes starting at
/// `pos`, without touching the cursor. Used to look past a fraction before
/// committing to it — see the hex-float disambiguation in [`lex_number`].
fn hex_digit_run_len(buf: &[u8], pos: usize) -> usize {
    buf[pos..]
        .iter()
        .take_while(|&&b| b.is_ascii_hexdigit() || b == b'_')
        .count()
}

/// Consumes an optional sign and the exponent digit run of a float,
/// classifying the fault (if any) per the three exponent error rules.
fn consume_exponent(cursor: &mut Cursor<'_>, start: usize) -> Option<LexError> {
    cursor.advance_matching2(b'+', b'-');
    match cursor.current() {
        Some(b'_') => Some(LexError::new(
            LexErrorKind::InvalidFloatingPointExponentCharacter,
            (cursor.position() - start) as u32,
        )),
        Some(b) if b.is_ascii_digit() => consume_digit_run(
            cursor,
            start,
            |b| b.is_ascii_digit(),
            LexErrorKind::InvalidFloatingPointExponentDigit,
            &[],
        ),
        _ => Some(LexError::new(
            LexErrorKind::ExpectedDigitInFloat,
            (cursor.position() - start) as u32,
        )),
    }
}

/// Lexes a number starting at the cursor's current position, which must be
/// an ASCII digit. Consumes the full literal and returns its kind plus any
/// single recovered error.
pub fn lex_number(cursor: &mut Cursor<'_>) -> (TokenKind, Option<LexError>) {
    let start = cursor.position();

    if cursor.current() == Some(b'0') && matches!(cursor.peek(1), Some(b'x') | Some(b'X')) {
        cursor.advance();
        cursor.advance();
        let mut err = consume_digit_run(
            cursor,
            start,
            |b| b.is_ascii_hexdigit(),
            LexErrorKind::InvalidHexDigit,
            &[b'p', b'P'],
        );
        let mut kind = TokenKind::IntegerLiteral;

        if cursor.current() == Some(b'.') && cursor.peek(1).is_some_and(|b| b.is_ascii_hexdigit())
        {
            // A hex float always needs a `p` exponent. Look past the
            // fraction digits without consuming them: if what follows is
            // more identifier-shaped text rather than `p`/`P`, this was
            // never a float at all (`0xff.description`) — the fraction
            // digits we almost ate were really the start of a member name,
            // so leave the dot alone and stop at the integer.
            let frac_pos = cursor.position() + 1;
            let run_len = hex_digit_run_len(cursor.buffer(), frac_pos);
            let after = cursor.buffer().get(frac_pos + run_len).copied();
            let is_exponent_marker = matches!(after, Some(b'p') | Some(b'P'));
            let continues_as_name =
                !is_exponent_marker && after.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_');

            if !continues_as_name {
                cursor.advance();
                kind = TokenKind::FloatingLiteral;
                let frac_err = consume_digit_run(
                    cursor,
                    start,
                    |b| b.is_ascii_hexdigit(),
                    LexErrorKind::InvalidHexDigit,
                    &[b'p', b'P'],
                );
                err = err.or(frac_err);
            }
        }

        if matches!(cursor.current(), Some(b'p') | Some(b'P')) {
            cursor.advance();
            kind = TokenKind::FloatingLiteral;
            err = err.or(consume_exponent(cursor, start));
        } else if kind == TokenKind::FloatingLiteral {
            err = err.or(Some(LexError::new(
                LexErrorKind::ExpectedBinaryExponentInHexFloat,
                (cursor.position() - start) as u32,
            )));
        }

        return (kind, err);
    }

    if cursor.current() == Some(b'0') && matches!(cursor.peek(1), Some(b'o') | Some(b'O')) {
        cursor.advance();
        cursor.advance();
        let err = consume_digit_run(
            cursor,
            start,
            |b| (b'0'..=b'7').contains(&b),
            LexErrorKind::InvalidOctalDigit,
            &[],
        );
        return (TokenKind::IntegerLiteral, err);
    }

    if cursor.current() == Some(b'0') && matches!(cursor.peek(1), Some(b'b') | Some(b'B')) {
        cursor.advance();
        cursor.advance();
        let err = consume_digit_run(
            cursor,
            start,
            |b| b == b'0' || b == b'1',
            LexErrorKind::InvalidBinaryDigit,
            &[],
        );
        return (TokenKind::IntegerLiteral, err);
    }

    let mut err = consume_digit_run(
        cursor,
        start,
        |b| b.is_ascii_digit(),
        LexErrorKind::InvalidDecimalDigit,
        &[b'e', b'E'],
    );
    let mut kind = TokenKind::IntegerLiteral;

    if cursor.current() == Some(b'.')
        && cursor.peek(1).is_some_and(|b| b.is_ascii_digit())
        && cursor.previous_byte() != b'.'
    {
        cursor.advance();
        kind = TokenKind::FloatingLiteral;
        let frac_err = consume_digit_run(
            cursor,
            start,
            |b| b.is_ascii_digit(),
            LexErrorKind::InvalidDecimalDigit,
            &[b'e', b'E'],
        );
        err = err.or(frac_err);
    }

    if matches!(cursor.current(), Some(b'e') | Some(b'E')) {
        cursor.advance();
        kind = TokenKind::FloatingLiteral;
        err = err.or(consume_exponent(cursor, start));
    }

    (kind, err)
}

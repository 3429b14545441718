//! String-literal engine (§4.7): raw delimiters, the opening-quote
//! disambiguation between single-line and multi-line bodies, the body
//! character recognizer, escape sequences, and the closing sequence.
//!
//! Interpolation itself is not tokenized here. Once the body recognizer
//! sees `\(` (optionally raw-prefixed), it stops the current contents run
//! and hands control back to the driver, which switches to
//! [`crate::state::ScannerState::Normal`] and re-lexes the interpolated
//! expression as ordinary tokens — see [`crate::interpolation`] for the
//! lookahead the driver uses to know where that detour ends.

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::state::StringLiteralKind;
use crate::token_kind::TokenKind;

/// Whether `buf[pos..]` starts with *exactly* `n` `#` bytes (not more, not
/// fewer) — the closing-delimiter match §4.7 calls for.
fn hash_run_matches(buf: &[u8], pos: usize, n: u16) -> bool {
    if n == 0 {
        // A non-raw literal has no delimiter to match; trailing `#` bytes
        // (if any) belong to whatever token follows the quote.
        return true;
    }
    (0..n).all(|i| buf.get(pos + i as usize) == Some(&b'#'))
        && buf.get(pos + n as usize) != Some(&b'#')
}

/// Consumes a run of `#` bytes (the raw-string delimiter prefix) and
/// returns how many there were. The cursor must currently sit on `#`.
pub fn lex_raw_string_delimiter(cursor: &mut Cursor<'_>) -> u16 {
    let mut n: u16 = 0;
    while cursor.current() == Some(b'#') {
        cursor.advance();
        n = n.saturating_add(1);
    }
    n
}

/// Whether a candidate `"""` opener at `pos` should instead be read as a
/// single-line literal: true when the rest of the current line contains a
/// `"` immediately followed by `n` `#`s (the delimiter that would close a
/// single-line raw string). The scan deliberately starts at `pos + 1` — one
/// past the first of the three quotes — so it also considers the second and
/// third quotes of the candidate triple themselves as that closing `"`.
fn closes_on_same_line(buf: &[u8], pos: usize, n: u16) -> bool {
    let mut i = pos + 1;
    while i < buf.len() {
        match buf[i] {
            b'\n' | b'\r' => return false,
            b'"' if hash_run_matches(buf, i + 1, n) => return true,
            _ => {}
        }
        i += 1;
    }
    false
}

/// Lexes the literal's opening quote, given the `n` raw hashes already
/// consumed (0 for a non-raw literal). The cursor must sit on `"` or `'`.
/// Returns the token kind for the quote itself plus the body kind the
/// driver should now scan.
pub fn lex_opening_quote(cursor: &mut Cursor<'_>, n: u16) -> (TokenKind, StringLiteralKind) {
    if cursor.current() == Some(b'\'') {
        cursor.advance();
        return (TokenKind::SingleQuote, StringLiteralKind::SingleQuote);
    }

    debug_assert_eq!(cursor.current(), Some(b'"'));
    let pos = cursor.position();
    let buf = cursor.buffer();
    let is_candidate_triple = buf.get(pos + 1) == Some(&b'"') && buf.get(pos + 2) == Some(&b'"');

    if is_candidate_triple && !(n > 0 && closes_on_same_line(buf, pos, n)) {
        cursor.advance();
        cursor.advance();
        cursor.advance();
        return (
            TokenKind::MultilineStringQuote,
            StringLiteralKind::MultiLine,
        );
    }

    cursor.advance();
    (TokenKind::StringQuote, StringLiteralKind::SingleLine)
}

/// Outcome of one call to [`lex_string_literal_contents`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyOutcome {
    /// The closing delimiter was found; the cursor sits right before it.
    Closed,
    /// `\(`/`\#(`… was found; the cursor sits right before the backslash.
    Interpolated,
    /// The buffer ended, or (for single-line/single-quote bodies) a bare
    /// newline was hit, before a close or interpolation.
    Unterminated,
}

enum BodyEvent {
    EndOfString,
    Char,
    InterpolationStart,
    Error(LexErrorKind),
}

fn closer_byte(kind: StringLiteralKind) -> u8 {
    match kind {
        StringLiteralKind::SingleQuote => b'\'',
        StringLiteralKind::SingleLine | StringLiteralKind::MultiLine => b'"',
    }
}

fn at_closing_delimiter(cursor: &Cursor<'_>, kind: StringLiteralKind, n: u16) -> bool {
    let closer = closer_byte(kind);
    if kind == StringLiteralKind::MultiLine {
        cursor.current() == Some(closer)
            && cursor.peek(1) == Some(closer)
            && cursor.peek(2) == Some(closer)
            && hash_run_matches(cursor.buffer(), cursor.position() + 3, n)
    } else {
        cursor.current() == Some(closer) && hash_run_matches(cursor.buffer(), cursor.position() + 1, n)
    }
}

fn consume_line_continuation(cursor: &mut Cursor<'_>, after: usize) -> Option<usize> {
    let buf = cursor.buffer();
    let mut i = after;
    while matches!(buf.get(i), Some(b' ') | Some(b'\t')) {
        i += 1;
    }
    match buf.get(i) {
        Some(b'\n') => Some(i + 1),
        Some(b'\r') if buf.get(i + 1) == Some(&b'\n') => Some(i + 2),
        Some(b'\r') => Some(i + 1),
        _ => None,
    }
}

fn lex_unicode_escape(cursor: &mut Cursor<'_>) -> BodyEvent {
    if !cursor.advance_matching(b'{') {
        return BodyEvent::Error(LexErrorKind::InvalidUnicodeEscape);
    }
    let mut value: u32 = 0;
    let mut digits = 0u32;
    while let Some(b) = cursor.current() {
        let Some(d) = (b as char).to_digit(16) else {
            break;
        };
        if digits < 8 {
            value = value * 16 + d;
        }
        digits += 1;
        cursor.advance();
    }
    if digits == 0 || digits > 8 || !cursor.advance_matching(b'}') {
        return BodyEvent::Error(LexErrorKind::InvalidUnicodeEscape);
    }
    if value > 0x10FFFF || (0xD800..=0xDFFF).contains(&value) {
        return BodyEvent::Error(LexErrorKind::InvalidUnicodeEscape);
    }
    BodyEvent::Char
}

fn lex_escape_or_interpolation(cursor: &mut Cursor<'_>, kind: StringLiteralKind, n: u16) -> BodyEvent {
    let backslash = cursor.position();
    let buf = cursor.buffer();
    if !hash_run_matches(buf, backslash + 1, n) {
        // The raw prefix doesn't match: this backslash is ordinary content.
        cursor.advance();
        return BodyEvent::Char;
    }
    let after_hashes = backslash + 1 + n as usize;

    if buf.get(after_hashes) == Some(&b'(') {
        // Validate a matching `)` exists before committing to the detour —
        // the driver re-lexes everything in between, so there is no
        // recovery path if it never closes.
        if crate::interpolation::find_matching_paren(
            buf,
            after_hashes + 1,
            kind == StringLiteralKind::MultiLine,
        )
        .is_none()
        {
            cursor.advance();
            return BodyEvent::Error(LexErrorKind::UnterminatedStringLiteral);
        }
        // Leave the cursor at the backslash; the driver consumes it while
        // re-lexing the interpolated expression in `Normal` state.
        return BodyEvent::InterpolationStart;
    }

    if kind == StringLiteralKind::MultiLine {
        if let Some(resume) = consume_line_continuation(cursor, after_hashes) {
            while cursor.position() < resume {
                cursor.advance();
            }
            return BodyEvent::Char;
        }
    }

    match buf.get(after_hashes) {
        Some(b'0') | Some(b'n') | Some(b'r') | Some(b't') | Some(b'"') | Some(b'\'') | Some(b'\\') => {
            while cursor.position() <= after_hashes {
                cursor.advance();
            }
            BodyEvent::Char
        }
        Some(b'u') => {
            while cursor.position() <= after_hashes {
                cursor.advance();
            }
            lex_unicode_escape(cursor)
        }
        _ => {
            while cursor.position() < after_hashes {
                cursor.advance();
            }
            if cursor.current().is_some_and(|b| b.is_ascii_alphanumeric()) {
                cursor.advance();
            }
            BodyEvent::Error(LexErrorKind::InvalidEscapeSequence)
        }
    }
}

fn lex_body_step(cursor: &mut Cursor<'_>, kind: StringLiteralKind, n: u16) -> BodyEvent {
    if at_closing_delimiter(cursor, kind, n) {
        return BodyEvent::EndOfString;
    }
    match cursor.current() {
        None => BodyEvent::EndOfString,
        Some(b'\n') | Some(b'\r') if kind != StringLiteralKind::MultiLine => BodyEvent::EndOfString,
        Some(b'\\') => lex_escape_or_interpolation(cursor, kind, n),
        Some(_) => {
            if crate::utf8::advance_validating_utf8_character(cursor).is_none() {
                BodyEvent::Error(LexErrorKind::MalformedUtf8)
            } else {
                BodyEvent::Char
            }
        }
    }
}

/// Scans one run of string-literal contents: body bytes up to (but not
/// including) either the closing delimiter or an interpolation's opening
/// `\(`. The driver calls this once per content run — a literal with two
/// interpolations produces three such runs.
pub fn lex_string_literal_contents(
    cursor: &mut Cursor<'_>,
    kind: StringLiteralKind,
    n: u16,
) -> (TokenKind, Option<LexError>, BodyOutcome) {
    let content_start = cursor.position();
    let mut first_error: Option<LexError> = None;

    loop {
        if cursor.current().is_none() {
            let offset = (cursor.position() - content_start) as u32;
            return (
                TokenKind::StringLiteralContents,
                first_error.or(Some(LexError::new(LexErrorKind::UnterminatedStringLiteral, offset))),
                BodyOutcome::Unterminated,
            );
        }
        let before = cursor.position();
        match lex_body_step(cursor, kind, n) {
            BodyEvent::EndOfString => {
                let outcome = if cursor.current().is_none() {
                    BodyOutcome::Unterminated
                } else {
                    BodyOutcome::Closed
                };
                let error = if outcome == BodyOutcome::Unterminated && first_error.is_none() {
                    Some(LexError::new(
                        LexErrorKind::UnterminatedStringLiteral,
                        (before - content_start) as u32,
                    ))
                } else {
                    first_error
                };
                return (TokenKind::StringLiteralContents, error, outcome);
            }
            BodyEvent::InterpolationStart => {
                return (TokenKind::StringLiteralContents, first_error, BodyOutcome::Interpolated)
            }
            BodyEvent::Char => {}
            BodyEvent::Error(k) => {
                if first_error.is_none() {
                    first_error = Some(LexError::new(k, (before - content_start) as u32));
                }
            }
        }
    }
}

/// Lexes the closing quote (`"`, `'`, or `"""`) once the body scan reports
/// [`BodyOutcome::Closed`].
pub fn lex_closing_quote(cursor: &mut Cursor<'_>, kind: StringLiteralKind) -> TokenKind {
    match kind {
        StringLiteralKind::MultiLine => {
            cursor.advance();
            cursor.advance();
            cursor.advance();
            TokenKind::MultilineStringQuote
        }
        StringLiteralKind::SingleQuote => {
            cursor.advance();
            TokenKind::SingleQuote
        }
        StringLiteralKind::SingleLine => {
            cursor.advance();
            TokenKind::StringQuote
        }
    }
}

/// Lexes the trailing `#`+ run that follows a raw string's closing quote.
pub fn lex_trailing_hashes(cursor: &mut Cursor<'_>) -> TokenKind {
    while cursor.current() == Some(b'#') {
        cursor.advance();
    }
    TokenKind::RawStringDelimiter
}

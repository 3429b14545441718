//! Leading/trailing trivia scanning (§4.4): whitespace, comments, the BOM,
//! a buffer-leading shebang, conflict markers, and the `lexUnknown`
//! fallback for bytes that cannot begin a token.

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};

/// Result of one trivia scan: how many bytes were consumed, whether a
/// newline was among them (only meaningful for leading trivia — trailing
/// trivia never contains one), and any fault found within the trivia
/// itself (currently only an unterminated block comment, offset from the
/// start of this scan rather than from a lexeme's text).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriviaScan {
    pub length: u32,
    pub saw_newline: bool,
    pub error: Option<LexError>,
}

/// ASCII bytes whose scalar is allowed to start a token, used to decide
/// when the trivia scanner must stop rather than swallow the byte via
/// `lexUnknown`. Not an exhaustive operator grammar — just enough to tell
/// "ordinary source text" apart from bytes trivia must absorb (stray
/// U+00A0, lone curly quotes, malformed UTF-8).
fn is_ascii_token_starter(b: u8) -> bool {
    matches!(
        b,
        b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'_'
            | b'$'
            | b'"'
            | b'\''
            | b'#'
            | b'('
            | b')'
            | b'{'
            | b'}'
            | b'['
            | b']'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'@'
            | b'`'
            | b'/'
            | b'='
            | b'-'
            | b'+'
            | b'*'
            | b'%'
            | b'<'
            | b'>'
            | b'!'
            | b'&'
            | b'|'
            | b'^'
            | b'~'
            | b'?'
            | b'.'
    )
}

fn can_begin_token(buf: &[u8], pos: usize) -> bool {
    match crate::utf8::peek_scalar(buf, pos) {
        Some(c) if c.is_ascii() => is_ascii_token_starter(c as u8),
        Some(c) => unicode_ident::is_xid_start(c),
        None => false,
    }
}

/// `<<<<<<< ` ... `>>>>>>> ` or `>>>> ` ... `<<<<\n` (Perforce style),
/// recognized only when the opening bytes match at `pos`. Returns the
/// number of bytes the whole marker region occupies, including the
/// terminator, or `None` if the terminator is never found.
fn scan_conflict_marker(buf: &[u8], pos: usize) -> Option<usize> {
    const OPEN_A: &[u8] = b"<<<<<<< ";
    const CLOSE_A: &[u8] = b">>>>>>> ";
    const OPEN_B: &[u8] = b">>>> ";
    const CLOSE_B: &[u8] = b"<<<<\n";

    let (open, close) = if buf[pos..].starts_with(OPEN_A) {
        (OPEN_A, CLOSE_A)
    } else if buf[pos..].starts_with(OPEN_B) {
        (OPEN_B, CLOSE_B)
    } else {
        return None;
    };

    let search_start = pos + open.len();
    let rel = buf[search_start..]
        .windows(close.len())
        .position(|w| w == close)?;
    Some(open.len() + rel + close.len())
}

enum Mode {
    Leading { is_first_lexeme: bool },
    Trailing,
}

fn scan(cursor: &mut Cursor<'_>, buffer_begin: usize, mode: Mode) -> TriviaScan {
    let start = cursor.position();
    let mut saw_newline = false;
    let mut error: Option<LexError> = None;
    let mut at_line_start = cursor.position() == buffer_begin;

    loop {
        if cursor.is_at_end() {
            break;
        }
        let buf = cursor.buffer();
        let pos = cursor.position();

        if let Mode::Leading { is_first_lexeme } = mode {
            if pos == 0 && buf[pos..].starts_with(&[0xEF, 0xBB, 0xBF]) {
                cursor.advance();
                cursor.advance();
                cursor.advance();
                at_line_start = false;
                continue;
            }

            if is_first_lexeme
                && pos == 0
                && buf.get(pos) == Some(&b'#')
                && buf.get(pos + 1) == Some(&b'!')
            {
                cursor.advance();
                cursor.advance();
                while let Some(b) = cursor.current() {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                    cursor.advance();
                }
                continue;
            }

            if at_line_start {
                if let Some(len) = scan_conflict_marker(buf, pos) {
                    for _ in 0..len {
                        cursor.advance();
                    }
                    at_line_start = false;
                    continue;
                }
            }
        }

        match buf.get(pos) {
            Some(b'/') if buf.get(pos + 1) == Some(&b'/') => {
                cursor.advance();
                cursor.advance();
                while let Some(b) = cursor.current() {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                    cursor.advance();
                }
                at_line_start = false;
                continue;
            }
            Some(b'/') if buf.get(pos + 1) == Some(&b'*') => {
                let comment_start = pos;
                cursor.advance();
                cursor.advance();
                let mut depth: u32 = 1;
                while depth > 0 {
                    match cursor.current() {
                        None => {
                            error = Some(LexError::new(
                                LexErrorKind::UnterminatedBlockComment,
                                (comment_start - start) as u32,
                            ));
                            break;
                        }
                        Some(b'/') if cursor.peek(1) == Some(b'*') => {
                            cursor.advance();
                            cursor.advance();
                            depth += 1;
                        }
                        Some(b'*') if cursor.peek(1) == Some(b'/') => {
                            cursor.advance();
                            cursor.advance();
                            depth -= 1;
                        }
                        Some(_) => {
                            cursor.advance();
                        }
                    }
                }
                at_line_start = false;
                continue;
            }
            Some(b' ') | Some(b'\t') | Some(0x0B) | Some(0x0C) => {
                cursor.advance();
                continue;
            }
            Some(b'\n') if matches!(mode, Mode::Leading { .. }) => {
                cursor.advance();
                saw_newline = true;
                at_line_start = true;
                continue;
            }
            Some(b'\r') if matches!(mode, Mode::Leading { .. }) => {
                cursor.advance();
                cursor.advance_matching(b'\n');
                saw_newline = true;
                at_line_start = true;
                continue;
            }
            Some(b'\n') | Some(b'\r') => break,
            _ => {}
        }

        if can_begin_token(buf, pos) {
            break;
        }

        crate::utf8::advance_validating_utf8_character(cursor);
        at_line_start = false;
    }

    debug_assert!(
        !matches!(mode, Mode::Trailing) || !saw_newline,
        "trailing trivia must never contain a newline"
    );

    TriviaScan {
        length: (cursor.position() - start) as u32,
        saw_newline,
        error,
    }
}

/// Scans leading trivia. `is_first_lexeme` gates shebang recognition, which
/// is only valid at the very beginning of the whole buffer.
pub fn scan_leading_trivia(
    cursor: &mut Cursor<'_>,
    buffer_begin: usize,
    is_first_lexeme: bool,
) -> TriviaScan {
    scan(cursor, buffer_begin, Mode::Leading { is_first_lexeme })
}

/// Scans trailing trivia. Stops (without consuming) at the first LF/CR.
pub fn scan_trailing_trivia(cursor: &mut Cursor<'_>, buffer_begin: usize) -> TriviaScan {
    scan(cursor, buffer_begin, Mode::Trailing)
}

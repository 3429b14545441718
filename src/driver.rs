//! Lexeme driver (§4.10): the top-level loop tying the cursor, scanner
//! state, and every recognizer together into a stream of [`Lexeme`]s.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::identifier::{self, is_identifier_start};
use crate::lexeme::Lexeme;
use crate::number;
use crate::operator::{self};
use crate::placeholder::{self, PoundDispatch};
use crate::regex;
use crate::state::{ScannerState, StringLiteralKind};
use crate::string;
use crate::token_kind::{KeywordCatalogue, LexemeFlags, NullCatalogue, TokenKind};
use crate::trivia;

struct InterpolationFrame {
    kind: StringLiteralKind,
    hashes: u16,
    paren_depth: u32,
    /// True until the interpolation's own opening `(` (the one right after
    /// `\`) has been consumed — that paren delimits the detour but isn't
    /// itself a nesting level to match.
    awaiting_open_paren: bool,
}

/// The lexer: a cursor plus the transient bookkeeping that spans multiple
/// `next_lexeme` calls but is not part of the formally modeled
/// [`ScannerState`] — which string kind an `AfterStringLiteral`/
/// `AfterClosingStringQuote` pair is closing, and the paren-depth stack for
/// any interpolations currently open.
pub struct Lexer<'a, K: KeywordCatalogue = NullCatalogue> {
    cursor: Cursor<'a>,
    catalogue: K,
    buffer_begin: usize,
    is_first_lexeme: bool,
    emitted_eof: bool,
    pending_string_kind: Option<StringLiteralKind>,
    interpolation_stack: Vec<InterpolationFrame>,
}

impl<'a> Lexer<'a, NullCatalogue> {
    /// Creates a lexer at the start of `buf` with the default (no-op)
    /// keyword catalogue.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_catalogue(buf, NullCatalogue)
    }
}

impl<'a, K: KeywordCatalogue> Lexer<'a, K> {
    /// Creates a lexer at the start of `buf` with an explicit catalogue.
    pub fn with_catalogue(buf: &'a [u8], catalogue: K) -> Self {
        Self {
            cursor: Cursor::new(buf),
            catalogue,
            buffer_begin: 0,
            is_first_lexeme: true,
            emitted_eof: false,
            pending_string_kind: None,
            interpolation_stack: Vec::new(),
        }
    }

    /// Creates a lexer resuming mid-buffer, per the external interface in
    /// §6: a session need not start at offset 0 in `Normal`.
    pub fn resuming(
        buf: &'a [u8],
        pos: usize,
        previous: u8,
        state: ScannerState,
        catalogue: K,
    ) -> Self {
        Self {
            cursor: Cursor::resuming(buf, pos, previous, state),
            catalogue,
            buffer_begin: pos,
            is_first_lexeme: false,
            emitted_eof: false,
            pending_string_kind: None,
            interpolation_stack: Vec::new(),
        }
    }

    /// Produces the next lexeme, or `None` once the terminating `eof`
    /// lexeme has already been returned.
    pub fn next_lexeme(&mut self) -> Option<Lexeme> {
        if self.emitted_eof {
            return None;
        }

        let leading_start = self.cursor.position();
        let mut leading_length = 0u32;
        let mut saw_newline = false;
        let mut leading_error: Option<LexError> = None;

        let at_newline = matches!(self.cursor.current(), Some(b'\n') | Some(b'\r'));
        if self.cursor.state().admits_trivia(at_newline) {
            let scan =
                trivia::scan_leading_trivia(&mut self.cursor, self.buffer_begin, self.is_first_lexeme);
            leading_length = scan.length;
            saw_newline = scan.saw_newline;
            leading_error = scan.error;
        }
        self.is_first_lexeme = false;

        let start_of_line = leading_start == self.buffer_begin || saw_newline;
        let text_start = self.cursor.position();

        let (kind, error, new_state) = if self.cursor.is_at_end() && self.cursor.state() == ScannerState::Normal
        {
            self.emitted_eof = true;
            (TokenKind::Eof, None, ScannerState::Normal)
        } else {
            self.dispatch()
        };
        let mut error = error.or(leading_error);

        let trailing_start = self.cursor.position();
        let at_newline_after = matches!(self.cursor.current(), Some(b'\n') | Some(b'\r'));
        let mut trailing_length = 0u32;
        if new_state.admits_trivia(at_newline_after) {
            let scan = trivia::scan_trailing_trivia(&mut self.cursor, self.buffer_begin);
            trailing_length = scan.length;
            error = error.or(scan.error);
        }
        self.cursor.set_state(new_state);

        let mut flags = LexemeFlags::empty();
        if start_of_line {
            flags.insert(LexemeFlags::IS_AT_START_OF_LINE);
        }

        Some(Lexeme {
            kind,
            flags,
            error,
            leading_trivia_start: leading_start as u32,
            leading_trivia_length: leading_length,
            text_length: (trailing_start - text_start) as u32,
            trailing_trivia_length: trailing_length,
        })
    }

    fn dispatch(&mut self) -> (TokenKind, Option<LexError>, ScannerState) {
        match self.cursor.state() {
            ScannerState::Normal => self.dispatch_normal(),
            ScannerState::AfterRawStringDelimiter(n) => {
                let (open_kind, body_kind) = string::lex_opening_quote(&mut self.cursor, n);
                self.pending_string_kind = Some(body_kind);
                (open_kind, None, ScannerState::InStringLiteral(body_kind, n))
            }
            ScannerState::InStringLiteral(body_kind, n) => {
                let (kind, error, outcome) =
                    string::lex_string_literal_contents(&mut self.cursor, body_kind, n);
                let new_state = match outcome {
                    string::BodyOutcome::Closed => {
                        self.pending_string_kind = Some(body_kind);
                        ScannerState::AfterStringLiteral { is_raw: n > 0 }
                    }
                    string::BodyOutcome::Unterminated => ScannerState::Normal,
                    string::BodyOutcome::Interpolated => {
                        self.interpolation_stack.push(InterpolationFrame {
                            kind: body_kind,
                            hashes: n,
                            paren_depth: 0,
                            awaiting_open_paren: true,
                        });
                        ScannerState::Normal
                    }
                };
                (kind, error, new_state)
            }
            ScannerState::AfterStringLiteral { is_raw } => {
                let body_kind = self
                    .pending_string_kind
                    .take()
                    .unwrap_or(StringLiteralKind::SingleLine);
                let kind = string::lex_closing_quote(&mut self.cursor, body_kind);
                let new_state = if is_raw {
                    ScannerState::AfterClosingStringQuote
                } else {
                    ScannerState::Normal
                };
                (kind, None, new_state)
            }
            ScannerState::AfterClosingStringQuote => {
                let kind = string::lex_trailing_hashes(&mut self.cursor);
                (kind, None, ScannerState::Normal)
            }
        }
    }

    fn dispatch_normal(&mut self) -> (TokenKind, Option<LexError>, ScannerState) {
        let Some(b) = self.cursor.current() else {
            return (TokenKind::Unknown, None, ScannerState::Normal);
        };

        if b.is_ascii_digit() {
            let (kind, error) = number::lex_number(&mut self.cursor);
            return (kind, error, ScannerState::Normal);
        }

        match b {
            b'`' => {
                let kind = identifier::lex_backtick_identifier(&mut self.cursor);
                return (kind, None, ScannerState::Normal);
            }
            b'$' => {
                let kind = identifier::lex_dollar_identifier(&mut self.cursor);
                return (kind, None, ScannerState::Normal);
            }
            b'"' => {
                let (open_kind, body_kind) = string::lex_opening_quote(&mut self.cursor, 0);
                self.pending_string_kind = Some(body_kind);
                return (open_kind, None, ScannerState::InStringLiteral(body_kind, 0));
            }
            b'\'' => {
                let (open_kind, body_kind) = string::lex_opening_quote(&mut self.cursor, 0);
                self.pending_string_kind = Some(body_kind);
                return (open_kind, None, ScannerState::InStringLiteral(body_kind, 0));
            }
            b'#' => return self.dispatch_pound(),
            b'<' => {
                if let Some(kind) = placeholder::try_lex_placeholder(&mut self.cursor) {
                    return (kind, None, ScannerState::Normal);
                }
            }
            b'/' => {
                if let Some(kind) = regex::try_lex_regex(&mut self.cursor, self.buffer_begin) {
                    return (kind, None, ScannerState::Normal);
                }
            }
            b'(' => {
                self.cursor.advance();
                if let Some(top) = self.interpolation_stack.last_mut() {
                    if top.awaiting_open_paren {
                        top.awaiting_open_paren = false;
                    } else {
                        top.paren_depth += 1;
                    }
                }
                return (TokenKind::LeftParen, None, ScannerState::Normal);
            }
            b')' => {
                self.cursor.advance();
                if let Some(top) = self.interpolation_stack.last_mut() {
                    if top.paren_depth > 0 {
                        top.paren_depth -= 1;
                    } else {
                        let frame = self.interpolation_stack.pop().unwrap();
                        return (
                            TokenKind::RightParen,
                            None,
                            ScannerState::InStringLiteral(frame.kind, frame.hashes),
                        );
                    }
                }
                return (TokenKind::RightParen, None, ScannerState::Normal);
            }
            b'{' => {
                self.cursor.advance();
                return (TokenKind::LeftBrace, None, ScannerState::Normal);
            }
            b'}' => {
                self.cursor.advance();
                return (TokenKind::RightBrace, None, ScannerState::Normal);
            }
            b'[' => {
                self.cursor.advance();
                return (TokenKind::LeftBracket, None, ScannerState::Normal);
            }
            b']' => {
                self.cursor.advance();
                return (TokenKind::RightBracket, None, ScannerState::Normal);
            }
            b',' => {
                self.cursor.advance();
                return (TokenKind::Comma, None, ScannerState::Normal);
            }
            b';' => {
                self.cursor.advance();
                return (TokenKind::Semicolon, None, ScannerState::Normal);
            }
            b':' => {
                self.cursor.advance();
                return (TokenKind::Colon, None, ScannerState::Normal);
            }
            b'@' => {
                self.cursor.advance();
                return (TokenKind::At, None, ScannerState::Normal);
            }
            b'\\' => {
                self.cursor.advance();
                return (TokenKind::Backslash, None, ScannerState::Normal);
            }
            _ => {}
        }

        if operator::is_operator_char(b) {
            let kind = operator::lex_operator(&mut self.cursor, self.buffer_begin);
            return (kind, None, ScannerState::Normal);
        }

        if crate::utf8::peek_scalar(self.cursor.buffer(), self.cursor.position())
            .is_some_and(is_identifier_start)
        {
            let kind = identifier::lex_identifier(&mut self.cursor, &self.catalogue);
            return (kind, None, ScannerState::Normal);
        }

        crate::utf8::advance_validating_utf8_character(&mut self.cursor);
        (TokenKind::Unknown, None, ScannerState::Normal)
    }

    fn dispatch_pound(&mut self) -> (TokenKind, Option<LexError>, ScannerState) {
        let buf = self.cursor.buffer();
        let pos = self.cursor.position();
        match placeholder::classify_pound(buf, pos) {
            PoundDispatch::RawStringDelimiter(n) => {
                let kind = string::lex_raw_string_delimiter(&mut self.cursor);
                debug_assert_eq!(kind, TokenKind::RawStringDelimiter);
                (kind, None, ScannerState::AfterRawStringDelimiter(n))
            }
            PoundDispatch::Regex => {
                if let Some(kind) = regex::try_lex_regex(&mut self.cursor, self.buffer_begin) {
                    (kind, None, ScannerState::Normal)
                } else {
                    let kind = placeholder::lex_pound_directive(&mut self.cursor);
                    (kind, None, ScannerState::Normal)
                }
            }
            PoundDispatch::Directive => {
                let kind = placeholder::lex_pound_directive(&mut self.cursor);
                (kind, None, ScannerState::Normal)
            }
        }
    }
}

impl<'a, K: KeywordCatalogue> Iterator for Lexer<'a, K> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        self.next_lexeme()
    }
}

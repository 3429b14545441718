//! Interpolation skip-scan (§4.7.1).
//!
//! Once the string engine sees `\(`/`\#(`/…, it only needs to know *where*
//! the matching `)` is — the bytes in between are re-lexed normally by the
//! driver once it switches back to [`crate::state::ScannerState::Normal`].
//! This scanner exists purely to validate that a matching close exists
//! (and to bound comment/newline recovery) before the driver commits to
//! that detour.

use crate::state::StringLiteralKind;

fn count_hashes(buf: &[u8], pos: usize) -> usize {
    let mut n = 0;
    while buf.get(pos + n) == Some(&b'#') {
        n += 1;
    }
    n
}

fn hash_run_matches(buf: &[u8], pos: usize, n: u16) -> bool {
    (0..n).all(|i| buf.get(pos + i as usize) == Some(&b'#'))
}

struct NestedString {
    closer: u8,
    is_multiline: bool,
    hashes: u16,
}

/// Walks forward from just after an interpolation's opening `(` and returns
/// the offset of its matching `)`, or `None` if the buffer ends first (an
/// unterminated interpolation) or a forbidden same-line block comment would
/// have to cross a newline. `enclosing_is_multiline` is whether the string
/// literal containing this interpolation is itself multi-line (governs
/// whether newlines are allowed inside nested, non-string expression text
/// without being treated as a termination of a single-line context).
pub fn find_matching_paren(buf: &[u8], start: usize, enclosing_is_multiline: bool) -> Option<usize> {
    let mut pos = start;
    let mut depth: i32 = 1;
    let mut nested: Vec<NestedString> = Vec::new();

    while pos < buf.len() {
        if let Some(top) = nested.last() {
            let closer = top.closer;
            let is_ml = top.is_multiline;
            let hashes = top.hashes;

            if buf[pos] == b'\\' {
                let h = count_hashes(buf, pos + 1);
                if h as u16 == hashes && buf.get(pos + 1 + h) == Some(&b'(') {
                    // A nested interpolation inside this nested string opens
                    // a further paren level.
                    depth += 1;
                    pos += 1 + h + 1;
                    continue;
                }
                pos += 2 + hashes as usize;
                continue;
            }

            if is_ml
                && buf[pos] == closer
                && buf.get(pos + 1) == Some(&closer)
                && buf.get(pos + 2) == Some(&closer)
                && hash_run_matches(buf, pos + 3, hashes)
            {
                pos += 3 + hashes as usize;
                nested.pop();
                continue;
            }
            if !is_ml && buf[pos] == closer && hash_run_matches(buf, pos + 1, hashes) {
                pos += 1 + hashes as usize;
                nested.pop();
                continue;
            }
            if !is_ml && matches!(buf[pos], b'\n' | b'\r') {
                // Unterminated nested single-line string; leave recovery to
                // the outer scanner rather than guessing further.
                return None;
            }
            pos += 1;
            continue;
        }

        match buf[pos] {
            b'(' => {
                depth += 1;
                pos += 1;
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
                pos += 1;
            }
            b'"' | b'\'' => {
                let closer = buf[pos];
                let is_ml = closer == b'"'
                    && buf.get(pos + 1) == Some(&b'"')
                    && buf.get(pos + 2) == Some(&b'"');
                pos += if is_ml { 3 } else { 1 };
                nested.push(NestedString {
                    closer,
                    is_multiline: is_ml,
                    hashes: 0,
                });
            }
            b'#' => {
                let h = count_hashes(buf, pos);
                if buf.get(pos + h) == Some(&b'"') {
                    let q = pos + h;
                    let is_ml =
                        buf.get(q + 1) == Some(&b'"') && buf.get(q + 2) == Some(&b'"');
                    pos = if is_ml { q + 3 } else { q + 1 };
                    nested.push(NestedString {
                        closer: b'"',
                        is_multiline: is_ml,
                        hashes: h as u16,
                    });
                } else {
                    pos += 1;
                }
            }
            b'/' if buf.get(pos + 1) == Some(&b'/') => {
                while pos < buf.len() && buf[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'/' if buf.get(pos + 1) == Some(&b'*') => {
                if !enclosing_is_multiline {
                    let mut j = pos + 2;
                    let mut crosses_newline = false;
                    while j < buf.len() && !(buf[j] == b'*' && buf.get(j + 1) == Some(&b'/')) {
                        if buf[j] == b'\n' {
                            crosses_newline = true;
                            break;
                        }
                        j += 1;
                    }
                    if crosses_newline {
                        return None;
                    }
                }
                pos += 2;
                while pos < buf.len() && !(buf[pos] == b'*' && buf.get(pos + 1) == Some(&b'/')) {
                    pos += 1;
                }
                pos = (pos + 2).min(buf.len());
            }
            _ => pos += 1,
        }
    }
    None
}

/// Convenience wrapper taking the enclosing literal's [`StringLiteralKind`]
/// directly.
pub fn find_matching_paren_for(
    buf: &[u8],
    start: usize,
    enclosing_kind: StringLiteralKind,
) -> Option<usize> {
    find_matching_paren(buf, start, enclosing_kind == StringLiteralKind::MultiLine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_expression() {
        let buf = b"b)c\"";
        assert_eq!(find_matching_paren(buf, 0, false), Some(1));
    }

    #[test]
    fn test_nested_parens() {
        let buf = b"f(1,2))c\"";
        assert_eq!(find_matching_paren(buf, 0, false), Some(6));
    }

    #[test]
    fn test_nested_string_containing_parens() {
        let buf = b"\"(not a paren)\")c\"";
        assert_eq!(find_matching_paren(buf, 0, false), Some(17));
    }

    #[test]
    fn test_unterminated_returns_none() {
        let buf = b"f(1, 2";
        assert_eq!(find_matching_paren(buf, 0, false), None);
    }

    #[test]
    fn test_line_comment_inside_expression() {
        let buf = b"a // )\nb)c";
        assert_eq!(find_matching_paren(buf, 0, false), Some(9));
    }

    #[test]
    fn test_block_comment_crossing_line_forbidden_in_single_line_context() {
        let buf = b"a /* \n */ b)c";
        assert_eq!(find_matching_paren(buf, 0, false), None);
    }

    #[test]
    fn test_block_comment_same_line_allowed() {
        let buf = b"a /* x */ b)c";
        assert_eq!(find_matching_paren(buf, 0, false), Some(11));
    }
}

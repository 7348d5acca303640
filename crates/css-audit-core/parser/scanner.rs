//! Comment stripping and brace-depth block scanning

use std::borrow::Cow;

use super::errors::{IssueKind, ParseError, ParseIssue};

/// Raw block found at depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RawBlock<'a> {
    pub selector: &'a str,
    pub body: &'a str,
    /// Line of the first selector character
    pub line: usize,
    /// Line of the opening brace
    pub open_line: usize,
}

/// Everything the scanner found in one pass.
#[derive(Debug, Default)]
pub(super) struct ScanOutput<'a> {
    pub blocks: Vec<RawBlock<'a>>,
    pub issues: Vec<ParseIssue>,
    pub fault: Option<ParseError>,
    pub statements: usize,
}

/// Remove `/* ... */` comments, keeping the newlines they contained.
///
/// Comment markers inside string literals are left alone.
pub(super) fn strip_comments<'a>(
    text: &'a str,
    first_line: usize,
    issues: &mut Vec<ParseIssue>,
) -> Cow<'a, str> {
    if !text.contains("/*") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied_from = 0;
    let mut quote: Option<u8> = None;
    let mut line = first_line;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'\n' {
            line += 1;
        }
        match quote {
            Some(_) if byte == b'\\' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    line += 1;
                }
                i += 2;
                continue;
            }
            Some(q) if byte == q || byte == b'\n' => quote = None,
            Some(_) => {}
            None if byte == b'\\' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    line += 1;
                }
                i += 2;
                continue;
            }
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None if byte == b'/' && bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&text[copied_from..i]);
                let end = if let Some(offset) = text[i + 2..].find("*/") {
                    i + 2 + offset + 2
                } else {
                    issues.push(ParseIssue::warning(
                        IssueKind::UnterminatedComment,
                        "Unterminated comment runs to end of input".to_string(),
                        line,
                    ));
                    bytes.len()
                };
                let newlines = text[i..end].matches('\n').count();
                out.extend(core::iter::repeat('\n').take(newlines));
                line += newlines;
                i = end;
                copied_from = end;
                continue;
            }
            None => {}
        }
        i += 1;
    }

    out.push_str(&text[copied_from.min(text.len())..]);
    Cow::Owned(out)
}

/// Split comment-free text into depth-zero blocks.
///
/// String literals are skipped for depth counting. Everything between the
/// outermost braces of a block is returned verbatim.
pub(super) fn scan_blocks(text: &str, first_line: usize) -> ScanOutput<'_> {
    let bytes = text.as_bytes();
    let mut out = ScanOutput::default();

    let mut line = first_line;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut start: Option<(usize, usize)> = None;
    let mut open: (usize, usize) = (0, first_line);
    let mut selector_range = (0, 0);
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];

        if let Some(q) = quote {
            match byte {
                b'\\' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        line += 1;
                    }
                    i = escape_end(text, i);
                    continue;
                }
                b'\n' => {
                    out.issues.push(ParseIssue::warning(
                        IssueKind::UnterminatedString,
                        "String literal ended by newline".to_string(),
                        line,
                    ));
                    quote = None;
                    line += 1;
                }
                _ if byte == q => quote = None,
                _ => {}
            }
            i += 1;
            continue;
        }

        match byte {
            b'\n' => line += 1,
            b'\\' => {
                if start.is_none() && depth == 0 {
                    start = Some((i, line));
                }
                if bytes.get(i + 1) == Some(&b'\n') {
                    line += 1;
                }
                i = escape_end(text, i);
                continue;
            }
            b'"' | b'\'' => {
                quote = Some(byte);
                if start.is_none() && depth == 0 {
                    start = Some((i, line));
                }
            }
            b'{' => {
                if depth == 0 {
                    let begin = start.map_or(i, |(pos, _)| pos);
                    selector_range = (begin, i);
                    open = (i + 1, line);
                    if start.is_none() {
                        start = Some((i, line));
                    }
                }
                depth += 1;
            }
            b'}' if depth == 0 => {
                out.issues.push(ParseIssue::warning(
                    IssueKind::StrayCloseBrace,
                    "Unmatched '}' skipped".to_string(),
                    line,
                ));
                start = None;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let selector_line = start.map_or(open.1, |(_, l)| l);
                    out.blocks.push(RawBlock {
                        selector: &text[selector_range.0..selector_range.1],
                        body: &text[open.0..i],
                        line: selector_line,
                        open_line: open.1,
                    });
                    start = None;
                }
            }
            b';' if depth == 0 => {
                if start.is_some() {
                    out.statements += 1;
                }
                start = None;
            }
            _ if depth == 0 && start.is_none() && !byte.is_ascii_whitespace() => {
                start = Some((i, line));
            }
            _ => {}
        }
        i += 1;
    }

    if depth > 0 {
        out.fault = Some(ParseError::UnterminatedBlock {
            line: open.1,
            depth,
        });
    } else if let Some((pos, start_line)) = start {
        if pos < text.len() && !text[pos..].trim().is_empty() {
            out.issues.push(ParseIssue::info(
                IssueKind::TrailingContent,
                "Trailing text without a block dropped".to_string(),
                start_line,
            ));
        }
    }

    out
}

/// Index just past the character escaped by the backslash at `i`.
fn escape_end(text: &str, i: usize) -> usize {
    let next = text[i + 1..].chars().next().map_or(0, char::len_utf8);
    i + 1 + next
}

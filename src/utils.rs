//! Utility functions for safe string operations
//!
//! Report previews are cut by character count, never by byte offset, so
//! multi-byte identifiers and string literals cannot cause slicing panics.
//! Source text is split into lines on every Python line boundary, not just
//! `\n` and `\r\n`.

/// Line boundaries recognised by Python's `str.splitlines`
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Iterator over the lines of a source text, see [`split_lines`]
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|(_, c)| is_line_break(*c)) {
            Some((at, c)) => {
                let line = &self.rest[..at];
                let mut end = at + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Split text into lines without their terminators.
///
/// Breaks on `\r\n`, a lone `\r`, `\n`, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators. A trailing terminator does not produce an empty last line.
///
/// # Examples
/// ```
/// use codequal::utils::split_lines;
///
/// let lines: Vec<&str> = split_lines("a\r\nb\rc\n").collect();
/// assert_eq!(lines, ["a", "b", "c"]);
/// ```
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Truncate a string to at most `max_chars` characters.
///
/// # Examples
/// ```
/// use codequal::utils::truncate_to_chars;
///
/// assert_eq!(truncate_to_chars("hello world", 5), "hello");
/// assert_eq!(truncate_to_chars("naïve", 3), "naï");
/// ```
pub fn truncate_to_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string and append an ellipsis when anything was cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let truncated = truncate_to_chars(s, max_chars);
    if truncated.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", truncated)
    }
}

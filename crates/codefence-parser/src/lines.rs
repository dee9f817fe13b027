//! Line reconstruction across chunk boundaries.
//!
//! Chunks arrive cut at arbitrary points. A line ends at `\n`, `\r\n` or a
//! bare `\r`. A `\r` that is the last character seen so far is ambiguous
//! because the next chunk may start with `\n`, so such a line is treated as
//! still open.

/// What is left over from the previous chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Carry {
    /// The previous chunk ended on a line boundary
    #[default]
    Empty,
    /// An incomplete line that has not been emitted yet
    Buffered(String),
    /// An incomplete line that was already emitted; the next chunk's first
    /// piece continues it
    Continuing {
        /// The emitted text ended in `\r`
        after_cr: bool,
    },
}

/// Find where the first line of `text` ends.
///
/// Returns the byte offset just past the terminator, or `None` if `text`
/// holds no complete line. `after_cr` says the text seen before `text`
/// ended in `\r`: the line then either takes one more `\n` or is already
/// over.
///
/// # Example
///
/// ```ignore
/// assert_eq!(line_end("ab\ncd", false), Some(3));
/// assert_eq!(line_end("ab\r\ncd", false), Some(4));
/// assert_eq!(line_end("ab\r", false), None);
/// assert_eq!(line_end("\nx", true), Some(1));
/// assert_eq!(line_end("x", true), Some(0));
/// ```
pub(crate) fn line_end(text: &str, after_cr: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    if after_cr {
        return Some(usize::from(bytes.first() == Some(&b'\n')));
    }
    let pos = bytes.iter().position(|&b| b == b'\n' || b == b'\r')?;
    if bytes[pos] == b'\n' {
        return Some(pos + 1);
    }
    match bytes.get(pos + 1) {
        Some(b'\n') => Some(pos + 2),
        Some(_) => Some(pos + 1),
        None => None,
    }
}

/// Split `text` into complete lines plus an incomplete tail.
///
/// Used by tests and the documentation of the chunk-splitting rules; the
/// parser itself walks the text with [`line_end`] so it never rescans a
/// buffered line.
pub fn split_lines(text: &str) -> (Vec<&str>, &str) {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(end) = line_end(rest, false) {
        let (line, tail) = rest.split_at(end);
        lines.push(line);
        rest = tail;
    }
    (lines, rest)
}

/// Whether a line holds nothing but whitespace (terminator included).
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Strip the line terminator, if any.
pub fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

//! Row Segmenter: splits source text into logical rows at explicit newlines
//! and records where each row may later be broken.

use serde::Serialize;

/// Soft hyphen (SHY). Marks a break opportunity and is never drawn unless
/// the break is taken.
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// A logical row: the text between two explicit newlines.
///
/// Offsets in `break_points` are character offsets relative to the row's
/// start, strictly ascending. Each one names the last character of a unit
/// that may end a visual line: a breakable space, or the character just
/// before a soft hyphen.
///
/// # Example
///
/// `"fgh\u{AD}ijk\u{AD}lm opq"` becomes text `"fghijklm opq"` with break
/// points `[2, 5, 8]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowDescriptor {
    /// Row text with soft hyphens removed.
    pub text: String,
    /// Candidate break offsets (in characters).
    pub break_points: Vec<usize>,
}

impl RowDescriptor {
    /// Number of characters in the row.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn push_break(&mut self, offset: usize) {
        if self.break_points.last().is_none_or(|&last| last < offset) {
            self.break_points.push(offset);
        }
    }
}

/// Whether `ch` ends a logical row.
///
/// Line feed, carriage return, form feed, vertical tab, next line, line
/// separator and paragraph separator.
#[must_use]
pub const fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000C}' | '\u{000B}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whether `ch` is whitespace that allows a line break after it.
///
/// Non-breaking spaces (no-break space, figure space, hyphenation point,
/// word joiner, zero-width no-break space) never do.
#[must_use]
pub fn is_breakable_whitespace(ch: char) -> bool {
    ch.is_whitespace()
        && !matches!(
            ch,
            '\u{00A0}' | '\u{2007}' | '\u{2027}' | '\u{2060}' | '\u{FEFF}'
        )
}

/// Split `text` into logical rows.
///
/// Scans once. `\r\n` counts as a single boundary. The final row is always
/// emitted, so empty text yields one empty row and a trailing newline
/// yields a trailing empty row.
#[must_use]
pub fn segment(text: &str) -> Vec<RowDescriptor> {
    let mut rows = Vec::new();
    let mut current = RowDescriptor::default();
    let mut column = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_newline(ch) {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                let _ = chars.next();
            }
            rows.push(std::mem::take(&mut current));
            column = 0;
            continue;
        }

        if ch == SOFT_HYPHEN {
            // The break goes after the previous character; nothing precedes
            // a hyphen at the start of a row.
            if let Some(previous) = column.checked_sub(1) {
                current.push_break(previous);
            }
            continue;
        }

        if is_breakable_whitespace(ch) {
            // The break carries the space with it.
            current.push_break(column);
        }

        current.text.push(ch);
        column += 1;
    }

    rows.push(current);
    rows
}

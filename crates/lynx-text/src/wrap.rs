//! Line-Breaking Engine: turns logical rows into drawable rows that fit a
//! width.
//!
//! The engine is a lazy iterator so the overflow resolver can stop pulling
//! rows as soon as the height budget is spent. Each logical row is broken in
//! one go and its pieces are queued.

use std::collections::VecDeque;

use serde::Serialize;

use crate::metrics::MeasureCache;
use crate::segment::{RowDescriptor, is_breakable_whitespace};
use crate::style::BreakMode;

/// A final, rendered line of text.
///
/// Terminal output of the text pipeline: it carries no break-point data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawableRow {
    /// The text to draw, including any inserted hyphen or overflow marker.
    pub text: String,
    /// Measured advance width of `text`.
    pub width: f32,
}

/// How each logical row is turned into drawable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy<'s> {
    /// Wrap to the width using the given break mode.
    Wrap(BreakMode),
    /// Emit every logical row whole, however wide.
    Unwrapped,
    /// Emit every logical row whole, but cut rows wider than the width and
    /// end them with `marker`.
    TruncateEach {
        /// Marker appended to a cut row.
        marker: &'s str,
    },
}

/// Result of wrapping a whole text without a height limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wrapped {
    /// Drawable rows in order.
    pub rows: Vec<DrawableRow>,
    /// Widest row.
    pub max_row_width: f32,
    /// Whether any logical row was split or cut because of the width.
    pub split: bool,
}

/// A break-point-delimited piece of a logical row.
struct Portion {
    text: String,
    /// Full advance, trailing whitespace included.
    width: f32,
    /// Advance without trailing breakable whitespace, used for the fit test.
    fit_width: f32,
    ends_with_whitespace: bool,
}

/// Lazy producer of drawable rows.
pub struct LineBreaker<'r, 'c, 'm> {
    rows: std::slice::Iter<'r, RowDescriptor>,
    pending: VecDeque<DrawableRow>,
    cache: &'c mut MeasureCache<'m>,
    policy: RowPolicy<'r>,
    font_size: f32,
    max_width: f32,
    hyphen: char,
    max_row_width: f32,
    split: bool,
}

impl<'r, 'c, 'm> LineBreaker<'r, 'c, 'm> {
    /// Create a breaker over `rows` for boxes `max_width` wide.
    pub fn new(
        rows: &'r [RowDescriptor],
        policy: RowPolicy<'r>,
        max_width: f32,
        font_size: f32,
        hyphen: char,
        cache: &'c mut MeasureCache<'m>,
    ) -> Self {
        Self {
            rows: rows.iter(),
            pending: VecDeque::new(),
            cache,
            policy,
            font_size,
            max_width,
            hyphen,
            max_row_width: 0.0,
            split: false,
        }
    }

    /// Widest row yielded so far.
    #[must_use]
    pub const fn max_row_width(&self) -> f32 {
        self.max_row_width
    }

    /// Whether any row yielded so far came from a width-driven split or cut.
    #[must_use]
    pub const fn split(&self) -> bool {
        self.split
    }

    fn emit(&mut self, text: String) {
        let width = self.cache.measure(&text, self.font_size);
        self.pending.push_back(DrawableRow { text, width });
    }

    fn break_row(&mut self, row: &RowDescriptor) {
        if row.text.is_empty() {
            self.pending.push_back(DrawableRow::default());
            return;
        }

        match self.policy {
            RowPolicy::Wrap(BreakMode::HardBreak) => self.hard_break(&row.text),
            RowPolicy::Wrap(mode) if !row.break_points.is_empty() => self.greedy(row, mode),
            RowPolicy::Wrap(_) | RowPolicy::Unwrapped => self.emit(row.text.clone()),
            RowPolicy::TruncateEach { marker } => self.truncate(&row.text, marker),
        }
    }

    /// Cut at whatever fits, at least one character per cut.
    fn hard_break(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            let rest: String = chars[start..].iter().collect();
            let remaining = chars.len() - start;
            let count = self
                .cache
                .break_text(&rest, self.font_size, self.max_width)
                .clamp(1, remaining);
            if count < remaining {
                self.split = true;
            }
            self.emit(chars[start..start + count].iter().collect());
            start += count;
        }
    }

    fn portions(&mut self, row: &RowDescriptor) -> Vec<Portion> {
        let chars: Vec<char> = row.text.chars().collect();
        let mut ranges = Vec::with_capacity(row.break_points.len() + 1);
        let mut start = 0;
        for &offset in &row.break_points {
            let end = (offset + 1).min(chars.len());
            if end > start {
                ranges.push(start..end);
                start = end;
            }
        }
        if start < chars.len() {
            ranges.push(start..chars.len());
        }

        ranges
            .into_iter()
            .map(|range| {
                let text: String = chars[range].iter().collect();
                let width = self.cache.measure(&text, self.font_size);
                let trimmed = text.trim_end_matches(is_breakable_whitespace);
                let ends_with_whitespace = trimmed.len() != text.len();
                let fit_width = if ends_with_whitespace {
                    self.cache.measure(trimmed, self.font_size)
                } else {
                    width
                };
                Portion {
                    text,
                    width,
                    fit_width,
                    ends_with_whitespace,
                }
            })
            .collect()
    }

    /// Accumulate portions while they fit.
    fn greedy(&mut self, row: &RowDescriptor, mode: BreakMode) {
        let portions = self.portions(row);
        let mut next = 0;

        while next < portions.len() {
            let mut line = String::new();
            let mut width = 0.0;
            let mut taken = 0;
            let mut needs_hyphen = false;
            // (index of the portion after it, line length) of the last
            // whitespace-ended portion on this line
            let mut last_space: Option<(usize, usize)> = None;

            while let Some(portion) = portions.get(next) {
                if taken > 0 && width + portion.fit_width > self.max_width {
                    if mode == BreakMode::NoBreak {
                        if let Some((after, len)) = last_space {
                            line.truncate(len);
                            next = after;
                            needs_hyphen = false;
                        }
                    }
                    break;
                }

                line.push_str(&portion.text);
                width += portion.width;
                next += 1;
                taken += 1;
                needs_hyphen = !portion.ends_with_whitespace;
                if portion.ends_with_whitespace {
                    last_space = Some((next, line.len()));
                }
            }

            // A hyphen never ends a logical row.
            if next < portions.len() {
                self.split = true;
                let kept = line.trim_end_matches(is_breakable_whitespace).len();
                line.truncate(kept);
                if needs_hyphen {
                    line.push(self.hyphen);
                }
            }
            self.emit(line);
        }
    }

    fn truncate(&mut self, text: &str, marker: &str) {
        let len = text.chars().count();
        if self.cache.break_text(text, self.font_size, self.max_width) >= len {
            self.emit(text.to_owned());
            return;
        }

        let marker_width = self.cache.measure(marker, self.font_size);
        let keep = self
            .cache
            .break_text(text, self.font_size, self.max_width - marker_width)
            .max(1);
        let mut line: String = text.chars().take(keep).collect();
        line.push_str(marker);
        self.split = true;
        self.emit(line);
    }
}

impl Iterator for LineBreaker<'_, '_, '_> {
    type Item = DrawableRow;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                self.max_row_width = self.max_row_width.max(row.width);
                return Some(row);
            }
            let logical = self.rows.next()?;
            self.break_row(logical);
        }
    }
}

/// Wrap `rows` to `max_width` without any height limit.
///
/// `HardBreak` ignores break points; `SoftBreak` and `NoBreak` break only at
/// them, and a row without break points is emitted unsplit even when it
/// overflows.
pub fn wrap(
    rows: &[RowDescriptor],
    max_width: f32,
    break_mode: BreakMode,
    hyphen: char,
    font_size: f32,
    cache: &mut MeasureCache<'_>,
) -> Wrapped {
    let mut breaker = LineBreaker::new(
        rows,
        RowPolicy::Wrap(break_mode),
        max_width,
        font_size,
        hyphen,
        cache,
    );
    let rows: Vec<DrawableRow> = breaker.by_ref().collect();
    Wrapped {
        rows,
        max_row_width: breaker.max_row_width(),
        split: breaker.split(),
    }
}

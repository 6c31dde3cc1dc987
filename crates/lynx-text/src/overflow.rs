//! Overflow/Ellipsis Resolver: decides when to stop emitting rows and how
//! the last row is shortened to make room for the overflow marker.

use crate::metrics::MeasureCache;
use crate::style::OverflowMode;
use crate::wrap::DrawableRow;

/// How many trailing characters of the last row may be inspected (and at
/// most removed) to make room for the overflow marker.
pub const ELLIPSIS_LOOKBACK: usize = 3;

/// Whether no further row may be emitted.
///
/// `current_height` is the running height including the baseline offset of
/// the first row.
///
/// - `Overflow` never stops.
/// - `Clip` stops before a row that would cross `allotted_height`.
/// - `Ellipsis` stops only once the running height is already past
///   `allotted_height`, so the marker lands on the last accumulated row.
#[must_use]
pub fn must_stop(
    current_height: f32,
    row_height: f32,
    allotted_height: f32,
    overflow_mode: OverflowMode,
) -> bool {
    match overflow_mode {
        OverflowMode::Ellipsis => current_height > allotted_height,
        OverflowMode::Clip => current_height + row_height > allotted_height,
        OverflowMode::Overflow => false,
    }
}

/// Running height of the rows emitted so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBudget {
    baseline_offset: f32,
    current: f32,
    row_height: f32,
    /// `None` in auto-expand mode: never stop.
    allotted: Option<f32>,
    mode: OverflowMode,
}

impl HeightBudget {
    /// Budget for rows `row_height` apart whose glyphs are `font_size` tall.
    #[must_use]
    pub fn new(
        row_height: f32,
        font_size: f32,
        allotted: Option<f32>,
        mode: OverflowMode,
    ) -> Self {
        let baseline_offset = row_height / 2.0 + font_size / 2.0;
        Self {
            baseline_offset,
            current: baseline_offset,
            row_height,
            allotted,
            mode,
        }
    }

    /// Whether the next row must not be emitted.
    #[must_use]
    pub fn must_stop(&self) -> bool {
        self.allotted
            .is_some_and(|allotted| must_stop(self.current, self.row_height, allotted, self.mode))
    }

    /// Account for one emitted row.
    pub fn advance(&mut self) {
        self.current += self.row_height;
    }

    /// Whether the allotted height is too small for even a single row.
    #[must_use]
    pub fn fits_nothing(&self) -> bool {
        self.allotted
            .is_some_and(|allotted| allotted < self.baseline_offset)
    }

    /// Height consumed by the emitted rows: the running height without the
    /// first row's baseline offset.
    #[must_use]
    pub fn used(&self) -> f32 {
        self.current - self.baseline_offset
    }
}

/// End `row` with `marker`, shortening it if the marker would not fit in
/// `preferred_width`. A marker that fits exactly is appended in place.
///
/// At most [`ELLIPSIS_LOOKBACK`] trailing characters are removed; the
/// shortened row is measured again.
pub fn fit_ellipsis(
    row: &mut DrawableRow,
    marker: &str,
    preferred_width: f32,
    font_size: f32,
    cache: &mut MeasureCache<'_>,
) {
    let marker_width = cache.measure(marker, font_size);
    if row.width + marker_width <= preferred_width {
        row.text.push_str(marker);
        row.width += marker_width;
        return;
    }

    let len = row.text.chars().count();
    let remove = if len >= ELLIPSIS_LOOKBACK {
        let tail_reversed: String = row.text.chars().rev().take(ELLIPSIS_LOOKBACK).collect();
        (cache.break_text(&tail_reversed, font_size, marker_width) + 1).min(ELLIPSIS_LOOKBACK)
    } else {
        len
    };

    let mut text: String = row.text.chars().take(len - remove).collect();
    text.push_str(marker);
    row.width = cache.measure(&text, font_size);
    row.text = text;
}

//! The text pipeline as one call: wrap, stop, truncate, measure.

use serde::Serialize;

use crate::metrics::MeasureCache;
use crate::overflow::{HeightBudget, fit_ellipsis};
use crate::segment::RowDescriptor;
use crate::style::{OverflowMode, TextAlignment, TextStyle};
use crate::wrap::{DrawableRow, LineBreaker, RowPolicy};

/// The box the text is shaped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    /// Preferred width: rows wrap to it and the ellipsis must fit in it.
    pub width: f32,
    /// Widest a row may be when word wrap is off and rows are truncated.
    pub max_width: f32,
    /// Height available for rows; `None` grows without limit (auto-expand).
    pub allotted_height: Option<f32>,
}

impl TextFrame {
    /// A frame whose preferred and maximum size are the same box.
    #[must_use]
    pub const fn fixed(width: f32, height: f32) -> Self {
        Self {
            width,
            max_width: width,
            allotted_height: Some(height),
        }
    }

    /// A frame that grows vertically with its content.
    #[must_use]
    pub const fn expanding(width: f32, max_width: f32) -> Self {
        Self {
            width,
            max_width,
            allotted_height: None,
        }
    }
}

/// Drawable rows plus the extent they occupy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapedText {
    /// Rows in drawing order.
    pub rows: Vec<DrawableRow>,
    /// Widest emitted row.
    pub max_row_width: f32,
    /// Used width: the frame width, or the widest row when rows were split
    /// or cut and one of them is wider.
    pub width: f32,
    /// Used height: emitted rows times the row height.
    pub height: f32,
    /// Distance between row baselines.
    pub row_height: f32,
    /// Font size the rows were measured at.
    pub font_size: f32,
    /// Whether any row came from a width-driven split or cut.
    pub split: bool,
    /// Whether rows were dropped because the height ran out.
    pub truncated: bool,
}

impl ShapedText {
    /// Baseline position of every row for a box at `(x, y)` that is
    /// `box_width` wide.
    pub fn placements(
        &self,
        x: f32,
        y: f32,
        box_width: f32,
        alignment: TextAlignment,
    ) -> impl Iterator<Item = (f32, f32, &DrawableRow)> + '_ {
        let mut baseline = y + self.row_height / 2.0 + self.font_size / 2.0;
        self.rows.iter().map(move |row| {
            let placed = (
                x + alignment.row_offset(row.width, box_width),
                baseline,
                row,
            );
            baseline += self.row_height;
            placed
        })
    }
}

/// Produce drawable rows for `rows` inside `frame`.
///
/// With word wrap on, rows wrap to `frame.width` under `style.break_mode`.
/// With word wrap off, only explicit newlines split rows, and in
/// `Ellipsis` mode every row wider than `frame.max_width` is cut.
///
/// Rows stop according to `style.overflow_mode` unless the frame has no
/// height limit. On an `Ellipsis` stop the last emitted row gets the overflow
/// marker. A height too small for a single row leaves no rows at all.
pub fn shape(
    rows: &[RowDescriptor],
    style: &TextStyle,
    font_size: f32,
    frame: TextFrame,
    cache: &mut MeasureCache<'_>,
) -> ShapedText {
    let row_height = style.row_height(font_size);
    let mut budget = HeightBudget::new(
        row_height,
        font_size,
        frame.allotted_height,
        style.overflow_mode,
    );

    let (policy, break_width) = if style.word_wrap {
        (RowPolicy::Wrap(style.break_mode), frame.width)
    } else if style.overflow_mode == OverflowMode::Ellipsis {
        (
            RowPolicy::TruncateEach {
                marker: &style.overflow_marker,
            },
            frame.max_width,
        )
    } else {
        (RowPolicy::Unwrapped, frame.max_width)
    };

    let mut emitted = Vec::new();
    let mut truncated = false;
    let mut breaker = LineBreaker::new(
        rows,
        policy,
        break_width,
        font_size,
        style.hyphen,
        cache,
    );
    for row in breaker.by_ref() {
        if budget.must_stop() {
            truncated = true;
            break;
        }
        emitted.push(row);
        budget.advance();
    }
    let split = breaker.split();
    drop(breaker);

    if budget.fits_nothing() && style.overflow_mode != OverflowMode::Overflow {
        return ShapedText {
            row_height,
            font_size,
            width: frame.width,
            truncated,
            ..ShapedText::default()
        };
    }

    if truncated && style.overflow_mode == OverflowMode::Ellipsis {
        if let Some(last) = emitted.last_mut() {
            fit_ellipsis(last, &style.overflow_marker, frame.width, font_size, cache);
        }
    }

    let max_row_width = emitted.iter().map(|row| row.width).fold(0.0, f32::max);
    ShapedText {
        width: if split {
            frame.width.max(max_row_width)
        } else {
            frame.width
        },
        height: budget.used(),
        rows: emitted,
        max_row_width,
        row_height,
        font_size,
        split,
        truncated,
    }
}

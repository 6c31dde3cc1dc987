//! Text measurement seam and the per-pass measurement cache.

use std::collections::HashMap;

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the per-glyph advance widths of a pre-shaped,
/// left-to-right run. The line breaker calls these methods once per
/// candidate segment, so implementations should be cheap and must be
/// deterministic for a given font.
pub trait TextMetrics {
    /// Measure the total advance width of a text string at the given font size.
    ///
    /// This should sum the advance width of each glyph in the string,
    /// matching the cursor advancement used when the row is drawn.
    fn measure_text(&self, text: &str, font_size: f32) -> f32;

    /// The largest number of leading characters of `text` whose advance
    /// fits in `max_width`.
    ///
    /// May return 0. Callers that need progress clamp the result to 1.
    fn break_text(&self, text: &str, font_size: f32, max_width: f32) -> usize {
        let mut buf = [0u8; 4];
        let mut width = 0.0;
        let mut count = 0;
        for ch in text.chars() {
            width += self.measure_text(ch.encode_utf8(&mut buf), font_size);
            if width > max_width {
                break;
            }
            count += 1;
        }
        count
    }
}

impl<M: TextMetrics + ?Sized> TextMetrics for Box<M> {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure_text(text, font_size)
    }

    fn break_text(&self, text: &str, font_size: f32, max_width: f32) -> usize {
        (**self).break_text(text, font_size, max_width)
    }
}

/// Approximate font metrics using a fixed advance ratio.
///
/// Without access to actual font data, the average advance width of Latin
/// glyphs in a proportional font is approximately 0.6× the font size.
///
/// This is used as a fallback when no font is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMetrics for ApproximateMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }
}

/// Memoized `measure_text` results for one layout pass.
///
/// Entries are keyed by the exact text and the font size rounded to two
/// decimals. A cache is created when a pass starts at the root and dropped
/// when it ends, so entries never outlive a font or content-scale change.
pub struct MeasureCache<'m> {
    metrics: &'m dyn TextMetrics,
    widths: HashMap<i64, HashMap<String, f32>>,
    hits: usize,
}

impl<'m> MeasureCache<'m> {
    /// Create an empty cache in front of `metrics`.
    #[must_use]
    pub fn new(metrics: &'m dyn TextMetrics) -> Self {
        Self {
            metrics,
            widths: HashMap::new(),
            hits: 0,
        }
    }

    /// The provider this cache sits in front of.
    #[must_use]
    pub fn metrics(&self) -> &'m dyn TextMetrics {
        self.metrics
    }

    /// Width of `text` at `font_size`, measured at most once per pass.
    pub fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        let bucket = self.widths.entry(size_key(font_size)).or_default();
        if let Some(&width) = bucket.get(text) {
            self.hits += 1;
            return width;
        }
        let width = self.metrics.measure_text(text, font_size);
        let _ = bucket.insert(text.to_owned(), width);
        width
    }

    /// Uncached passthrough to [`TextMetrics::break_text`].
    #[must_use]
    pub fn break_text(&self, text: &str, font_size: f32, max_width: f32) -> usize {
        self.metrics.break_text(text, font_size, max_width)
    }

    /// Number of distinct measurements stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been measured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many `measure` calls were answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }
}

#[allow(clippy::cast_possible_truncation)]
fn size_key(font_size: f32) -> i64 {
    (f64::from(font_size) * 100.0).round() as i64
}

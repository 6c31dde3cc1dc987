//! Font metrics backed by fontdue for accurate text measurement during layout.
//!
//! The layout core only needs advance widths, so this crate queries
//! `Font::metrics()` per character and never rasterizes.

use std::path::Path;

use fontdue::{Font, FontSettings};
use lynx_text::TextMetrics;
use thiserror::Error;

/// Errors raised while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    /// fontdue rejected the font data.
    #[error("failed to parse font: {0}")]
    Load(String),
}

/// Text metrics implementation backed by fontdue's per-glyph metrics.
///
/// This implementation queries fontdue for exact per-character advance
/// widths. It uses `Font::metrics()` (not `Font::rasterize()`) to avoid the
/// cost of bitmap generation when only measurements are needed.
pub struct FontdueMetrics {
    font: Font,
}

impl FontdueMetrics {
    /// Wrap an already parsed font.
    #[must_use]
    pub const fn new(font: Font) -> Self {
        Self { font }
    }

    /// Parse a TrueType/OpenType font from memory.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Load`] if fontdue cannot parse the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontError> {
        Font::from_bytes(bytes, FontSettings::default())
            .map(Self::new)
            .map_err(|e| FontError::Load(e.to_owned()))
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Io`] if the file cannot be read, or
    /// [`FontError::Load`] if it is not a usable font.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The wrapped font.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }
}

impl TextMetrics for FontdueMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        // Control characters have no advance when a row is drawn.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }
}

//! Text configuration: break, overflow and alignment policies.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};
use thiserror::Error;

use lynx_common::warning::warn_once;

/// Errors raised when a policy arrives as a raw value from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// An overflow mode name or discriminant that names no [`OverflowMode`].
    ///
    /// This is a contract violation by the caller, never a data problem.
    #[error("invalid overflow mode `{0}`")]
    InvalidOverflowMode(String),
    /// A break mode name or discriminant that names no [`BreakMode`].
    #[error("invalid break mode `{0}`")]
    InvalidBreakMode(String),
    /// An alignment name or discriminant that names no [`TextAlignment`].
    #[error("invalid text alignment `{0}`")]
    InvalidAlignment(String),
}

/// How a logical row may be split when it is wider than the box.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum BreakMode {
    /// Break only after whitespace; soft hyphens are used only when a row
    /// has no whitespace break at all.
    NoBreak = 0,
    /// Break at whitespace or soft hyphens, inserting the hyphen character
    /// when the break is not on whitespace.
    #[default]
    SoftBreak = 1,
    /// Ignore break points and cut at whatever character fills the width.
    HardBreak = 2,
}

/// What happens when the rows need more height than the box offers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum OverflowMode {
    /// Stop one row late and end the last row with the overflow marker.
    #[default]
    Ellipsis = 0,
    /// Stop before the first row that would cross the bottom edge.
    Clip = 1,
    /// Never stop; rows run past the bottom edge.
    Overflow = 2,
}

/// Horizontal placement of each drawable row inside the box.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum TextAlignment {
    /// Treated as `Left`; inter-word stretching is not performed.
    Justify = 0,
    /// Flush with the left edge.
    #[default]
    Left = 1,
    /// Centered in the box.
    Center = 2,
    /// Flush with the right edge.
    Right = 3,
}

impl TextAlignment {
    /// Offset from the box's left edge at which a row of `row_width` starts.
    #[must_use]
    pub fn row_offset(self, row_width: f32, box_width: f32) -> f32 {
        match self {
            Self::Justify | Self::Left => 0.0,
            Self::Center => (box_width - row_width) / 2.0,
            Self::Right => box_width - row_width,
        }
    }
}

macro_rules! raw_conversions {
    ($ty:ty, $err:ident) => {
        impl TryFrom<u8> for $ty {
            type Error = TextError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::from_repr(value).ok_or_else(|| TextError::$err(value.to_string()))
            }
        }

        impl $ty {
            /// Parse a kebab-case name (case-insensitive).
            ///
            /// # Errors
            ///
            /// Returns the matching [`TextError`] variant for unknown names.
            pub fn parse(name: &str) -> Result<Self, TextError> {
                name.parse().map_err(|_| TextError::$err(name.to_owned()))
            }
        }
    };
}

raw_conversions!(BreakMode, InvalidBreakMode);
raw_conversions!(OverflowMode, InvalidOverflowMode);
raw_conversions!(TextAlignment, InvalidAlignment);

/// Default glyph inserted at a soft-hyphen break.
pub const DEFAULT_HYPHEN: char = '-';

/// Default marker appended to truncated rows.
pub const DEFAULT_OVERFLOW_MARKER: &str = "\u{2026}";

/// Default line height as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Everything that decides how a text's rows are produced, except the
/// font size and the box, which the layout pass supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Wrap rows to the box width. When off, only explicit newlines split rows.
    pub word_wrap: bool,
    /// Break policy used when wrapping.
    pub break_mode: BreakMode,
    /// Height overflow policy.
    pub overflow_mode: OverflowMode,
    /// Glyph appended at a non-whitespace break.
    pub hyphen: char,
    /// Row pitch as a multiple of the font size. Negative values count as 0.
    pub line_height: f32,
    /// Marker appended to the last row when text is cut short.
    pub overflow_marker: String,
    /// Horizontal placement of rows.
    pub alignment: TextAlignment,
}

impl TextStyle {
    /// Set the row pitch. Negative values clamp to 0.
    pub fn set_line_height(&mut self, line_height: f32) {
        if line_height < 0.0 {
            warn_once(
                "Text",
                &format!("negative line height {line_height} clamped to 0"),
            );
        }
        self.line_height = line_height.max(0.0);
    }

    /// Builder form of [`TextStyle::set_line_height`].
    #[must_use]
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.set_line_height(line_height);
        self
    }

    /// Distance between consecutive row baselines for `font_size`.
    #[must_use]
    pub fn row_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height.max(0.0)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            word_wrap: false,
            break_mode: BreakMode::default(),
            overflow_mode: OverflowMode::default(),
            hyphen: DEFAULT_HYPHEN,
            line_height: DEFAULT_LINE_HEIGHT,
            overflow_marker: DEFAULT_OVERFLOW_MARKER.to_owned(),
            alignment: TextAlignment::default(),
        }
    }
}

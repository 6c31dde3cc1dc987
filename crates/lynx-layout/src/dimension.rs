//! Abstract lengths and their conversion to pixels.
//!
//! A [`Dimension`] is a value plus a [`Unit`]. It only becomes a pixel
//! length once it is resolved against a reference size, the content scale
//! and the viewport. Unset dimensions are `None` and resolve to `0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

use crate::error::LayoutError;
use crate::geometry::{Point, Size};

/// The unit a [`Dimension`] is expressed in.
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
pub enum Unit {
    /// Density-independent units, multiplied by the content scale.
    #[default]
    Dp = 0,
    /// Device pixels, used verbatim.
    Pixel = 1,
    /// Percentage of the reference size.
    Percent = 2,
    /// Percentage of the viewport width.
    ViewportWidth = 3,
    /// Percentage of the viewport height.
    ViewportHeight = 4,
}

impl Unit {
    /// The suffix used when a dimension is written as a string.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Dp => "dp",
            Self::Pixel => "px",
            Self::Percent => "%",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "dp" => Some(Self::Dp),
            "px" => Some(Self::Pixel),
            "%" => Some(Self::Percent),
            "vw" => Some(Self::ViewportWidth),
            "vh" => Some(Self::ViewportHeight),
            _ => None,
        }
    }
}

/// An abstract length: a value in some [`Unit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Magnitude in `unit`.
    pub value: f32,
    /// What `value` is measured in.
    pub unit: Unit,
}

impl Dimension {
    /// Create a dimension.
    #[must_use]
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Density-independent units.
    #[must_use]
    pub const fn dp(value: f32) -> Self {
        Self::new(value, Unit::Dp)
    }

    /// Device pixels.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::new(value, Unit::Pixel)
    }

    /// Percentage of the reference size.
    #[must_use]
    pub const fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// Percentage of the viewport width.
    #[must_use]
    pub const fn vw(value: f32) -> Self {
        Self::new(value, Unit::ViewportWidth)
    }

    /// Percentage of the viewport height.
    #[must_use]
    pub const fn vh(value: f32) -> Self {
        Self::new(value, Unit::ViewportHeight)
    }

    /// Convert to pixels.
    ///
    /// `reference` is the size percentages are taken of (the parent's
    /// preferred size along the same axis).
    #[must_use]
    pub fn to_px(self, reference: f32, scale: f32, viewport: Size) -> f32 {
        match self.unit {
            Unit::Dp => self.value * scale,
            Unit::Pixel => self.value,
            Unit::Percent => self.value * reference / 100.0,
            Unit::ViewportWidth => self.value * viewport.width / 100.0,
            Unit::ViewportHeight => self.value * viewport.height / 100.0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Dimension {
    type Err = LayoutError;

    /// Parse `"12"`, `"12dp"`, `"4px"`, `"50%"`, `"10vw"` or `"10vh"`.
    /// A bare number is in [`Unit::Dp`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic() || c == '%')
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);

        let unit = Unit::from_suffix(suffix.trim())
            .ok_or_else(|| LayoutError::UnknownUnit(suffix.trim().to_owned()))?;
        let value = number
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LayoutError::InvalidDimension(s.to_owned()))?;

        Ok(Self::new(value, unit))
    }
}

/// Convert an optional dimension to pixels; unset resolves to `0`.
///
/// Pure: identical inputs always give identical output.
#[must_use]
pub fn resolve(dim: Option<Dimension>, reference: f32, scale: f32, viewport: Size) -> f32 {
    dim.map_or(0.0, |d| d.to_px(reference, scale, viewport))
}

/// The pass-wide inputs every resolution needs besides the reference size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveContext {
    /// Multiplier for [`Unit::Dp`].
    pub scale: f32,
    /// Viewport size for [`Unit::ViewportWidth`] and [`Unit::ViewportHeight`].
    pub viewport: Size,
}

impl ResolveContext {
    /// Create a context.
    #[must_use]
    pub const fn new(scale: f32, viewport: Size) -> Self {
        Self { scale, viewport }
    }

    /// Resolve an optional dimension; unset resolves to `0`.
    #[must_use]
    pub fn px(self, dim: Option<Dimension>, reference: f32) -> f32 {
        resolve(dim, reference, self.scale, self.viewport)
    }

    /// Resolve an optional dimension; unset resolves to `fallback`.
    #[must_use]
    pub fn px_or(self, dim: Option<Dimension>, reference: f32, fallback: f32) -> f32 {
        dim.map_or(fallback, |d| d.to_px(reference, self.scale, self.viewport))
    }
}

/// An element's offset from its parent's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset; percentages are of the parent's preferred width.
    pub x: Option<Dimension>,
    /// Vertical offset; percentages are of the parent's preferred height.
    pub y: Option<Dimension>,
}

impl Position {
    /// No offset on either axis.
    pub const UNSET: Self = Self { x: None, y: None };

    /// Create a position from both offsets.
    #[must_use]
    pub const fn new(x: Dimension, y: Dimension) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Whether neither axis is set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Absolute position given the parent's absolute position and preferred
    /// size. An unset position is exactly the parent's position.
    #[must_use]
    pub fn absolute(&self, parent: Point, parent_size: Size, ctx: ResolveContext) -> Point {
        if self.is_unset() {
            return parent;
        }
        parent.offset(
            ctx.px(self.x, parent_size.width),
            ctx.px(self.y, parent_size.height),
        )
    }
}

/// Per-side insets, each an optional [`Dimension`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Top inset; percentages are of the height.
    pub top: Option<Dimension>,
    /// Right inset; percentages are of the width.
    pub right: Option<Dimension>,
    /// Bottom inset; percentages are of the height.
    pub bottom: Option<Dimension>,
    /// Left inset; percentages are of the width.
    pub left: Option<Dimension>,
}

impl EdgeInsets {
    /// The same inset on all four sides.
    #[must_use]
    pub const fn all(inset: Dimension) -> Self {
        Self {
            top: Some(inset),
            right: Some(inset),
            bottom: Some(inset),
            left: Some(inset),
        }
    }

    /// One inset for left and right, another for top and bottom.
    #[must_use]
    pub const fn symmetric(horizontal: Dimension, vertical: Dimension) -> Self {
        Self {
            top: Some(vertical),
            right: Some(horizontal),
            bottom: Some(vertical),
            left: Some(horizontal),
        }
    }

    /// Resolve to pixel insets `(top, right, bottom, left)` against `size`.
    #[must_use]
    pub fn resolve(&self, size: Size, ctx: ResolveContext) -> (f32, f32, f32, f32) {
        (
            ctx.px(self.top, size.height),
            ctx.px(self.right, size.width),
            ctx.px(self.bottom, size.height),
            ctx.px(self.left, size.width),
        )
    }
}

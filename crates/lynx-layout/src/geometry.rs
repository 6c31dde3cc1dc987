//! Resolved, pixel-space geometry.

use serde::{Deserialize, Serialize};

/// A point in absolute (viewport-relative) pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the viewport's left edge.
    pub x: f32,
    /// Vertical offset from the viewport's top edge.
    pub y: f32,
}

impl Point {
    /// The viewport origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point moved by `dx`, `dy`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width and a height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// A size with no extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// A size with no upper bound on either axis.
    pub const UNBOUNDED: Self = Self {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both axes are within `other`, allowing for float noise.
    #[must_use]
    pub fn fits_within(self, other: Self) -> bool {
        const SLACK: f32 = 1e-3;
        self.width <= other.width + SLACK && self.height <= other.height + SLACK
    }
}

/// Sizes handed from a parent to its children during a layout pass.
///
/// `preferred` is the base percentages resolve against; `max` is never
/// exceeded by a clamped size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConstraint {
    /// The parent's preferred size.
    pub preferred: Size,
    /// The parent's maximum size.
    pub max: Size,
}

impl SizeConstraint {
    /// Create a constraint.
    #[must_use]
    pub const fn new(preferred: Size, max: Size) -> Self {
        Self { preferred, max }
    }

    /// A constraint whose preferred and maximum size coincide.
    #[must_use]
    pub const fn tight(size: Size) -> Self {
        Self::new(size, size)
    }
}

/// The final box of an element after a layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Absolute position of the top-left corner.
    pub position: Point,
    /// Width and height.
    pub size: Size,
}

impl Bounds {
    /// Create bounds.
    #[must_use]
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.position.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.position.y
    }

    /// Width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }
}

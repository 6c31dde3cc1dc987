//! Per-element sizing rules.
//!
//! Width and height are configured independently. Each axis is one of three
//! [`SizingMode`]s with optional min, max and preferred [`Dimension`]s.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

use crate::dimension::{Dimension, ResolveContext};
use crate::geometry::{Point, Size, SizeConstraint};

/// How one axis of an element is sized.
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
pub enum SizingMode {
    /// Exactly the preferred dimension.
    #[default]
    Fixed = 0,
    /// Somewhere between min and max; `prefers_max` picks the end.
    MinMax = 1,
    /// The preferred dimension clamped between min and max.
    MinMaxAndPreferred = 2,
}

/// Sizing rule for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Which rule applies.
    pub mode: SizingMode,
    /// Preferred dimension (`Fixed` and `MinMaxAndPreferred`).
    pub preferred: Option<Dimension>,
    /// Lower bound (`MinMax` and `MinMaxAndPreferred`).
    pub min: Option<Dimension>,
    /// Upper bound (`MinMax` and `MinMaxAndPreferred`).
    pub max: Option<Dimension>,
    /// In `MinMax` mode, grow towards max instead of settling on min.
    pub prefers_max: bool,
}

impl AxisSpec {
    /// A fixed dimension.
    #[must_use]
    pub const fn fixed(size: Dimension) -> Self {
        Self {
            mode: SizingMode::Fixed,
            preferred: Some(size),
            min: None,
            max: None,
            prefers_max: false,
        }
    }

    /// A range. Unset bounds are open.
    #[must_use]
    pub const fn min_max(min: Option<Dimension>, max: Option<Dimension>, prefers_max: bool) -> Self {
        Self {
            mode: SizingMode::MinMax,
            preferred: None,
            min,
            max,
            prefers_max,
        }
    }

    /// A preferred dimension kept within a range.
    #[must_use]
    pub const fn min_max_preferred(
        preferred: Dimension,
        min: Option<Dimension>,
        max: Option<Dimension>,
    ) -> Self {
        Self {
            mode: SizingMode::MinMaxAndPreferred,
            preferred: Some(preferred),
            min,
            max,
            prefers_max: false,
        }
    }

    /// Resolved size along this axis.
    ///
    /// `reference` is the parent's preferred size on this axis and
    /// `max_allowed` is the parent's max minus this element's offset.
    ///
    /// When min and max conflict in `MinMax` with `prefers_max`, or in
    /// `MinMaxAndPreferred`, min wins.
    #[must_use]
    pub fn direct_size(&self, reference: f32, max_allowed: f32, ctx: ResolveContext) -> f32 {
        match self.mode {
            SizingMode::Fixed => ctx.px(self.preferred, reference),
            SizingMode::MinMax if self.prefers_max => {
                let floor = ctx.px_or(self.min, reference, f32::MIN);
                let wanted = ctx.px_or(self.max, reference, f32::INFINITY);
                floor.max(wanted.min(max_allowed))
            }
            SizingMode::MinMax => {
                let wanted = ctx.px(self.min, reference);
                let ceiling = ctx.px_or(self.max, reference, f32::MAX);
                wanted.min(ceiling)
            }
            SizingMode::MinMaxAndPreferred => {
                let floor = ctx.px_or(self.min, reference, f32::MIN);
                let ceiling = ctx
                    .px_or(self.max, reference, f32::MAX)
                    .min(max_allowed);
                ctx.px(self.preferred, reference).min(ceiling).max(floor)
            }
        }
    }

    /// Largest size this axis may take: the preferred size when fixed,
    /// otherwise the max bound (unbounded when unset).
    #[must_use]
    pub fn max_size(&self, reference: f32, ctx: ResolveContext) -> f32 {
        match self.mode {
            SizingMode::Fixed => ctx.px(self.preferred, reference),
            SizingMode::MinMax | SizingMode::MinMaxAndPreferred => {
                ctx.px_or(self.max, reference, f32::INFINITY)
            }
        }
    }

    /// The min bound in pixels, `0` when unset.
    #[must_use]
    pub fn min_size(&self, reference: f32, ctx: ResolveContext) -> f32 {
        ctx.px(self.min, reference)
    }
}

/// Width and height sizing rules of an element.
///
/// The default leaves both axes fixed with no preferred dimension, which
/// resolves to an empty box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Horizontal rule.
    pub width: AxisSpec,
    /// Vertical rule.
    pub height: AxisSpec,
}

impl LayoutSpec {
    /// Create a spec from both axes.
    #[must_use]
    pub const fn new(width: AxisSpec, height: AxisSpec) -> Self {
        Self { width, height }
    }

    /// Fixed width and height.
    #[must_use]
    pub const fn fixed(width: Dimension, height: Dimension) -> Self {
        Self::new(AxisSpec::fixed(width), AxisSpec::fixed(height))
    }

    /// Fixed at 100% of the parent on both axes.
    #[must_use]
    pub const fn fill() -> Self {
        Self::fixed(Dimension::percent(100.0), Dimension::percent(100.0))
    }

    /// Replace the width rule.
    #[must_use]
    pub const fn with_width(mut self, width: AxisSpec) -> Self {
        self.width = width;
        self
    }

    /// Replace the height rule.
    #[must_use]
    pub const fn with_height(mut self, height: AxisSpec) -> Self {
        self.height = height;
        self
    }

    /// Resolved size for an element placed `offset` from its parent's origin.
    #[must_use]
    pub fn direct_size(
        &self,
        constraint: SizeConstraint,
        offset: Point,
        ctx: ResolveContext,
    ) -> Size {
        let max_allowed = Size::new(
            constraint.max.width - offset.x,
            constraint.max.height - offset.y,
        );
        Size::new(
            self.width.direct_size(constraint.preferred.width, max_allowed.width, ctx),
            self.height.direct_size(constraint.preferred.height, max_allowed.height, ctx),
        )
    }

    /// Maximum size for an element inside a parent of preferred size `reference`.
    #[must_use]
    pub fn max_size(&self, reference: Size, ctx: ResolveContext) -> Size {
        Size::new(
            self.width.max_size(reference.width, ctx),
            self.height.max_size(reference.height, ctx),
        )
    }
}

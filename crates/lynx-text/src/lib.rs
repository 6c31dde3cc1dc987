//! Text shaping for the Lynx layout core.
//!
//! Turns a source string into drawable rows for a box:
//! - **Row Segmenter** ([`segment`]) - logical rows and their break points
//! - **Line-Breaking Engine** ([`wrap`]) - width-driven splitting under a
//!   [`BreakMode`]
//! - **Overflow/Ellipsis Resolver** ([`overflow`]) - height-driven stopping
//!   under an [`OverflowMode`] and ellipsis fitting
//! - [`shape`] - all three in one pass
//!
//! Glyph advances come from a [`TextMetrics`] provider through a
//! pass-scoped [`MeasureCache`].

pub mod metrics;
pub mod overflow;
pub mod segment;
pub mod shape;
pub mod style;
pub mod wrap;

pub use metrics::{ApproximateMetrics, MeasureCache, TextMetrics};
pub use overflow::{ELLIPSIS_LOOKBACK, HeightBudget, fit_ellipsis, must_stop};
pub use segment::{RowDescriptor, SOFT_HYPHEN, segment};
pub use shape::{ShapedText, TextFrame, shape};
pub use style::{BreakMode, OverflowMode, TextAlignment, TextError, TextStyle};
pub use wrap::{DrawableRow, LineBreaker, RowPolicy, Wrapped, wrap};

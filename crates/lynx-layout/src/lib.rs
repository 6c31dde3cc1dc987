//! Box layout for the Lynx layout core.
//!
//! A [`Document`] owns an arena tree of [`Element`]s. Each element carries a
//! [`LayoutSpec`] (fixed, min/max or min/max/preferred per axis) and an
//! optional offset, and its [`ElementKind`] picks a layout strategy:
//! plain, padding, text or a linear container.
//!
//! Changes flag the element dirty; the flag travels to the root, which
//! runs one top-down pass. A parent always fixes its own box before its
//! children are resolved, and text elements shape their rows with the
//! `lynx-text` pipeline against a measurement cache scoped to the pass.

pub mod dimension;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod layout_spec;
pub mod resolver;

pub use dimension::{Dimension, EdgeInsets, Position, ResolveContext, Unit, resolve};
pub use document::Document;
pub use element::{
    DEFAULT_FONT_SIZE, Element, ElementKind, LinearContainer, Orientation, TextContent,
};
pub use error::LayoutError;
pub use geometry::{Bounds, Point, Size, SizeConstraint};
pub use layout_spec::{AxisSpec, LayoutSpec, SizingMode};
pub use lynx_tree::NodeId;

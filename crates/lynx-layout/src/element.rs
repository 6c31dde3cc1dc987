//! Elements and the layout strategies their kinds select.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

use lynx_common::warning::warn_once;
use lynx_text::{
    HeightBudget, OverflowMode, RowDescriptor, ShapedText, TextFrame, TextStyle, segment,
};

use crate::dimension::{Dimension, EdgeInsets, Position, ResolveContext, Unit};
use crate::geometry::{Bounds, Point, Size};
use crate::layout_spec::LayoutSpec;

/// Font size used when none is configured.
pub const DEFAULT_FONT_SIZE: Dimension = Dimension::dp(16.0);

/// Main axis of a [`LinearContainer`].
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
pub enum Orientation {
    /// Children placed left to right.
    #[default]
    Horizontal = 0,
    /// Children placed top to bottom.
    Vertical = 1,
}

impl Orientation {
    /// The component of `size` along this axis.
    #[must_use]
    pub const fn main(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// The component of `size` across this axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Build a size from main and cross components.
    #[must_use]
    pub const fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }
}

/// A row or column that places its children one after another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearContainer {
    /// Direction children are placed in.
    pub orientation: Orientation,
    /// Gap between consecutive children; percentages are of the main axis.
    pub spacing: Option<Dimension>,
}

impl LinearContainer {
    /// A left-to-right container.
    #[must_use]
    pub const fn row(spacing: Option<Dimension>) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing,
        }
    }

    /// A top-to-bottom container.
    #[must_use]
    pub const fn column(spacing: Option<Dimension>) -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing,
        }
    }
}

/// Text owned by a text element together with its shaping state.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    source: String,
    rows: Vec<RowDescriptor>,
    style: TextStyle,
    font_size: Dimension,
    auto_expand: bool,
    shaped: Option<ShapedText>,
    stale: bool,
}

impl TextContent {
    /// Text with the default style and font size.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let source = text.into();
        Self {
            rows: segment(&source),
            source,
            style: TextStyle::default(),
            font_size: DEFAULT_FONT_SIZE,
            auto_expand: false,
            shaped: None,
            stale: true,
        }
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: Dimension) -> Self {
        self.font_size = font_size;
        self
    }

    /// Let the content decide the element's height.
    #[must_use]
    pub fn with_auto_expand(mut self, auto_expand: bool) -> Self {
        self.auto_expand = auto_expand;
        self
    }

    /// The source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.source
    }

    /// Logical rows of the source text.
    #[must_use]
    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    /// The current style.
    #[must_use]
    pub const fn style(&self) -> &TextStyle {
        &self.style
    }

    /// The configured font size.
    #[must_use]
    pub const fn font_size(&self) -> Dimension {
        self.font_size
    }

    /// Whether the content decides the element's height.
    #[must_use]
    pub const fn auto_expand(&self) -> bool {
        self.auto_expand
    }

    /// Result of the last shaping, if the element was laid out.
    #[must_use]
    pub const fn shaped(&self) -> Option<&ShapedText> {
        self.shaped.as_ref()
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if text != self.source {
            self.rows = segment(&text);
            self.source = text;
            self.stale = true;
        }
    }

    pub(crate) fn update_style(&mut self, update: impl FnOnce(&mut TextStyle)) {
        let before = self.style.clone();
        update(&mut self.style);
        if before != self.style {
            self.stale = true;
        }
    }

    pub(crate) fn set_font_size(&mut self, font_size: Dimension) {
        self.font_size = font_size;
    }

    pub(crate) fn set_auto_expand(&mut self, auto_expand: bool) {
        self.auto_expand = auto_expand;
    }

    /// Font size in pixels; percentages are of the element's height.
    pub(crate) fn resolved_font_size(&self, box_height: f32, ctx: ResolveContext) -> f32 {
        if self.font_size.unit == Unit::Percent && box_height <= 0.0 {
            warn_once(
                "Text",
                "percentage font size resolved against a zero-height box",
            );
        }
        self.font_size.to_px(box_height, ctx.scale, ctx.viewport)
    }

    /// Whether the last shaping can be reused for this font size and frame.
    ///
    /// Only a previous result that was neither split nor truncated, whose
    /// widest row fits the new width and whose rows all fit the new height
    /// is reused.
    pub(crate) fn needs_reshape(&self, font_size: f32, frame: TextFrame) -> bool {
        let Some(previous) = &self.shaped else {
            return true;
        };
        if self.stale || previous.split || previous.truncated {
            return true;
        }
        if (previous.font_size - font_size).abs() > f32::EPSILON {
            return true;
        }
        if previous.max_row_width > frame.width || previous.max_row_width > frame.max_width {
            return true;
        }

        let mode = self.style.overflow_mode;
        let mut budget = HeightBudget::new(
            previous.row_height,
            previous.font_size,
            frame.allotted_height,
            mode,
        );
        for _ in &previous.rows {
            if budget.must_stop() {
                return true;
            }
            budget.advance();
        }
        budget.fits_nothing() && mode != OverflowMode::Overflow
    }

    pub(crate) fn store_shaped(&mut self, shaped: ShapedText) {
        self.shaped = Some(shaped);
        self.stale = false;
    }

    /// Adopt a new frame width for a reused shaping.
    pub(crate) fn reuse_shaped(&mut self, frame: TextFrame) {
        if let Some(shaped) = self.shaped.as_mut() {
            shaped.width = frame.width;
        }
    }
}

/// What an element does beyond the generic resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ElementKind {
    /// Generic sizing only.
    #[default]
    Plain,
    /// Fills the incoming box and insets its children.
    Padding(EdgeInsets),
    /// Shapes text into drawable rows.
    Text(TextContent),
    /// Places its children in a row or column.
    Linear(LinearContainer),
}

impl ElementKind {
    /// Short name used in diagnostics and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Padding(_) => "padding",
            Self::Text(_) => "text",
            Self::Linear(_) => "linear",
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) layout: LayoutSpec,
    pub(crate) position: Position,
    pub(crate) enabled: bool,
    pub(crate) growth_factor: f32,
    pub(crate) kind: ElementKind,
    pub(crate) bounds: Bounds,
    pub(crate) dirty: bool,
}

impl Element {
    /// An element of `kind` sized by `layout`.
    #[must_use]
    pub const fn new(layout: LayoutSpec, kind: ElementKind) -> Self {
        Self {
            layout,
            position: Position::UNSET,
            enabled: true,
            growth_factor: 0.0,
            kind,
            bounds: Bounds::new(Point::ZERO, Size::ZERO),
            dirty: true,
        }
    }

    /// A plain element.
    #[must_use]
    pub const fn plain(layout: LayoutSpec) -> Self {
        Self::new(layout, ElementKind::Plain)
    }

    /// A padding element.
    #[must_use]
    pub const fn padding(insets: EdgeInsets) -> Self {
        Self::new(LayoutSpec::fill(), ElementKind::Padding(insets))
    }

    /// A text element.
    #[must_use]
    pub const fn text(layout: LayoutSpec, content: TextContent) -> Self {
        Self::new(layout, ElementKind::Text(content))
    }

    /// A row or column container.
    #[must_use]
    pub const fn linear(layout: LayoutSpec, container: LinearContainer) -> Self {
        Self::new(layout, ElementKind::Linear(container))
    }

    /// Set the offset from the parent.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the share of free space taken inside a linear container.
    #[must_use]
    pub fn with_growth_factor(mut self, growth_factor: f32) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Sizing rules.
    #[must_use]
    pub const fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Offset from the parent.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether layout visits this element.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Share of free space taken inside a linear container.
    #[must_use]
    pub const fn growth_factor(&self) -> f32 {
        self.growth_factor
    }

    /// What this element does during layout.
    #[must_use]
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Bounds from the last pass that reached this element.
    ///
    /// Stale while the element is disabled or detached.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether a change is waiting for the next layout pass.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The text content of a text element.
    #[must_use]
    pub const fn text_content(&self) -> Option<&TextContent> {
        match &self.kind {
            ElementKind::Text(content) => Some(content),
            _ => None,
        }
    }
}

//! The document: an element tree plus everything a layout pass needs.

use lynx_common::warning::clear_warnings;
use lynx_text::{DrawableRow, ShapedText, TextMetrics, TextStyle};
use lynx_tree::{NodeId, Tree};

use crate::dimension::{Dimension, EdgeInsets, Position, ResolveContext};
use crate::element::{Element, ElementKind, TextContent};
use crate::error::LayoutError;
use crate::geometry::{Bounds, Point, Size, SizeConstraint};
use crate::layout_spec::LayoutSpec;
use crate::resolver::LayoutPass;

/// An element tree laid out against a viewport.
///
/// The root fills the viewport. Every mutation marks the touched element
/// dirty; the flag travels up through the parents and, once it reaches
/// the root, a full layout pass runs. Elements detached from the root are
/// flagged but not laid out until they are attached again.
///
/// # Example
/// ```
/// use lynx_layout::{Dimension, Document, Element, LayoutSpec, Size};
/// use lynx_text::ApproximateMetrics;
///
/// let mut doc = Document::new(Size::new(800.0, 600.0), Box::new(ApproximateMetrics));
/// let panel = doc.create_element(Element::plain(LayoutSpec::fixed(
///     Dimension::percent(50.0),
///     Dimension::px(100.0),
/// )));
/// doc.append_child(doc.root(), panel).unwrap();
///
/// let bounds = doc.bounds(panel).unwrap();
/// assert!((bounds.width() - 400.0).abs() < f32::EPSILON);
/// ```
pub struct Document {
    tree: Tree<Element>,
    metrics: Box<dyn TextMetrics>,
    viewport: Size,
    content_scale: f32,
    pass_count: usize,
}

impl Document {
    /// An empty document measuring text with `metrics`.
    #[must_use]
    pub fn new(viewport: Size, metrics: Box<dyn TextMetrics>) -> Self {
        clear_warnings();
        Self {
            tree: Tree::new(Element::plain(LayoutSpec::fill())),
            metrics,
            viewport,
            content_scale: 1.0,
            pass_count: 0,
        }
    }

    /// Set the multiplier applied to `dp` dimensions.
    #[must_use]
    pub fn with_content_scale(mut self, content_scale: f32) -> Self {
        self.content_scale = content_scale;
        self
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current multiplier for `dp` dimensions.
    #[must_use]
    pub const fn content_scale(&self) -> f32 {
        self.content_scale
    }

    /// How many full layout passes have run.
    #[must_use]
    pub const fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Resize the viewport and lay the document out again.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.layout();
    }

    /// Change the `dp` multiplier and lay the document out again.
    pub fn set_content_scale(&mut self, content_scale: f32) {
        self.content_scale = content_scale;
        self.layout();
    }

    // ========== Tree structure ==========

    /// Store a new, detached element.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.tree.alloc(element)
    }

    /// Attach `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    ///
    /// # Errors
    ///
    /// Fails if either element is unknown, `child` is the root, or the move
    /// would make an element its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.tree.append_child(parent, child)?;
        self.mark_layout_dirty(child)
    }

    /// Attach `child` under `parent` before `reference`, or last when
    /// `reference` is `None`.
    ///
    /// # Errors
    ///
    /// As [`Document::append_child`], and fails if `reference` is not a
    /// child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), LayoutError> {
        self.tree.insert_before(parent, child, reference)?;
        self.mark_layout_dirty(child)
    }

    /// Detach `child` from `parent`. The element stays in the document and
    /// keeps its last bounds.
    ///
    /// # Errors
    ///
    /// Fails if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.tree.remove_child(parent, child)?;
        self.mark_layout_dirty(parent)
    }

    /// Children of `id` in layout order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// Parent of `id`, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// The element stored under `id`.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.data(id)
    }

    /// Bounds of `id` from the last pass that reached it.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Option<Bounds> {
        self.tree.data(id).map(Element::bounds)
    }

    // ========== Element configuration ==========

    /// Replace the sizing rules of `id`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_layout(&mut self, id: NodeId, layout: LayoutSpec) -> Result<(), LayoutError> {
        self.update(id, |element| element.layout = layout)
    }

    /// Move `id` relative to its parent.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_position(&mut self, id: NodeId, position: Position) -> Result<(), LayoutError> {
        self.update(id, |element| element.position = position)
    }

    /// Include or skip `id` (and its subtree) in layout. A disabled
    /// element keeps its last bounds.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), LayoutError> {
        self.update(id, |element| element.enabled = enabled)
    }

    /// Share of free space `id` takes inside a linear container.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_growth_factor(&mut self, id: NodeId, growth_factor: f32) -> Result<(), LayoutError> {
        self.update(id, |element| element.growth_factor = growth_factor)
    }

    /// Replace the insets of a padding element.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a padding element.
    pub fn set_padding(&mut self, id: NodeId, insets: EdgeInsets) -> Result<(), LayoutError> {
        let element = self.element_mut(id)?;
        let ElementKind::Padding(current) = &mut element.kind else {
            return Err(LayoutError::KindMismatch {
                id,
                expected: "padding",
            });
        };
        *current = insets;
        self.mark_layout_dirty(id)
    }

    /// Replace the source text of a text element.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a text element.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), LayoutError> {
        let text = text.into();
        self.update_text(id, |content| content.set_text(text))
    }

    /// Change the style of a text element in place.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a text element.
    pub fn update_text_style(
        &mut self,
        id: NodeId,
        update: impl FnOnce(&mut TextStyle),
    ) -> Result<(), LayoutError> {
        self.update_text(id, |content| content.update_style(update))
    }

    /// Change the font size of a text element.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a text element.
    pub fn set_font_size(&mut self, id: NodeId, font_size: Dimension) -> Result<(), LayoutError> {
        self.update_text(id, |content| content.set_font_size(font_size))
    }

    /// Let the content of a text element decide its height.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a text element.
    pub fn set_auto_expand(&mut self, id: NodeId, auto_expand: bool) -> Result<(), LayoutError> {
        self.update_text(id, |content| content.set_auto_expand(auto_expand))
    }

    /// Drawable rows of a text element from the last pass that reached it.
    #[must_use]
    pub fn drawable_rows(&self, id: NodeId) -> Option<&[DrawableRow]> {
        self.shaped_text(id).map(|shaped| shaped.rows.as_slice())
    }

    /// Full shaping result of a text element.
    #[must_use]
    pub fn shaped_text(&self, id: NodeId) -> Option<&ShapedText> {
        self.tree
            .data(id)
            .and_then(Element::text_content)
            .and_then(TextContent::shaped)
    }

    // ========== Layout ==========

    /// Flag `id` and its ancestors for layout. When the chain reaches the
    /// root, the whole document is laid out.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn mark_layout_dirty(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if !self.tree.contains(id) {
            return Err(LayoutError::UnknownElement(id));
        }

        let mut top = id;
        loop {
            if let Some(element) = self.tree.data_mut(top) {
                element.dirty = true;
            }
            match self.tree.parent(top) {
                Some(parent) => top = parent,
                None => break,
            }
        }

        if top == self.tree.root() {
            self.layout();
        }
        Ok(())
    }

    /// Run a full pass: the root gets the viewport as both its preferred
    /// and maximum size.
    pub fn layout(&mut self) {
        let ctx = ResolveContext::new(self.content_scale, self.viewport);
        let root = self.tree.root();
        let mut pass = LayoutPass::new(&mut self.tree, self.metrics.as_ref(), ctx);
        let _ = pass.resolve(root, SizeConstraint::tight(self.viewport), Point::ZERO, None);
        self.pass_count += 1;
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, LayoutError> {
        self.tree
            .data_mut(id)
            .ok_or(LayoutError::UnknownElement(id))
    }

    fn update(
        &mut self,
        id: NodeId,
        change: impl FnOnce(&mut Element),
    ) -> Result<(), LayoutError> {
        change(self.element_mut(id)?);
        self.mark_layout_dirty(id)
    }

    fn update_text(
        &mut self,
        id: NodeId,
        change: impl FnOnce(&mut TextContent),
    ) -> Result<(), LayoutError> {
        let element = self.element_mut(id)?;
        let ElementKind::Text(content) = &mut element.kind else {
            return Err(LayoutError::KindMismatch { id, expected: "text" });
        };
        change(content);
        self.mark_layout_dirty(id)
    }
}

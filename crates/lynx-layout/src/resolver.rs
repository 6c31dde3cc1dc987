//! The Box Layout Resolver.
//!
//! One [`LayoutPass`] walks the tree top-down from the element it starts
//! at. Each element fixes its own position and size before any child is
//! visited, children are visited in insertion order, and disabled elements
//! are skipped together with their subtrees.

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use lynx_common::warning::warn_once;
use lynx_text::{MeasureCache, TextFrame, TextMetrics, shape};
use lynx_tree::{NodeId, Tree};

use crate::dimension::{EdgeInsets, ResolveContext};
use crate::element::{Element, ElementKind, LinearContainer, Orientation};
use crate::geometry::{Bounds, Point, Size, SizeConstraint};

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// The part of an element's kind the resolver dispatches on, copied out so
/// the tree can be borrowed again while children are resolved.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    Plain,
    Padding(EdgeInsets),
    Text,
    Linear(LinearContainer),
}

impl Strategy {
    const fn of(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Plain => Self::Plain,
            ElementKind::Padding(insets) => Self::Padding(*insets),
            ElementKind::Text(_) => Self::Text,
            ElementKind::Linear(container) => Self::Linear(*container),
        }
    }
}

/// A child of a linear container with the sizes computed before placement.
struct Slot {
    id: NodeId,
    growth: f32,
    main: f32,
    min_main: f32,
    cross: f32,
}

/// State of a single top-down layout pass.
///
/// The measurement cache lives exactly as long as the pass.
pub struct LayoutPass<'t, 'm> {
    tree: &'t mut Tree<Element>,
    cache: MeasureCache<'m>,
    ctx: ResolveContext,
}

impl<'t, 'm> LayoutPass<'t, 'm> {
    /// Start a pass over `tree`.
    pub fn new(tree: &'t mut Tree<Element>, metrics: &'m dyn TextMetrics, ctx: ResolveContext) -> Self {
        Self {
            tree,
            cache: MeasureCache::new(metrics),
            ctx,
        }
    }

    /// Measurements served from the cache so far in this pass.
    #[must_use]
    pub const fn cache_hits(&self) -> usize {
        self.cache.hits()
    }

    /// Resolve `id` and its enabled descendants, writing their bounds.
    ///
    /// `constraint` is the parent's preferred and maximum size,
    /// `parent_position` its absolute position and `enforced` a size the
    /// parent dictates. Returns the element's resolved size.
    pub fn resolve(
        &mut self,
        id: NodeId,
        constraint: SizeConstraint,
        parent_position: Point,
        enforced: Option<Size>,
    ) -> Size {
        let Some(element) = self.tree.data(id) else {
            return Size::ZERO;
        };

        #[cfg(feature = "layout-trace")]
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        // STEP 1: Absolute position from the parent's position and
        // preferred size.
        let position = element
            .position
            .absolute(parent_position, constraint.preferred, self.ctx);
        let offset = Point::new(position.x - parent_position.x, position.y - parent_position.y);

        // STEP 2: Own size and max size, unless the parent enforces one.
        let (size, max) = match enforced {
            Some(size) => (size, size),
            None => (
                element.layout.direct_size(constraint, offset, self.ctx),
                element.layout.max_size(constraint.preferred, self.ctx),
            ),
        };
        let strategy = Strategy::of(&element.kind);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT STEP2] depth={depth} element={id:?} kind={} constraint={constraint:?} enforced={enforced:?} size={size:?} max={max:?}",
            element.kind.name()
        );

        // STEP 3: Kind-specific sizing, then the children.
        let (bounds, resolved) = match strategy {
            Strategy::Plain => {
                self.resolve_children(id, SizeConstraint::new(size, max), position);
                (Bounds::new(position, size), size)
            }
            Strategy::Padding(insets) => {
                self.resolve_padding(id, insets, constraint.preferred, position, enforced)
            }
            Strategy::Text => {
                let shaped = self.shape_text(id, size, max);
                self.resolve_children(id, SizeConstraint::new(shaped, max), position);
                (Bounds::new(position, shaped), shaped)
            }
            Strategy::Linear(container) => {
                self.resolve_linear(id, container, SizeConstraint::new(size, max), position);
                (Bounds::new(position, size), size)
            }
        };

        // STEP 4: Write back bounds in one piece.
        if let Some(element) = self.tree.data_mut(id) {
            element.bounds = bounds;
            element.dirty = false;
        }

        #[cfg(feature = "layout-trace")]
        {
            eprintln!("[LAYOUT STEP4] depth={depth} element={id:?} bounds={bounds:?}");
            LAYOUT_DEPTH.with(|d| d.set(depth));
        }

        resolved
    }

    fn is_enabled(&self, id: NodeId) -> bool {
        self.tree.data(id).is_some_and(|element| element.enabled)
    }

    fn resolve_children(&mut self, id: NodeId, constraint: SizeConstraint, position: Point) {
        let children = self.tree.children(id).to_vec();
        for child in children {
            if self.is_enabled(child) {
                let _ = self.resolve(child, constraint, position, None);
            }
        }
    }

    /// Fill the incoming box and give the children what is left inside the
    /// insets. Leading insets never take more than half the box.
    fn resolve_padding(
        &mut self,
        id: NodeId,
        insets: EdgeInsets,
        outer: Size,
        position: Point,
        enforced: Option<Size>,
    ) -> (Bounds, Size) {
        let (top, right, bottom, left) = insets.resolve(outer, self.ctx);
        let lead_x = (outer.width / 2.0).min(left);
        let lead_y = (outer.height / 2.0).min(top);

        let (width, height) = enforced.map_or_else(
            || {
                (
                    outer.width - left - (outer.width / 2.0).min(right),
                    outer.height - top - (outer.height / 2.0).min(bottom),
                )
            },
            |enforced| {
                (
                    enforced.width - left - right,
                    enforced.height - top - bottom,
                )
            },
        );
        let content = Size::new(width.max(0.0), height.max(0.0));
        let content_position = position.offset(lead_x, lead_y);

        self.resolve_children(id, SizeConstraint::tight(content), content_position);

        let bounds = Bounds::new(
            position,
            Size::new(
                content.width + lead_x + right,
                content.height + lead_y + bottom,
            ),
        );
        (bounds, content)
    }

    /// Shape the element's text into its box and return the size the
    /// element ends up with.
    ///
    /// Without auto-expand the box keeps its resolved size and rows stop
    /// at its height. With auto-expand rows never stop and the height is
    /// whatever the rows need, regardless of any max height.
    fn shape_text(&mut self, id: NodeId, size: Size, max: Size) -> Size {
        let ctx = self.ctx;
        let Some(Element {
            kind: ElementKind::Text(content),
            ..
        }) = self.tree.data_mut(id)
        else {
            return size;
        };

        let font_size = content.resolved_font_size(size.height, ctx);
        let frame = if content.auto_expand() {
            TextFrame::expanding(size.width, max.width)
        } else {
            TextFrame {
                width: size.width,
                max_width: max.width,
                allotted_height: Some(size.height),
            }
        };

        if content.needs_reshape(font_size, frame) {
            let shaped = shape(
                content.rows(),
                content.style(),
                font_size,
                frame,
                &mut self.cache,
            );
            content.store_shaped(shaped);
        } else {
            content.reuse_shaped(frame);
        }

        if !content.auto_expand() {
            return size;
        }
        content.shaped().map_or(size, |shaped| {
            Size::new(shaped.width.min(max.width.max(size.width)), shaped.height)
        })
    }

    /// Place enabled children one after another along the container's axis.
    ///
    /// Children with a growth factor share the main-axis space left after
    /// the others, never below their min size. Every child is resolved with
    /// an enforced size.
    fn resolve_linear(
        &mut self,
        id: NodeId,
        container: LinearContainer,
        constraint: SizeConstraint,
        position: Point,
    ) {
        let axis = container.orientation;
        let size = constraint.preferred;
        let spacing = self.ctx.px(container.spacing, axis.main(size));

        // STEP 1: Natural sizes of the children.
        let mut slots = Vec::new();
        let mut fixed_total = 0.0;
        let mut growth_total = 0.0;
        for &child in self.tree.children(id) {
            let Some(element) = self.tree.data(child) else {
                continue;
            };
            if !element.enabled {
                continue;
            }
            let natural = element.layout.direct_size(constraint, Point::ZERO, self.ctx);
            let growth = element.growth_factor.max(0.0);
            let min_main = match axis {
                Orientation::Horizontal => element.layout.width.min_size(size.width, self.ctx),
                Orientation::Vertical => element.layout.height.min_size(size.height, self.ctx),
            };
            if growth > 0.0 {
                growth_total += growth;
            } else {
                fixed_total += axis.main(natural);
            }
            slots.push(Slot {
                id: child,
                growth,
                main: axis.main(natural),
                min_main,
                cross: axis.cross(natural),
            });
        }

        // STEP 2: Space left for growing children.
        #[allow(clippy::cast_precision_loss)]
        let gaps = spacing * slots.len().saturating_sub(1) as f32;
        let remaining = (axis.main(size) - fixed_total - gaps).max(0.0);

        // STEP 3: Resolve each child in its slot and advance the cursor.
        let mut cursor = position;
        for slot in slots {
            let main = if slot.growth > 0.0 {
                (remaining * slot.growth / growth_total).max(slot.min_main)
            } else {
                slot.main
            };
            let assigned = axis.size(main, slot.cross);
            let actual = self.resolve(slot.id, constraint, cursor, Some(assigned));
            if !actual.fits_within(assigned) || !assigned.fits_within(actual) {
                warn_once(
                    "Linear",
                    &format!("element {:?} did not keep the size its container assigned", slot.id),
                );
            }
            cursor = match axis {
                Orientation::Horizontal => cursor.offset(main + spacing, 0.0),
                Orientation::Vertical => cursor.offset(0.0, main + spacing),
            };
        }
    }
}

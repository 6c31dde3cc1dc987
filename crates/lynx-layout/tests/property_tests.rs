//! Property tests for the box resolver.

use lynx_layout::{AxisSpec, Dimension, Document, Element, LayoutSpec, Position, Size};
use lynx_text::ApproximateMetrics;
use quickcheck_macros::quickcheck;

fn px(value: u16) -> Dimension {
    Dimension::px(f32::from(value))
}

/// Lay out a child with the given axis rule inside a fixed parent and
/// check it stays within the parent's max minus the child's offset.
fn stays_within_parent(
    parent: (u16, u16),
    offset: (u16, u16),
    axis: impl Fn() -> AxisSpec,
) -> bool {
    let (width, height) = (parent.0 % 1000 + 1, parent.1 % 1000 + 1);
    let (dx, dy) = (offset.0 % width, offset.1 % height);

    let mut doc = Document::new(Size::new(2000.0, 2000.0), Box::new(ApproximateMetrics));
    let root = doc.root();
    let container = doc.create_element(Element::plain(LayoutSpec::fixed(px(width), px(height))));
    let child = doc.create_element(
        Element::plain(LayoutSpec::new(axis(), axis())).with_position(Position::new(px(dx), px(dy))),
    );
    doc.append_child(root, container).unwrap();
    doc.append_child(container, child).unwrap();

    let size = doc.bounds(child).unwrap().size;
    size.fits_within(Size::new(
        f32::from(width - dx),
        f32::from(height - dy),
    ))
}

#[quickcheck]
fn prop_preferred_sizes_stay_within_parent_max(
    parent: (u16, u16),
    offset: (u16, u16),
    preferred: u16,
    max: u16,
) -> bool {
    stays_within_parent(parent, offset, || {
        AxisSpec::min_max_preferred(px(preferred), None, Some(px(max)))
    })
}

#[quickcheck]
fn prop_max_preferring_sizes_stay_within_parent_max(
    parent: (u16, u16),
    offset: (u16, u16),
    max: Option<u16>,
) -> bool {
    stays_within_parent(parent, offset, || {
        AxisSpec::min_max(None, max.map(px), true)
    })
}

//! Tests for the document: top-down resolution, dirty propagation, disabled
//! elements and text elements.

use std::cell::Cell;
use std::rc::Rc;

use lynx_layout::{
    AxisSpec, Dimension, Document, Element, LayoutError, LayoutSpec, NodeId, Position, Size,
    TextContent,
};
use lynx_text::{BreakMode, OverflowMode, TextMetrics, TextStyle};
use lynx_tree::TreeError;

/// Every character advances exactly 10px, whatever the font size.
struct FixedAdvance {
    calls: Rc<Cell<usize>>,
}

impl TextMetrics for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str, _font_size: f32) -> f32 {
        self.calls.set(self.calls.get() + 1);
        text.chars().count() as f32 * 10.0
    }
}

fn document(width: f32, height: f32) -> Document {
    document_counting(width, height).0
}

fn document_counting(width: f32, height: f32) -> (Document, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let metrics = FixedAdvance {
        calls: Rc::clone(&calls),
    };
    (Document::new(Size::new(width, height), Box::new(metrics)), calls)
}

fn px(value: f32) -> Dimension {
    Dimension::px(value)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn add(doc: &mut Document, parent: NodeId, element: Element) -> NodeId {
    let id = doc.create_element(element);
    doc.append_child(parent, id).unwrap();
    id
}

fn label_style() -> TextStyle {
    TextStyle {
        word_wrap: true,
        break_mode: BreakMode::SoftBreak,
        overflow_mode: OverflowMode::Ellipsis,
        ..TextStyle::default()
    }
    .with_line_height(1.0)
}

// ========== Box resolution ==========

#[test]
fn test_root_fills_the_viewport() {
    let mut doc = document(400.0, 300.0);
    doc.layout();
    let root = doc.bounds(doc.root()).unwrap();
    assert!(close(root.width(), 400.0));
    assert!(close(root.height(), 300.0));
    assert!(close(root.x(), 0.0));
}

#[test]
fn test_percentages_nest() {
    let mut doc = document(800.0, 600.0);
    let root = doc.root();
    let half = Dimension::percent(50.0);
    let outer = add(&mut doc, root, Element::plain(LayoutSpec::fixed(half, half)));
    let inner = add(&mut doc, outer, Element::plain(LayoutSpec::fixed(half, half)));

    let bounds = doc.bounds(inner).unwrap();
    assert!(close(bounds.width(), 200.0));
    assert!(close(bounds.height(), 150.0));
}

#[test]
fn test_position_offsets_and_shrinks_available_space() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let grow = AxisSpec::min_max(None, None, true);
    let child = add(
        &mut doc,
        root,
        Element::plain(LayoutSpec::new(grow, grow))
            .with_position(Position::new(px(10.0), Dimension::percent(10.0))),
    );

    let bounds = doc.bounds(child).unwrap();
    assert!(close(bounds.x(), 10.0));
    assert!(close(bounds.y(), 30.0));
    assert!(close(bounds.width(), 390.0));
    assert!(close(bounds.height(), 270.0));
}

#[test]
fn test_children_start_at_parent_position() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let parent = add(
        &mut doc,
        root,
        Element::plain(LayoutSpec::fixed(px(100.0), px(100.0)))
            .with_position(Position::new(px(20.0), px(25.0))),
    );
    let child = add(&mut doc, parent, Element::plain(LayoutSpec::fill()));

    let bounds = doc.bounds(child).unwrap();
    assert!(close(bounds.x(), 20.0));
    assert!(close(bounds.y(), 25.0));
    assert!(close(bounds.right(), 120.0));
    assert!(close(bounds.bottom(), 125.0));
}

#[test]
fn test_min_max_and_preferred_clamps_up_to_min() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let spec = LayoutSpec::new(
        AxisSpec::min_max_preferred(px(30.0), Some(px(50.0)), Some(px(200.0))),
        AxisSpec::fixed(px(10.0)),
    );
    let child = add(&mut doc, root, Element::plain(spec));
    assert!(close(doc.bounds(child).unwrap().width(), 50.0));
}

#[test]
fn test_content_scale_and_viewport_units() {
    let calls = Rc::new(Cell::new(0));
    let mut doc = Document::new(
        Size::new(400.0, 300.0),
        Box::new(FixedAdvance { calls }),
    )
    .with_content_scale(2.0);
    let root = doc.root();
    let scaled = add(
        &mut doc,
        root,
        Element::plain(LayoutSpec::fixed(Dimension::dp(10.0), Dimension::dp(20.0))),
    );
    let viewport = add(
        &mut doc,
        root,
        Element::plain(LayoutSpec::fixed(Dimension::vw(50.0), Dimension::vh(10.0))),
    );

    assert!(close(doc.bounds(scaled).unwrap().width(), 20.0));
    assert!(close(doc.bounds(scaled).unwrap().height(), 40.0));
    assert!(close(doc.bounds(viewport).unwrap().width(), 200.0));
    assert!(close(doc.bounds(viewport).unwrap().height(), 30.0));

    doc.set_content_scale(1.0);
    assert!(close(doc.bounds(scaled).unwrap().width(), 10.0));
}

// ========== Dirty propagation ==========

#[test]
fn test_every_mutation_reaching_the_root_runs_a_pass() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let child = add(&mut doc, root, Element::plain(LayoutSpec::fill()));
    let passes = doc.pass_count();

    doc.set_layout(child, LayoutSpec::fixed(px(10.0), px(10.0)))
        .unwrap();
    assert_eq!(doc.pass_count(), passes + 1);
    assert!(close(doc.bounds(child).unwrap().width(), 10.0));
    assert!(!doc.element(child).unwrap().is_dirty());
}

#[test]
fn test_detached_subtree_is_flagged_but_not_laid_out() {
    let mut doc = document(400.0, 300.0);
    let parent = doc.create_element(Element::plain(LayoutSpec::fill()));
    let child = doc.create_element(Element::plain(LayoutSpec::fill()));

    doc.append_child(parent, child).unwrap();
    assert_eq!(doc.pass_count(), 0);
    assert!(doc.element(child).unwrap().is_dirty());
    assert!(doc.element(parent).unwrap().is_dirty());

    doc.append_child(doc.root(), parent).unwrap();
    assert_eq!(doc.pass_count(), 1);
    assert!(!doc.element(child).unwrap().is_dirty());
    assert!(close(doc.bounds(child).unwrap().width(), 400.0));
}

#[test]
fn test_viewport_change_relays_out() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let half = Dimension::percent(50.0);
    let child = add(&mut doc, root, Element::plain(LayoutSpec::fixed(half, half)));

    doc.set_viewport(Size::new(1000.0, 500.0));
    assert!(close(doc.bounds(child).unwrap().width(), 500.0));
    assert!(close(doc.bounds(child).unwrap().height(), 250.0));
}

#[test]
fn test_disabled_element_keeps_stale_bounds() {
    let mut doc = document(200.0, 100.0);
    let root = doc.root();
    let panel = add(
        &mut doc,
        root,
        Element::plain(LayoutSpec::fixed(
            Dimension::percent(50.0),
            Dimension::percent(100.0),
        )),
    );
    let child = add(&mut doc, panel, Element::plain(LayoutSpec::fill()));
    assert!(close(doc.bounds(child).unwrap().width(), 100.0));

    doc.set_enabled(child, false).unwrap();
    doc.set_viewport(Size::new(400.0, 100.0));
    assert!(close(doc.bounds(panel).unwrap().width(), 200.0));
    assert!(close(doc.bounds(child).unwrap().width(), 100.0));

    doc.set_enabled(child, true).unwrap();
    assert!(close(doc.bounds(child).unwrap().width(), 200.0));
}

#[test]
fn test_removed_child_keeps_last_bounds() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let child = add(&mut doc, root, Element::plain(LayoutSpec::fill()));
    doc.remove_child(root, child).unwrap();

    doc.set_viewport(Size::new(100.0, 100.0));
    assert!(close(doc.bounds(child).unwrap().width(), 400.0));
    assert_eq!(doc.parent(child), None);
    assert!(doc.children(root).is_empty());
}

// ========== Errors ==========

#[test]
fn test_unknown_element_is_an_error() {
    let mut doc = document(400.0, 300.0);
    assert_eq!(
        doc.set_layout(NodeId(99), LayoutSpec::fill()),
        Err(LayoutError::UnknownElement(NodeId(99)))
    );
    assert_eq!(
        doc.mark_layout_dirty(NodeId(99)),
        Err(LayoutError::UnknownElement(NodeId(99)))
    );
}

#[test]
fn test_text_operation_on_plain_element_is_rejected() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let child = add(&mut doc, root, Element::plain(LayoutSpec::fill()));
    assert_eq!(
        doc.set_text(child, "hello"),
        Err(LayoutError::KindMismatch {
            id: child,
            expected: "text"
        })
    );
}

#[test]
fn test_tree_errors_pass_through() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let parent = add(&mut doc, root, Element::plain(LayoutSpec::fill()));
    let child = add(&mut doc, parent, Element::plain(LayoutSpec::fill()));

    assert!(matches!(
        doc.append_child(child, parent),
        Err(LayoutError::Tree(TreeError::CycleDetected { .. }))
    ));
}

// ========== Text elements ==========

#[test]
fn test_text_rows_stop_at_the_box_height() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(40.0), px(20.0)),
            TextContent::new("aaaa bbbb cccc")
                .with_style(label_style())
                .with_font_size(px(10.0)),
        ),
    );

    let rows: Vec<&str> = doc
        .drawable_rows(label)
        .unwrap()
        .iter()
        .map(|row| row.text.as_str())
        .collect();
    assert_eq!(rows, vec!["aaaa", "bb\u{2026}"]);
    assert!(close(doc.bounds(label).unwrap().height(), 20.0));
}

#[test]
fn test_auto_expand_height_follows_rows_not_max() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(200.0), px(20.0)),
            TextContent::new("a\nb\nc\nd\ne")
                .with_style(label_style())
                .with_font_size(px(10.0))
                .with_auto_expand(true),
        ),
    );

    let shaped = doc.shaped_text(label).unwrap();
    assert_eq!(shaped.rows.len(), 5);
    let bounds = doc.bounds(label).unwrap();
    assert!(close(bounds.height(), 5.0 * shaped.row_height));
    assert!(close(bounds.height(), 50.0));
    assert!(close(bounds.width(), 200.0));
}

#[test]
fn test_percentage_font_size_uses_box_height() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(200.0), px(40.0)),
            TextContent::new("x").with_font_size(Dimension::percent(50.0)),
        ),
    );
    assert!(close(doc.shaped_text(label).unwrap().font_size, 20.0));
}

#[test]
fn test_unchanged_text_is_not_reshaped() {
    let (mut doc, calls) = document_counting(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(200.0), px(100.0)),
            TextContent::new("hello world").with_font_size(px(10.0)),
        ),
    );
    let after_first = calls.get();
    assert!(after_first > 0);

    doc.set_viewport(Size::new(800.0, 600.0));
    assert_eq!(calls.get(), after_first);

    doc.set_text(label, "goodbye").unwrap();
    assert!(calls.get() > after_first);
    assert_eq!(doc.drawable_rows(label).unwrap()[0].text, "goodbye");
}

#[test]
fn test_style_update_reshapes() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(50.0), px(100.0)),
            TextContent::new("aaa bbb").with_font_size(px(10.0)),
        ),
    );
    assert_eq!(doc.drawable_rows(label).unwrap().len(), 1);

    doc.update_text_style(label, |style| style.word_wrap = true)
        .unwrap();
    let rows: Vec<&str> = doc
        .drawable_rows(label)
        .unwrap()
        .iter()
        .map(|row| row.text.as_str())
        .collect();
    assert_eq!(rows, vec!["aaa", "bbb"]);
}

#[test]
fn test_auto_expand_can_be_toggled() {
    let mut doc = document(400.0, 300.0);
    let root = doc.root();
    let label = add(
        &mut doc,
        root,
        Element::text(
            LayoutSpec::fixed(px(100.0), px(15.0)),
            TextContent::new("a\nb\nc")
                .with_style(label_style())
                .with_font_size(px(10.0)),
        ),
    );
    assert!(close(doc.bounds(label).unwrap().height(), 15.0));

    doc.set_auto_expand(label, true).unwrap();
    assert!(close(doc.bounds(label).unwrap().height(), 30.0));
}

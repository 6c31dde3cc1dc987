//! Tests for tree mutation methods: append_child, insert_before, remove_child.

use lynx_tree::{NodeId, Tree, TreeError};

/// Helper to build a tree whose payloads are simple labels.
fn tree_with(labels: &[&'static str]) -> (Tree<&'static str>, Vec<NodeId>) {
    let mut tree = Tree::new("root");
    let ids = labels.iter().map(|label| tree.alloc(*label)).collect();
    (tree, ids)
}

// ========== append_child ==========

#[test]
fn test_append_child_links_parent_and_siblings() {
    let (mut tree, ids) = tree_with(&["a", "b", "c"]);
    for &id in &ids {
        tree.append_child(NodeId::ROOT, id).unwrap();
    }

    assert_eq!(tree.children(NodeId::ROOT), ids.as_slice());
    assert_eq!(tree.parent(ids[1]), Some(NodeId::ROOT));
    assert_eq!(tree.prev_sibling(ids[0]), None);
    assert_eq!(tree.next_sibling(ids[0]), Some(ids[1]));
    assert_eq!(tree.prev_sibling(ids[2]), Some(ids[1]));
    assert_eq!(tree.next_sibling(ids[2]), None);
    assert_eq!(tree.first_child(NodeId::ROOT), Some(ids[0]));
    assert_eq!(tree.last_child(NodeId::ROOT), Some(ids[2]));
}

#[test]
fn test_append_child_moves_attached_node() {
    let (mut tree, ids) = tree_with(&["left", "right", "leaf"]);
    let (left, right, leaf) = (ids[0], ids[1], ids[2]);
    tree.append_child(NodeId::ROOT, left).unwrap();
    tree.append_child(NodeId::ROOT, right).unwrap();
    tree.append_child(left, leaf).unwrap();

    tree.append_child(right, leaf).unwrap();

    assert!(tree.children(left).is_empty());
    assert_eq!(tree.children(right), &[leaf]);
    assert_eq!(tree.parent(leaf), Some(right));
}

#[test]
fn test_append_child_rejects_cycles() {
    let (mut tree, ids) = tree_with(&["outer", "inner"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();
    tree.append_child(ids[0], ids[1]).unwrap();

    assert_eq!(
        tree.append_child(ids[1], ids[0]),
        Err(TreeError::CycleDetected {
            parent: ids[1],
            child: ids[0],
        })
    );
    assert_eq!(
        tree.append_child(ids[0], ids[0]),
        Err(TreeError::CycleDetected {
            parent: ids[0],
            child: ids[0],
        })
    );
    // The failed calls left the tree alone
    assert_eq!(tree.children(ids[0]), &[ids[1]]);
}

#[test]
fn test_append_child_rejects_root_and_unknown_ids() {
    let (mut tree, ids) = tree_with(&["a"]);
    assert_eq!(
        tree.append_child(ids[0], NodeId::ROOT),
        Err(TreeError::RootNotMovable)
    );
    assert_eq!(
        tree.append_child(NodeId::ROOT, NodeId(99)),
        Err(TreeError::UnknownNode(NodeId(99)))
    );
}

// ========== insert_before ==========

#[test]
fn test_insert_before_middle() {
    let (mut tree, ids) = tree_with(&["a", "c", "b"]);
    let (a, c, b) = (ids[0], ids[1], ids[2]);
    tree.append_child(NodeId::ROOT, a).unwrap();
    tree.append_child(NodeId::ROOT, c).unwrap();

    tree.insert_before(NodeId::ROOT, b, Some(c)).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_first() {
    let (mut tree, ids) = tree_with(&["b", "a"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();

    tree.insert_before(NodeId::ROOT, ids[1], Some(ids[0])).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[ids[1], ids[0]]);
    assert_eq!(tree.prev_sibling(ids[1]), None);
}

#[test]
fn test_insert_before_reorders_existing_child() {
    let (mut tree, ids) = tree_with(&["a", "b", "c"]);
    for &id in &ids {
        tree.append_child(NodeId::ROOT, id).unwrap();
    }

    tree.insert_before(NodeId::ROOT, ids[2], Some(ids[0])).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[ids[2], ids[0], ids[1]]);
    assert_eq!(tree.next_sibling(ids[1]), None);
    assert_eq!(tree.prev_sibling(ids[0]), Some(ids[2]));
}

#[test]
fn test_insert_before_foreign_reference_fails() {
    let (mut tree, ids) = tree_with(&["holder", "stranger", "new"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();

    assert_eq!(
        tree.insert_before(NodeId::ROOT, ids[2], Some(ids[1])),
        Err(TreeError::NotAChild {
            parent: NodeId::ROOT,
            child: ids[1],
        })
    );
    assert_eq!(tree.parent(ids[2]), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_of_three() {
    let (mut tree, ids) = tree_with(&["a", "b", "c"]);
    for &id in &ids {
        tree.append_child(NodeId::ROOT, id).unwrap();
    }

    tree.remove_child(NodeId::ROOT, ids[1]).unwrap();

    assert_eq!(tree.children(NodeId::ROOT), &[ids[0], ids[2]]);
    assert_eq!(tree.next_sibling(ids[0]), Some(ids[2]));
    assert_eq!(tree.prev_sibling(ids[2]), Some(ids[0]));
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.prev_sibling(ids[1]), None);
    assert_eq!(tree.next_sibling(ids[1]), None);
}

#[test]
fn test_remove_child_keeps_subtree_and_payload() {
    let (mut tree, ids) = tree_with(&["branch", "leaf"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();
    tree.append_child(ids[0], ids[1]).unwrap();

    tree.remove_child(NodeId::ROOT, ids[0]).unwrap();

    assert!(!tree.is_attached(ids[0]));
    assert!(!tree.is_attached(ids[1]));
    assert_eq!(tree.children(ids[0]), &[ids[1]]);
    assert_eq!(tree.data(ids[1]), Some(&"leaf"));
}

#[test]
fn test_remove_child_of_wrong_parent_fails() {
    let (mut tree, ids) = tree_with(&["a", "b"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();
    tree.append_child(NodeId::ROOT, ids[1]).unwrap();

    assert_eq!(
        tree.remove_child(ids[0], ids[1]),
        Err(TreeError::NotAChild {
            parent: ids[0],
            child: ids[1],
        })
    );
}

// ========== traversal ==========

#[test]
fn test_ancestors_walk_to_root() {
    let (mut tree, ids) = tree_with(&["a", "b", "c"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();
    tree.append_child(ids[0], ids[1]).unwrap();
    tree.append_child(ids[1], ids[2]).unwrap();

    let chain: Vec<NodeId> = tree.ancestors(ids[2]).collect();
    assert_eq!(chain, vec![ids[1], ids[0], NodeId::ROOT]);
    assert!(tree.is_descendant_of(ids[2], ids[0]));
    assert!(!tree.is_descendant_of(ids[0], ids[2]));
}

#[test]
fn test_descendants_are_preorder() {
    let (mut tree, ids) = tree_with(&["a", "a1", "a2", "b"]);
    tree.append_child(NodeId::ROOT, ids[0]).unwrap();
    tree.append_child(ids[0], ids[1]).unwrap();
    tree.append_child(ids[0], ids[2]).unwrap();
    tree.append_child(NodeId::ROOT, ids[3]).unwrap();

    let labels: Vec<&str> = tree
        .descendants(NodeId::ROOT)
        .map(|id| *tree.data(id).unwrap())
        .collect();
    assert_eq!(labels, vec!["root", "a", "a1", "a2", "b"]);
}

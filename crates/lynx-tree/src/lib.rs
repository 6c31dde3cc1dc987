//! Element tree for the Lynx layout core.
//!
//! This crate provides an arena-based tree whose nodes carry an arbitrary
//! payload. The layout crate stores its elements here.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A child
//! refers to its parent through a plain index (a non-owning back-reference);
//! ownership lives only in the arena and the parents' ordered child lists, so
//! re-parenting never moves a payload.

use thiserror::Error;

/// A type-safe index into the tree.
///
/// `NodeId` provides O(1) access to any node without borrowing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Errors returned by checked tree mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not name a node of this tree.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// The requested parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },
    /// `child` is not currently a child of `parent`.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was expected under it.
        child: NodeId,
    },
    /// The root can never become somebody's child.
    #[error("the root node cannot be re-parented")]
    RootNotMovable,
}

/// A node slot in the arena.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The payload carried by this node.
    pub data: T,

    /// The parent, or `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,

    /// Ordered children. Insertion order is layout order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

impl<T> Node<T> {
    const fn detached(data: T) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// Arena-based tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Create a new tree holding only the root.
    #[must_use]
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Node::detached(root)],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Get the payload of a node.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|n| &n.data)
    }

    /// Get the payload of a node mutably.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id).map(|n| &mut n.data)
    }

    /// Whether `id` names a node of this tree (attached or not).
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get the number of nodes in the arena, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true, the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, data: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(data));
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// If `child` is already attached somewhere it is moved.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown, if `child` is the root, or if the
    /// move would make `child` an ancestor of itself.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` into `parent`'s children before `reference`, or at the
    /// end when `reference` is `None`.
    ///
    /// # Errors
    ///
    /// Same as [`Tree::append_child`], plus [`TreeError::NotAChild`] when
    /// `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        if let Some(reference) = reference {
            if reference == child {
                // Inserting a node before itself leaves the order unchanged.
                return if self.parent(child) == Some(parent) {
                    Ok(())
                } else {
                    Err(TreeError::NotAChild { parent, child })
                };
            }
            if self.parent(reference) != Some(parent) {
                return Err(TreeError::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }

        self.detach(child);

        let index = match reference {
            Some(reference) => self.nodes[parent.0]
                .children
                .iter()
                .position(|&id| id == reference)
                .ok_or(TreeError::NotAChild {
                    parent,
                    child: reference,
                })?,
            None => self.nodes[parent.0].children.len(),
        };

        let prev = index
            .checked_sub(1)
            .and_then(|i| self.nodes[parent.0].children.get(i).copied());
        let next = self.nodes[parent.0].children.get(index).copied();

        self.nodes[parent.0].children.insert(index, child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = next;

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(child);
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = Some(child);
        }
        Ok(())
    }

    /// Removes `child` from `parent`. The node stays in the arena, detached,
    /// and keeps its own subtree.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown or `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        if self.parent(child) != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        if child == NodeId::ROOT {
            return Err(TreeError::RootNotMovable);
        }
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(TreeError::CycleDetected { parent, child });
        }
        Ok(())
    }

    /// Unlink `id` from its parent and siblings. No-op for detached nodes.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        let prev = self.nodes[id.0].prev_sibling;
        let next = self.nodes[id.0].next_sibling;

        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
        self.nodes[parent.0].children.retain(|&c| c != id);

        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Whether the node is the root or hangs below it.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.is_descendant_of(id, NodeId::ROOT)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_, T> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over a node and everything below it in pre-order
    /// (parent before children, children in insertion order).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_, T> {
        DescendantIterator {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a, T> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
}

impl<T> Iterator for AncestorIterator<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for DescendantIterator<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

//! The recursive bounds tree and its read-only accessors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Face, Obb};

use super::visitor::TreeVisitor;

/// A binary tree of bounding volumes over leaf geometry.
///
/// Internal nodes carry a bounding payload `N` and exactly two children;
/// leaves carry a terminal payload `L`. In production use this is
/// [`ObbTree`], with [`Obb`] bounds over [`Face`] leaves, but the
/// structure (like the traversal in [`super::collide_recurse`]) is
/// generic so it can be exercised with stand-in payloads.
///
/// A tree is never empty and is immutable after construction: there is
/// no mutation API, and rebuilding means constructing a new tree. The
/// two children of every node partition the faces below it, so no face
/// appears under more than one leaf.
///
/// Every node and leaf has an implicit preorder identifier (the root is
/// `0`, then the left subtree, then the right). Identifiers are stable
/// for a given tree and independent of any depth limit, so a hit set
/// recorded from one walk can be resolved by [`BoundsTree::marked`]
/// later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundsTree<N, L> {
    /// A terminal holding leaf geometry.
    Leaf(L),
    /// An internal node holding a bounding volume over both subtrees.
    Node {
        /// The bounding payload enclosing everything below this node.
        bounds: N,
        /// The left subtree.
        left: Box<BoundsTree<N, L>>,
        /// The right subtree.
        right: Box<BoundsTree<N, L>>,
    },
}

/// The production tree: oriented boxes over triangular faces.
pub type ObbTree = BoundsTree<Obb, Face>;

impl<N, L> BoundsTree<N, L> {
    /// Creates an internal node from its bounds and two subtrees.
    pub fn node(bounds: N, left: Self, right: Self) -> Self {
        Self::Node {
            bounds,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns `true` for a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the height of the tree (1 for a single leaf).
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Returns the number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Returns the total number of nodes and leaves.
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { left, right, .. } => 1 + left.size() + right.size(),
        }
    }

    /// Walks the whole tree in preorder.
    pub fn visit<V: TreeVisitor<N, L>>(&self, visitor: &mut V) {
        self.visit_to_depth(usize::MAX, visitor);
    }

    /// Walks the tree in preorder, reporting every node and leaf at
    /// depth `max_depth` or above (the root is at depth 0) and not
    /// descending further.
    ///
    /// Identifiers passed to the visitor are full-tree preorder ids,
    /// unaffected by the depth limit.
    pub fn visit_to_depth<V: TreeVisitor<N, L>>(&self, max_depth: usize, visitor: &mut V) {
        let mut next_id = 0;
        self.visit_rec(0, max_depth, &mut next_id, visitor);
    }

    fn visit_rec<V: TreeVisitor<N, L>>(
        &self,
        depth: usize,
        max_depth: usize,
        next_id: &mut usize,
        visitor: &mut V,
    ) {
        let id = *next_id;
        *next_id += 1;
        match self {
            Self::Leaf(leaf) => visitor.visit_leaf(id, depth, leaf),
            Self::Node { bounds, left, right } => {
                visitor.visit_node(id, depth, bounds);
                if depth < max_depth {
                    left.visit_rec(depth + 1, max_depth, next_id, visitor);
                    right.visit_rec(depth + 1, max_depth, next_id, visitor);
                } else {
                    // Keep preorder ids stable past the cutoff.
                    *next_id += left.size() + right.size();
                }
            }
        }
    }

    /// Collects the bounding payloads at depth `max_depth` or above, in
    /// preorder. Drives drawing bounding boxes at a chosen level of
    /// detail.
    pub fn bounds_to_depth(&self, max_depth: usize) -> Vec<&N> {
        let mut out = Vec::new();
        self.collect_to_depth(0, max_depth, &mut out, &mut Vec::new());
        out
    }

    /// Collects the leaf payloads at depth `max_depth` or above, in
    /// preorder.
    pub fn leaves_to_depth(&self, max_depth: usize) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_to_depth(0, max_depth, &mut Vec::new(), &mut out);
        out
    }

    fn collect_to_depth<'a>(
        &'a self,
        depth: usize,
        max_depth: usize,
        bounds_out: &mut Vec<&'a N>,
        leaves_out: &mut Vec<&'a L>,
    ) {
        match self {
            Self::Leaf(leaf) => leaves_out.push(leaf),
            Self::Node { bounds, left, right } => {
                bounds_out.push(bounds);
                if depth < max_depth {
                    left.collect_to_depth(depth + 1, max_depth, bounds_out, leaves_out);
                    right.collect_to_depth(depth + 1, max_depth, bounds_out, leaves_out);
                }
            }
        }
    }

    /// Returns the bounding and leaf payloads whose preorder id is in
    /// `hits`, in preorder. Drives highlighting colliding parts of a
    /// body.
    pub fn marked<'a>(&'a self, hits: &HashSet<usize>) -> (Vec<&'a N>, Vec<&'a L>) {
        let mut bounds = Vec::new();
        let mut leaves = Vec::new();
        let mut next_id = 0;
        self.marked_rec(hits, &mut next_id, &mut bounds, &mut leaves);
        (bounds, leaves)
    }

    fn marked_rec<'a>(
        &'a self,
        hits: &HashSet<usize>,
        next_id: &mut usize,
        bounds_out: &mut Vec<&'a N>,
        leaves_out: &mut Vec<&'a L>,
    ) {
        let id = *next_id;
        *next_id += 1;
        match self {
            Self::Leaf(leaf) => {
                if hits.contains(&id) {
                    leaves_out.push(leaf);
                }
            }
            Self::Node { bounds, left, right } => {
                if hits.contains(&id) {
                    bounds_out.push(bounds);
                }
                left.marked_rec(hits, next_id, bounds_out, leaves_out);
                right.marked_rec(hits, next_id, bounds_out, leaves_out);
            }
        }
    }
}

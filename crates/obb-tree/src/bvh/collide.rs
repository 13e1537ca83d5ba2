//! Lock-step collision traversal over two bounds trees.

use crate::{sat, Body, Face, Obb};

use super::tree::BoundsTree;

/// The four pluggable predicates driving a collision traversal.
///
/// `node_node` gates descent between two internal nodes, `leaf_leaf`
/// confirms a hit between two leaves, and `node_leaf`/`leaf_node` gate
/// the mixed cases. The set is symmetric but not assumed commutative:
/// the two mixed predicates may differ, so callers never need a
/// reversed-argument variant when the payload types differ.
///
/// Production queries bind the separating-axis tests from [`crate::sat`]
/// (see [`collide`]); tests exercise the same traversal with trivial
/// stand-in predicates through [`FnPolicy`].
pub trait CollisionPolicy<N, L> {
    /// Could anything under these two nodes touch?
    fn node_node(&self, a: &N, b: &N) -> bool;

    /// Do these two leaves touch?
    fn leaf_leaf(&self, a: &L, b: &L) -> bool;

    /// Could anything under this node touch this leaf?
    fn node_leaf(&self, bounds: &N, leaf: &L) -> bool;

    /// Could this leaf touch anything under this node?
    fn leaf_node(&self, leaf: &L, bounds: &N) -> bool;
}

/// A [`CollisionPolicy`] built from four closures.
pub struct FnPolicy<NN, LL, NL, LN> {
    node_node: NN,
    leaf_leaf: LL,
    node_leaf: NL,
    leaf_node: LN,
}

impl<NN, LL, NL, LN> FnPolicy<NN, LL, NL, LN> {
    /// Creates a policy from the four predicate closures.
    pub fn new(node_node: NN, leaf_leaf: LL, node_leaf: NL, leaf_node: LN) -> Self {
        Self {
            node_node,
            leaf_leaf,
            node_leaf,
            leaf_node,
        }
    }
}

impl<N, L, NN, LL, NL, LN> CollisionPolicy<N, L> for FnPolicy<NN, LL, NL, LN>
where
    NN: Fn(&N, &N) -> bool,
    LL: Fn(&L, &L) -> bool,
    NL: Fn(&N, &L) -> bool,
    LN: Fn(&L, &N) -> bool,
{
    fn node_node(&self, a: &N, b: &N) -> bool {
        (self.node_node)(a, b)
    }

    fn leaf_leaf(&self, a: &L, b: &L) -> bool {
        (self.leaf_leaf)(a, b)
    }

    fn node_leaf(&self, bounds: &N, leaf: &L) -> bool {
        (self.node_leaf)(bounds, leaf)
    }

    fn leaf_node(&self, leaf: &L, bounds: &N) -> bool {
        (self.leaf_node)(leaf, bounds)
    }
}

/// Walks two trees in lock-step, reporting whether any leaf pair under a
/// chain of true gates tests true.
///
/// A false gate at any internal step prunes the whole subtree pair
/// without descending — the asymptotic win over testing all face pairs.
/// Child pairs are tried depth-first and OR-ed with short-circuiting:
/// the first true result ends the traversal.
pub fn collide_recurse<N, L, P>(a: &BoundsTree<N, L>, b: &BoundsTree<N, L>, policy: &P) -> bool
where
    P: CollisionPolicy<N, L>,
{
    use BoundsTree::{Leaf, Node};

    match (a, b) {
        (Leaf(x), Leaf(y)) => policy.leaf_leaf(x, y),
        (Node { bounds, left, right }, Leaf(y)) => {
            policy.node_leaf(bounds, y)
                && (collide_recurse(left, b, policy) || collide_recurse(right, b, policy))
        }
        (Leaf(x), Node { bounds, left, right }) => {
            policy.leaf_node(x, bounds)
                && (collide_recurse(a, left, policy) || collide_recurse(a, right, policy))
        }
        (
            Node {
                bounds: bounds_a,
                left: left_a,
                right: right_a,
            },
            Node {
                bounds: bounds_b,
                left: left_b,
                right: right_b,
            },
        ) => {
            policy.node_node(bounds_a, bounds_b)
                && (collide_recurse(left_a, left_b, policy)
                    || collide_recurse(left_a, right_b, policy)
                    || collide_recurse(right_a, left_b, policy)
                    || collide_recurse(right_a, right_b, policy))
        }
    }
}

/// Tests whether the surfaces of two bodies intersect.
///
/// The sole real-time query. The two bodies' frames are reconciled once,
/// up front: everything is expressed in body A's local space, with B's
/// geometry carried across by the relative frame. The traversal itself
/// never sees a frame, and node boxes are placed in body-local space, so
/// no frame composition happens across tree levels.
pub fn collide(a: &Body, b: &Body) -> bool {
    let rel = a.frame().inverse().intrinsic(b.frame());

    let policy = FnPolicy::new(
        move |na: &Obb, nb: &Obb| sat::boxes_overlap(na, &nb.transformed(&rel)),
        move |la: &Face, lb: &Face| sat::faces_overlap(la, &lb.transformed(&rel)),
        move |bounds: &Obb, leaf: &Face| sat::box_face_overlap(bounds, &leaf.transformed(&rel)),
        move |leaf: &Face, bounds: &Obb| sat::box_face_overlap(&bounds.transformed(&rel), leaf),
    );

    collide_recurse(a.tree(), b.tree(), &policy)
}

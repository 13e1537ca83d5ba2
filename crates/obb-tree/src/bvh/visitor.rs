//! Visitor pattern for walking a bounds tree.
//!
//! Visitors decouple tree walks from what consumers do with the
//! payloads; the visualization layer drives its level-of-detail and
//! highlight drawing through these without the tree knowing about
//! rendering.

/// Visitor for payloads encountered during a tree walk.
///
/// Both callbacks receive the payload's preorder identifier (stable for
/// a given tree, see [`super::BoundsTree`]) and its depth (root = 0).
pub trait TreeVisitor<N, L> {
    /// Called for every internal node's bounding payload.
    fn visit_node(&mut self, id: usize, depth: usize, bounds: &N);

    /// Called for every leaf payload.
    fn visit_leaf(&mut self, id: usize, depth: usize, leaf: &L);
}

/// A visitor that clones every visited payload, tagged with its id.
#[derive(Debug)]
pub struct CollectingVisitor<N, L> {
    bounds: Vec<(usize, N)>,
    leaves: Vec<(usize, L)>,
}

impl<N, L> CollectingVisitor<N, L> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self {
            bounds: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Returns the collected bounding payloads with their ids.
    pub fn bounds(&self) -> &[(usize, N)] {
        &self.bounds
    }

    /// Returns the collected leaf payloads with their ids.
    pub fn leaves(&self) -> &[(usize, L)] {
        &self.leaves
    }

    /// Consumes the visitor, returning both payload lists.
    pub fn into_parts(self) -> (Vec<(usize, N)>, Vec<(usize, L)>) {
        (self.bounds, self.leaves)
    }
}

impl<N, L> Default for CollectingVisitor<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone, L: Clone> TreeVisitor<N, L> for CollectingVisitor<N, L> {
    fn visit_node(&mut self, id: usize, _depth: usize, bounds: &N) {
        self.bounds.push((id, bounds.clone()));
    }

    fn visit_leaf(&mut self, id: usize, _depth: usize, leaf: &L) {
        self.leaves.push((id, leaf.clone()));
    }
}

/// A visitor built from two closures, one per payload kind.
pub struct FnVisitor<FN, FL> {
    on_node: FN,
    on_leaf: FL,
}

impl<FN, FL> FnVisitor<FN, FL> {
    /// Creates a visitor from a node callback and a leaf callback.
    pub fn new(on_node: FN, on_leaf: FL) -> Self {
        Self { on_node, on_leaf }
    }
}

impl<N, L, FN, FL> TreeVisitor<N, L> for FnVisitor<FN, FL>
where
    FN: FnMut(usize, usize, &N),
    FL: FnMut(usize, usize, &L),
{
    fn visit_node(&mut self, id: usize, depth: usize, bounds: &N) {
        (self.on_node)(id, depth, bounds);
    }

    fn visit_leaf(&mut self, id: usize, depth: usize, leaf: &L) {
        (self.on_leaf)(id, depth, leaf);
    }
}

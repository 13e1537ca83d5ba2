//! Tree construction: projected-median splitting over face lists.

use log::{debug, trace};
use nalgebra::Vector3;

use crate::{BuildError, Face, Obb};

use super::tree::{BoundsTree, ObbTree};

/// Tolerance for comparing centroid projections during splitting.
///
/// Projections closer together than this carry no separating
/// information; they absorb floating-point noise from upstream
/// transforms rather than produce unstable splits.
pub const SPLIT_EPSILON: f32 = 1e-6;

impl ObbTree {
    /// Builds a tree from a non-empty list of faces.
    ///
    /// Recursively partitions the list by projected-median splitting
    /// (see [`project_and_split`]) until every leaf holds a single
    /// face; every internal node carries an [`Obb`] fitted around its
    /// whole subtree, placed in body-local space.
    ///
    /// Split axes are tried in order of decreasing extent of the fitted
    /// box, falling back to an order-preserving index split when no axis
    /// separates the centroids (degenerate or coplanar input). Both
    /// policies are deterministic and strictly reduce the face count,
    /// so construction always terminates.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoFaces`] for an empty face list.
    pub fn from_faces(faces: Vec<Face>) -> Result<Self, BuildError> {
        if faces.is_empty() {
            return Err(BuildError::NoFaces);
        }
        trace!("building OBB tree over {} faces", faces.len());
        Ok(build_node(faces))
    }
}

/// Recursively builds the subtree for a non-empty face list.
fn build_node(mut faces: Vec<Face>) -> ObbTree {
    debug_assert!(!faces.is_empty(), "build_node requires at least one face");

    if faces.len() == 1 {
        return BoundsTree::Leaf(faces.swap_remove(0));
    }

    let bounds = Obb::fit(&faces);
    let (first, second) = partition(&bounds, faces);
    BoundsTree::Node {
        bounds,
        left: Box::new(build_node(first)),
        right: Box::new(build_node(second)),
    }
}

/// Partitions a face list into two non-empty halves.
///
/// Tries the fitted box's axes in order of decreasing half-extent (ties
/// broken by axis index); the first axis whose centroid projections
/// split wins. If none does, splits by position in the input list.
fn partition(bounds: &Obb, mut faces: Vec<Face>) -> (Vec<Face>, Vec<Face>) {
    let axes = bounds.axes();
    let extents = bounds.half_extents();

    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| extents[j].total_cmp(&extents[i]));

    for index in order {
        if let Some(split) = project_and_split(&axes[index], &faces) {
            return split;
        }
    }

    debug!(
        "no axis separates {} face centroids, splitting by index",
        faces.len()
    );
    let boundary = faces.len().div_ceil(2);
    let second = faces.split_off(boundary);
    (faces, second)
}

/// Partitions faces around the median projection of their centroids on
/// `axis`.
///
/// Each face projects as its area-weighted centroid's coordinate along
/// the axis. The median value is the projection at sorted position
/// `(N - 1) / 2`, so for odd counts the first half receives the extra
/// element. Every face whose projection lies within [`SPLIT_EPSILON`]
/// of the median joins the first half — *all* ties group on the
/// boundary side, even when that leaves the halves unbalanced — and
/// only strictly greater projections form the second half. Faces keep
/// their original relative order within each half.
///
/// Returns `None` when the second half would be empty, i.e. when no
/// projection exceeds the median by more than the tolerance. That is
/// exactly the all-values-equal-within-tolerance case: the axis carries
/// no separating information and the caller must split some other way.
pub fn project_and_split(
    axis: &Vector3<f32>,
    faces: &[Face],
) -> Option<(Vec<Face>, Vec<Face>)> {
    debug_assert!(!faces.is_empty(), "cannot split an empty face list");

    let projections: Vec<f32> = faces
        .iter()
        .map(|face| face.centroid().coords.dot(axis))
        .collect();

    let mut sorted = projections.clone();
    sorted.sort_by(f32::total_cmp);
    let median = sorted[(sorted.len() - 1) / 2];

    let mut first = Vec::new();
    let mut second = Vec::new();
    for (face, &projection) in faces.iter().zip(&projections) {
        if projection > median + SPLIT_EPSILON {
            second.push(face.clone());
        } else {
            first.push(face.clone());
        }
    }

    if second.is_empty() {
        None
    } else {
        Some((first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// A small triangle whose centroid sits at `x` on the X axis.
    fn face_at(x: f32) -> Face {
        Face::new(
            Point3::new(x, 0.0, 0.0),
            Point3::new(x, 3.0, 0.0),
            Point3::new(x, 0.0, 3.0),
        )
    }

    fn xs(faces: &[Face]) -> Vec<f32> {
        faces.iter().map(|f| f.centroid().x).collect()
    }

    #[test]
    fn split_preserves_membership_and_order() {
        let faces: Vec<Face> = [3.0, 1.0, 4.0, 1.5, 2.0].iter().map(|&x| face_at(x)).collect();
        let (first, second) =
            project_and_split(&Vector3::x(), &faces).expect("distinct values must split");

        assert_eq!(first.len() + second.len(), faces.len());
        // Original relative order survives in both halves.
        assert_eq!(xs(&first), vec![1.0, 1.5, 2.0]);
        assert_eq!(xs(&second), vec![3.0, 4.0]);
    }

    #[test]
    fn tied_median_group_goes_entirely_first() {
        let faces: Vec<Face> = [1.0, 1.0, 1.0, 1.0, 2.0].iter().map(|&x| face_at(x)).collect();
        let (first, second) =
            project_and_split(&Vector3::x(), &faces).expect("the lone 2.0 must split off");

        // 4-vs-1: every projection tied with the median stays in the
        // first half.
        assert_eq!(first.len(), 4);
        assert_eq!(xs(&second), vec![2.0]);
    }

    #[test]
    fn projections_without_signal_do_not_split() {
        let faces: Vec<Face> = [0.0, 1.0e-10, 2.0e-10, 3.0e-10]
            .iter()
            .map(|&x| face_at(x))
            .collect();
        assert!(project_and_split(&Vector3::x(), &faces).is_none());
    }

    #[test]
    fn identical_projections_do_not_split() {
        let faces: Vec<Face> = std::iter::repeat_with(|| face_at(5.0)).take(6).collect();
        assert!(project_and_split(&Vector3::x(), &faces).is_none());
    }

    #[test]
    fn even_count_splits_evenly() {
        let faces: Vec<Face> = [0.0, 1.0, 2.0, 3.0].iter().map(|&x| face_at(x)).collect();
        let (first, second) = project_and_split(&Vector3::x(), &faces).expect("must split");
        assert_eq!(xs(&first), vec![0.0, 1.0]);
        assert_eq!(xs(&second), vec![2.0, 3.0]);
    }

    #[test]
    fn odd_count_gives_first_half_the_extra_element() {
        let faces: Vec<Face> = [0.0, 1.0, 2.0, 3.0, 4.0].iter().map(|&x| face_at(x)).collect();
        let (first, second) = project_and_split(&Vector3::x(), &faces).expect("must split");
        assert_eq!(xs(&first), vec![0.0, 1.0, 2.0]);
        assert_eq!(xs(&second), vec![3.0, 4.0]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(ObbTree::from_faces(Vec::new()), Err(BuildError::NoFaces));
    }

    #[test]
    fn single_face_builds_a_leaf() {
        let tree = ObbTree::from_faces(vec![face_at(1.0)]).expect("one face builds");
        assert!(tree.is_leaf());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn distinct_faces_build_a_balanced_tree() {
        let faces: Vec<Face> = (0..4).map(|i| face_at(i as f32 * 2.0)).collect();
        let tree = ObbTree::from_faces(faces).expect("four faces build");
        assert_eq!(tree.leaf_count(), 4);
        // 2/2 split then 1/1 splits: a perfectly balanced tree.
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn coincident_faces_still_terminate() {
        // Every centroid identical: every axis reports no signal and the
        // index fallback must carry construction to completion.
        let faces: Vec<Face> = std::iter::repeat_with(|| face_at(2.0)).take(8).collect();
        let tree = ObbTree::from_faces(faces).expect("degenerate input builds");
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn node_boxes_enclose_their_subtrees() {
        let faces: Vec<Face> = (0..8).map(|i| face_at(i as f32)).collect();
        let tree = ObbTree::from_faces(faces).expect("eight faces build");

        fn check(tree: &ObbTree) {
            if let BoundsTree::Node { bounds, left, right } = tree {
                for leaf in tree.leaves_to_depth(usize::MAX) {
                    let h = bounds.half_extents();
                    for vertex in leaf.vertices() {
                        let local = bounds.frame().inverse_transform_point(*vertex);
                        assert!(
                            local.x.abs() <= h.x + 1e-3
                                && local.y.abs() <= h.y + 1e-3
                                && local.z.abs() <= h.z + 1e-3,
                            "vertex {vertex:?} escapes its node box"
                        );
                    }
                }
                check(left);
                check(right);
            }
        }
        check(&tree);
    }
}

//! Separating-axis overlap tests between boxes and faces.
//!
//! All three predicates expect both shapes expressed in one common
//! reference space; [`crate::bvh::collide`] reconciles body frames before
//! calling them. Each test is tolerant: projections must be separated by
//! more than [`COLLISION_EPSILON`] before two shapes count as disjoint,
//! so exactly-touching configurations classify as overlapping instead of
//! flickering under floating-point noise.

use nalgebra::Vector3;

use crate::{Face, Obb};

/// Tolerance for projection-overlap comparisons.
/// Shapes separated by less than this along every axis count as touching.
pub const COLLISION_EPSILON: f32 = 1e-5;

/// Axes shorter than this (squared) carry no separating information and
/// are skipped. Near-parallel edge cross products land here.
const AXIS_EPSILON: f32 = 1e-12;

/// Tests whether two oriented boxes overlap.
///
/// Uses the 15 candidate axes of the separating-axis theorem for box
/// pairs: the three face normals of each box plus the nine pairwise
/// cross products of their axes. Degenerate cross products are absorbed
/// by the epsilon added to the rotation magnitudes.
pub fn boxes_overlap(a: &Obb, b: &Obb) -> bool {
    let ra = a.frame().orientation().to_rotation_matrix().into_inner();
    let rb = b.frame().orientation().to_rotation_matrix().into_inner();

    // Rotation of B expressed in A's box axes, and B's center likewise.
    let r = ra.transpose() * rb;
    let t = ra.transpose() * (b.center() - a.center());
    let abs_r = r.map(|x| x.abs() + COLLISION_EPSILON);

    let ea = a.half_extents();
    let eb = b.half_extents();

    // A's three face normals.
    for i in 0..3 {
        let rb_proj = abs_r[(i, 0)] * eb[0] + abs_r[(i, 1)] * eb[1] + abs_r[(i, 2)] * eb[2];
        if t[i].abs() > ea[i] + rb_proj + COLLISION_EPSILON {
            return false;
        }
    }

    // B's three face normals.
    for j in 0..3 {
        let ra_proj = abs_r[(0, j)] * ea[0] + abs_r[(1, j)] * ea[1] + abs_r[(2, j)] * ea[2];
        let tj = t[0] * r[(0, j)] + t[1] * r[(1, j)] + t[2] * r[(2, j)];
        if tj.abs() > ra_proj + eb[j] + COLLISION_EPSILON {
            return false;
        }
    }

    // The nine cross products A_i x B_j.
    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;
        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;
            let ra_proj = ea[i1] * abs_r[(i2, j)] + ea[i2] * abs_r[(i1, j)];
            let rb_proj = eb[j1] * abs_r[(i, j2)] + eb[j2] * abs_r[(i, j1)];
            let tt = t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)];
            if tt.abs() > ra_proj + rb_proj + COLLISION_EPSILON {
                return false;
            }
        }
    }

    true
}

/// Tests whether an oriented box and a face overlap.
///
/// The face is taken into box-local space, where the box is an
/// axis-aligned box about the origin, and the 13 candidate axes are
/// tested: the box's three axes, the face normal, and the nine cross
/// products of the face's edges with the box's axes.
pub fn box_face_overlap(obb: &Obb, face: &Face) -> bool {
    let v: Vec<Vector3<f32>> = face
        .vertices()
        .iter()
        .map(|p| obb.frame().inverse_transform_point(*p).coords)
        .collect();
    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];
    let h = obb.half_extents();

    let box_axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    let normal = edges[0].cross(&edges[1]);

    let separated_on = |axis: Vector3<f32>| -> bool {
        if axis.norm_squared() < AXIS_EPSILON {
            return false;
        }
        let p0 = v[0].dot(&axis);
        let p1 = v[1].dot(&axis);
        let p2 = v[2].dot(&axis);
        let face_min = p0.min(p1).min(p2);
        let face_max = p0.max(p1).max(p2);
        let box_radius = h.x * axis.x.abs() + h.y * axis.y.abs() + h.z * axis.z.abs();
        face_min > box_radius + COLLISION_EPSILON || face_max < -(box_radius + COLLISION_EPSILON)
    };

    for axis in box_axes {
        if separated_on(axis) {
            return false;
        }
    }
    if separated_on(normal) {
        return false;
    }
    for box_axis in box_axes {
        for edge in edges {
            if separated_on(box_axis.cross(&edge)) {
                return false;
            }
        }
    }

    true
}

/// Tests whether two faces overlap.
///
/// Uses both face normals plus the nine pairwise edge cross products as
/// candidate axes. Degenerate axes are skipped; if every candidate axis
/// is degenerate (fully collapsed input) the test resolves to `true`,
/// which is the documented implementation-defined answer for such input.
pub fn faces_overlap(a: &Face, b: &Face) -> bool {
    let va: Vec<Vector3<f32>> = a.vertices().iter().map(|p| p.coords).collect();
    let vb: Vec<Vector3<f32>> = b.vertices().iter().map(|p| p.coords).collect();
    let ea = [va[1] - va[0], va[2] - va[1], va[0] - va[2]];
    let eb = [vb[1] - vb[0], vb[2] - vb[1], vb[0] - vb[2]];

    let separated_on = |axis: Vector3<f32>| -> bool {
        if axis.norm_squared() < AXIS_EPSILON {
            return false;
        }
        let (a_min, a_max) = project(&va, &axis);
        let (b_min, b_max) = project(&vb, &axis);
        a_min > b_max + COLLISION_EPSILON || b_min > a_max + COLLISION_EPSILON
    };

    if separated_on(ea[0].cross(&ea[1])) {
        return false;
    }
    if separated_on(eb[0].cross(&eb[1])) {
        return false;
    }
    for edge_a in ea {
        for edge_b in eb {
            if separated_on(edge_a.cross(&edge_b)) {
                return false;
            }
        }
    }

    true
}

fn project(vertices: &[Vector3<f32>], axis: &Vector3<f32>) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for v in vertices {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Frame;
    use nalgebra::{Point3, Vector3};
    use std::f32::consts::FRAC_PI_4;

    fn unit_box_at(x: f32, y: f32, z: f32) -> Obb {
        Obb::new(
            Vector3::new(1.0, 1.0, 1.0),
            Frame::from_translation(Vector3::new(x, y, z)),
        )
    }

    fn make_face(p: [f32; 3], q: [f32; 3], r: [f32; 3]) -> Face {
        Face::new(
            Point3::new(p[0], p[1], p[2]),
            Point3::new(q[0], q[1], q[2]),
            Point3::new(r[0], r[1], r[2]),
        )
    }

    #[test]
    fn overlapping_boxes() {
        assert!(boxes_overlap(&unit_box_at(0.0, 0.0, 0.0), &unit_box_at(1.5, 0.0, 0.0)));
    }

    #[test]
    fn separated_boxes() {
        assert!(!boxes_overlap(&unit_box_at(0.0, 0.0, 0.0), &unit_box_at(2.5, 0.0, 0.0)));
        assert!(!boxes_overlap(&unit_box_at(0.0, 0.0, 0.0), &unit_box_at(0.0, 0.0, -5.0)));
    }

    #[test]
    fn touching_boxes_count_as_overlapping() {
        // Faces exactly coincide at x = 1.
        assert!(boxes_overlap(&unit_box_at(0.0, 0.0, 0.0), &unit_box_at(2.0, 0.0, 0.0)));
    }

    #[test]
    fn rotated_box_separation_needs_cross_axes() {
        // A box rotated 45 degrees about Z sticks out to sqrt(2) along X,
        // so it reaches a box whose near side is at x = 1.3 but not one
        // whose near side is at x = 1.5.
        let rotated = Obb::new(
            Vector3::new(1.0, 1.0, 1.0),
            Frame::from_axis_angle(&Vector3::z_axis(), FRAC_PI_4),
        );
        assert!(boxes_overlap(&rotated, &unit_box_at(2.3, 0.0, 0.0)));
        assert!(!boxes_overlap(&rotated, &unit_box_at(2.5, 0.0, 0.0)));
    }

    #[test]
    fn face_inside_box() {
        let obb = unit_box_at(0.0, 0.0, 0.0);
        let face = make_face([-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]);
        assert!(box_face_overlap(&obb, &face));
    }

    #[test]
    fn face_outside_box() {
        let obb = unit_box_at(0.0, 0.0, 0.0);
        let face = make_face([3.0, 0.0, 0.0], [4.0, 0.0, 0.0], [3.0, 1.0, 0.0]);
        assert!(!box_face_overlap(&obb, &face));
    }

    #[test]
    fn large_face_pierces_box() {
        // All vertices are outside the box but the interior passes
        // through it, so only the cross-product axes could separate and
        // none do.
        let obb = unit_box_at(0.0, 0.0, 0.0);
        let face = make_face([-5.0, -5.0, 0.0], [5.0, -5.0, 0.0], [0.0, 5.0, 0.0]);
        assert!(box_face_overlap(&obb, &face));
    }

    #[test]
    fn face_separated_by_normal_axis() {
        let obb = unit_box_at(0.0, 0.0, 0.0);
        let face = make_face([-5.0, -5.0, 2.0], [5.0, -5.0, 2.0], [0.0, 5.0, 2.0]);
        assert!(!box_face_overlap(&obb, &face));
    }

    #[test]
    fn degenerate_face_against_box() {
        let obb = unit_box_at(0.0, 0.0, 0.0);
        let inside = make_face([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let outside = make_face([9.0, 0.0, 0.0], [9.0, 0.0, 0.0], [9.0, 0.0, 0.0]);
        assert!(box_face_overlap(&obb, &inside));
        assert!(!box_face_overlap(&obb, &outside));
    }

    #[test]
    fn crossing_faces_overlap() {
        // Two perpendicular triangles threading through each other.
        let a = make_face([-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 0.0, 1.0]);
        let b = make_face([0.0, -1.0, -1.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]);
        assert!(faces_overlap(&a, &b));
    }

    #[test]
    fn parallel_faces_do_not_overlap() {
        let a = make_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = make_face([0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]);
        assert!(!faces_overlap(&a, &b));
    }

    #[test]
    fn faces_sharing_an_edge_overlap() {
        let a = make_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = make_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(faces_overlap(&a, &b));
    }

    #[test]
    fn skew_faces_do_not_overlap() {
        // The first face's plane does not separate this pair; a later
        // axis has to.
        let a = make_face([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let b = make_face([3.0, 1.0, -1.0], [3.0, 1.0, 1.0], [5.0, -1.0, 0.0]);
        assert!(!faces_overlap(&a, &b));
    }

    #[test]
    fn degenerate_faces_resolve_without_crashing() {
        let point = make_face([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let normal = make_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // Every axis between two coincident point-triangles is
        // degenerate, so the pair resolves to true.
        assert!(faces_overlap(&point, &point));
        let _ = faces_overlap(&point, &normal);
    }
}

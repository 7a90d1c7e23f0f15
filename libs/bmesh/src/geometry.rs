//! # Geometry Helpers
//!
//! Small vector routines shared by the sweep generators. Vector arithmetic
//! itself comes from `glam::DVec3`.

use config::constants::approx_zero;
use glam::{DQuat, DVec3};
use robust::Coord3D;

/// Average of the four corners of a ring.
#[inline]
pub fn centroid(points: &[DVec3; 4]) -> DVec3 {
    (points[0] + points[1] + points[2] + points[3]) / 4.0
}

/// Rotates `v` about the unit `axis` by `radians`, right-handed.
#[inline]
pub fn rotate(v: DVec3, axis: DVec3, radians: f64) -> DVec3 {
    DQuat::from_axis_angle(axis, radians) * v
}

/// Orthonormal frame for a ring perpendicular to a bone.
///
/// `x` points away from `toward`, `y` and `z` span the ring plane with
/// `x = y × z`.
pub fn bone_frame(toward: DVec3) -> (DVec3, DVec3, DVec3) {
    let x = -toward.normalize_or_zero();
    let helper = if x.dot(DVec3::Y).abs() < 0.5 { DVec3::Y } else { DVec3::X };
    let y = helper.cross(x).normalize_or_zero();
    let z = x.cross(y).normalize_or_zero();
    (x, y, z)
}

/// Rotation that carries a ring facing the child onto one facing the parent.
///
/// `child_dir` and `parent_dir` point from the bending ball to its child and
/// parent. The angle is the supplement of the angle between the two bones,
/// negated, so a straight chain yields zero. A fully folded chain has no
/// unique axis and rotates about any vector orthogonal to the bone.
pub fn bend(child_dir: DVec3, parent_dir: DVec3) -> (DVec3, f64) {
    let lengths = child_dir.length() * parent_dir.length();
    if approx_zero(lengths) {
        return (DVec3::Z, 0.0);
    }

    let cos = (-child_dir.dot(parent_dir) / lengths).clamp(-1.0, 1.0);
    let angle = -cos.acos();

    match child_dir.cross(parent_dir).try_normalize() {
        Some(axis) => (axis, angle),
        None if cos > 0.0 => (DVec3::Z, 0.0),
        None => (child_dir.normalize().any_orthonormal_vector(), angle),
    }
}

/// Exact orientation of `d` relative to the plane through `a`, `b`, `c`.
///
/// Zero when the four points are coplanar; the sign tells the side.
#[inline]
pub fn orient3d(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    robust::orient3d(coord(a), coord(b), coord(c), coord(d))
}

#[inline]
fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D { x: p.x, y: p.y, z: p.z }
}

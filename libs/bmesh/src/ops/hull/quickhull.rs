//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points

use std::collections::HashMap;

use glam::DVec3;

use super::{Hull, HullPoint};
use crate::error::MeshError;
use crate::geometry::orient3d;

/// Computes the convex hull of a set of 3D points.
///
/// Points closer than `epsilon` to an earlier point are merged into it.
/// Every output vertex is tagged with the index of the input point it came
/// from, and triangles are wound counter-clockwise seen from outside.
///
/// # Arguments
///
/// * `points` - Points to compute hull of (at least 4 non-coplanar)
/// * `epsilon` - Distance a point must lie in front of a face to count as outside
///
/// # Example
///
/// ```rust
/// use bmesh::ops::hull::convex_hull;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = convex_hull(&points, 1e-10).unwrap();
/// assert_eq!(hull.points.len(), 4);
/// ```
pub fn convex_hull(points: &[DVec3], epsilon: f64) -> Result<Hull, MeshError> {
    if points.len() < 4 {
        return Err(MeshError::degenerate(
            "Convex hull requires at least 4 points",
        ));
    }

    // Remove duplicate points, remembering where each survivor came from
    let (unique_points, sources) = remove_duplicates(points, epsilon);
    if unique_points.len() < 4 {
        return Err(MeshError::degenerate(
            "Convex hull requires at least 4 unique points",
        ));
    }

    // Build initial tetrahedron
    let faces = build_initial_simplex(&unique_points, epsilon)?;

    // Run QuickHull iteration
    let final_faces = quickhull_iterate(faces, &unique_points, epsilon);

    Ok(faces_to_hull(&final_faces, &unique_points, &sources))
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    /// Creates a new face from three vertex indices.
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let p1 = points[v1];
        let p2 = points[v2];

        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        let distance = normal.dot(p0);

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance,
            outside_points: Vec::new(),
        }
    }

    /// Returns the signed distance from a point to this face's plane.
    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Returns true if the point is outside (in front of) this face.
    fn is_outside(&self, point: DVec3, epsilon: f64) -> bool {
        self.signed_distance(point) > epsilon
    }

    /// Finds the farthest outside point.
    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .max_by(|&&a, &&b| {
                let da = self.signed_distance(points[a]);
                let db = self.signed_distance(points[b]);
                da.total_cmp(&db)
            })
            .copied()
    }
}

/// Removes duplicate points within `epsilon`.
///
/// Returns the surviving points and, for each, its index in the input.
fn remove_duplicates(points: &[DVec3], epsilon: f64) -> (Vec<DVec3>, Vec<usize>) {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    let mut sources = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let is_duplicate = unique.iter().any(|u| u.distance(*p) < epsilon);
        if !is_duplicate {
            unique.push(*p);
            sources.push(i);
        }
    }
    (unique, sources)
}

/// Builds the initial tetrahedron from extreme points and assigns every
/// other point to the first face it lies outside of.
fn build_initial_simplex(points: &[DVec3], epsilon: f64) -> Result<Vec<HullFace>, MeshError> {
    // Find extreme points on each axis
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        if p.x < points[extremes[0]].x { extremes[0] = i; }
        if p.x > points[extremes[1]].x { extremes[1] = i; }
        if p.y < points[extremes[2]].y { extremes[2] = i; }
        if p.y > points[extremes[3]].y { extremes[3] = i; }
        if p.z < points[extremes[4]].z { extremes[4] = i; }
        if p.z > points[extremes[5]].z { extremes[5] = i; }
    }

    // Find two points with maximum distance
    let (p0, p1) = find_farthest_pair(&extremes, points);

    // Find third point farthest from line p0-p1
    let p2 = find_farthest_from_line(p0, p1, points, epsilon)?;

    // Find fourth point farthest from plane p0-p1-p2
    let p3 = find_farthest_from_plane(p0, p1, p2, points, epsilon)?;
    if orient3d(points[p0], points[p1], points[p2], points[p3]) == 0.0 {
        return Err(MeshError::degenerate("All points are coplanar"));
    }

    // Create initial tetrahedron faces (ensure outward normals)
    let centroid = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, centroid, points),
        create_face_outward(p0, p2, p3, centroid, points),
        create_face_outward(p0, p3, p1, centroid, points),
        create_face_outward(p1, p3, p2, centroid, points),
    ];

    // Assign remaining points to faces
    let used = [p0, p1, p2, p3];
    for idx in (0..points.len()).filter(|i| !used.contains(i)) {
        assign_to_face(&mut faces, idx, points, epsilon);
    }

    Ok(faces)
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = 0.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from a line.
fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    epsilon: f64,
) -> Result<usize, MeshError> {
    let line_dir = (points[p1] - points[p0]).normalize_or_zero();
    let mut max_dist = epsilon;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = v.reject_from_normalized(line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("All points are collinear"))
}

/// Finds the point farthest from a plane.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    epsilon: f64,
) -> Result<usize, MeshError> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize_or_zero();

    let mut max_dist = epsilon;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("All points are coplanar"))
}

/// Creates a face with outward-pointing normal.
fn create_face_outward(v0: usize, v1: usize, v2: usize, centroid: DVec3, points: &[DVec3]) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    let face_center = (points[v0] + points[v1] + points[v2]) / 3.0;

    // If normal points toward centroid, flip the face
    if face.normal.dot(centroid - face_center) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

/// Pushes a point onto the outside set of the first face it lies in front of.
fn assign_to_face(faces: &mut [HullFace], idx: usize, points: &[DVec3], epsilon: f64) {
    let point = points[idx];
    if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point, epsilon)) {
        face.outside_points.push(idx);
    }
}

/// Main QuickHull iteration.
fn quickhull_iterate(mut faces: Vec<HullFace>, points: &[DVec3], epsilon: f64) -> Vec<HullFace> {
    let max_iterations = points.len() * 2;

    for _ in 0..max_iterations {
        // Find a face with outside points
        let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) else {
            break;
        };

        // Find farthest point from this face
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let eye = points[farthest];

        // Find all faces visible from this point
        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(eye, epsilon))
            .map(|(i, _)| i)
            .collect();

        if visible.is_empty() {
            faces[face_idx].outside_points.retain(|&p| p != farthest);
            continue;
        }

        // Find horizon edges (edges of visible faces not shared with other visible faces)
        let horizon = find_horizon_edges(&faces, &visible);

        // Collect outside points from visible faces
        let mut reassign: Vec<usize> = Vec::new();
        for &idx in &visible {
            reassign.extend(&faces[idx].outside_points);
        }
        reassign.retain(|&p| p != farthest);

        // Remove visible faces (in reverse order to preserve indices)
        for &idx in visible.iter().rev() {
            faces.swap_remove(idx);
        }

        // Horizon edges keep the winding of the faces they came from, so the
        // new faces are outward without a centroid test.
        for (e0, e1) in horizon {
            faces.push(HullFace::new(e0, e1, farthest, points));
        }

        // Reassign outside points
        for idx in reassign {
            assign_to_face(&mut faces, idx, points, epsilon);
        }
    }

    faces
}

/// Finds horizon edges from visible faces.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            *edge_count.entry(key).or_insert(0) += 1;
        }
    }

    // Horizon edges appear exactly once among visible faces
    let mut horizon = Vec::new();
    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if edge_count[&key] == 1 {
                // Preserve winding order
                horizon.push((a, b));
            }
        }
    }

    horizon
}

/// Converts hull faces to a tagged hull, keeping only referenced points.
fn faces_to_hull(faces: &[HullFace], points: &[DVec3], sources: &[usize]) -> Hull {
    let mut remap = vec![usize::MAX; points.len()];
    let mut hull = Hull {
        points: Vec::new(),
        triangles: Vec::with_capacity(faces.len()),
    };

    for face in faces {
        let mut triangle = [0usize; 3];
        for (slot, &v) in triangle.iter_mut().zip(&face.vertices) {
            if remap[v] == usize::MAX {
                remap[v] = hull.points.len();
                hull.points.push(HullPoint {
                    position: points[v],
                    source: Some(sources[v]),
                });
            }
            *slot = remap[v];
        }
        hull.triangles.push(triangle);
    }

    hull
}

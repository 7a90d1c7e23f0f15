//! # Triangle-to-Quad Merge
//!
//! Joins pairs of adjacent, nearly coplanar triangles into quads. Vertex
//! positions are never touched and every merged quad covers exactly the
//! edges its two triangles exposed, so watertightness is preserved.

use std::collections::HashMap;

use glam::DVec3;

use crate::mesh::Mesh;

/// A mergeable triangle pair and how flat it is.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    first: usize,
    second: usize,
    quad: [u32; 4],
    cos: f64,
}

/// Merges compatible triangle pairs of `mesh` into quads.
///
/// Two triangles are compatible when they share an edge in opposite
/// directions, their normals agree to at least `min_cos`, and the quad they
/// form is convex. Flattest pairs are merged first; each triangle joins at
/// most one quad.
///
/// Returns the number of quads created.
///
/// # Example
///
/// ```rust
/// use bmesh::{ops::triangles_to_quads, Mesh};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 0);
/// mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0), 0);
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), 0);
/// mesh.add_triangle(0, 1, 2);
/// mesh.add_triangle(0, 2, 3);
///
/// assert_eq!(triangles_to_quads(&mut mesh, 0.999), 1);
/// assert_eq!(mesh.quad_count(), 1);
/// assert_eq!(mesh.triangle_count(), 0);
/// ```
pub fn triangles_to_quads(mesh: &mut Mesh, min_cos: f64) -> usize {
    let triangles = mesh.triangles();
    if triangles.len() < 2 {
        return 0;
    }

    let normals: Vec<DVec3> = triangles
        .iter()
        .map(|t| triangle_normal(mesh, t))
        .collect();

    // Directed edge -> owning triangle
    let mut edges: HashMap<(u32, u32), usize> = HashMap::with_capacity(triangles.len() * 3);
    for (i, t) in triangles.iter().enumerate() {
        for k in 0..3 {
            edges.insert((t[k], t[(k + 1) % 3]), i);
        }
    }

    let mut candidates = Vec::new();
    for (i, t) in triangles.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (t[k], t[(k + 1) % 3]);
            let Some(&j) = edges.get(&(b, a)) else {
                continue;
            };
            if j <= i {
                continue;
            }

            let cos = normals[i].dot(normals[j]);
            if cos < min_cos {
                continue;
            }

            // t = (a, b, c), other = (b, a, d)  ->  quad (a, d, b, c)
            let c = t[(k + 2) % 3];
            let Some(d) = opposite_vertex(&triangles[j], b, a) else {
                continue;
            };
            let quad = [a, d, b, c];
            if is_convex(mesh, &quad) {
                candidates.push(Candidate { first: i, second: j, quad, cos });
            }
        }
    }

    if candidates.is_empty() {
        return 0;
    }

    // Flattest first; ties keep discovery order
    candidates.sort_by(|x, y| y.cos.total_cmp(&x.cos));

    let mut merged = vec![false; triangles.len()];
    let mut quads = mesh.quads().to_vec();
    for candidate in &candidates {
        if merged[candidate.first] || merged[candidate.second] {
            continue;
        }
        merged[candidate.first] = true;
        merged[candidate.second] = true;
        quads.push(candidate.quad);
    }

    let created = quads.len() - mesh.quad_count();
    let remaining: Vec<[u32; 3]> = triangles
        .iter()
        .zip(&merged)
        .filter(|(_, m)| !**m)
        .map(|(t, _)| *t)
        .collect();

    mesh.set_faces(quads, remaining);
    created
}

/// Unit normal of a triangle, zero for degenerate triangles.
fn triangle_normal(mesh: &Mesh, t: &[u32; 3]) -> DVec3 {
    let [a, b, c] = t.map(|i| mesh.position(i));
    (b - a).cross(c - a).normalize_or_zero()
}

/// Third vertex of `t`, which must contain the directed edge `from -> to`.
fn opposite_vertex(t: &[u32; 3], from: u32, to: u32) -> Option<u32> {
    (0..3)
        .find(|&k| t[k] == from && t[(k + 1) % 3] == to)
        .map(|k| t[(k + 2) % 3])
}

/// Returns true if every corner of the quad turns the same way.
fn is_convex(mesh: &Mesh, quad: &[u32; 4]) -> bool {
    let p = quad.map(|i| mesh.position(i));
    let reference = (p[2] - p[0]).cross(p[3] - p[1]);
    (0..4).all(|k| {
        let prev = p[(k + 3) % 4];
        let next = p[(k + 1) % 4];
        (p[k] - prev).cross(next - p[k]).dot(reference) > 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A unit square split along its 0-2 diagonal.
    fn split_square(z3: f64) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(0.0, 1.0, z3), 0);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        mesh
    }

    #[test]
    fn test_merges_flat_pair() {
        let mut mesh = split_square(0.0);
        assert_eq!(triangles_to_quads(&mut mesh, 0.999), 1);
        assert_eq!(mesh.triangle_count(), 0);

        // Same boundary, same winding
        let quad = mesh.quads()[0];
        let start = quad.iter().position(|&v| v == 0).unwrap();
        let rotated: Vec<u32> = (0..4).map(|k| quad[(start + k) % 4]).collect();
        assert_eq!(rotated, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_keeps_creased_pair() {
        let mut mesh = split_square(1.0);
        assert_eq!(triangles_to_quads(&mut mesh, 0.999), 0);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.quad_count(), 0);
    }

    #[test]
    fn test_rejects_concave_quad() {
        // Dart: the union of the two triangles is not convex
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(0.5, 0.5, 0.0), 0);
        mesh.add_vertex(DVec3::new(0.0, 2.0, 0.0), 0);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        assert_eq!(triangles_to_quads(&mut mesh, 0.999), 0);
    }

    #[test]
    fn test_ignores_same_direction_edges() {
        // Inconsistent winding: both triangles use 0 -> 2
        let mut mesh = split_square(0.0);
        mesh.set_faces(Vec::new(), vec![[2, 1, 0], [0, 2, 3]]);
        assert_eq!(triangles_to_quads(&mut mesh, 0.999), 0);
    }

    #[test]
    fn test_existing_quads_survive() {
        let mut mesh = split_square(0.0);
        mesh.add_vertex(DVec3::new(0.0, 0.0, 5.0), 1);
        mesh.add_quad(0, 1, 2, 4);
        assert_eq!(triangles_to_quads(&mut mesh, 0.999), 1);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.quads()[0], [0, 1, 2, 4]);
    }
}

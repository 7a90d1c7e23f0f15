//! # Mesh Data Structure
//!
//! Quad-dominant skin mesh: vertices tagged with the ball that produced
//! them, quads, triangles and optional per-vertex normals.

use config::constants::GEOMETRY_TOLERANCE;
use glam::DVec3;

use crate::skeleton::BallId;

/// A mesh vertex and the ball it was generated for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Vertex position.
    pub position: DVec3,
    /// Ball that owns this vertex, kept for skinning.
    pub ball: BallId,
}

/// A mixed quad/triangle mesh with vertices and indices.
///
/// Collections are append-only during a build pass; indices stay valid
/// until the next [`Mesh::clear`].
///
/// # Example
///
/// ```rust
/// use bmesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 0);
/// let c = mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0), 0);
/// let d = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), 0);
/// mesh.add_quad(a, b, c, d);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    quads: Vec<[u32; 4]>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            quads: Vec::new(),
            triangles: Vec::new(),
            normals: None,
        }
    }

    /// Drops all geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.quads.clear();
        self.triangles.clear();
        self.normals = None;
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of quads.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of faces of either kind.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.quads.len() + self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index the next added vertex will get.
    ///
    /// Face indices are u32; a mesh never grows past `u32::MAX` vertices.
    #[inline]
    fn next_index(&self) -> u32 {
        debug_assert!(self.vertices.len() <= u32::MAX as usize);
        self.vertices.len() as u32
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3, ball: BallId) -> u32 {
        let index = self.next_index();
        self.vertices.push(Vertex { position, ball });
        index
    }

    /// Adds a run of vertices owned by `ball` and returns the index of the
    /// first one.
    pub fn add_vertices(&mut self, positions: impl IntoIterator<Item = DVec3>, ball: BallId) -> u32 {
        let base = self.next_index();
        self.vertices
            .extend(positions.into_iter().map(|position| Vertex { position, ball }));
        base
    }

    /// Adds a quad by vertex indices.
    pub fn add_quad(&mut self, v0: u32, v1: u32, v2: u32, v3: u32) {
        self.quads.push([v0, v1, v2, v3]);
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Replaces the face lists, keeping vertices untouched.
    pub(crate) fn set_faces(&mut self, quads: Vec<[u32; 4]>, triangles: Vec<[u32; 3]>) {
        self.quads = quads;
        self.triangles = triangles;
        self.normals = None;
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns a reference to the quads.
    #[inline]
    pub fn quads(&self) -> &[[u32; 4]] {
        &self.quads
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the position of the vertex at the given index.
    #[inline]
    pub fn position(&self, index: u32) -> DVec3 {
        self.vertices[index as usize].position
    }

    /// Iterates over every face as a slice of vertex indices.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.quads
            .iter()
            .map(|q| q.as_slice())
            .chain(self.triangles.iter().map(|t| t.as_slice()))
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Computes and sets area-weighted vertex normals.
    ///
    /// Quads use the Newell normal so slightly non-planar quads still get a
    /// stable direction.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for face in self.faces() {
            let normal = face_normal(&self.vertices, face);
            for &i in face {
                normals[i as usize] += normal;
            }
        }

        // Normalize
        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        let mut min = first.position;
        let mut max = first.position;

        for v in &self.vertices[1..] {
            min = min.min(v.position);
            max = max.max(v.position);
        }

        (min, max)
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - No face repeats a vertex
    /// - No zero-area faces
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len();

        for face in self.faces() {
            if face.iter().any(|&i| i as usize >= vertex_count) {
                return false;
            }

            for (k, a) in face.iter().enumerate() {
                if face[k + 1..].contains(a) {
                    return false;
                }
            }

            if face_normal(&self.vertices, face).length() < GEOMETRY_TOLERANCE {
                return false;
            }
        }

        true
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.position.x as f32);
            result.push(v.position.y as f32);
            result.push(v.position.z as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Quads are split along their first diagonal. Returns flattened
    /// [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        let mut result = Vec::with_capacity((self.quads.len() * 2 + self.triangles.len()) * 3);
        for q in &self.quads {
            result.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
        }
        for tri in &self.triangles {
            result.extend_from_slice(tri);
        }
        result
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            let mut result = Vec::with_capacity(normals.len() * 3);
            for n in normals {
                result.push(n.x as f32);
                result.push(n.y as f32);
                result.push(n.z as f32);
            }
            result
        })
    }
}

/// Newell normal of a polygon, with length equal to twice its area.
pub(crate) fn face_normal(vertices: &[Vertex], face: &[u32]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (k, &i) in face.iter().enumerate() {
        let a = vertices[i as usize].position;
        let b = vertices[face[(k + 1) % face.len()] as usize].position;
        normal += a.cross(b);
    }
    normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0), 1);
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), 1);
        mesh.add_quad(0, 1, 2, 3);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0), 4);
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.position(0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices()[0].ball, 4);
    }

    #[test]
    fn test_mesh_add_vertices_returns_base() {
        let mut mesh = unit_square();
        let base = mesh.add_vertices([DVec3::X, DVec3::Y, DVec3::Z], 9);
        assert_eq!(base, 4);
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.position(6), DVec3::Z);
        assert!(mesh.vertices()[4..].iter().all(|v| v.ball == 9));
        assert_eq!(mesh.add_vertex(DVec3::ONE, 0), 7);
    }

    #[test]
    fn test_mesh_clear_keeps_nothing() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.quad_count(), 0);
        assert!(mesh.normals().is_none());
    }

    #[test]
    fn test_quad_normals_point_along_winding() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        for n in mesh.normals().unwrap() {
            assert!(n.abs_diff_eq(DVec3::Z, 1e-12));
        }
    }

    #[test]
    fn test_face_normal_length_is_twice_area() {
        let mesh = unit_square();
        let normal = face_normal(mesh.vertices(), &mesh.quads()[0]);
        assert_relative_eq!(normal.length(), 2.0);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0), 0);
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0), 0);
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_validate_valid() {
        assert!(unit_square().validate());
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = unit_square();
        mesh.add_triangle(0, 1, 9);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_repeated_vertex() {
        let mut mesh = unit_square();
        mesh.add_quad(0, 1, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_indices_split_quads() {
        let mut mesh = unit_square();
        mesh.add_triangle(0, 2, 3);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2, 0, 2, 3, 0, 2, 3]);
        assert_eq!(mesh.vertices_f32().len(), 12);
    }

    #[test]
    fn test_normals_f32_after_compute() {
        let mut mesh = unit_square();
        assert!(mesh.normals_f32().is_none());
        mesh.compute_normals();
        assert_eq!(mesh.normals_f32().unwrap()[2], 1.0);
    }
}

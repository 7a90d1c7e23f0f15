//! # Topology Analysis
//!
//! Edge-incidence statistics for a finished mesh: watertightness, Euler
//! characteristic, winding consistency and connected components.

use std::collections::HashMap;

use crate::mesh::Mesh;

/// Summary of a mesh's combinatorial structure.
///
/// # Example
///
/// ```rust
/// use bmesh::{build_mesh, Skeleton, Topology};
/// use glam::DVec3;
///
/// let mut skeleton = Skeleton::new();
/// skeleton.add_ball(DVec3::ZERO, 1.0, None).unwrap();
///
/// let topology = Topology::analyze(&build_mesh(&skeleton));
/// assert!(topology.is_watertight());
/// assert_eq!(topology.euler_characteristic(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Vertices referenced by at least one face.
    pub vertex_count: usize,
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Quads plus triangles.
    pub face_count: usize,
    /// Edges bounding exactly one face.
    pub boundary_edges: usize,
    /// Edges bounding three or more faces.
    pub non_manifold_edges: usize,
    /// Directed edges used by more than one face.
    pub repeated_directed_edges: usize,
    /// Face-connected components.
    pub components: usize,
}

impl Topology {
    /// Analyzes the faces of `mesh`.
    pub fn analyze(mesh: &Mesh) -> Self {
        let mut undirected: HashMap<(u32, u32), usize> = HashMap::new();
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        let mut sets = DisjointSet::new(mesh.vertex_count());
        let mut referenced = vec![false; mesh.vertex_count()];

        for face in mesh.faces() {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                referenced[a as usize] = true;
                sets.union(a as usize, b as usize);
                *directed.entry((a, b)).or_insert(0) += 1;
                *undirected.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let mut roots: Vec<usize> = (0..mesh.vertex_count())
            .filter(|&v| referenced[v])
            .map(|v| sets.find(v))
            .collect();
        roots.sort_unstable();
        roots.dedup();

        Self {
            vertex_count: referenced.iter().filter(|&&r| r).count(),
            edge_count: undirected.len(),
            face_count: mesh.face_count(),
            boundary_edges: undirected.values().filter(|&&n| n == 1).count(),
            non_manifold_edges: undirected.values().filter(|&&n| n > 2).count(),
            repeated_directed_edges: directed.values().filter(|&&n| n > 1).count(),
            components: roots.len(),
        }
    }

    /// Returns true if every edge bounds exactly two faces.
    pub fn is_watertight(&self) -> bool {
        self.face_count > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// Returns V - E + F (2 for a closed genus-0 surface).
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.face_count as i64
    }

    /// Returns true if neighbouring faces traverse shared edges in opposite
    /// directions.
    pub fn is_consistently_oriented(&self) -> bool {
        self.repeated_directed_edges == 0
    }
}

/// Union-find over vertex indices.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO, 0);
        mesh.add_vertex(DVec3::X, 0);
        mesh.add_vertex(DVec3::Y, 0);
        mesh.add_vertex(DVec3::Z, 0);
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(0, 1, 3);
        mesh.add_triangle(1, 2, 3);
        mesh.add_triangle(2, 0, 3);
        mesh
    }

    #[test]
    fn test_tetrahedron_is_closed() {
        let topology = Topology::analyze(&tetrahedron());
        assert_eq!(topology.edge_count, 6);
        assert!(topology.is_watertight());
        assert!(topology.is_consistently_oriented());
        assert_eq!(topology.euler_characteristic(), 2);
        assert_eq!(topology.components, 1);
    }

    #[test]
    fn test_open_surface_has_boundary() {
        let mut mesh = tetrahedron();
        let mut faces = mesh.triangles().to_vec();
        faces.pop();
        mesh.set_faces(Vec::new(), faces);
        let topology = Topology::analyze(&mesh);
        assert_eq!(topology.boundary_edges, 3);
        assert!(!topology.is_watertight());
    }

    #[test]
    fn test_flipped_face_breaks_orientation() {
        let mut mesh = tetrahedron();
        let mut faces = mesh.triangles().to_vec();
        faces[0] = [0, 1, 2];
        mesh.set_faces(Vec::new(), faces);
        let topology = Topology::analyze(&mesh);
        assert!(topology.is_watertight());
        assert!(!topology.is_consistently_oriented());
    }

    #[test]
    fn test_unreferenced_vertices_and_components() {
        let mut mesh = tetrahedron();
        mesh.add_vertex(DVec3::splat(9.0), 1);
        let base = mesh.vertex_count() as u32;
        for p in [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z] {
            mesh.add_vertex(p + DVec3::splat(5.0), 2);
        }
        mesh.add_triangle(base, base + 2, base + 1);
        mesh.add_triangle(base, base + 1, base + 3);
        mesh.add_triangle(base + 1, base + 2, base + 3);
        mesh.add_triangle(base + 2, base, base + 3);

        let topology = Topology::analyze(&mesh);
        assert_eq!(topology.vertex_count, 8);
        assert_eq!(topology.components, 2);
        assert_eq!(topology.euler_characteristic(), 4);
    }

    #[test]
    fn test_empty_mesh_is_not_watertight() {
        assert!(!Topology::analyze(&Mesh::new()).is_watertight());
    }
}

//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls, used to stitch tube
//! mouths together at branching balls.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Tagged Output
//!
//! Every hull point records the index of the input point it came from, so
//! callers map hull triangles back to their own vertices by index instead
//! of by comparing coordinates.

mod quickhull;


pub use quickhull::convex_hull;

use config::constants::EPSILON;
use glam::DVec3;

use crate::error::MeshError;

/// A point on a computed hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullPoint {
    /// Hull vertex position.
    pub position: DVec3,
    /// Index of the input point this vertex came from, `None` if the hull
    /// routine synthesized it.
    pub source: Option<usize>,
}

/// A closed triangulated hull surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hull {
    /// Hull vertices.
    pub points: Vec<HullPoint>,
    /// Outward-wound triangles indexing into `points`.
    pub triangles: Vec<[usize; 3]>,
}

impl Hull {
    /// Returns the input index behind a hull vertex.
    #[inline]
    pub fn source(&self, index: usize) -> Option<usize> {
        self.points.get(index).and_then(|p| p.source)
    }
}

/// A convex hull routine the junction builder can delegate to.
///
/// Implementations should return a closed surface over (ideally exactly)
/// the given points. Output vertices not traceable to an input point are
/// tolerated: the junction builder skips triangles that use them.
pub trait ConvexHull {
    /// Computes the hull of `points`.
    fn hull(&self, points: &[DVec3]) -> Result<Hull, MeshError>;
}

/// The built-in QuickHull implementation.
///
/// # Example
///
/// ```rust
/// use bmesh::ops::hull::{ConvexHull, QuickHull};
/// use glam::DVec3;
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let hull = QuickHull::default().hull(&points).unwrap();
/// assert_eq!(hull.triangles.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickHull {
    /// Distance a point must lie in front of a face to count as outside.
    pub epsilon: f64,
}

impl QuickHull {
    /// Creates a hull routine with the given visibility tolerance.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Default for QuickHull {
    fn default() -> Self {
        Self::new(EPSILON)
    }
}

impl ConvexHull for QuickHull {
    fn hull(&self, points: &[DVec3]) -> Result<Hull, MeshError> {
        convex_hull(points, self.epsilon)
    }
}

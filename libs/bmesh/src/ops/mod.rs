//! # Mesh Operations
//!
//! Collaborator passes used by the skin builder: the convex hull that
//! joins tube mouths, and the triangle-to-quad simplifier.

pub mod hull;
pub mod quads;

pub use hull::{ConvexHull, Hull, HullPoint, QuickHull};
pub use quads::triangles_to_quads;

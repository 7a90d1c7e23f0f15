//! # B-Mesh
//!
//! Ball-and-bone skin generation. Turns a forest of spheres linked by bones
//! into a closed, quad-dominant polygon mesh.
//!
//! ## Architecture
//!
//! ```text
//! Skeleton (balls) → sweep (caps, elbows, joints) → triangles_to_quads → normals → Mesh
//! ```
//!
//! ## Algorithms
//!
//! - **Sweep**: post-order recursion; every ball hands an open four-vertex
//!   ring up to its parent
//! - **Segmented Sweep**: tapered tubes subdivided by bone length over
//!   ball size
//! - **Elbows**: half-angle then full-angle ring rotation across a bend
//! - **Junctions**: QuickHull over shrunk tube mouths, minus the faces
//!   lying inside one mouth
//! - **Quad Merge**: greedy pairing of flat adjacent triangles
//!
//! ## Usage
//!
//! ```rust
//! use bmesh::{build_mesh, Skeleton, Topology};
//! use glam::DVec3;
//!
//! let mut skeleton = Skeleton::new();
//! let hip = skeleton.add_ball(DVec3::ZERO, 1.0, None).unwrap();
//! skeleton.add_ball(DVec3::new(-3.0, -5.0, 0.0), 0.6, Some(hip)).unwrap();
//! skeleton.add_ball(DVec3::new(3.0, -5.0, 0.0), 0.6, Some(hip)).unwrap();
//!
//! let mesh = build_mesh(&skeleton);
//! assert!(Topology::analyze(&mesh).is_watertight());
//! ```

pub mod builder;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod skeleton;
pub mod topology;

mod sweep;

pub use builder::{build_mesh, SkinBuilder};
pub use error::{MeshError, SkeletonError};
pub use mesh::{Mesh, Vertex};
pub use skeleton::{Ball, BallId, Skeleton};
pub use topology::Topology;

//! # Config Crate
//!
//! Centralized configuration constants for the B-Mesh skinning pipeline.
//! All tolerances and tunable parameters of the sweep, the junction hull
//! and the quad merge live here so that the geometry crates never carry
//! bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, HULL_RING_SCALE, SkinConfig};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Junction rings are hulled at a fraction of their real size
//! assert!(HULL_RING_SCALE > 0.0 && HULL_RING_SCALE < 1.0);
//!
//! let cfg = SkinConfig::default();
//! assert!(cfg.merge_quads);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: `SkinConfig::new` rejects out-of-range values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

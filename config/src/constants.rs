//! # Configuration Constants
//!
//! Centralized constants for the skinning pipeline. Precision values,
//! junction hull parameters, quad-merge thresholds and recursion limits
//! are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Junctions**: Parameters of the convex-hull join at branching balls
//! - **Simplification**: Triangle-to-quad merge thresholds
//! - **Limits**: Stack growth for the recursive sweep

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used by the convex hull to decide whether a point lies strictly outside
/// a face, and to collapse duplicate input points.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance for geometric predicates on finished meshes.
///
/// Slightly larger than [`EPSILON`]; used when checking for zero-area
/// faces, whose corners have gone through several rotations and scalings.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, GEOMETRY_TOLERANCE};
/// assert!(GEOMETRY_TOLERANCE >= EPSILON);
/// ```
pub const GEOMETRY_TOLERANCE: f64 = 1e-8;

// =============================================================================
// JUNCTION CONSTANTS
// =============================================================================

/// Fraction of its real size each junction ring is scaled to before hulling.
///
/// Every ring's four points are pulled toward the ring's own centroid so
/// that only `HULL_RING_SCALE` of the original offset remains. Small rings
/// keep each ring a face of the hull even when neighbouring tube mouths
/// nearly touch, which keeps coplanar coincidences away from the hull.
///
/// # Example
///
/// ```rust
/// use config::constants::HULL_RING_SCALE;
///
/// let offset = 2.0;
/// let shrunk = offset * HULL_RING_SCALE;
/// assert!(shrunk < offset);
/// ```
pub const HULL_RING_SCALE: f64 = 0.01;

// =============================================================================
// SIMPLIFICATION CONSTANTS
// =============================================================================

/// Minimum cosine between two triangle normals for the pair to become a quad.
///
/// # Example
///
/// ```rust
/// use config::constants::QUAD_MERGE_MIN_COS;
///
/// // Roughly 2.5 degrees of crease is still considered flat
/// assert!(QUAD_MERGE_MIN_COS > (2.6f64).to_radians().cos());
/// ```
pub const QUAD_MERGE_MIN_COS: f64 = 0.999;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Remaining stack below which the recursive sweep grows a new segment.
///
/// The `stacker` crate is used to handle deep skeleton chains safely.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker` during the sweep.
pub const STACKER_STACK_SIZE_BYTES: usize = 1024 * 1024;

// =============================================================================
// CONFIG SNAPSHOT
// =============================================================================

/// Immutable snapshot of the settings used by one skinning pass.
///
/// # Examples
/// ```
/// use config::constants::SkinConfig;
/// let config = SkinConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinConfig {
    /// Numeric tolerance propagated into the convex hull.
    pub tolerance: f64,
    /// Scale applied to each junction ring about its centroid before hulling.
    pub hull_ring_scale: f64,
    /// Minimum normal cosine for merging a triangle pair into a quad.
    pub quad_merge_min_cos: f64,
    /// Whether the triangle-to-quad pass runs after the sweep.
    pub merge_quads: bool,
}

impl SkinConfig {
    /// Builds a configuration, validating every numeric field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SkinConfig;
    /// let cfg = SkinConfig::new(1.0e-9, 0.05, 0.99, false).expect("valid config");
    /// assert!(!cfg.merge_quads);
    /// ```
    pub fn new(
        tolerance: f64,
        hull_ring_scale: f64,
        quad_merge_min_cos: f64,
        merge_quads: bool,
    ) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if hull_ring_scale.is_nan() || hull_ring_scale <= 0.0 || hull_ring_scale > 1.0 {
            return Err(ConfigError::InvalidRingScale(hull_ring_scale));
        }
        if !(-1.0..=1.0).contains(&quad_merge_min_cos) {
            return Err(ConfigError::InvalidMergeThreshold(quad_merge_min_cos));
        }
        Ok(Self {
            tolerance,
            hull_ring_scale,
            quad_merge_min_cos,
            merge_quads,
        })
    }
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            hull_ring_scale: HULL_RING_SCALE,
            quad_merge_min_cos: QUAD_MERGE_MIN_COS,
            merge_quads: true,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the ring scale is outside `(0, 1]`.
    InvalidRingScale(f64),
    /// Raised when the merge threshold is not a valid cosine.
    InvalidMergeThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidRingScale(value) => {
                write!(f, "hull_ring_scale must be in (0, 1]: {value}")
            }
            ConfigError::InvalidMergeThreshold(value) => {
                write!(f, "quad_merge_min_cos must be in [-1, 1]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

//! # Skin Builder
//!
//! Entry point for a construction pass: sweeps every root of the skeleton,
//! merges flat triangle pairs into quads and recomputes normals.

use config::constants::SkinConfig;
use tracing::debug;

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::hull::{ConvexHull, QuickHull};
use crate::ops::quads::triangles_to_quads;
use crate::skeleton::Skeleton;
use crate::sweep::{sweep_root, SweepContext};

/// Builds skin meshes from skeletons.
///
/// The skeleton is read-only input; it is assumed to satisfy
/// [`Skeleton::validate`]. A pass never fails: a junction whose hull cannot
/// be computed is logged and left open.
///
/// # Example
///
/// ```rust
/// use bmesh::{Skeleton, SkinBuilder};
/// use glam::DVec3;
///
/// let mut skeleton = Skeleton::new();
/// let root = skeleton.add_ball(DVec3::ZERO, 1.0, None).unwrap();
/// skeleton.add_ball(DVec3::new(0.0, 5.0, 0.0), 0.5, Some(root)).unwrap();
///
/// let mesh = SkinBuilder::default().build(&skeleton);
/// assert!(mesh.quad_count() > 0);
/// assert!(mesh.normals().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SkinBuilder<H: ConvexHull = QuickHull> {
    config: SkinConfig,
    hull: H,
}

impl SkinBuilder {
    /// Creates a builder using the built-in hull routine.
    pub fn new(config: SkinConfig) -> Self {
        let hull = QuickHull::new(config.tolerance);
        Self { config, hull }
    }

    /// Creates a builder from raw settings, rejecting invalid values.
    pub fn from_settings(
        tolerance: f64,
        hull_ring_scale: f64,
        quad_merge_min_cos: f64,
        merge_quads: bool,
    ) -> Result<Self, MeshError> {
        let config = SkinConfig::new(tolerance, hull_ring_scale, quad_merge_min_cos, merge_quads)?;
        Ok(Self::new(config))
    }
}

impl Default for SkinBuilder {
    fn default() -> Self {
        Self::new(SkinConfig::default())
    }
}

impl<H: ConvexHull> SkinBuilder<H> {
    /// Swaps in a different hull routine.
    pub fn with_hull<T: ConvexHull>(self, hull: T) -> SkinBuilder<T> {
        SkinBuilder {
            config: self.config,
            hull,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SkinConfig {
        &self.config
    }

    /// Builds a fresh mesh for `skeleton`.
    pub fn build(&self, skeleton: &Skeleton) -> Mesh {
        let mut mesh = Mesh::new();
        self.build_into(skeleton, &mut mesh);
        mesh
    }

    /// Checks the skeleton first, then builds.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Skeleton`] if the skeleton breaks one of the
    /// invariants [`Skeleton::validate`] checks.
    pub fn try_build(&self, skeleton: &Skeleton) -> Result<Mesh, MeshError> {
        skeleton.validate()?;
        Ok(self.build(skeleton))
    }

    /// Rebuilds `mesh` from scratch for `skeleton`.
    pub fn build_into(&self, skeleton: &Skeleton, mesh: &mut Mesh) {
        mesh.clear();

        {
            let mut ctx = SweepContext::new(skeleton, mesh, &self.hull, &self.config);
            for root in skeleton.roots() {
                sweep_root(&mut ctx, root);
            }
        }

        let merged = if self.config.merge_quads {
            triangles_to_quads(mesh, self.config.quad_merge_min_cos)
        } else {
            0
        };
        mesh.compute_normals();

        debug!(
            balls = skeleton.len(),
            vertices = mesh.vertex_count(),
            quads = mesh.quad_count(),
            triangles = mesh.triangle_count(),
            merged,
            "built skin mesh"
        );
    }
}

/// Builds a skin mesh with the default configuration.
pub fn build_mesh(skeleton: &Skeleton) -> Mesh {
    SkinBuilder::new(SkinConfig::default()).build(skeleton)
}

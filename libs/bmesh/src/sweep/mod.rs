//! # Sweep
//!
//! Depth-first, post-order walk over the ball forest that emits the skin.
//! A ball is swept only after all of its children, because it needs the
//! open rings they hand up to build the tubes that reach them.
//!
//! ## Dispatch
//!
//! | Children | Root                     | Has parent                |
//! |----------|--------------------------|---------------------------|
//! | 0        | closed box               | tapered cap               |
//! | 1        | elbow with closing cap   | half/full bend elbow      |
//! | 2+       | hull junction            | hull junction + parent ring |

mod cap;
mod elbow;
mod joint;
mod segment;


use config::constants::{SkinConfig, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use glam::DVec3;
use stacker::maybe_grow;
use tracing::trace;

use crate::mesh::Mesh;
use crate::ops::hull::ConvexHull;
use crate::skeleton::{BallId, Skeleton};

use segment::segmented_sweep;

/// Open ring a ball hands up to its parent.
///
/// `indices` are the mesh vertices the parent's tube must attach to.
/// `positions` is the ring shape the parent should sweep, centered at the
/// owning ball's center. The two agree except after an elbow, where the
/// indices are the half-bend ring and the positions the full bend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ring {
    pub indices: [u32; 4],
    pub positions: [DVec3; 4],
}

/// State shared by one construction pass.
pub(crate) struct SweepContext<'a> {
    pub skeleton: &'a Skeleton,
    pub mesh: &'a mut Mesh,
    pub hull: &'a dyn ConvexHull,
    pub config: &'a SkinConfig,
}

impl<'a> SweepContext<'a> {
    pub fn new(
        skeleton: &'a Skeleton,
        mesh: &'a mut Mesh,
        hull: &'a dyn ConvexHull,
        config: &'a SkinConfig,
    ) -> Self {
        Self {
            skeleton,
            mesh,
            hull,
            config,
        }
    }
}

/// Sweeps the tree rooted at `id`, closing it off completely.
pub(crate) fn sweep_root(ctx: &mut SweepContext<'_>, id: BallId) {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        let skeleton = ctx.skeleton;
        let children = skeleton.ball(id).children.as_slice();
        trace!(ball = id, children = children.len(), "sweeping root");

        match children {
            [] => cap::make_box(ctx, id),
            [child] => elbow::make_root_elbow(ctx, id, *child),
            _ => joint::make_root_joint(ctx, id),
        }
    })
}

/// Sweeps the subtree at `id` and returns the ring facing `parent`.
pub(crate) fn sweep_child(ctx: &mut SweepContext<'_>, id: BallId, parent: BallId) -> Ring {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        let skeleton = ctx.skeleton;
        let children = skeleton.ball(id).children.as_slice();
        trace!(ball = id, parent, children = children.len(), "sweeping ball");

        match children {
            [] => cap::make_cap(ctx, id, parent),
            [child] => elbow::make_elbow(ctx, id, *child, parent),
            _ => joint::make_joint(ctx, id, parent),
        }
    })
}

//! Branching balls: one tube per child, stitched together by a convex hull.
//!
//! Every tube ends in a ring on the ball's surface facing its child. A
//! non-root joint adds one more ring facing its parent. The hull of all
//! rings, minus the hull faces that lie inside a single ring, is the
//! junction surface. Rings are shrunk about their own centroids before
//! hulling so each one shows up as a face of the hull instead of feeding
//! near-coplanar points into it.

use glam::DVec3;
use tracing::{debug, warn};

use super::cap::cross_section;
use super::{segmented_sweep, sweep_child, Ring, SweepContext};
use crate::geometry::centroid;
use crate::ops::hull::Hull;
use crate::skeleton::BallId;

/// Root with several children: the junction is closed on every side.
pub(super) fn make_root_joint(ctx: &mut SweepContext<'_>, id: BallId) {
    let rings = tube_mouths(ctx, id);
    close_junction(ctx, id, &rings);
}

/// Joint with a parent: also opens a ring toward the parent and hands it up.
pub(super) fn make_joint(ctx: &mut SweepContext<'_>, id: BallId, parent: BallId) -> Ring {
    let mut rings = tube_mouths(ctx, id);

    let skeleton = ctx.skeleton;
    let (positions, away) = cross_section(skeleton.ball(id), skeleton.ball(parent));
    let indices = positions.map(|p| ctx.mesh.add_vertex(p - away, id));
    rings.push(indices);

    close_junction(ctx, id, &rings);

    Ring { indices, positions }
}

/// Sweeps every child and runs a tube up to this ball's surface.
fn tube_mouths(ctx: &mut SweepContext<'_>, id: BallId) -> Vec<[u32; 4]> {
    let skeleton = ctx.skeleton;
    let ball = skeleton.ball(id);
    let radius = ball.max_radius();

    let mut rings = Vec::with_capacity(ball.children.len() + 1);
    for &child in &ball.children {
        let child_ball = skeleton.ball(child);
        let last = sweep_child(ctx, child, id);

        let scale = radius / child_ball.max_radius();
        let surface = ball.center + (child_ball.center - ball.center).normalize_or_zero() * radius;
        let target = last
            .positions
            .map(|p| surface + (p - child_ball.center) * scale);

        rings.push(segmented_sweep(
            ctx.mesh,
            &last,
            target,
            child,
            child_ball.max_radius(),
            radius,
        ));
    }
    rings
}

/// Adds the hull triangles bridging `rings`.
///
/// Hull point `k` comes from corner `k % 4` of ring `k / 4`. Triangles whose
/// corners all come from one ring would cap a tube mouth and are dropped,
/// as are triangles using a point the hull cannot trace back to an input.
fn close_junction(ctx: &mut SweepContext<'_>, id: BallId, rings: &[[u32; 4]]) {
    let scale = ctx.config.hull_ring_scale;
    let mut points: Vec<DVec3> = Vec::with_capacity(rings.len() * 4);
    for ring in rings {
        let corners = ring.map(|i| ctx.mesh.position(i));
        let center = centroid(&corners);
        points.extend(corners.iter().map(|&p| center + (p - center) * scale));
    }

    let hull = match ctx.hull.hull(&points) {
        Ok(hull) => hull,
        Err(err) => {
            warn!(ball = id, rings = rings.len(), error = %err, "junction hull failed, leaving junction open");
            return;
        }
    };

    let mut added = 0usize;
    let mut inside = 0usize;
    let mut untraceable = 0usize;
    for triangle in &hull.triangles {
        let Some(sources) = trace_sources(&hull, triangle, points.len()) else {
            untraceable += 1;
            continue;
        };

        let [a, b, c] = sources.map(|s| s / 4);
        if a == b && b == c {
            inside += 1;
            continue;
        }

        let [v0, v1, v2] = sources.map(|s| rings[s / 4][s % 4]);
        ctx.mesh.add_triangle(v0, v1, v2);
        added += 1;
    }

    if untraceable > 0 {
        warn!(
            ball = id,
            skipped = untraceable,
            "convex hull generated new vertices, ignoring triangles that use them"
        );
    }
    debug!(ball = id, rings = rings.len(), added, inside, "closed junction");
}

/// Input indices behind a hull triangle's corners.
fn trace_sources(hull: &Hull, triangle: &[usize; 3], count: usize) -> Option<[usize; 3]> {
    let source = |k: usize| hull.source(triangle[k]).filter(|&s| s < count);
    Some([source(0)?, source(1)?, source(2)?])
}

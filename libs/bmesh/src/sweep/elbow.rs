//! Single-child balls: tubes that bend at the ball.

use super::{segmented_sweep, sweep_child, Ring, SweepContext};
use crate::geometry::{bend, rotate};
use crate::skeleton::BallId;

/// Root with one child: tube down from the child, then a flat closing cap
/// on the far side of the root.
pub(super) fn make_root_elbow(ctx: &mut SweepContext<'_>, id: BallId, child: BallId) {
    let skeleton = ctx.skeleton;
    let ball = skeleton.ball(id);
    let child_ball = skeleton.ball(child);

    let last = sweep_child(ctx, child, id);

    let scale = ball.max_radius() / child_ball.max_radius();
    let shape = last.positions.map(|p| (p - child_ball.center) * scale);
    let end = segmented_sweep(
        ctx.mesh,
        &last,
        shape.map(|s| ball.center + s),
        child,
        child_ball.max_radius(),
        ball.max_radius(),
    );

    let tip = ball.center + (ball.center - child_ball.center).normalize_or_zero() * ball.max_radius();
    let cap = shape.map(|s| ctx.mesh.add_vertex(tip + s, id));

    for k in 0..4 {
        let j = (k + 1) % 4;
        ctx.mesh.add_quad(end[k], cap[k], cap[j], end[j]);
    }
    ctx.mesh.add_quad(cap[0], cap[3], cap[2], cap[1]);
}

/// Ball with a parent and one child.
///
/// The tube from the child ends in a ring rotated halfway through the bend;
/// the ring handed up is rotated all the way so the parent's tube leaves
/// along its own bone.
pub(super) fn make_elbow(
    ctx: &mut SweepContext<'_>,
    id: BallId,
    child: BallId,
    parent: BallId,
) -> Ring {
    let skeleton = ctx.skeleton;
    let ball = skeleton.ball(id);
    let child_ball = skeleton.ball(child);
    let parent_ball = skeleton.ball(parent);

    let last = sweep_child(ctx, child, id);

    let (axis, angle) = bend(
        child_ball.center - ball.center,
        parent_ball.center - ball.center,
    );
    let scale = ball.max_radius() / child_ball.max_radius();
    let bent = |radians: f64| {
        last.positions
            .map(|p| ball.center + rotate(p - child_ball.center, axis, radians) * scale)
    };

    let indices = segmented_sweep(
        ctx.mesh,
        &last,
        bent(angle / 2.0),
        child,
        child_ball.max_radius(),
        ball.max_radius(),
    );

    Ring {
        indices,
        positions: bent(angle),
    }
}

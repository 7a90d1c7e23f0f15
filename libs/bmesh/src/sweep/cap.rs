//! Terminal geometry: boxes for isolated balls, caps for leaves.

use glam::DVec3;

use super::{Ring, SweepContext};
use crate::geometry::bone_frame;
use crate::skeleton::{Ball, BallId};

/// Corner order: +x face first, then -x, each as (+y+z, -y+z, -y-z, +y-z).
const BOX_QUADS: [[u32; 4]; 6] = [
    [0, 1, 2, 3],
    [7, 6, 5, 4],
    [7, 4, 0, 3],
    [6, 7, 3, 2],
    [6, 2, 1, 5],
    [0, 4, 5, 1],
];

/// Far cap first, then the four sides reaching back to the open ring.
const CAP_QUADS: [[u32; 4]; 5] = [
    [0, 1, 2, 3],
    [4, 5, 1, 0],
    [5, 6, 2, 1],
    [6, 7, 3, 2],
    [7, 4, 0, 3],
];

/// Square cross-section through `ball`'s center, perpendicular to the bone
/// toward `parent`.
///
/// Returns the ring and the frame axis pointing away from the parent, both
/// scaled by the ball's largest radius.
pub(super) fn cross_section(ball: &Ball, parent: &Ball) -> ([DVec3; 4], DVec3) {
    let (x, y, z) = bone_frame(parent.center - ball.center);
    let r = ball.max_radius();
    let (x, y, z) = (x * r, y * r, z * r);
    let c = ball.center;

    ([c + y + z, c - y + z, c - y - z, c + y - z], x)
}

/// Closed cuboid around a ball with no parent and no children.
pub(super) fn make_box(ctx: &mut SweepContext<'_>, id: BallId) {
    let ball = ctx.skeleton.ball(id);
    let c = ball.center;
    let radii = ball.radii();
    let x = DVec3::X * radii.x;
    let y = DVec3::Y * radii.y;
    let z = DVec3::Z * radii.z;

    let corners = [
        c + y + x + z,
        c - y + x + z,
        c - y + x - z,
        c + y + x - z,
        c + y - x + z,
        c - y - x + z,
        c - y - x - z,
        c + y - x - z,
    ];

    let base = ctx.mesh.add_vertices(corners, id);
    for [a, b, c, d] in BOX_QUADS {
        ctx.mesh.add_quad(base + a, base + b, base + c, base + d);
    }
}

/// Tapered cap for a leaf; the ring through the ball center stays open.
pub(super) fn make_cap(ctx: &mut SweepContext<'_>, id: BallId, parent: BallId) -> Ring {
    let skeleton = ctx.skeleton;
    let (near, away) = cross_section(skeleton.ball(id), skeleton.ball(parent));
    let far = near.map(|p| p + away);

    let base = ctx.mesh.add_vertices(far.into_iter().chain(near), id);
    for [a, b, c, d] in CAP_QUADS {
        ctx.mesh.add_quad(base + a, base + b, base + c, base + d);
    }

    Ring {
        indices: [base + 4, base + 5, base + 6, base + 7],
        positions: near,
    }
}

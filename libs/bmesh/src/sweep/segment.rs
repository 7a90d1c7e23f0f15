//! Tapered tube between an open ring and a target ring.

use glam::DVec3;

use super::Ring;
use crate::geometry::centroid;
use crate::mesh::Mesh;
use crate::skeleton::BallId;

/// Number of interior rings for a bone of length `distance`.
///
/// Zero when the balls touch or overlap; grows as the bone gets longer
/// relative to the balls on either end.
pub(crate) fn division_count(distance: f64, start_radius: f64, end_radius: f64) -> usize {
    let span = start_radius + end_radius;
    let divisions = ((distance - span) / span).floor();
    if divisions.is_finite() && divisions > 0.0 {
        divisions as usize
    } else {
        0
    }
}

/// Appends a tube of quads from `start` to the `end` positions.
///
/// Interior rings reuse the start ring's shape, scaled between the two
/// radii and re-centered along the line between the ring centroids. The
/// last ring is `end` verbatim. Every new vertex is owned by `owner`.
///
/// Returns the mesh indices of the final ring.
pub(crate) fn segmented_sweep(
    mesh: &mut Mesh,
    start: &Ring,
    end: [DVec3; 4],
    owner: BallId,
    start_radius: f64,
    end_radius: f64,
) -> [u32; 4] {
    let from = centroid(&start.indices.map(|i| mesh.position(i)));
    let to = centroid(&end);
    let origin = centroid(&start.positions);
    let shape = start.positions.map(|p| p - origin);

    let distance = from.distance(to);
    let divisions = division_count(distance, start_radius, end_radius);

    let mut previous = start.indices;
    for i in 0..=divisions {
        let next = if i == divisions {
            end.map(|p| mesh.add_vertex(p, owner))
        } else {
            // A single interior ring stays pinned to the start of the bone
            let percent = if divisions > 1 {
                i as f64 / (divisions - 1) as f64
            } else {
                0.0
            };
            let t = (start_radius + (distance - start_radius - end_radius) * percent) / distance;
            let offset = from + (to - from) * t;
            let scale = (start_radius + (end_radius - start_radius) * t) / start_radius;
            shape.map(|s| mesh.add_vertex(offset + s * scale, owner))
        };

        bridge(mesh, &previous, &next);
        previous = next;
    }

    previous
}

/// Four quads joining consecutive rings, wound outward.
fn bridge(mesh: &mut Mesh, previous: &[u32; 4], next: &[u32; 4]) {
    for k in 0..4 {
        let j = (k + 1) % 4;
        mesh.add_quad(next[k], next[j], previous[j], previous[k]);
    }
}

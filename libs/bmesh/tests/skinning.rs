use bmesh::{build_mesh, Ball, BallId, Mesh, Skeleton, SkinBuilder, Topology};
use glam::DVec3;

/// Balls along `centers`, each parented to the previous one.
fn chain(centers: &[DVec3], radius: f64) -> Skeleton {
    let mut skeleton = Skeleton::new();
    let mut parent = None;
    for &center in centers {
        parent = Some(skeleton.add_ball(center, radius, parent).unwrap());
    }
    skeleton
}

/// Spine with a chest that branches into two arms and a head.
fn figure() -> Skeleton {
    let mut skeleton = Skeleton::new();
    let hip = skeleton.add_ball(DVec3::ZERO, 1.2, None).unwrap();
    let chest = skeleton
        .add_ball(DVec3::new(0.0, 5.0, 0.0), 1.0, Some(hip))
        .unwrap();
    let left = skeleton
        .add_ball(DVec3::new(-4.0, 6.0, 0.5), 0.5, Some(chest))
        .unwrap();
    skeleton
        .add_ball(DVec3::new(-8.0, 5.0, 1.0), 0.4, Some(left))
        .unwrap();
    let right = skeleton
        .add_ball(DVec3::new(4.0, 6.0, -0.5), 0.5, Some(chest))
        .unwrap();
    skeleton
        .add_ball(DVec3::new(8.0, 5.0, -1.0), 0.4, Some(right))
        .unwrap();
    skeleton
        .add_ball(DVec3::new(0.3, 9.0, 0.0), 0.8, Some(chest))
        .unwrap();
    skeleton
}

fn assert_closed_sphere(mesh: &Mesh) {
    let topology = Topology::analyze(mesh);
    assert!(topology.is_watertight(), "{topology:?}");
    assert_eq!(topology.components, 1);
    assert_eq!(topology.euler_characteristic(), 2);
}

/// Vertex positions sorted so meshes can be compared up to relabeling.
fn sorted_positions(mesh: &Mesh) -> Vec<[f64; 3]> {
    let mut positions: Vec<[f64; 3]> = mesh
        .vertices()
        .iter()
        .map(|v| v.position.to_array())
        .collect();
    positions.sort_by(|a, b| {
        a[0].total_cmp(&b[0])
            .then(a[1].total_cmp(&b[1]))
            .then(a[2].total_cmp(&b[2]))
    });
    positions
}

#[test]
fn isolated_ball_is_a_closed_box() {
    let mut skeleton = Skeleton::new();
    skeleton.add_ball(DVec3::new(2.0, 0.0, -1.0), 0.75, None).unwrap();

    let mesh = build_mesh(&skeleton);

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.triangle_count(), 0);
    assert_closed_sphere(&mesh);
    assert!(Topology::analyze(&mesh).is_consistently_oriented());
}

#[test]
fn anisotropic_ball_box_matches_radii() {
    let mut skeleton = Skeleton::new();
    skeleton
        .push_ball(Ball::with_radii(DVec3::ZERO, 0.5, 1.0, 2.0), None)
        .unwrap();

    let (min, max) = build_mesh(&skeleton).bounding_box();
    assert_eq!(max - min, DVec3::new(1.0, 2.0, 4.0));
}

#[test]
fn two_ball_chain_is_watertight() {
    let skeleton = chain(&[DVec3::ZERO, DVec3::new(0.0, 6.0, 0.0)], 1.0);

    let mesh = build_mesh(&skeleton);

    assert_eq!(mesh.triangle_count(), 0);
    assert_closed_sphere(&mesh);
    assert!(Topology::analyze(&mesh).is_consistently_oriented());
}

#[test]
fn every_ball_owns_vertices() {
    let skeleton = chain(&[DVec3::ZERO, DVec3::new(0.0, 6.0, 0.0)], 1.0);

    let mesh = build_mesh(&skeleton);

    for id in 0..skeleton.len() {
        assert!(mesh.vertices().iter().any(|v| v.ball == id));
    }
}

#[test]
fn bent_chain_is_watertight_and_oriented() {
    let centers = [
        DVec3::ZERO,
        DVec3::new(4.0, 3.0, 0.0),
        DVec3::new(4.5, 8.0, 2.0),
        DVec3::new(0.0, 10.0, 5.0),
        DVec3::new(-3.0, 14.0, 4.0),
    ];
    let mesh = build_mesh(&chain(&centers, 0.8));

    assert_eq!(mesh.triangle_count(), 0);
    assert_closed_sphere(&mesh);
    assert!(Topology::analyze(&mesh).is_consistently_oriented());
}

#[test]
fn y_junction_is_one_closed_surface() {
    let mut skeleton = Skeleton::new();
    let root = skeleton.add_ball(DVec3::ZERO, 1.0, None).unwrap();
    skeleton
        .add_ball(DVec3::new(-4.0, 5.0, 0.0), 0.5, Some(root))
        .unwrap();
    skeleton
        .add_ball(DVec3::new(4.0, 5.0, 0.0), 0.5, Some(root))
        .unwrap();

    let mut mesh = Mesh::new();
    SkinBuilder::new(config::constants::SkinConfig {
        merge_quads: false,
        ..Default::default()
    })
    .build_into(&skeleton, &mut mesh);

    assert!(mesh.triangle_count() > 0);
    assert_closed_sphere(&mesh);
}

#[test]
fn branching_figure_is_one_closed_surface() {
    let mesh = build_mesh(&figure());

    assert_closed_sphere(&mesh);
    assert!(mesh.vertices().iter().all(|v| v.position.is_finite()));
}

#[test]
fn rebuilding_is_deterministic() {
    let skeleton = figure();
    let builder = SkinBuilder::default();

    let first = builder.build(&skeleton);
    let mut second = Mesh::new();
    builder.build_into(&skeleton, &mut second);
    builder.build_into(&skeleton, &mut second);

    assert_eq!(sorted_positions(&first), sorted_positions(&second));
    assert_eq!(first.quads(), second.quads());
    assert_eq!(first.triangles(), second.triangles());
}

#[test]
fn children_order_does_not_change_topology() {
    let skeleton = figure();
    let mut balls = skeleton.balls().to_vec();
    let chest: BallId = 1;
    balls[chest].children.reverse();
    let reordered = Skeleton::from_balls(balls);
    reordered.validate().unwrap();

    let original = build_mesh(&skeleton);
    let shuffled = build_mesh(&reordered);

    assert_closed_sphere(&shuffled);
    assert_eq!(original.vertex_count(), shuffled.vertex_count());
    assert_eq!(sorted_positions(&original), sorted_positions(&shuffled));
}

#[test]
fn separate_roots_give_separate_components() {
    let mut skeleton = chain(&[DVec3::ZERO, DVec3::new(0.0, 5.0, 0.0)], 1.0);
    skeleton.add_ball(DVec3::new(20.0, 0.0, 0.0), 1.0, None).unwrap();
    skeleton.add_ball(DVec3::new(-20.0, 0.0, 0.0), 2.0, None).unwrap();

    let topology = Topology::analyze(&build_mesh(&skeleton));

    assert!(topology.is_watertight());
    assert_eq!(topology.components, 3);
    assert_eq!(topology.euler_characteristic(), 6);
}

#[test]
fn deep_chain_does_not_overflow() {
    let centers: Vec<DVec3> = (0..5000)
        .map(|i| DVec3::new(0.0, i as f64 * 2.0, 0.0))
        .collect();

    let mesh = build_mesh(&chain(&centers, 1.0));

    assert_closed_sphere(&mesh);
}

#[test]
fn normals_cover_every_vertex() {
    let mesh = build_mesh(&chain(&[DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0)], 1.0));
    let normals = mesh.normals().unwrap();

    assert_eq!(normals.len(), mesh.vertex_count());
    for normal in normals {
        assert!((normal.length() - 1.0).abs() < 1e-9);
    }

    let branching = build_mesh(&figure());
    assert_eq!(branching.normals_f32().unwrap().len(), branching.vertex_count() * 3);
}

#[test]
fn gpu_export_splits_quads() {
    let mesh = build_mesh(&figure());

    assert_eq!(mesh.vertices_f32().len(), mesh.vertex_count() * 3);
    assert_eq!(
        mesh.indices_u32().len(),
        (mesh.quad_count() * 2 + mesh.triangle_count()) * 3
    );
}

#[test]
fn skeleton_survives_json() {
    let skeleton = figure();

    let json = serde_json::to_string(&skeleton).unwrap();
    let restored: Skeleton = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, skeleton);
    assert_eq!(
        sorted_positions(&build_mesh(&restored)),
        sorted_positions(&build_mesh(&skeleton))
    );
}

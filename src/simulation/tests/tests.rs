use super::*;
use crate::domain::config::ClothConfig;
use crate::systems::cloth::ConstraintKind;

fn small_scene() -> SceneCore {
    let mut config = SceneConfig::default();
    config.cloth = ClothConfig { resolution_x: 5, resolution_y: 4, ..ClothConfig::default() };
    SceneCore::new(config).unwrap()
}

#[test]
fn new_scene_binds_bodies_but_defers_constraints() {
    let scene = SceneCore::new(SceneConfig::default()).unwrap();
    // 100 particles + sphere + ground
    assert_eq!(scene.body_count(), 102);
    assert_eq!(scene.cloth_body_count(), 100);
    assert_eq!(scene.constraint_count(), 0);
    assert!(!scene.cloth().is_stitched());
}

#[test]
fn first_frame_stitches_once() {
    let mut scene = small_scene();
    scene.tick().unwrap();
    let expected = 4 * 4 + 5 * 3 + 2 * 4 * 3;
    assert_eq!(scene.constraint_count(), expected);
    for _ in 0..10 {
        scene.tick().unwrap();
    }
    assert_eq!(scene.constraint_count(), expected);
    assert_eq!(scene.cloth().constraint_count_by_kind(ConstraintKind::ShearUpRight), 12);
    assert_eq!(scene.frame_count(), 11);
}

#[test]
fn frame_drives_the_sphere() {
    let mut scene = small_scene();
    scene.frame(1500.0).unwrap();
    let [x, _, z, r] = scene.sphere_transform().unwrap();
    let expected = crate::systems::props::sphere_path(1500.0);
    // One tick of gravity after the override
    assert!((x - expected.x).abs() < 1e-4);
    assert!((z - expected.z).abs() < 1e-4);
    assert_eq!(r, 0.25);
}

#[test]
fn surface_is_flagged_each_frame() {
    let mut scene = small_scene();
    assert!(!scene.take_surface_dirty());
    scene.tick().unwrap();
    assert!(scene.take_surface_dirty());
    assert!(!scene.take_surface_dirty());
    assert_eq!(scene.positions_len(), 5 * 4 * 3);
    assert_eq!(scene.normals_len(), 5 * 4 * 3);
    assert_eq!(scene.indices_len(), 4 * 3 * 6);
}

#[test]
fn pinned_vertices_stay_put() {
    let mut scene = small_scene();
    let pin = scene.cloth().rest_position(0, 4).unwrap();
    for _ in 0..60 {
        scene.tick().unwrap();
    }
    assert_eq!(scene.particle_position(0, 4), Some(pin));
    assert_eq!(scene.cloth().surface().vertex(4), Some(pin));
}

#[test]
fn rebuild_gets_a_fresh_gate() {
    let mut scene = small_scene();
    scene.tick().unwrap();
    let constraints = scene.constraint_count();
    let bodies = scene.body_count();

    scene.rebuild().unwrap();
    assert_eq!(scene.constraint_count(), 0);
    assert_eq!(scene.body_count(), bodies);
    assert!(!scene.cloth().is_stitched());

    scene.tick().unwrap();
    assert_eq!(scene.constraint_count(), constraints);
}

#[test]
fn dispose_leaves_nothing_behind() {
    let mut scene = small_scene();
    scene.tick().unwrap();
    let report = scene.dispose();
    assert_eq!(report.bodies, 5 * 4 + 2);
    assert_eq!(report.constraints, 4 * 4 + 5 * 3 + 2 * 4 * 3);
    assert_eq!(scene.body_count(), 0);
    assert_eq!(scene.cloth_body_count(), 0);
    assert_eq!(scene.constraint_count(), 0);

    assert_eq!(scene.tick(), Err(SceneError::Disposed));
    assert_eq!(scene.rebuild(), Err(SceneError::Disposed));
    assert_eq!(scene.dispose().bodies, 0);
}

#[test]
fn perf_stats_zero_until_enabled() {
    let mut scene = small_scene();
    scene.tick().unwrap();
    assert_eq!(scene.get_perf_stats().tick(), 0);

    scene.enable_perf_metrics(true);
    scene.tick().unwrap();
    let stats = scene.get_perf_stats();
    assert_eq!(stats.tick(), 2);
    assert_eq!(stats.synced_vertices(), 20);
    assert_eq!(stats.skipped_vertices(), 0);
    assert_eq!(stats.body_count(), 22);
    assert!(stats.step_ms() >= stats.physics_ms());

    scene.enable_perf_metrics(false);
    assert_eq!(scene.get_perf_stats().body_count(), 0);
}

#[test]
fn settings_reach_the_world() {
    let mut scene = small_scene();
    scene.set_gravity(0.0, -1.0, 0.0);
    scene.set_time_step(0.01);
    scene.set_solver_iterations(0);
    assert_eq!(scene.physics().gravity(), Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.physics().config().time_step, 0.01);
    assert_eq!(scene.config().physics.solver_iterations, 1);

    scene.set_time_step(f32::NAN);
    scene.set_gravity(f32::INFINITY, 0.0, 0.0);
    assert_eq!(scene.physics().config().time_step, 0.01);
    assert_eq!(scene.physics().gravity(), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn props_can_be_disabled() {
    let mut config = SceneConfig::default();
    config.sphere.enabled = false;
    config.ground.enabled = false;
    let mut scene = SceneCore::new(config).unwrap();
    assert_eq!(scene.body_count(), 100);
    assert!(scene.sphere_transform().is_none());
    assert!(scene.ground_transform().is_none());
    scene.frame(0.0).unwrap();
}

#[test]
fn failed_stitch_fails_every_later_frame() {
    let mut config = SceneConfig::default();
    config.cloth = ClothConfig { resolution_x: 5, resolution_y: 4, ..ClothConfig::default() };
    config.sphere.enabled = false;
    config.ground.enabled = false;
    let mut scene = SceneCore::new(config).unwrap();

    // Swap in a world too small for the 55 stitched edges
    let mut limited = scene.config().physics.clone();
    limited.max_constraints = 30;
    scene.physics = PhysicsWorld::new(limited);
    scene.rebuild().unwrap();
    assert_eq!(scene.body_count(), 20);

    let expected = SceneError::CapacityExceeded { resource: "constraints", limit: 30 };
    for _ in 0..3 {
        assert_eq!(scene.tick(), Err(expected.clone()));
    }
    assert_eq!(scene.frame(16.0), Err(expected));
    assert_eq!(scene.constraint_count(), 0);
    assert_eq!(scene.body_count(), 0);
    assert_eq!(scene.frame_count(), 0);
    assert!(!scene.cloth().is_stitched());

    // A remount starts over with a fresh cloth
    scene.rebuild().unwrap();
    assert!(scene.cloth().failure().is_none());
    assert_eq!(scene.cloth_body_count(), 20);
}

#[test]
fn invalid_config_builds_nothing() {
    let mut config = SceneConfig::default();
    config.cloth.resolution_x = 1;
    assert!(matches!(SceneCore::new(config), Err(SceneError::InvalidConfiguration { .. })));
    assert!(matches!(SceneCore::from_json("[1, 2"), Err(SceneError::ConfigParse { .. })));
}

#[test]
fn config_json_round_trips() {
    let scene = small_scene();
    let parsed = SceneConfig::from_json(&scene.config_json()).unwrap();
    assert_eq!(&parsed, scene.config());
}

use drape_engine::{SceneConfig, SceneCore};

/// Pinned cells of the default 10x10 cloth
const PINS: [(usize, usize); 4] = [(0, 0), (0, 1), (0, 8), (0, 9)];

#[test]
fn default_cloth_hangs_for_a_thousand_ticks() {
    let mut scene = SceneCore::new(SceneConfig::default()).unwrap();
    let rest: Vec<_> = PINS
        .iter()
        .map(|&(r, c)| scene.cloth().rest_position(r, c).unwrap())
        .collect();
    let interior_start = scene.particle_position(5, 5).unwrap();

    for _ in 0..1000 {
        scene.tick().unwrap();
    }

    for (&(r, c), rest) in PINS.iter().zip(&rest) {
        let p = scene.particle_position(r, c).unwrap();
        assert!(p.distance(*rest) < 1e-5, "pin ({}, {}) drifted to {:?}", r, c, p);
    }

    let interior = scene.particle_position(5, 5).unwrap();
    assert!(interior.is_finite());
    assert!((interior.y - interior_start.y).abs() > 1e-3, "interior never moved");

    // Surface mirrors the simulation
    for row in 0..10 {
        for col in 0..10 {
            let live = scene.particle_position(row, col).unwrap();
            assert_eq!(scene.cloth().surface().vertex(row * 10 + col), Some(live));
        }
    }
}

#[test]
fn unpinned_top_row_cells_sag() {
    let mut scene = SceneCore::new(SceneConfig::default()).unwrap();
    let start = scene.particle_position(0, 5).unwrap();
    for _ in 0..200 {
        scene.tick().unwrap();
    }
    let now = scene.particle_position(0, 5).unwrap();
    assert!(now.y < start.y, "free top-row cell should fall: {:?} -> {:?}", start, now);
}

#[test]
fn cloth_stays_above_the_ground() {
    let mut scene = SceneCore::new(SceneConfig::default()).unwrap();
    for _ in 0..600 {
        scene.tick().unwrap();
    }
    let ground_y = scene.config().ground.position[1];
    for row in 0..10 {
        for col in 0..10 {
            let p = scene.particle_position(row, col).unwrap();
            assert!(p.y > ground_y, "({}, {}) fell through at {:?}", row, col, p);
        }
    }
}

#[test]
fn normals_stay_unit_length() {
    let mut scene = SceneCore::new(SceneConfig::default()).unwrap();
    for i in 0..120 {
        scene.frame(i as f64 * 16.0).unwrap();
    }
    let surface = scene.cloth().surface();
    for i in 0..100 {
        let n = surface.normal(i).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-4, "vertex {} normal {:?}", i, n);
    }
}

#[test]
fn remount_then_teardown() {
    let mut scene = SceneCore::new(SceneConfig::default()).unwrap();
    for _ in 0..10 {
        scene.tick().unwrap();
    }
    scene.rebuild().unwrap();
    scene.rebuild().unwrap();
    for _ in 0..10 {
        scene.tick().unwrap();
    }
    assert_eq!(scene.constraint_count(), 342);
    assert_eq!(scene.body_count(), 102);

    let report = scene.dispose();
    assert_eq!(report.bodies, 102);
    assert_eq!(report.constraints, 342);
    assert_eq!(scene.physics().body_count(), 0);
    assert_eq!(scene.physics().constraint_count(), 0);
}

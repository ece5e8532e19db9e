use crate::domain::config::SceneConfig;
use crate::domain::error::SceneError;
use crate::systems::cloth::{Cloth, DisposeReport};
use crate::systems::physics::PhysicsWorld;
use crate::systems::props::{AnimatedSphere, Ground};

use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn create_scene_core(config: SceneConfig) -> Result<SceneCore, SceneError> {
    config.validate()?;

    let mut physics = PhysicsWorld::new(config.physics.clone());
    let ground = if config.ground.enabled {
        Some(Ground::spawn(&mut physics, &config.ground)?)
    } else {
        None
    };
    let sphere = if config.sphere.enabled {
        Some(AnimatedSphere::spawn(&mut physics, &config.sphere)?)
    } else {
        None
    };
    let cloth = Cloth::build(config.cloth.clone(), &mut physics)?;

    console_log!(
        "scene created: {}x{} cloth, {} bodies",
        config.cloth.resolution_x,
        config.cloth.resolution_y,
        physics.body_count()
    );

    Ok(SceneCore {
        config,
        physics,
        cloth,
        sphere,
        ground,
        frame: 0,
        disposed: false,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

pub(super) fn rebuild_cloth(scene: &mut SceneCore) -> Result<(), SceneError> {
    if scene.disposed {
        return Err(SceneError::Disposed);
    }
    scene.cloth.dispose(&mut scene.physics);
    scene.cloth = Cloth::build(scene.config.cloth.clone(), &mut scene.physics)?;
    Ok(())
}

pub(super) fn dispose_scene(scene: &mut SceneCore) -> DisposeReport {
    if scene.disposed {
        return DisposeReport::default();
    }
    let mut report = scene.cloth.dispose(&mut scene.physics);
    if let Some(mut sphere) = scene.sphere.take() {
        report.bodies += usize::from(sphere.dispose(&mut scene.physics));
    }
    if let Some(mut ground) = scene.ground.take() {
        report.bodies += usize::from(ground.dispose(&mut scene.physics));
    }
    scene.disposed = true;
    console_log!(
        "scene disposed: {} bodies, {} constraints released",
        report.bodies,
        report.constraints
    );
    report
}

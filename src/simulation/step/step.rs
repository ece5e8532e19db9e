use crate::domain::error::SceneError;
use crate::systems::physics::PhysicsBackend;

use super::{timed, PerfTimer, SceneCore};

pub(super) fn frame(scene: &mut SceneCore, now_ms: Option<f64>) -> Result<(), SceneError> {
    if scene.disposed {
        return Err(SceneError::Disposed);
    }

    let perf_on = scene.perf_enabled;
    if perf_on {
        scene.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // Scripted sphere
    if let (Some(t), Some(sphere)) = (now_ms, scene.sphere.as_ref()) {
        sphere.animate(&mut scene.physics, t)?;
    }

    // Phase 2: no-op on every frame but the first one after binding
    scene.cloth.stitch(&mut scene.physics)?;

    let dt = scene.config.physics.time_step;
    timed(perf_on, &mut scene.perf_stats.physics_ms, || scene.physics.step(dt));

    // Sync only after the tick has resolved every constraint
    let report = timed(perf_on, &mut scene.perf_stats.sync_ms, || {
        scene.cloth.copy_positions(&scene.physics)
    });
    timed(perf_on, &mut scene.perf_stats.normals_ms, || scene.cloth.refresh_normals());

    scene.frame += 1;

    if let Some(t0) = step_start {
        let stats = &mut scene.perf_stats;
        stats.step_ms = t0.elapsed_ms();
        stats.body_count = scene.physics.body_count() as u32;
        stats.constraint_count = scene.physics.constraint_count() as u32;
        stats.synced_vertices = report.synced as u32;
        stats.skipped_vertices = report.skipped as u32;
        stats.tick = scene.physics.tick();
    }

    Ok(())
}

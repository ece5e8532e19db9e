use crate::core::Vec3;

use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn enable_perf_metrics(scene: &mut SceneCore, enabled: bool) {
    scene.perf_enabled = enabled;
    if !enabled {
        scene.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(scene: &SceneCore) -> PerfStats {
    scene.perf_stats.clone()
}

pub(super) fn set_gravity(scene: &mut SceneCore, x: f32, y: f32, z: f32) {
    let gravity = Vec3::new(x, y, z);
    if !gravity.is_finite() {
        console_warn!("ignoring non-finite gravity ({}, {}, {})", x, y, z);
        return;
    }
    scene.physics.set_gravity(gravity);
    scene.config.physics.gravity = gravity.to_array();
}

pub(super) fn set_time_step(scene: &mut SceneCore, dt: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        console_warn!("ignoring time step {}", dt);
        return;
    }
    scene.physics.set_time_step(dt);
    scene.config.physics.time_step = dt;
}

pub(super) fn set_solver_iterations(scene: &mut SceneCore, iterations: usize) {
    let iterations = iterations.max(1);
    scene.physics.set_solver_iterations(iterations);
    scene.config.physics.solver_iterations = iterations;
}

//! Scene - cloth, sphere and ground driven by one physics world
//!
//! Frame order:
//! 1. scripted sphere override
//! 2. readiness gate (the cloth is stitched on the first frame after all
//!    its bodies exist)
//! 3. physics tick
//! 4. cloth sync: positions into the surface, then normals
//!
//! `SceneCore` is the plain Rust orchestrator; `Scene` in facade.rs is the
//! `#[wasm_bindgen]` surface over it.

use crate::core::Vec3;
use crate::domain::config::SceneConfig;
use crate::domain::error::SceneError;
use crate::systems::cloth::{Cloth, DisposeReport};
use crate::systems::physics::PhysicsWorld;
use crate::systems::props::{AnimatedSphere, Ground};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Scene;
pub use perf_stats::PerfStats;

use perf_timer::{timed, PerfTimer};

/// The simulated scene
pub struct SceneCore {
    config: SceneConfig,
    physics: PhysicsWorld,
    cloth: Cloth,
    sphere: Option<AnimatedSphere>,
    ground: Option<Ground>,

    // State
    frame: u64,
    disposed: bool,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SceneCore {
    /// Validate the config, then create the world, props and cloth bodies.
    /// Constraints follow on the first frame.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        init::create_scene_core(config)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Self::new(SceneConfig::from_json(json)?)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn config_json(&self) -> String {
        self.config.to_json()
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }

    pub fn sphere(&self) -> Option<&AnimatedSphere> {
        self.sphere.as_ref()
    }

    pub fn ground(&self) -> Option<&Ground> {
        self.ground.as_ref()
    }

    /// Completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bodies in the physics world (cloth + props)
    pub fn body_count(&self) -> usize {
        self.physics.body_count()
    }

    pub fn cloth_body_count(&self) -> usize {
        self.cloth.body_count()
    }

    pub fn constraint_count(&self) -> usize {
        self.physics.constraint_count()
    }

    /// Live position of a cloth particle
    pub fn particle_position(&self, row: usize, col: usize) -> Option<Vec3> {
        self.cloth.position(&self.physics, row, col)
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        settings::set_gravity(self, x, y, z);
    }

    pub fn set_time_step(&mut self, dt: f32) {
        settings::set_time_step(self, dt);
    }

    pub fn set_solver_iterations(&mut self, iterations: usize) {
        settings::set_solver_iterations(self, iterations);
    }

    /// One frame at host time `now_ms` (drives the sphere)
    pub fn frame(&mut self, now_ms: f64) -> Result<(), SceneError> {
        step::frame(self, Some(now_ms))
    }

    /// One frame without the sphere override (headless runs)
    pub fn tick(&mut self) -> Result<(), SceneError> {
        step::frame(self, None)
    }

    /// Tear the cloth down and build a fresh one (remount). The new cloth
    /// has its own readiness gate and is stitched on the next frame.
    pub fn rebuild(&mut self) -> Result<(), SceneError> {
        init::rebuild_cloth(self)
    }

    /// Release every body and constraint. The scene refuses to step after this.
    pub fn dispose(&mut self) -> DisposeReport {
        init::dispose_scene(self)
    }

    // === Surface buffers (zero-copy views for the host) ===

    pub fn positions_ptr(&self) -> *const f32 {
        render_extract::positions_ptr(self)
    }

    pub fn positions_len(&self) -> usize {
        render_extract::positions_len(self)
    }

    pub fn normals_ptr(&self) -> *const f32 {
        render_extract::normals_ptr(self)
    }

    pub fn normals_len(&self) -> usize {
        render_extract::normals_len(self)
    }

    pub fn indices_ptr(&self) -> *const u32 {
        render_extract::indices_ptr(self)
    }

    pub fn indices_len(&self) -> usize {
        render_extract::indices_len(self)
    }

    /// True once per frame in which the surface changed
    pub fn take_surface_dirty(&mut self) -> bool {
        render_extract::take_surface_dirty(self)
    }

    /// Sphere transform for the host: `[x, y, z, radius]`
    pub fn sphere_transform(&self) -> Option<[f32; 4]> {
        render_extract::sphere_transform(self)
    }

    /// Ground transform for the host: `[x, y, z, rotation_x, size]`
    pub fn ground_transform(&self) -> Option<[f32; 5]> {
        render_extract::ground_transform(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

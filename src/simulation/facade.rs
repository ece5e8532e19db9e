use wasm_bindgen::prelude::*;

use crate::domain::config::SceneConfig;

use super::perf_stats::PerfStats;
use super::SceneCore;

#[wasm_bindgen]
pub struct Scene {
    core: SceneCore,
}

#[wasm_bindgen]
impl Scene {
    /// Build the default scene
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Scene, JsValue> {
        let core = SceneCore::new(SceneConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    /// Build from a (possibly partial) JSON scene description
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: String) -> Result<Scene, JsValue> {
        let core = SceneCore::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> u64 { self.core.frame_count() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn cloth_body_count(&self) -> u32 { self.core.cloth_body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn constraint_count(&self) -> u32 { self.core.constraint_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 { (self.core.positions_len() / 3) as u32 }

    #[wasm_bindgen(getter)]
    pub fn stitched(&self) -> bool { self.core.cloth().is_stitched() }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool { self.core.is_disposed() }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.core.set_gravity(x, y, z);
    }

    pub fn set_time_step(&mut self, dt: f32) {
        self.core.set_time_step(dt);
    }

    pub fn set_solver_iterations(&mut self, iterations: u32) {
        self.core.set_solver_iterations(iterations as usize);
    }

    /// Advance one frame; `now_ms` is the host clock (`performance.now()`)
    pub fn frame(&mut self, now_ms: f64) -> Result<(), JsValue> {
        self.core.frame(now_ms).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance one frame without moving the sphere
    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.core.tick().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn rebuild(&mut self) -> Result<(), JsValue> {
        self.core.rebuild().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.core.config_json()
    }

    // === Surface buffers ===

    pub fn positions_ptr(&self) -> *const f32 {
        self.core.positions_ptr()
    }

    pub fn positions_len(&self) -> u32 {
        self.core.positions_len() as u32
    }

    pub fn normals_ptr(&self) -> *const f32 {
        self.core.normals_ptr()
    }

    pub fn normals_len(&self) -> u32 {
        self.core.normals_len() as u32
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.core.indices_ptr()
    }

    pub fn indices_len(&self) -> u32 {
        self.core.indices_len() as u32
    }

    /// True when the position buffer changed since the last call
    pub fn take_surface_dirty(&mut self) -> bool {
        self.core.take_surface_dirty()
    }

    /// `[x, y, z, radius]`, empty without a sphere
    pub fn sphere_transform(&self) -> Vec<f32> {
        self.core.sphere_transform().map(|t| t.to_vec()).unwrap_or_default()
    }

    /// `[x, y, z, rotation_x, size]`, empty without a ground
    pub fn ground_transform(&self) -> Vec<f32> {
        self.core.ground_transform().map(|t| t.to_vec()).unwrap_or_default()
    }

    /// Live particle position `[x, y, z]`, empty if out of range or unbound
    pub fn particle_position(&self, row: u32, col: u32) -> Vec<f32> {
        self.core
            .particle_position(row as usize, col as usize)
            .map(|p| p.to_array().to_vec())
            .unwrap_or_default()
    }
}

impl Scene {
    pub fn core(&self) -> &SceneCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }
}

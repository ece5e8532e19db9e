use wasm_bindgen::prelude::*;

/// Snapshot of the last frame. All zeros while perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) sync_ms: f64,
    pub(super) normals_ms: f64,
    pub(super) body_count: u32,
    pub(super) constraint_count: u32,
    pub(super) synced_vertices: u32,
    pub(super) skipped_vertices: u32,
    pub(super) tick: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn sync_ms(&self) -> f64 { self.sync_ms }
    #[wasm_bindgen(getter)]
    pub fn normals_ms(&self) -> f64 { self.normals_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn constraint_count(&self) -> u32 { self.constraint_count }
    #[wasm_bindgen(getter)]
    pub fn synced_vertices(&self) -> u32 { self.synced_vertices }
    #[wasm_bindgen(getter)]
    pub fn skipped_vertices(&self) -> u32 { self.skipped_vertices }
    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.tick }
}

//! Drape Engine - cloth simulation for the Drape WebGL scene
//!
//! Architecture:
//! - core/          - logging macros, vector math
//! - domain/        - configuration and errors
//! - systems/       - physics world, render surface, cloth, scene props
//! - simulation/    - per-frame orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Drape engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::Vec3;
pub use domain::{ClothConfig, GroundConfig, PhysicsConfig, SceneConfig, SceneError, SphereConfig};
pub use simulation::{PerfStats, Scene, SceneCore};
pub use systems::cloth::{Cloth, ConstraintKind, SyncReport};
pub use systems::physics::{PhysicsBackend, PhysicsWorld, PositionSource};

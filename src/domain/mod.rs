pub mod config;
pub mod error;

pub use config::{ClothConfig, GroundConfig, PhysicsConfig, SceneConfig, SphereConfig};
pub use error::SceneError;

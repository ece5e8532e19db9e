//! Render-side surface the cloth writes into every frame.

mod mesh;

pub use mesh::{PlaneMesh, SurfaceMesh};

//! Props - the rigid scene objects around the cloth
//!
//! Each registers a single body with the physics world and exposes the
//! transform the host draws it with.

mod ground;
mod sphere;

pub use ground::Ground;
pub use sphere::{sphere_path, AnimatedSphere};

//! Physics System - the rigid-body collaborator behind the cloth
//!
//! The cloth and the scene props talk to it through `PhysicsBackend`;
//! `PhysicsWorld` is the built-in implementation.

mod backend;
mod body;
mod collision;
mod slab;
mod types;
mod update;
mod world;

pub use backend::{PhysicsBackend, PositionSource};
pub use body::Body;
pub use types::{BodyDesc, BodyHandle, ConstraintHandle, Material, Shape};
pub use world::PhysicsWorld;

//! Physics collaborator interface
//!
//! The cloth only talks to the physics engine through these traits, so the
//! built-in `PhysicsWorld` can be swapped for another engine (or a test
//! double) without touching the cloth code.

use crate::core::Vec3;
use crate::domain::error::SceneError;

use super::types::{BodyDesc, BodyHandle, ConstraintHandle};

/// Live position lookup. This is all the frame synchronizer needs.
pub trait PositionSource {
    /// Current simulated position, `None` if the handle does not resolve
    fn position(&self, handle: BodyHandle) -> Option<Vec3>;
}

pub trait PhysicsBackend: PositionSource {
    /// Allocate a body. Mass 0 must produce an immovable body.
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, SceneError>;

    /// Keep `a` and `b` exactly `rest_distance` apart (hard equality).
    fn create_distance_constraint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        rest_distance: f32,
    ) -> Result<ConstraintHandle, SceneError>;

    /// Release a body and every constraint that references it.
    /// Returns false if the handle was already stale.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    fn remove_constraint(&mut self, handle: ConstraintHandle) -> bool;

    /// Kinematic override: move the body and zero its velocity
    fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> Result<(), SceneError>;

    /// Advance all bodies and resolve all constraints by `dt` seconds.
    fn step(&mut self, dt: f32);
}

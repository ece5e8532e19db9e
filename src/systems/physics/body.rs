use crate::core::Vec3;

use super::types::{Material, Shape};

/// Simulated body
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec3,
    /// Position at the start of the current tick
    pub prev_position: Vec3,
    pub velocity: Vec3,
    /// 0 = static
    pub inv_mass: f32,
    pub shape: Shape,
    pub linear_damping: f32,
    pub material: Material,
    pub collision_group: u32,
}

impl Body {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    #[inline]
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => Some(radius),
            Shape::Plane { .. } => None,
        }
    }

    /// Teleport and stop (kinematic override)
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
        self.prev_position = position;
        self.velocity = Vec3::ZERO;
    }
}

/// Hard distance relation between two body slots
#[derive(Clone, Copy, Debug)]
pub(crate) struct DistanceConstraint {
    pub(crate) a: u32,
    pub(crate) b: u32,
    pub(crate) rest: f32,
}

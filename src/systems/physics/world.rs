//! PhysicsWorld - position-based rigid spheres, static planes and hard
//! distance constraints
//!
//! Deliberately small: spheres and planes only, no rotation, no sleeping.
//! Each tick:
//! 1. predict positions from gravity + damped velocity
//! 2. `solver_iterations` passes of distance and contact projection
//! 3. derive velocities from the corrected positions
//! 4. friction / restitution on the contacts found in the last pass

use crate::core::Vec3;
use crate::domain::config::PhysicsConfig;
use crate::domain::error::SceneError;

use super::backend::{PhysicsBackend, PositionSource};
use super::body::{Body, DistanceConstraint};
use super::collision::{self, Contact};
use super::slab::Slab;
use super::types::{BodyDesc, BodyHandle, ConstraintHandle, Shape};
use super::update;

pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Slab<Body>,
    constraints: Slab<DistanceConstraint>,
    tick: u64,

    // Scratch buffers reused across ticks
    all: Vec<u32>,
    planes: Vec<u32>,
    spheres: Vec<u32>,
    pairs: Vec<(u32, u32)>,
    contacts: Vec<Contact>,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: Slab::new(),
            constraints: Slab::new(),
            tick: 0,
            all: Vec::new(),
            planes: Vec::new(),
            spheres: Vec::new(),
            pairs: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity.to_array();
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.config.gravity)
    }

    pub fn set_time_step(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.config.time_step = dt;
        }
    }

    pub fn set_solver_iterations(&mut self, iterations: usize) {
        self.config.solver_iterations = iterations.max(1);
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index, handle.generation)
    }

    pub fn contains_constraint(&self, handle: ConstraintHandle) -> bool {
        self.constraints.get(handle.index, handle.generation).is_some()
    }

    /// Advance one fixed `time_step`
    pub fn step_fixed(&mut self) {
        let dt = self.config.time_step;
        self.step_by(dt);
    }

    fn step_by(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }

        self.all.clear();
        self.planes.clear();
        self.spheres.clear();
        for (i, body) in self.bodies.iter() {
            self.all.push(i);
            match body.shape {
                Shape::Plane { .. } => self.planes.push(i),
                Shape::Sphere { .. } => self.spheres.push(i),
            }
        }

        let gravity = self.gravity();
        update::predict(&mut self.bodies, &self.all, gravity, dt);
        collision::find_pairs(&self.bodies, &self.spheres, dt, &mut self.pairs);

        self.contacts.clear();
        let iterations = self.config.solver_iterations.max(1);
        for pass in 0..iterations {
            update::solve_distances(&mut self.bodies, &self.constraints);
            let record = if pass + 1 == iterations { Some(&mut self.contacts) } else { None };
            collision::resolve(&mut self.bodies, &self.planes, &self.spheres, &self.pairs, record);
        }

        update::update_velocities(&mut self.bodies, &self.all, dt);
        collision::apply_contact_response(&mut self.bodies, &self.contacts);
        self.tick += 1;
    }

    fn resolve(&self, handle: BodyHandle) -> Result<&Body, SceneError> {
        self.body(handle).ok_or(SceneError::InvalidBody { index: handle.index })
    }
}

impl PositionSource for PhysicsWorld {
    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.body(handle).map(|b| b.position)
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, SceneError> {
        if self.bodies.len() >= self.config.max_bodies {
            return Err(SceneError::CapacityExceeded {
                resource: "bodies",
                limit: self.config.max_bodies,
            });
        }
        if !(desc.mass.is_finite() && desc.mass >= 0.0) || !desc.position.is_finite() {
            return Err(SceneError::config("body mass and position must be finite"));
        }

        let inv_mass = match desc.shape {
            Shape::Sphere { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(SceneError::config("sphere radius must be > 0"));
                }
                if desc.mass > 0.0 { 1.0 / desc.mass } else { 0.0 }
            }
            Shape::Plane { normal } => {
                if normal.normalize() == Vec3::ZERO {
                    return Err(SceneError::config("plane normal must be non-zero"));
                }
                0.0
            }
        };
        let shape = match desc.shape {
            Shape::Plane { normal } => Shape::Plane { normal: normal.normalize() },
            sphere => sphere,
        };

        let (index, generation) = self.bodies.insert(Body {
            position: desc.position,
            prev_position: desc.position,
            velocity: Vec3::ZERO,
            inv_mass,
            shape,
            linear_damping: desc.linear_damping.clamp(0.0, 1.0),
            material: desc.material,
            collision_group: desc.collision_group,
        });
        Ok(BodyHandle { index, generation })
    }

    fn create_distance_constraint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        rest_distance: f32,
    ) -> Result<ConstraintHandle, SceneError> {
        if a == b {
            return Err(SceneError::InvalidConstraint { reason: "endpoints must be distinct bodies" });
        }
        if !(rest_distance.is_finite() && rest_distance >= 0.0) {
            return Err(SceneError::InvalidConstraint { reason: "rest distance must be finite and >= 0" });
        }
        self.resolve(a)?;
        self.resolve(b)?;
        if self.constraints.len() >= self.config.max_constraints {
            return Err(SceneError::CapacityExceeded {
                resource: "constraints",
                limit: self.config.max_constraints,
            });
        }

        let (index, generation) = self.constraints.insert(DistanceConstraint {
            a: a.index,
            b: b.index,
            rest: rest_distance,
        });
        Ok(ConstraintHandle { index, generation })
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        if self.bodies.remove(handle.index, handle.generation).is_none() {
            return false;
        }
        let index = handle.index;
        self.constraints.retain(|c| c.a != index && c.b != index);
        true
    }

    fn remove_constraint(&mut self, handle: ConstraintHandle) -> bool {
        self.constraints.remove(handle.index, handle.generation).is_some()
    }

    /// Teleport; velocity is zeroed
    fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> Result<(), SceneError> {
        if !position.is_finite() {
            return Err(SceneError::config("body position must be finite"));
        }
        let body = self
            .bodies
            .get_mut(handle.index, handle.generation)
            .ok_or(SceneError::InvalidBody { index: handle.index })?;
        body.place(position);
        Ok(())
    }

    fn step(&mut self, dt: f32) {
        self.step_by(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig::default())
    }

    #[test]
    fn zero_mass_body_never_moves() {
        let mut w = world();
        let pin = w.create_body(&BodyDesc::sphere(0.0, 0.02, Vec3::new(1.0, 2.0, 3.0))).unwrap();
        for _ in 0..120 {
            w.step_fixed();
        }
        assert_eq!(w.position(pin), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn dynamic_body_falls() {
        let mut w = world();
        let ball = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        for _ in 0..30 {
            w.step_fixed();
        }
        assert!(w.position(ball).unwrap().y < -0.5);
    }

    #[test]
    fn sphere_comes_to_rest_on_plane() {
        let mut w = world();
        w.create_body(&BodyDesc::plane(Vec3::UNIT_Y, Vec3::new(0.0, -2.0, 0.0))).unwrap();
        let ball = w
            .create_body(&BodyDesc::sphere(100.0, 0.25, Vec3::new(0.0, 3.0, 0.0)).with_material(0.1, 0.6))
            .unwrap();
        for _ in 0..600 {
            w.step_fixed();
        }
        let y = w.position(ball).unwrap().y;
        assert!((y - (-1.75)).abs() < 0.01, "y = {}", y);
    }

    #[test]
    fn pendulum_keeps_its_length() {
        let mut w = world();
        let anchor = w.create_body(&BodyDesc::sphere(0.0, 0.02, Vec3::ZERO)).unwrap();
        let bob = w.create_body(&BodyDesc::sphere(0.1, 0.02, Vec3::new(0.5, 0.0, 0.0))).unwrap();
        w.create_distance_constraint(anchor, bob, 0.5).unwrap();
        for _ in 0..240 {
            w.step_fixed();
        }
        let len = w.position(bob).unwrap().distance(Vec3::ZERO);
        assert!((len - 0.5).abs() < 1e-3, "len = {}", len);
    }

    #[test]
    fn removed_handles_are_stale() {
        let mut w = world();
        let a = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        let b = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::UNIT_Y)).unwrap();
        let c = w.create_distance_constraint(a, b, 1.0).unwrap();

        assert!(w.remove_body(a));
        assert!(!w.remove_body(a));
        assert_eq!(w.position(a), None);
        // Constraint went with the body
        assert!(!w.contains_constraint(c));
        assert_eq!(w.constraint_count(), 0);

        let reused = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        assert_eq!(reused.index(), a.index());
        assert_eq!(w.position(a), None);
    }

    #[test]
    fn constraint_endpoints_are_validated() {
        let mut w = world();
        let a = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        assert!(matches!(
            w.create_distance_constraint(a, a, 1.0),
            Err(SceneError::InvalidConstraint { .. })
        ));
        let b = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::UNIT_Y)).unwrap();
        w.remove_body(b);
        assert!(matches!(
            w.create_distance_constraint(a, b, 1.0),
            Err(SceneError::InvalidBody { .. })
        ));
    }

    #[test]
    fn body_capacity_is_enforced() {
        let mut config = PhysicsConfig::default();
        config.max_bodies = 2;
        let mut w = PhysicsWorld::new(config);
        w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        assert_eq!(
            w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)),
            Err(SceneError::CapacityExceeded { resource: "bodies", limit: 2 })
        );
    }

    #[test]
    fn same_group_spheres_pass_through_each_other() {
        let mut w = world();
        w.set_gravity(Vec3::ZERO);
        let a = w
            .create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO).with_collision_group(1))
            .unwrap();
        let b = w
            .create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::new(0.05, 0.0, 0.0)).with_collision_group(1))
            .unwrap();
        w.step_fixed();
        assert_eq!(w.position(a), Some(Vec3::ZERO));
        assert_eq!(w.position(b), Some(Vec3::new(0.05, 0.0, 0.0)));
    }

    #[test]
    fn overlapping_spheres_are_separated() {
        let mut w = world();
        w.set_gravity(Vec3::ZERO);
        let a = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::ZERO)).unwrap();
        let b = w.create_body(&BodyDesc::sphere(1.0, 0.1, Vec3::new(0.1, 0.0, 0.0))).unwrap();
        w.step_fixed();
        let gap = w.position(b).unwrap().distance(w.position(a).unwrap());
        assert!(gap >= 0.2 - 1e-4, "gap = {}", gap);
    }
}

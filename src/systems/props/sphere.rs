use crate::core::Vec3;
use crate::domain::config::SphereConfig;
use crate::domain::error::SceneError;
use crate::systems::physics::{BodyDesc, BodyHandle, PhysicsBackend, PositionSource};

/// Scripted orbit of the sphere at `t_ms` milliseconds
#[inline]
pub fn sphere_path(t_ms: f64) -> Vec3 {
    Vec3::new(
        ((t_ms / 1000.0).sin() * 2.0) as f32,
        (3.0 + (t_ms / 800.0).sin() * 0.001) as f32,
        (-0.5 + (t_ms / 1000.0).cos() * 1.2) as f32,
    )
}

/// Dynamic sphere whose position is overridden every frame
pub struct AnimatedSphere {
    handle: Option<BodyHandle>,
    radius: f32,
}

impl AnimatedSphere {
    /// Register the body at the start of its path
    pub fn spawn<P: PhysicsBackend + ?Sized>(physics: &mut P, config: &SphereConfig) -> Result<Self, SceneError> {
        let desc = BodyDesc::sphere(config.mass, config.radius, sphere_path(0.0))
            .with_material(config.friction, config.restitution);
        let handle = physics.create_body(&desc)?;
        Ok(Self { handle: Some(handle), radius: config.radius })
    }

    /// Move onto the path point for `t_ms`
    pub fn animate<P: PhysicsBackend + ?Sized>(&self, physics: &mut P, t_ms: f64) -> Result<(), SceneError> {
        match self.handle {
            Some(handle) => physics.set_position(handle, sphere_path(t_ms)),
            None => Err(SceneError::Disposed),
        }
    }

    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position<S: PositionSource + ?Sized>(&self, source: &S) -> Option<Vec3> {
        source.position(self.handle?)
    }

    pub fn dispose<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> bool {
        self.handle.take().map_or(false, |h| physics.remove_body(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::PhysicsConfig;
    use crate::systems::physics::PhysicsWorld;

    #[test]
    fn path_starts_above_the_cloth() {
        let p = sphere_path(0.0);
        assert_eq!(p, Vec3::new(0.0, 3.0, 0.7));
    }

    #[test]
    fn path_matches_closed_form() {
        let t = 2500.0_f64;
        let p = sphere_path(t);
        assert!((p.x as f64 - (2.5f64).sin() * 2.0).abs() < 1e-5);
        assert!((p.y as f64 - (3.0 + (t / 800.0).sin() * 0.001)).abs() < 1e-5);
        assert!((p.z as f64 - (-0.5 + (2.5f64).cos() * 1.2)).abs() < 1e-5);
    }

    #[test]
    fn animate_overrides_simulated_position() {
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        let sphere = AnimatedSphere::spawn(&mut physics, &SphereConfig::default()).unwrap();
        let body = physics.body(sphere.handle().unwrap()).unwrap();
        assert!((body.inv_mass - 0.01).abs() < 1e-6);

        physics.step_fixed();
        sphere.animate(&mut physics, 1000.0).unwrap();
        assert_eq!(sphere.position(&physics), Some(sphere_path(1000.0)));
    }

    #[test]
    fn disposed_sphere_cannot_animate() {
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        let mut sphere = AnimatedSphere::spawn(&mut physics, &SphereConfig::default()).unwrap();
        assert!(sphere.dispose(&mut physics));
        assert!(!sphere.dispose(&mut physics));
        assert_eq!(physics.body_count(), 0);
        assert_eq!(sphere.animate(&mut physics, 0.0), Err(SceneError::Disposed));
    }
}

use crate::core::Vec3;
use crate::domain::config::GroundConfig;
use crate::domain::error::SceneError;
use crate::systems::physics::{BodyDesc, BodyHandle, PhysicsBackend};

/// Static ground plane. Its normal is the plane's local +Z turned by
/// `rotation_x` about X.
pub struct Ground {
    handle: Option<BodyHandle>,
    position: Vec3,
    normal: Vec3,
    rotation_x: f32,
    size: f32,
}

impl Ground {
    pub fn spawn<P: PhysicsBackend + ?Sized>(physics: &mut P, config: &GroundConfig) -> Result<Self, SceneError> {
        let position = Vec3::from_array(config.position);
        let normal = Vec3::UNIT_Z.rotate_x(config.rotation_x).normalize();
        let desc = BodyDesc::plane(normal, position).with_material(config.friction, config.restitution);
        let handle = physics.create_body(&desc)?;
        Ok(Self {
            handle: Some(handle),
            position,
            normal,
            rotation_x: config.rotation_x,
            size: config.size,
        })
    }

    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn dispose<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> bool {
        self.handle.take().map_or(false, |h| physics.remove_body(h))
    }
}

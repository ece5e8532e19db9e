use crate::core::Vec3;

/// Opaque reference to a body in the physics world.
///
/// Generational: once the body is removed the handle never resolves again,
/// even if its slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl BodyHandle {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Opaque reference to a distance constraint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ConstraintHandle {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Collision shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Infinite plane through the body position; always static
    Plane { normal: Vec3 },
}

/// Surface material. Contact coefficients are the product of both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self { friction: 0.3, restitution: 0.0 }
    }
}

/// Body creation request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    /// 0 = immovable
    pub mass: f32,
    pub shape: Shape,
    pub position: Vec3,
    pub linear_damping: f32,
    pub material: Material,
    /// Bodies sharing a non-zero group never collide with each other
    pub collision_group: u32,
}

impl BodyDesc {
    pub fn sphere(mass: f32, radius: f32, position: Vec3) -> Self {
        Self {
            mass,
            shape: Shape::Sphere { radius },
            position,
            linear_damping: 0.01,
            material: Material::default(),
            collision_group: 0,
        }
    }

    pub fn plane(normal: Vec3, position: Vec3) -> Self {
        Self {
            mass: 0.0,
            shape: Shape::Plane { normal },
            position,
            linear_damping: 0.0,
            material: Material::default(),
            collision_group: 0,
        }
    }

    pub fn with_material(mut self, friction: f32, restitution: f32) -> Self {
        self.material = Material { friction, restitution };
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_collision_group(mut self, group: u32) -> Self {
        self.collision_group = group;
        self
    }
}

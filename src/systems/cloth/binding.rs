//! Particle-physics binding: one renderless proxy body per grid cell

use crate::core::Vec3;
use crate::domain::config::ClothConfig;
use crate::domain::error::SceneError;
use crate::systems::physics::{BodyDesc, BodyHandle, PhysicsBackend};

use super::topology::{GridTopology, ParticleSpec};

/// Cloth proxies never collide with each other
pub const CLOTH_COLLISION_GROUP: u32 = 1;

/// A grid cell paired with its body, once it exists
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleBinding {
    pub row: usize,
    pub col: usize,
    handle: Option<BodyHandle>,
}

impl ParticleBinding {
    #[inline]
    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }
}

/// Body request for a particle: mass from the pin policy, position offset by
/// the grid origin
pub fn particle_body_desc(spec: &ParticleSpec, config: &ClothConfig) -> BodyDesc {
    let origin = Vec3::from_array(config.origin);
    BodyDesc::sphere(spec.mass, config.particle_radius, spec.rest_position + origin)
        .with_linear_damping(config.linear_damping)
        .with_material(config.friction, config.restitution)
        .with_collision_group(CLOTH_COLLISION_GROUP)
}

/// Per-cell binding records, held in grid order.
///
/// Constraints refer to cells by index into this grid, never by handle.
#[derive(Clone, Debug)]
pub struct BindingGrid {
    resolution_x: usize,
    resolution_y: usize,
    cells: Vec<ParticleBinding>,
    ready: usize,
}

impl BindingGrid {
    pub fn new(resolution_x: usize, resolution_y: usize) -> Self {
        let mut cells = Vec::with_capacity(resolution_x * resolution_y);
        for row in 0..resolution_y {
            for col in 0..resolution_x {
                cells.push(ParticleBinding { row, col, handle: None });
            }
        }
        Self { resolution_x, resolution_y, cells, ready: 0 }
    }

    pub fn resolution_x(&self) -> usize { self.resolution_x }

    pub fn resolution_y(&self) -> usize { self.resolution_y }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.resolution_x + col
    }

    pub fn cells(&self) -> &[ParticleBinding] {
        &self.cells
    }

    pub fn handle(&self, row: usize, col: usize) -> Option<BodyHandle> {
        if row >= self.resolution_y || col >= self.resolution_x {
            return None;
        }
        self.handle_at(self.index(row, col))
    }

    #[inline]
    pub fn handle_at(&self, index: usize) -> Option<BodyHandle> {
        self.cells.get(index).and_then(|c| c.handle)
    }

    pub fn ready_count(&self) -> usize {
        self.ready
    }

    /// Every cell has a body
    pub fn all_ready(&self) -> bool {
        !self.cells.is_empty() && self.ready == self.cells.len()
    }

    /// Create the body for one cell. A cell that already has a body keeps
    /// it; handles are never reassigned.
    pub fn bind_cell<P: PhysicsBackend + ?Sized>(
        &mut self,
        physics: &mut P,
        spec: &ParticleSpec,
        config: &ClothConfig,
    ) -> Result<BodyHandle, SceneError> {
        let index = self.index(spec.row, spec.col);
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| SceneError::config(format!("cell ({}, {}) outside the grid", spec.row, spec.col)))?;
        if let Some(handle) = cell.handle {
            return Ok(handle);
        }

        let handle = physics.create_body(&particle_body_desc(spec, config))?;
        cell.handle = Some(handle);
        self.ready += 1;
        Ok(handle)
    }

    /// Bind every cell in grid order. The first allocation failure aborts.
    pub fn bind_all<P: PhysicsBackend + ?Sized>(
        &mut self,
        physics: &mut P,
        topology: &GridTopology,
        config: &ClothConfig,
    ) -> Result<usize, SceneError> {
        let before = self.ready;
        for spec in topology.particles() {
            self.bind_cell(physics, spec, config)?;
        }
        Ok(self.ready - before)
    }

    /// Remove every body from the physics world. Returns how many were live.
    pub fn release<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> usize {
        let mut released = 0;
        for cell in self.cells.iter_mut() {
            if let Some(handle) = cell.handle.take() {
                if physics.remove_body(handle) {
                    released += 1;
                }
            }
        }
        self.ready = 0;
        released
    }
}

//! Cloth - particle grid bound to physics bodies, stitched by distance
//! constraints, mirrored into a renderable surface every tick
//!
//! Lifecycle:
//! 1. `Cloth::new` validates the config and lays out the grid (no bodies)
//! 2. `bind_particles` creates one proxy body per cell
//! 3. `stitch` creates the constraints once every cell is bound; it is
//!    guarded by a one-shot gate so repeated calls are harmless
//! 4. `sync` copies positions into the surface after each physics tick
//! 5. `dispose` releases every constraint and body
//!
//! A stitch that fails part way releases everything and leaves the cloth
//! failed: every later `stitch` returns the same error and `sync` is a no-op.

mod binding;
mod constraints;
mod sync;
mod topology;

pub use binding::{particle_body_desc, BindingGrid, ParticleBinding, CLOTH_COLLISION_GROUP};
pub use constraints::{
    enumerate_constraints, ClothConstraint, ConstraintCounts, ConstraintGraph, ConstraintKind,
    ConstraintSpec, ReadinessGate,
};
pub use sync::{copy_positions, sync_surface, SyncReport};
pub use topology::{is_pinned, GridTopology, ParticleSpec};

use crate::core::Vec3;
use crate::domain::config::ClothConfig;
use crate::domain::error::SceneError;
use crate::systems::physics::{BodyHandle, PhysicsBackend, PositionSource};
use crate::systems::render::{PlaneMesh, SurfaceMesh};

/// What `dispose` handed back to the physics world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisposeReport {
    pub bodies: usize,
    pub constraints: usize,
}

/// Read-only view of one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClothParticle {
    pub spec: ParticleSpec,
    pub handle: Option<BodyHandle>,
}

pub struct Cloth {
    config: ClothConfig,
    topology: GridTopology,
    bindings: BindingGrid,
    graph: ConstraintGraph,
    surface: PlaneMesh,
    last_sync: SyncReport,
    failure: Option<SceneError>,
    disposed: bool,
}

impl Cloth {
    /// Lay out the grid and its surface. No body is created yet.
    pub fn new(config: ClothConfig) -> Result<Self, SceneError> {
        let topology = GridTopology::build(&config)?;
        let (rx, ry) = (topology.resolution_x(), topology.resolution_y());
        let surface = PlaneMesh::new(config.width, config.height, rx - 1, ry - 1);

        Ok(Self {
            bindings: BindingGrid::new(rx, ry),
            graph: ConstraintGraph::new(),
            surface,
            topology,
            config,
            last_sync: SyncReport::default(),
            failure: None,
            disposed: false,
        })
    }

    /// `new` followed by `bind_particles`
    pub fn build<P: PhysicsBackend + ?Sized>(config: ClothConfig, physics: &mut P) -> Result<Self, SceneError> {
        let mut cloth = Self::new(config)?;
        cloth.bind_particles(physics)?;
        Ok(cloth)
    }

    fn ensure_live(&self) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn is_live(&self) -> bool {
        !self.disposed && self.failure.is_none()
    }

    /// Create the proxy body of every cell that does not have one yet
    pub fn bind_particles<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> Result<usize, SceneError> {
        self.ensure_live()?;
        let created = self.bindings.bind_all(physics, &self.topology, &self.config)?;
        if created > 0 {
            console_log!(
                "cloth bound: {} bodies ({} pinned)",
                self.bindings.ready_count(),
                self.topology.pinned_count()
            );
        }
        Ok(created)
    }

    /// Bind a single cell (incremental setup)
    pub fn bind_particle<P: PhysicsBackend + ?Sized>(
        &mut self,
        physics: &mut P,
        row: usize,
        col: usize,
    ) -> Result<BodyHandle, SceneError> {
        self.ensure_live()?;
        let spec = *self
            .topology
            .get(row, col)
            .ok_or_else(|| SceneError::config(format!("cell ({row}, {col}) outside the grid")))?;
        self.bindings.bind_cell(physics, &spec, &self.config)
    }

    /// Create the constraint graph once every cell has a body.
    ///
    /// Safe to call every frame: only the first call after the grid becomes
    /// ready creates anything. If that call fails, the bodies are released too
    /// and the error is returned again on every later call.
    pub fn stitch<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> Result<usize, SceneError> {
        self.ensure_live()?;
        let stitched = self.graph.stitch(
            physics,
            &self.bindings,
            self.topology.spacing_x(),
            self.topology.spacing_y(),
        );
        if let Err(e) = &stitched {
            let bodies = self.bindings.release(physics);
            console_warn!("cloth failed, {} bodies released: {}", bodies, e);
            self.failure = Some(e.clone());
        }
        stitched
    }

    /// Copy live positions into the surface, flag it and rebuild normals.
    /// Call after the physics tick.
    pub fn sync<S: PositionSource + ?Sized>(&mut self, source: &S) -> SyncReport {
        if !self.is_live() {
            return SyncReport::default();
        }
        self.last_sync = sync_surface(&self.bindings, source, &mut self.surface);
        self.last_sync
    }

    /// First half of `sync`: copy and flag, normals untouched
    pub fn copy_positions<S: PositionSource + ?Sized>(&mut self, source: &S) -> SyncReport {
        if !self.is_live() {
            return SyncReport::default();
        }
        self.last_sync = copy_positions(&self.bindings, source, self.surface.positions_mut());
        self.surface.mark_positions_dirty();
        self.last_sync
    }

    /// Second half of `sync`
    pub fn refresh_normals(&mut self) {
        if self.is_live() {
            self.surface.compute_vertex_normals();
        }
    }

    /// Release every constraint, then every body. Idempotent.
    pub fn dispose<P: PhysicsBackend + ?Sized>(&mut self, physics: &mut P) -> DisposeReport {
        if self.disposed {
            return DisposeReport::default();
        }
        let constraints = self.graph.release(physics);
        let bodies = self.bindings.release(physics);
        self.disposed = true;
        console_log!("cloth disposed: {} bodies, {} constraints released", bodies, constraints);
        DisposeReport { bodies, constraints }
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn bindings(&self) -> &BindingGrid {
        &self.bindings
    }

    pub fn constraints(&self) -> &[ClothConstraint] {
        self.graph.constraints()
    }

    pub fn constraint_counts(&self) -> ConstraintCounts {
        self.graph.counts()
    }

    pub fn constraint_count_by_kind(&self, kind: ConstraintKind) -> usize {
        self.constraints().iter().filter(|c| c.spec.kind == kind).count()
    }

    pub fn surface(&self) -> &PlaneMesh {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PlaneMesh {
        &mut self.surface
    }

    pub fn particle_count(&self) -> usize {
        self.topology.len()
    }

    pub fn pinned_count(&self) -> usize {
        self.topology.pinned_count()
    }

    /// Bodies currently held in the physics world
    pub fn body_count(&self) -> usize {
        self.bindings.ready_count()
    }

    pub fn is_ready(&self) -> bool {
        self.bindings.all_ready()
    }

    pub fn is_stitched(&self) -> bool {
        self.failure.is_none() && self.graph.gate().is_open()
    }

    /// The error a failed stitch left behind
    pub fn failure(&self) -> Option<&SceneError> {
        self.failure.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn last_sync(&self) -> SyncReport {
        self.last_sync
    }

    pub fn particle(&self, row: usize, col: usize) -> Option<ClothParticle> {
        let spec = *self.topology.get(row, col)?;
        Some(ClothParticle { spec, handle: self.bindings.handle(row, col) })
    }

    /// World-space rest position (rest + origin)
    pub fn rest_position(&self, row: usize, col: usize) -> Option<Vec3> {
        let spec = self.topology.get(row, col)?;
        Some(spec.rest_position + Vec3::from_array(self.config.origin))
    }

    /// Live position of a cell, if bound
    pub fn position<S: PositionSource + ?Sized>(&self, source: &S, row: usize, col: usize) -> Option<Vec3> {
        source.position(self.bindings.handle(row, col)?)
    }
}

#[cfg(test)]
#[path = "tests/mock.rs"]
pub(crate) mod mock;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

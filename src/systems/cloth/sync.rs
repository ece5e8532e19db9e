//! Frame synchronizer: live particle positions -> surface vertex buffer
//!
//! Runs after the physics tick. Cells without a body (or whose body no
//! longer resolves) are skipped and keep last frame's vertex.

use crate::systems::physics::PositionSource;
use crate::systems::render::SurfaceMesh;

use super::binding::BindingGrid;

/// Outcome of one copy pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    pub skipped: usize,
}

/// Copy every ready cell's position into `buffer` at `(row * resolution_x + col) * 3`
pub fn copy_positions<S: PositionSource + ?Sized>(
    bindings: &BindingGrid,
    source: &S,
    buffer: &mut [f32],
) -> SyncReport {
    let mut report = SyncReport::default();

    for (index, cell) in bindings.cells().iter().enumerate() {
        let base = index * 3;
        let position = cell.handle().and_then(|h| source.position(h));
        match (position, buffer.get_mut(base..base + 3)) {
            (Some(p), Some(dst)) => {
                dst[0] = p.x;
                dst[1] = p.y;
                dst[2] = p.z;
                report.synced += 1;
            }
            _ => report.skipped += 1,
        }
    }

    report
}

/// Full per-tick pass: copy, flag for upload, rebuild normals.
///
/// Normals are recomputed after the whole grid is written, never per vertex.
pub fn sync_surface<S, M>(bindings: &BindingGrid, source: &S, mesh: &mut M) -> SyncReport
where
    S: PositionSource + ?Sized,
    M: SurfaceMesh + ?Sized,
{
    let report = copy_positions(bindings, source, mesh.positions_mut());
    mesh.mark_positions_dirty();
    mesh.compute_vertex_normals();
    report
}

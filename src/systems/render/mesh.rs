//! PlaneMesh - indexed plane geometry backing the cloth surface
//!
//! Layout matches a standard plane geometry: `(segments_x + 1) * (segments_y + 1)`
//! vertices, row-major starting at the top-left corner, two triangles per
//! quad. Buffers are flat `f32`/`u32` arrays so the host can view them
//! directly in wasm memory.

use crate::core::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What the frame synchronizer needs from the render side
pub trait SurfaceMesh {
    fn vertex_count(&self) -> usize;

    /// Flat xyz position buffer, index-aligned with the cloth grid
    fn positions_mut(&mut self) -> &mut [f32];

    /// Flag the position buffer for re-upload
    fn mark_positions_dirty(&mut self);

    /// Rebuild per-vertex normals from the current positions
    fn compute_vertex_normals(&mut self);
}

pub struct PlaneMesh {
    width: f32,
    height: f32,
    segments_x: usize,
    segments_y: usize,
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    needs_update: bool,
    /// Bumped on every position upload request
    version: u32,
}

impl PlaneMesh {
    pub fn new(width: f32, height: f32, segments_x: usize, segments_y: usize) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);
        let cols = segments_x + 1;
        let rows = segments_y + 1;
        let segment_w = width / segments_x as f32;
        let segment_h = height / segments_y as f32;

        let mut positions = Vec::with_capacity(cols * rows * 3);
        let mut normals = Vec::with_capacity(cols * rows * 3);
        for iy in 0..rows {
            let y = iy as f32 * segment_h - height / 2.0;
            for ix in 0..cols {
                let x = ix as f32 * segment_w - width / 2.0;
                positions.extend_from_slice(&[x, -y, 0.0]);
                normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            }
        }

        let mut indices = Vec::with_capacity(segments_x * segments_y * 6);
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let a = (ix + cols * iy) as u32;
                let b = (ix + cols * (iy + 1)) as u32;
                let c = (ix + 1 + cols * (iy + 1)) as u32;
                let d = (ix + 1 + cols * iy) as u32;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            segments_x,
            segments_y,
            positions,
            normals,
            indices,
            needs_update: false,
            version: 0,
        }
    }

    pub fn width(&self) -> f32 { self.width }

    pub fn height(&self) -> f32 { self.height }

    pub fn segments(&self) -> (usize, usize) {
        (self.segments_x, self.segments_y)
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Vec3::new(p[0], p[1], p[2]))
    }

    pub fn normal(&self, index: usize) -> Option<Vec3> {
        let n = self.normals.get(index * 3..index * 3 + 3)?;
        Some(Vec3::new(n[0], n[1], n[2]))
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Read and clear the upload flag (host side)
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::replace(&mut self.needs_update, false)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn normals_ptr(&self) -> *const f32 {
        self.normals.as_ptr()
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }

    fn reset_normals(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.normals.par_iter_mut().for_each(|v| *v = 0.0);
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.normals.fill(0.0);
        }
    }

    fn normalize_normals(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.normals.par_chunks_mut(3).for_each(normalize_in_place);
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.normals.chunks_mut(3).for_each(normalize_in_place);
        }
    }
}

/// Degenerate (zero-area) neighbourhoods fall back to +Z
fn normalize_in_place(n: &mut [f32]) {
    let v = Vec3::new(n[0], n[1], n[2]).normalize();
    let v = if v == Vec3::ZERO { Vec3::UNIT_Z } else { v };
    n.copy_from_slice(&v.to_array());
}

impl SurfaceMesh for PlaneMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    fn mark_positions_dirty(&mut self) {
        self.needs_update = true;
        self.version = self.version.wrapping_add(1);
    }

    /// Area-weighted: each face adds its unnormalized cross product to its
    /// three vertices, then every vertex normal is normalized.
    fn compute_vertex_normals(&mut self) {
        self.reset_normals();

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(pa), Some(pb), Some(pc)) = (self.vertex(ia), self.vertex(ib), self.vertex(ic)) else {
                continue;
            };
            let face = (pc - pb).cross(pa - pb);
            for i in [ia, ib, ic] {
                self.normals[i * 3] += face.x;
                self.normals[i * 3 + 1] += face.y;
                self.normals[i * 3 + 2] += face.z;
            }
        }

        self.normalize_normals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_layout_starts_top_left() {
        let mesh = PlaneMesh::new(3.0, 3.0, 9, 9);
        assert_eq!(mesh.vertex_count(), 100);
        assert_eq!(mesh.triangle_count(), 9 * 9 * 2);
        assert_eq!(mesh.vertex(0), Some(Vec3::new(-1.5, 1.5, 0.0)));
        let last = mesh.vertex(99).unwrap();
        assert!((last.x - 1.5).abs() < 1e-6 && (last.y + 1.5).abs() < 1e-6);
    }

    #[test]
    fn flat_plane_normals_face_plus_z() {
        let mut mesh = PlaneMesh::new(2.0, 2.0, 2, 2);
        mesh.compute_vertex_normals();
        for i in 0..mesh.vertex_count() {
            let n = mesh.normal(i).unwrap();
            assert!((n.z - 1.0).abs() < 1e-6, "vertex {} normal {:?}", i, n);
        }
    }

    #[test]
    fn tilted_plane_normals_follow_the_surface() {
        let mut mesh = PlaneMesh::new(2.0, 2.0, 1, 1);
        // Lay the quad into the XZ plane: y -> -z
        for v in mesh.positions_mut().chunks_mut(3) {
            v[2] = -v[1];
            v[1] = 0.0;
        }
        mesh.compute_vertex_normals();
        let n = mesh.normal(0).unwrap();
        assert!((n.y.abs() - 1.0).abs() < 1e-6, "normal {:?}", n);
    }

    #[test]
    fn collapsed_geometry_falls_back_to_plus_z() {
        let mut mesh = PlaneMesh::new(2.0, 2.0, 1, 1);
        mesh.positions_mut().fill(0.0);
        mesh.compute_vertex_normals();
        assert_eq!(mesh.normal(3), Some(Vec3::UNIT_Z));
    }

    #[test]
    fn dirty_flag_is_consumed_once() {
        let mut mesh = PlaneMesh::new(1.0, 1.0, 1, 1);
        assert!(!mesh.needs_update());
        mesh.mark_positions_dirty();
        assert!(mesh.take_needs_update());
        assert!(!mesh.take_needs_update());
        assert_eq!(mesh.version(), 1);
    }
}

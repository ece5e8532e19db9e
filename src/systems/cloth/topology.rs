//! Grid topology: particle count, rest positions and pin policy

use crate::core::Vec3;
use crate::domain::config::ClothConfig;
use crate::domain::error::SceneError;

/// One mass point of the cloth, before it has a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub row: usize,
    pub col: usize,
    /// Relative to the grid origin
    pub rest_position: Vec3,
    /// 0 = pinned
    pub mass: f32,
}

impl ParticleSpec {
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.mass == 0.0
    }
}

/// Top-row anchors: the `pinned_columns` leftmost and rightmost particles.
///
/// `col + pinned_columns + 1 > resolution_x` is `col > resolution_x - 3` for
/// the default of 2, without underflow on narrow grids.
#[inline]
pub fn is_pinned(row: usize, col: usize, resolution_x: usize, pinned_columns: usize) -> bool {
    row == 0 && (col < pinned_columns || col + pinned_columns + 1 > resolution_x)
}

/// `resolution_y x resolution_x` matrix of particle specs, row-major
#[derive(Clone, Debug)]
pub struct GridTopology {
    width: f32,
    height: f32,
    resolution_x: usize,
    resolution_y: usize,
    particles: Vec<ParticleSpec>,
}

impl GridTopology {
    pub fn build(config: &ClothConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let (rx, ry) = (config.resolution_x, config.resolution_y);
        if rx <= config.pinned_columns * 2 {
            console_warn!(
                "cloth resolution_x={} with {} pinned columns pins the whole top row",
                rx,
                config.pinned_columns
            );
        }

        let (w, h) = (config.width, config.height);
        let mut particles = Vec::with_capacity(rx * ry);
        for row in 0..ry {
            for col in 0..rx {
                let rest_position = Vec3::new(
                    (col as f32 * w) / rx as f32 - w / 2.0,
                    -(row as f32 * h) / ry as f32 + h / 2.0,
                    0.0,
                );
                let mass = if is_pinned(row, col, rx, config.pinned_columns) {
                    0.0
                } else {
                    config.particle_mass
                };
                particles.push(ParticleSpec { row, col, rest_position, mass });
            }
        }

        Ok(Self {
            width: w,
            height: h,
            resolution_x: rx,
            resolution_y: ry,
            particles,
        })
    }

    pub fn width(&self) -> f32 { self.width }

    pub fn height(&self) -> f32 { self.height }

    pub fn resolution_x(&self) -> usize { self.resolution_x }

    pub fn resolution_y(&self) -> usize { self.resolution_y }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Horizontal rest distance
    pub fn spacing_x(&self) -> f32 {
        self.width / self.resolution_x as f32
    }

    /// Vertical rest distance
    pub fn spacing_y(&self) -> f32 {
        self.height / self.resolution_y as f32
    }

    /// Shear rest distance
    pub fn spacing_diagonal(&self) -> f32 {
        let (sx, sy) = (self.spacing_x(), self.spacing_y());
        (sx * sx + sy * sy).sqrt()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.resolution_x + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&ParticleSpec> {
        if row >= self.resolution_y || col >= self.resolution_x {
            return None;
        }
        self.particles.get(self.index(row, col))
    }

    pub fn particles(&self) -> &[ParticleSpec] {
        &self.particles
    }

    pub fn pinned_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_pinned()).count()
    }
}

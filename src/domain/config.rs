//! Scene configuration
//!
//! All state is rebuilt from this on every run. The host page may hand over a
//! JSON document; every field has a default, so `{}` is a complete scene and a
//! partial document only overrides what it names.

use serde::{Deserialize, Serialize};

use super::error::SceneError;

/// Cloth grid and per-particle body parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// World-space width of the grid
    pub width: f32,
    /// World-space height of the grid
    pub height: f32,
    /// Particles per row
    pub resolution_x: usize,
    /// Particles per column
    pub resolution_y: usize,
    /// Grid origin; rest positions are relative to it
    pub origin: [f32; 3],
    /// Mass of every unpinned particle
    pub particle_mass: f32,
    /// Collision radius of the proxy sphere behind each particle
    pub particle_radius: f32,
    pub linear_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Anchors at each end of the top row
    pub pinned_columns: usize,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 3.0,
            resolution_x: 10,
            resolution_y: 10,
            origin: [0.0, 3.0, 0.0],
            particle_mass: 0.1,
            particle_radius: 0.02,
            linear_damping: 0.4,
            friction: 0.4,
            restitution: 0.1,
            pinned_columns: 2,
        }
    }
}

impl ClothConfig {
    /// Reject grids the topology builder cannot lay out.
    ///
    /// Runs before any body is created.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.resolution_x < 2 || self.resolution_y < 2 {
            return Err(SceneError::config(format!(
                "cloth resolution must be at least 2x2, got {}x{}",
                self.resolution_x, self.resolution_y
            )));
        }
        positive("cloth width", self.width)?;
        positive("cloth height", self.height)?;
        positive("particle mass", self.particle_mass)?;
        positive("particle radius", self.particle_radius)?;
        unit_range("cloth linear damping", self.linear_damping)?;
        non_negative("cloth friction", self.friction)?;
        non_negative("cloth restitution", self.restitution)?;
        if self.origin.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::config("cloth origin must be finite"));
        }
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.resolution_x * self.resolution_y
    }

    /// Distance constraints the stitched grid holds: two structural and two
    /// shear edges per cell, minus the missing ones along the borders
    pub fn constraint_count(&self) -> usize {
        let (rx, ry) = (self.resolution_x, self.resolution_y);
        if rx == 0 || ry == 0 {
            return 0;
        }
        ry * (rx - 1) + rx * (ry - 1) + 2 * (rx - 1) * (ry - 1)
    }
}

/// Physics world parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Seconds advanced per tick
    pub time_step: f32,
    /// Constraint projection passes per tick
    pub solver_iterations: usize,
    pub max_bodies: usize,
    pub max_constraints: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            time_step: 1.0 / 60.0,
            solver_iterations: 10,
            max_bodies: 4096,
            max_constraints: 16384,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        positive("time step", self.time_step)?;
        if self.solver_iterations == 0 {
            return Err(SceneError::config("solver iterations must be > 0"));
        }
        if self.max_bodies == 0 || self.max_constraints == 0 {
            return Err(SceneError::config("body and constraint limits must be > 0"));
        }
        if self.gravity.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::config("gravity must be finite"));
        }
        Ok(())
    }
}

/// The scripted bouncing sphere
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub enabled: bool,
    pub radius: f32,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.25,
            mass: 100.0,
            friction: 0.1,
            restitution: 0.6,
        }
    }
}

impl SphereConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        positive("sphere radius", self.radius)?;
        non_negative("sphere mass", self.mass)?;
        non_negative("sphere friction", self.friction)?;
        non_negative("sphere restitution", self.restitution)
    }
}

/// The static ground plane
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub enabled: bool,
    pub position: [f32; 3],
    /// Rotation about X (radians) applied to the plane's +Z normal
    pub rotation_x: f32,
    /// Rendered edge length
    pub size: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position: [0.0, -2.0, 0.0],
            rotation_x: -std::f32::consts::FRAC_PI_2,
            size: 20.0,
            friction: 0.4,
            restitution: 0.3,
        }
    }
}

impl GroundConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        positive("ground size", self.size)?;
        non_negative("ground friction", self.friction)?;
        non_negative("ground restitution", self.restitution)?;
        if !self.rotation_x.is_finite() || self.position.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::config("ground pose must be finite"));
        }
        Ok(())
    }
}

/// Complete scene description
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub cloth: ClothConfig,
    pub physics: PhysicsConfig,
    pub sphere: SphereConfig,
    pub ground: GroundConfig,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.cloth.validate()?;
        self.physics.validate()?;
        self.sphere.validate()?;
        self.ground.validate()?;

        let needed = self.cloth.particle_count()
            + usize::from(self.sphere.enabled)
            + usize::from(self.ground.enabled);
        if needed > self.physics.max_bodies {
            return Err(SceneError::config(format!(
                "scene needs {} bodies but max_bodies is {}",
                needed, self.physics.max_bodies
            )));
        }

        let stitched = self.cloth.constraint_count();
        if stitched > self.physics.max_constraints {
            return Err(SceneError::config(format!(
                "cloth needs {} constraints but max_constraints is {}",
                stitched, self.physics.max_constraints
            )));
        }
        Ok(())
    }
}

fn positive(what: &str, v: f32) -> Result<(), SceneError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SceneError::config(format!("{what} must be > 0, got {v}")))
    }
}

fn non_negative(what: &str, v: f32) -> Result<(), SceneError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::config(format!("{what} must be >= 0, got {v}")))
    }
}

fn unit_range(what: &str, v: f32) -> Result<(), SceneError> {
    if v.is_finite() && (0.0..1.0).contains(&v) {
        Ok(())
    } else {
        Err(SceneError::config(format!("{what} must be in [0, 1), got {v}")))
    }
}

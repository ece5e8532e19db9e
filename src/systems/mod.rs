//! Systems - physics, render surface, cloth and the scene props

pub mod cloth;
pub mod physics;
pub mod props;
pub mod render;

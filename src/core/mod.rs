//! Core building blocks shared by every system.
//!
//! `logging` must stay first so its macros are visible to the modules below.

#[macro_use]
pub mod logging;
pub mod math;

pub use math::Vec3;

//! Common utilities for the simulation binaries
//!
//! Window/GPU setup, vertex layouts and the 2D world camera.

pub mod camera;
pub mod graphics;

pub use camera::*;
pub use graphics::*;

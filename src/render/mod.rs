//! Rendering module
//!
//! Sweep geometry, offscreen alpha masks and the gradient compositor.

pub mod geometry;
pub mod gradient;
pub mod mask;
pub mod surface;

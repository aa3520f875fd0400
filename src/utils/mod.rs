//! Utility modules

pub mod color;

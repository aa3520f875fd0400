//! Effect module

mod controller;

pub use controller::ShimmerEffect;

//! Shimmer sweep overlay engine
//!
//! Renders an animated diagonal gradient band over arbitrary host content to
//! indicate a loading state. The host supplies its content through the
//! [`render::surface::ContentSource`] trait and drives the effect from its
//! animation clock; the engine owns the offscreen mask compositing, the
//! gradient caching and the loop timing.

pub mod animation;
pub mod config;
pub mod effect;
pub mod error;
pub mod render;
pub mod utils;

pub use config::ShimmerConfig;
pub use effect::ShimmerEffect;
pub use error::ConfigError;
pub use render::surface::{AlphaMask, ContentSource, Pixmap};
pub use utils::color::Argb;

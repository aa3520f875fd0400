//! Configuration module

mod shimmer_config;

pub use shimmer_config::{
    ShimmerConfig, DEFAULT_COLOR, DEFAULT_DURATION_MS, MAX_ANGLE_DEGREES, MIN_ANGLE_DEGREES,
};

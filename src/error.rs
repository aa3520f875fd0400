//! Error types
//!
//! Configuration validation and load errors. Resource exhaustion and
//! zero-size geometry are recovered locally and never surface here.

use thiserror::Error;

/// Errors raised at the configuration boundary.
///
/// Validation failures leave the prior configuration untouched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("angle value must be between {min} and {max}, got {value}")]
    AngleOutOfRange { value: u32, min: u32, max: u32 },

    #[error("mask_width_ratio must be higher than 0 and less or equal to 1, got {value}")]
    MaskWidthOutOfRange { value: f32 },

    #[error("gradient_center_width must be higher than 0 and less than 1, got {value}")]
    GradientCenterWidthOutOfRange { value: f32 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

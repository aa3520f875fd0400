//! ShimmerConfig data structure
//!
//! Appearance and timing parameters for the shimmer sweep, with bounded-value
//! validation. Out-of-range values are rejected at the boundary; the struct
//! is never left holding an invalid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::utils::color::Argb;

pub const MIN_ANGLE_DEGREES: u32 = 0;
pub const MAX_ANGLE_DEGREES: u32 = 30;

pub const DEFAULT_ANGLE_DEGREES: u32 = 20;
pub const DEFAULT_MASK_WIDTH_RATIO: f32 = 0.5;
pub const DEFAULT_GRADIENT_CENTER_WIDTH: f32 = 0.1;
pub const DEFAULT_DURATION_MS: u64 = 1500;
pub const DEFAULT_DELAY_MS: u64 = 0;

/// Default shimmer color: 30% white.
pub const DEFAULT_COLOR: Argb = Argb(0x4DFF_FFFF);

/// Shimmer effect configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShimmerConfig {
    /// Sweep angle in clockwise degrees, 0 to 30 inclusive
    #[serde(default = "default_angle")]
    pub angle_degrees: u32,

    /// Width of the sweep line relative to half the container width, (0, 1]
    #[serde(default = "default_mask_width")]
    pub mask_width_ratio: f32,

    /// Width of the solid center band of the gradient, (0, 1)
    #[serde(default = "default_gradient_center_width")]
    pub gradient_center_width: f32,

    /// Shimmer color (hex string in JSON, e.g. "#4DFFFFFF")
    #[serde(default = "default_color")]
    pub color: Argb,

    /// Duration of one sweep in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Delay before each sweep in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Whether the fainter, faster echo pass is drawn
    #[serde(default = "default_true")]
    pub echo_enabled: bool,

    /// Start the animation as soon as the container is visible and sized
    #[serde(default)]
    pub auto_start: bool,
}

fn default_angle() -> u32 {
    DEFAULT_ANGLE_DEGREES
}

fn default_mask_width() -> f32 {
    DEFAULT_MASK_WIDTH_RATIO
}

fn default_gradient_center_width() -> f32 {
    DEFAULT_GRADIENT_CENTER_WIDTH
}

fn default_color() -> Argb {
    DEFAULT_COLOR
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_true() -> bool {
    true
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            angle_degrees: DEFAULT_ANGLE_DEGREES,
            mask_width_ratio: DEFAULT_MASK_WIDTH_RATIO,
            gradient_center_width: DEFAULT_GRADIENT_CENTER_WIDTH,
            color: DEFAULT_COLOR,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: DEFAULT_DELAY_MS,
            echo_enabled: true,
            auto_start: false,
        }
    }
}

impl ShimmerConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every bounded field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_angle(self.angle_degrees)?;
        Self::check_mask_width(self.mask_width_ratio)?;
        Self::check_gradient_center_width(self.gradient_center_width)?;
        Ok(())
    }

    pub fn check_angle(value: u32) -> Result<(), ConfigError> {
        if value > MAX_ANGLE_DEGREES {
            return Err(ConfigError::AngleOutOfRange {
                value,
                min: MIN_ANGLE_DEGREES,
                max: MAX_ANGLE_DEGREES,
            });
        }
        Ok(())
    }

    pub fn check_mask_width(value: f32) -> Result<(), ConfigError> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(ConfigError::MaskWidthOutOfRange { value });
        }
        Ok(())
    }

    /// Upper bound is exclusive: a value of 1 would make the whole sweep a
    /// solid band with no transparent edges.
    pub fn check_gradient_center_width(value: f32) -> Result<(), ConfigError> {
        if !(value > 0.0 && value < 1.0) {
            return Err(ConfigError::GradientCenterWidthOutOfRange { value });
        }
        Ok(())
    }

    /// Color of the echo pass: same hue at half alpha.
    pub fn echo_color(&self) -> Argb {
        self.color.scale_alpha(0.5)
    }

    /// Duration of the echo pass: 90% of the primary sweep.
    pub fn echo_duration_ms(&self) -> u64 {
        self.duration_ms - self.duration_ms / 10
    }
}

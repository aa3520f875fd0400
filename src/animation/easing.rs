//! Easing curves
//!
//! Interpolation curves used by the sweep passes: linear for the primary,
//! an accelerating power curve for the echo.

/// Interpolation curve for a sweep pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Power curve t^(2 * factor); slow start, fast finish.
    Accelerate { factor: f32 },
}

impl Easing {
    /// Map animation progress `t` in [0, 1] to an eased value.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Accelerate { factor } => t.powf(2.0 * factor),
        }
    }
}

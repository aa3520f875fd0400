//! Color utilities
//!
//! ARGB color type and blending helpers used by the gradient compositor.

use serde::{Deserialize, Serialize};

/// Packed ARGB color (alpha in the high byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    /// Build a color from individual channels.
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// Same hue with the alpha channel scaled by `factor`.
    ///
    /// Rounds to nearest, so half of 200 is exactly 100.
    pub fn scale_alpha(&self, factor: f32) -> Self {
        let alpha = (self.alpha() as f32 * factor).round() as u8;
        Self::from_argb(alpha, self.red(), self.green(), self.blue())
    }

    /// Parse a hex color string.
    ///
    /// Accepts "#AARRGGBB", "AARRGGBB", "#RRGGBB" or "RRGGBB"
    /// (alpha defaults to 255).
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');

        match hex.len() {
            8 => u32::from_str_radix(hex, 16).ok().map(Self),
            6 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|rgb| Self(0xFF00_0000 | rgb)),
            _ => None,
        }
    }

    /// Format as "#AARRGGBB".
    pub fn to_hex(&self) -> String {
        format!("#{:08X}", self.0)
    }
}

impl TryFrom<String> for Argb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_hex()
    }
}

/// Source-over blend of a straight-alpha RGBA pixel onto a background pixel.
pub fn blend_rgba(bg: (u8, u8, u8, u8), fg: (u8, u8, u8, u8)) -> (u8, u8, u8, u8) {
    let fg_alpha = fg.3 as f32 / 255.0;
    let bg_alpha = bg.3 as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return (0, 0, 0, 0);
    }

    let r = ((fg.0 as f32 * fg_alpha + bg.0 as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha) as u8;
    let g = ((fg.1 as f32 * fg_alpha + bg.1 as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha) as u8;
    let b = ((fg.2 as f32 * fg_alpha + bg.2 as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha) as u8;
    let a = (out_alpha * 255.0) as u8;

    (r, g, b, a)
}

/// Interpolate between two colors channel-wise, `t` in [0, 1].
pub fn lerp_argb(from: Argb, to: Argb, t: f32) -> Argb {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;

    Argb::from_argb(
        lerp(from.alpha(), to.alpha()),
        lerp(from.red(), to.red()),
        lerp(from.green(), to.green()),
        lerp(from.blue(), to.blue()),
    )
}

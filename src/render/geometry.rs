//! Sweep geometry
//!
//! Derives the mask rectangle and travel distance from the container size,
//! sweep angle and mask width ratio. Pure computation; the effect caches an
//! instance and recomputes it only when one of the inputs changes.

/// Derived geometry for one sweep configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGeometry {
    container_width: u32,
    container_height: u32,
    angle_radians: f32,
    sweep_line_width: f32,
    mask_rect_width: u32,
    travel_from: i32,
    travel_to: i32,
}

impl SweepGeometry {
    /// Compute geometry for a container of `width` x `height` pixels.
    ///
    /// The mask rectangle is as tall as the container and wide enough to hold
    /// the diagonal sweep line's horizontal footprint across the full height.
    pub fn compute(width: u32, height: u32, angle_degrees: u32, mask_width_ratio: f32) -> Self {
        let angle_radians = (angle_degrees as f32).to_radians();
        let sweep_line_width = width as f32 / 2.0 * mask_width_ratio;

        let bottom_width = sweep_line_width / angle_radians.cos();
        let top_width = height as f32 * angle_radians.tan();
        let mask_rect_width = (bottom_width + top_width).ceil() as u32;

        // The sweep must fully clear the visible area at both ends, whichever
        // of the container and the mask is wider.
        let travel_to = width as i32;
        let travel_from = if width > mask_rect_width {
            -travel_to
        } else {
            -(mask_rect_width as i32)
        };

        Self {
            container_width: width,
            container_height: height,
            angle_radians,
            sweep_line_width,
            mask_rect_width,
            travel_from,
            travel_to,
        }
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    /// Sweep angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle_radians
    }

    /// Width of the shimmer line along the bottom edge, in pixels.
    pub fn sweep_line_width(&self) -> f32 {
        self.sweep_line_width
    }

    /// Width of the offscreen mask rectangle.
    pub fn mask_rect_width(&self) -> u32 {
        self.mask_rect_width
    }

    /// Height of the offscreen mask rectangle (equals the container height).
    pub fn mask_rect_height(&self) -> u32 {
        self.container_height
    }

    /// Leftmost sweep offset.
    pub fn travel_from(&self) -> i32 {
        self.travel_from
    }

    /// Rightmost sweep offset.
    pub fn travel_to(&self) -> i32 {
        self.travel_to
    }

    /// Total sweep distance in pixels.
    pub fn travel_range(&self) -> i32 {
        self.travel_to - self.travel_from
    }
}

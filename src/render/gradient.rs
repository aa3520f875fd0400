//! Gradient compositor
//!
//! Builds the directional shimmer gradient and composites it through a
//! pass's alpha mask onto the destination surface. The gradient field is
//! evaluated once per configuration and cached; per frame only the mask
//! content and the draw offset change.

use glam::Vec2;

use super::geometry::SweepGeometry;
use super::surface::{AlphaMask, Pixmap};
use crate::utils::color::{lerp_argb, Argb};

/// Cached paintable shimmer texture for one pass.
///
/// Holds the linear gradient evaluated over the mask rectangle. Compositing
/// multiplies the gradient's alpha by the mask coverage (alpha-in), so the
/// sweep only appears where the content has pixels.
#[derive(Debug)]
pub struct ShimmerPaint {
    width: u32,
    height: u32,
    gradient: Vec<(u8, u8, u8, u8)>,
}

impl ShimmerPaint {
    /// Evaluate the gradient field for the given geometry and color.
    ///
    /// Color stops run [transparent edge, color, color, transparent edge] at
    /// positions [0, 0.5 - cw/2, 0.5 + cw/2, 1]. The axis goes from (0, H)
    /// to (cos(angle), sin(angle)) scaled by the sweep line width, with clamp
    /// tiling outside [0, 1].
    pub fn build(geometry: &SweepGeometry, color: Argb, center_width: f32) -> Self {
        let width = geometry.mask_rect_width();
        let height = geometry.mask_rect_height();

        let angle = geometry.angle_radians();
        let origin = Vec2::new(0.0, height as f32);
        let axis = Vec2::new(angle.cos(), angle.sin()) * geometry.sweep_line_width();
        let axis_len_sq = axis.length_squared().max(f32::EPSILON);

        let edge = color.scale_alpha(0.0);
        let center_start = 0.5 - center_width / 2.0;
        let center_end = 0.5 + center_width / 2.0;

        let stop_color = |t: f32| -> (u8, u8, u8, u8) {
            let argb = if t <= center_start {
                lerp_argb(edge, color, t / center_start)
            } else if t < center_end {
                color
            } else {
                lerp_argb(color, edge, (t - center_end) / (1.0 - center_end))
            };
            (argb.red(), argb.green(), argb.blue(), argb.alpha())
        };

        let mut gradient = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f32, y as f32) - origin;
                let t = (p.dot(axis) / axis_len_sq).clamp(0.0, 1.0);
                gradient.push(stop_color(t));
            }
        }

        Self {
            width,
            height,
            gradient,
        }
    }

    /// Draw the shimmer texture onto `base` at `offset_x`, clipped by `mask`.
    pub fn composite(&self, base: &mut Pixmap, mask: &AlphaMask, offset_x: i32) {
        let height = self.height.min(mask.height());
        let width = self.width.min(mask.width());

        for y in 0..height {
            for x in 0..width {
                let coverage = mask.coverage(x, y);
                if coverage == 0 {
                    continue;
                }

                let (r, g, b, a) = self.gradient[(y * self.width + x) as usize];
                let masked_alpha = (a as u16 * coverage as u16 / 255) as u8;
                if masked_alpha == 0 {
                    continue;
                }

                base.blend_pixel(x as i32 + offset_x, y as i32, (r, g, b, masked_alpha));
            }
        }
    }

    /// Alpha of the gradient at mask-local coordinates, before masking.
    pub fn gradient_alpha(&self, x: u32, y: u32) -> u8 {
        self.gradient[(y * self.width + x) as usize].3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_paint(color: Argb) -> (ShimmerPaint, SweepGeometry) {
        let geometry = SweepGeometry::compute(200, 100, 0, 0.5);
        (ShimmerPaint::build(&geometry, color, 0.1), geometry)
    }

    #[test]
    fn test_gradient_edges_transparent() {
        // At a nonzero angle the mask is wider than the sweep line, so the
        // rightmost column projects past t=1 and clamps to the edge stop.
        let geometry = SweepGeometry::compute(200, 100, 20, 0.5);
        let paint = ShimmerPaint::build(&geometry, Argb(0xC8FFFFFF), 0.1);
        let width = geometry.mask_rect_width();

        assert_eq!(paint.gradient_alpha(0, 99), 0);
        assert_eq!(paint.gradient_alpha(width - 1, 99), 0);
    }

    #[test]
    fn test_gradient_center_solid() {
        let (paint, geometry) = reference_paint(Argb(0xC8FFFFFF));

        // At angle 0 the axis spans the sweep line width along the bottom
        // row; the center of the band carries the full color alpha.
        let center_x = (geometry.sweep_line_width() / 2.0) as u32;
        assert_eq!(paint.gradient_alpha(center_x, 99), 0xC8);
    }

    #[test]
    fn test_composite_respects_mask() {
        let (paint, geometry) = reference_paint(Argb(0xFFFF0000));
        let mut mask =
            AlphaMask::try_allocate(geometry.mask_rect_width(), geometry.mask_rect_height())
                .unwrap();

        // Only one covered pixel, in the solid center of the band.
        let center_x = (geometry.sweep_line_width() / 2.0) as u32;
        mask.fill_rect(center_x as i32, 10, 1, 1, 255);

        let mut base = Pixmap::new(200, 100);
        base.fill((0, 0, 0, 255));
        paint.composite(&mut base, &mask, 0);

        assert_eq!(base.pixel(center_x, 10), (255, 0, 0, 255));
        assert_eq!(base.pixel(center_x + 5, 10), (0, 0, 0, 255));
    }

    #[test]
    fn test_composite_offset_translates() {
        let (paint, geometry) = reference_paint(Argb(0xFFFF0000));
        let mut mask =
            AlphaMask::try_allocate(geometry.mask_rect_width(), geometry.mask_rect_height())
                .unwrap();
        let center_x = (geometry.sweep_line_width() / 2.0) as u32;
        mask.fill_rect(center_x as i32, 0, 1, 1, 255);

        let mut base = Pixmap::new(200, 100);
        base.fill((0, 0, 0, 255));
        paint.composite(&mut base, &mask, 50);

        assert_eq!(base.pixel(center_x + 50, 0), (255, 0, 0, 255));
        assert_eq!(base.pixel(center_x, 0), (0, 0, 0, 255));
    }

    #[test]
    fn test_masked_alpha_scales_with_coverage() {
        let (paint, geometry) = reference_paint(Argb(0xFFFFFFFF));
        let mut mask =
            AlphaMask::try_allocate(geometry.mask_rect_width(), geometry.mask_rect_height())
                .unwrap();
        let center_x = (geometry.sweep_line_width() / 2.0) as u32;
        mask.fill_rect(center_x as i32, 0, 1, 1, 128);

        let mut base = Pixmap::new(200, 100);
        base.fill((0, 0, 0, 255));
        paint.composite(&mut base, &mask, 0);

        // Half coverage over black gives a mid gray.
        let (r, _, _, _) = base.pixel(center_x, 0);
        assert!((120..=135).contains(&r), "r={r}");
    }
}

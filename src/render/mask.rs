//! Mask renderer
//!
//! Owns one pass's offscreen alpha mask and redraws the host content into it
//! at the current sweep offset. The buffer is allocated lazily, reused across
//! frames, and only reallocated when the geometry changes.

use tracing::debug;

use super::geometry::SweepGeometry;
use super::surface::{AlphaMask, ContentSource};

#[derive(Debug, Default)]
pub struct MaskRenderer {
    mask: Option<AlphaMask>,
}

impl MaskRenderer {
    pub fn new() -> Self {
        Self { mask: None }
    }

    /// Render the content into this pass's mask, translated by `-offset_x`.
    ///
    /// Returns `None` when the buffer cannot be allocated; the caller skips
    /// drawing the pass for this frame and retries on the next one.
    pub fn render(
        &mut self,
        geometry: &SweepGeometry,
        content: &dyn ContentSource,
        offset_x: i32,
    ) -> Option<&AlphaMask> {
        let width = geometry.mask_rect_width();
        let height = geometry.mask_rect_height();

        let stale = self
            .mask
            .as_ref()
            .is_some_and(|m| m.width() != width || m.height() != height);
        if stale {
            debug!(width, height, "mask geometry changed, reallocating");
            self.mask = None;
        }

        if self.mask.is_none() {
            self.mask = AlphaMask::try_allocate(width, height);
        }

        let mask = self.mask.as_mut()?;
        mask.clear();
        content.draw_content(mask, -offset_x);
        Some(&*mask)
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// Drop the backing buffer so no pixel memory is held while idle.
    pub fn release(&mut self) {
        self.mask = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FullRect;

    impl ContentSource for FullRect {
        fn draw_content(&self, mask: &mut AlphaMask, translate_x: i32) {
            mask.fill_rect(translate_x, 0, 1000, 1000, 255);
        }
    }

    #[test]
    fn test_lazy_allocation() {
        let mut renderer = MaskRenderer::new();
        assert!(!renderer.has_mask());

        let geometry = SweepGeometry::compute(100, 50, 0, 0.5);
        let mask = renderer.render(&geometry, &FullRect, 0).unwrap();
        assert_eq!(mask.width(), geometry.mask_rect_width());
        assert_eq!(mask.height(), 50);
        assert!(renderer.has_mask());
    }

    #[test]
    fn test_translation_applied() {
        let mut renderer = MaskRenderer::new();
        let geometry = SweepGeometry::compute(100, 50, 0, 0.5);

        // Content starts at x=0 and is 1000 wide; translating by a sweep
        // offset of 990 leaves only 10 columns of coverage.
        let mask = renderer.render(&geometry, &FullRect, 990).unwrap();
        assert_eq!(mask.coverage(9, 0), 255);
        assert_eq!(mask.coverage(10, 0), 0);
    }

    #[test]
    fn test_reallocates_on_geometry_change() {
        let mut renderer = MaskRenderer::new();

        let small = SweepGeometry::compute(100, 50, 0, 0.5);
        renderer.render(&small, &FullRect, 0);

        let large = SweepGeometry::compute(200, 80, 10, 1.0);
        let mask = renderer.render(&large, &FullRect, 0).unwrap();
        assert_eq!(mask.width(), large.mask_rect_width());
        assert_eq!(mask.height(), 80);
    }

    #[test]
    fn test_release_drops_buffer() {
        let mut renderer = MaskRenderer::new();
        let geometry = SweepGeometry::compute(100, 50, 0, 0.5);
        renderer.render(&geometry, &FullRect, 0);

        renderer.release();
        assert!(!renderer.has_mask());
    }
}

//! Shimmer effect controller
//!
//! Orchestrates the sweep: owns the configuration, the sequencer and the two
//! pass states, and exposes the lifecycle the host drives (start, stop,
//! reconfigure, visibility, detach, per-frame tick and overlay compositing).

use tracing::{debug, info, warn};

use crate::animation::sequencer::{FrameUpdate, SweepSequencer};
use crate::config::ShimmerConfig;
use crate::error::ConfigError;
use crate::render::geometry::SweepGeometry;
use crate::render::gradient::ShimmerPaint;
use crate::render::mask::MaskRenderer;
use crate::render::surface::{ContentSource, Pixmap};
use crate::utils::color::Argb;

/// One animated sweep pass: its offset, mask buffer and cached paint.
#[derive(Debug, Default)]
struct PassState {
    offset: Option<i32>,
    mask_renderer: MaskRenderer,
    paint: Option<ShimmerPaint>,
}

impl PassState {
    /// Render this pass's mask and composite its paint onto `base`.
    ///
    /// Returns false when the mask buffer could not be allocated; the pass
    /// is skipped for this frame and the caller frees caches for a retry.
    fn draw(
        &mut self,
        geometry: &SweepGeometry,
        content: &dyn ContentSource,
        base: &mut Pixmap,
        color: Argb,
        center_width: f32,
    ) -> bool {
        let Some(offset) = self.offset else {
            return true;
        };

        let Some(mask) = self.mask_renderer.render(geometry, content, offset) else {
            self.paint = None;
            return false;
        };

        let paint = self
            .paint
            .get_or_insert_with(|| ShimmerPaint::build(geometry, color, center_width));
        paint.composite(base, mask, offset);
        true
    }

    /// Drop the offset, the mask buffer and the cached paint.
    fn release(&mut self) {
        self.offset = None;
        self.mask_renderer.release();
        self.paint = None;
    }

    fn holds_resources(&self) -> bool {
        self.mask_renderer.has_mask() || self.paint.is_some()
    }
}

/// The shimmer effect's public lifecycle.
///
/// Single-threaded: the host calls `tick` from its animation clock and
/// `compose_overlay` from its draw hook, both on the same thread.
#[derive(Debug)]
pub struct ShimmerEffect {
    config: ShimmerConfig,
    width: u32,
    height: u32,
    geometry: Option<SweepGeometry>,
    sequencer: Option<SweepSequencer>,
    primary: PassState,
    echo: PassState,
    started: bool,
    /// One-shot deferred start, armed when start() races the first layout.
    pending_start: bool,
}

impl ShimmerEffect {
    /// Create an effect from a validated configuration.
    pub fn new(config: ShimmerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            width: 0,
            height: 0,
            geometry: None,
            sequencer: None,
            primary: PassState::default(),
            echo: PassState::default(),
            started: false,
            pending_start: false,
        })
    }

    pub fn config(&self) -> &ShimmerConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The container was measured or resized.
    ///
    /// Consumes a pending deferred start once a nonzero size is available.
    pub fn set_layout(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }

        debug!(width, height, "container layout changed");
        self.width = width;
        self.height = height;
        self.invalidate_geometry();

        if self.pending_start && width > 0 && height > 0 {
            self.pending_start = false;
            self.start();
        } else {
            // A running sweep must pick up the new geometry and travel
            // distances. Restarting into a zero size defers until the
            // container is measured again.
            self.restart_if_started();
        }
    }

    /// Begin the sweep animation. No-op when already started; defers until
    /// the first layout when the container has no size yet.
    pub fn start(&mut self) {
        if self.started {
            return;
        }

        if self.width == 0 || self.height == 0 {
            debug!("start deferred until the container is measured");
            self.pending_start = true;
            return;
        }

        let (width, height) = (self.width, self.height);
        let (angle, ratio) = (self.config.angle_degrees, self.config.mask_width_ratio);
        let geometry = *self
            .geometry
            .get_or_insert_with(|| SweepGeometry::compute(width, height, angle, ratio));

        self.sequencer = Some(SweepSequencer::new(&self.config, &geometry));
        self.started = true;
        info!(
            mask_width = geometry.mask_rect_width(),
            travel = geometry.travel_range(),
            "shimmer started"
        );
    }

    /// Stop the sweep and release every per-pass resource.
    ///
    /// The sequencer is cancelled before the buffers are dropped, so no late
    /// frame update can touch a freed mask. Stopping while idle is a no-op.
    pub fn stop(&mut self) {
        self.pending_start = false;

        if let Some(mut sequencer) = self.sequencer.take() {
            sequencer.stop();
        }

        self.primary.release();
        self.echo.release();
        self.started = false;
    }

    /// Advance the animation clock. Returns true when the host must redraw.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(sequencer) = self.sequencer.as_mut() else {
            return false;
        };

        let FrameUpdate {
            primary_offset,
            echo_offset,
            redraw,
        } = sequencer.tick(now_ms);

        self.primary.offset = primary_offset;
        self.echo.offset = echo_offset;
        redraw
    }

    /// Composite the shimmer passes over the host's already-drawn content.
    ///
    /// Suppressed entirely while stopped, unsized, or between sweeps (both
    /// offsets unset); a pass whose mask cannot be allocated is skipped and
    /// caches are freed so the next frame can retry.
    pub fn compose_overlay(&mut self, base: &mut Pixmap, content: &dyn ContentSource) {
        if !self.started || self.width == 0 || self.height == 0 {
            return;
        }
        let Some(geometry) = self.geometry else {
            return;
        };

        let center_width = self.config.gradient_center_width;
        let primary_ok =
            self.primary
                .draw(&geometry, content, base, self.config.color, center_width);
        let echo_ok =
            self.echo
                .draw(&geometry, content, base, self.config.echo_color(), center_width);

        if !primary_ok || !echo_ok {
            warn!("mask allocation failed, freeing caches for retry");
            self.primary.paint = None;
            self.echo.paint = None;
        }
    }

    /// Host visibility changed. Auto-start configurations start on show;
    /// every configuration stops on hide.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            if self.config.auto_start {
                self.start();
            }
        } else {
            self.stop();
        }
    }

    /// The host is being torn down: unconditional full reset.
    pub fn on_detach(&mut self) {
        self.stop();
    }

    pub fn set_angle(&mut self, angle_degrees: u32) -> Result<(), ConfigError> {
        ShimmerConfig::check_angle(angle_degrees)?;
        self.config.angle_degrees = angle_degrees;
        self.invalidate_geometry();
        self.restart_if_started();
        Ok(())
    }

    pub fn set_mask_width(&mut self, ratio: f32) -> Result<(), ConfigError> {
        ShimmerConfig::check_mask_width(ratio)?;
        self.config.mask_width_ratio = ratio;
        self.invalidate_geometry();
        self.restart_if_started();
        Ok(())
    }

    pub fn set_gradient_center_width(&mut self, width: f32) -> Result<(), ConfigError> {
        ShimmerConfig::check_gradient_center_width(width)?;
        self.config.gradient_center_width = width;
        self.restart_if_started();
        Ok(())
    }

    pub fn set_color(&mut self, color: Argb) {
        self.config.color = color;
        self.restart_if_started();
    }

    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.config.duration_ms = duration_ms;
        self.restart_if_started();
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.config.delay_ms = delay_ms;
        self.restart_if_started();
    }

    pub fn set_echo_enabled(&mut self, enabled: bool) {
        self.config.echo_enabled = enabled;
        self.restart_if_started();
    }

    /// Apply a configuration change atomically from the next frame.
    fn restart_if_started(&mut self) {
        if self.started {
            self.stop();
            self.start();
        }
    }

    fn invalidate_geometry(&mut self) {
        self.geometry = None;
        self.primary.paint = None;
        self.echo.paint = None;
    }

    /// True while any pass holds a mask buffer or cached paint.
    pub fn holds_resources(&self) -> bool {
        self.primary.holds_resources() || self.echo.holds_resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::AlphaMask;

    struct SolidContent;

    impl ContentSource for SolidContent {
        fn draw_content(&self, mask: &mut AlphaMask, translate_x: i32) {
            mask.fill_rect(translate_x, 0, 4000, 4000, 255);
        }
    }

    fn started_effect() -> ShimmerEffect {
        let mut effect = ShimmerEffect::new(ShimmerConfig::default()).unwrap();
        effect.set_layout(300, 100);
        effect.start();
        effect
    }

    #[test]
    fn test_start_requires_layout() {
        let mut effect = ShimmerEffect::new(ShimmerConfig::default()).unwrap();
        effect.start();
        assert!(!effect.is_started());

        // Deferred start fires once the container is measured.
        effect.set_layout(300, 100);
        assert!(effect.is_started());
    }

    #[test]
    fn test_double_start_and_stop_are_noops() {
        let mut effect = started_effect();
        effect.start();
        assert!(effect.is_started());

        effect.stop();
        effect.stop();
        assert!(!effect.is_started());
    }

    #[test]
    fn test_stop_cancels_deferred_start() {
        let mut effect = ShimmerEffect::new(ShimmerConfig::default()).unwrap();
        effect.start();
        effect.stop();

        effect.set_layout(300, 100);
        assert!(!effect.is_started());
    }

    #[test]
    fn test_start_stop_leaves_no_resources() {
        let mut effect = started_effect();

        // Run a frame so buffers and paints actually get allocated.
        effect.tick(100);
        let mut base = Pixmap::new(300, 100);
        effect.compose_overlay(&mut base, &SolidContent);
        assert!(effect.holds_resources());

        effect.stop();
        assert!(!effect.holds_resources());
    }

    #[test]
    fn test_out_of_range_angle_rejected() {
        let mut effect = started_effect();
        assert!(effect.set_angle(31).is_err());
        assert_eq!(effect.config().angle_degrees, 20);

        assert!(effect.set_angle(30).is_ok());
        assert_eq!(effect.config().angle_degrees, 30);
        assert!(effect.is_started());
    }

    #[test]
    fn test_out_of_range_mask_width_rejected() {
        let mut effect = started_effect();
        assert!(effect.set_mask_width(1.5).is_err());
        assert_eq!(effect.config().mask_width_ratio, 0.5);
    }

    #[test]
    fn test_overlay_modifies_surface_mid_sweep() {
        let mut effect = started_effect();
        effect.tick(0);
        effect.tick(750);

        let mut base = Pixmap::new(300, 100);
        base.fill((0, 0, 0, 255));
        let untouched = base.clone();

        effect.compose_overlay(&mut base, &SolidContent);
        assert_ne!(base.data(), untouched.data());
    }

    #[test]
    fn test_overlay_noop_while_stopped() {
        let mut effect = ShimmerEffect::new(ShimmerConfig::default()).unwrap();
        effect.set_layout(300, 100);

        let mut base = Pixmap::new(300, 100);
        base.fill((0, 0, 0, 255));
        let untouched = base.clone();

        effect.compose_overlay(&mut base, &SolidContent);
        assert_eq!(base.data(), untouched.data());
    }

    #[test]
    fn test_echo_disable_keeps_primary_timing() {
        let mut with_echo = started_effect();
        let mut without_echo = started_effect();
        without_echo.set_echo_enabled(false);

        with_echo.tick(0);
        without_echo.tick(0);
        with_echo.tick(600);
        without_echo.tick(600);

        assert_eq!(with_echo.primary.offset, without_echo.primary.offset);
        assert!(with_echo.echo.offset.is_some());
        assert_eq!(without_echo.echo.offset, None);
    }

    #[test]
    fn test_resize_while_started_keeps_shimmer() {
        let mut effect = started_effect();
        effect.tick(0);

        effect.set_layout(400, 120);
        assert!(effect.is_started());
        assert_eq!(effect.geometry.unwrap().container_width(), 400);

        // Mid-sweep in the restarted cycle the overlay still draws.
        effect.tick(1000);
        let redraw = effect.tick(1750);
        assert!(redraw);

        let mut base = Pixmap::new(400, 120);
        base.fill((0, 0, 0, 255));
        let untouched = base.clone();
        effect.compose_overlay(&mut base, &SolidContent);
        assert_ne!(base.data(), untouched.data());
    }

    #[test]
    fn test_resize_to_zero_defers_until_measured() {
        let mut effect = started_effect();
        effect.tick(0);

        effect.set_layout(0, 0);
        assert!(!effect.is_started());
        assert!(!effect.holds_resources());

        // The sweep resumes once the container has a size again.
        effect.set_layout(300, 100);
        assert!(effect.is_started());
    }

    #[test]
    fn test_visibility_with_auto_start() {
        let config = ShimmerConfig {
            auto_start: true,
            ..Default::default()
        };
        let mut effect = ShimmerEffect::new(config).unwrap();
        effect.set_layout(300, 100);

        effect.set_visible(true);
        assert!(effect.is_started());

        effect.set_visible(false);
        assert!(!effect.is_started());
    }

    #[test]
    fn test_detach_resets() {
        let mut effect = started_effect();
        effect.tick(100);
        effect.on_detach();
        assert!(!effect.is_started());
        assert!(!effect.holds_resources());
    }

    #[test]
    fn test_offsets_unset_at_loop_boundary() {
        let mut effect = started_effect();
        effect.tick(0);
        effect.tick(750);
        assert!(effect.primary.offset.is_some());

        // Natural completion at delay + duration.
        let redraw = effect.tick(1500);
        assert!(redraw);
        assert_eq!(effect.primary.offset, None);
        assert_eq!(effect.echo.offset, None);

        // The next cycle picks the sweep back up.
        effect.tick(1501);
        assert!(effect.primary.offset.is_some());
    }
}

//! Sweep sequencer
//!
//! Drives the delay segment and the one or two parallel sweep passes through
//! time. Looping is an explicit state transition: natural completion resets
//! the pass offsets to unset and re-arms the cycle from a fresh epoch, while
//! an explicit stop never restarts.

use tracing::debug;

use super::easing::Easing;
use crate::config::ShimmerConfig;
use crate::render::geometry::SweepGeometry;

/// Sequencer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Built but not yet ticked.
    Armed,
    /// Sweeping (or waiting out the delay segment).
    Running,
    /// Explicitly cancelled; will not restart.
    Stopped,
}

/// Immutable result of advancing the sequencer by one frame.
///
/// `None` offsets are the unset sentinel: the pass is outside its animated
/// window and must not be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameUpdate {
    pub primary_offset: Option<i32>,
    pub echo_offset: Option<i32>,
    /// True when some part of a mask is inside or approaching the visible
    /// region and the host should redraw.
    pub redraw: bool,
}

impl FrameUpdate {
    const IDLE: Self = Self {
        primary_offset: None,
        echo_offset: None,
        redraw: false,
    };
}

/// Timed sweep driver for one shimmer effect.
///
/// Created on start, torn down on stop, rebuilt on the next start; timing
/// parameters are frozen at build time so a reconfigure is a rebuild.
#[derive(Debug)]
pub struct SweepSequencer {
    delay_ms: u64,
    duration_ms: u64,
    echo_duration_ms: u64,
    echo_enabled: bool,
    echo_easing: Easing,

    travel_from: i32,
    travel_range: i32,
    mask_rect_width: u32,

    state: SequencerState,
    cycle_start_ms: u64,
    completed_loops: u64,
}

impl SweepSequencer {
    pub fn new(config: &ShimmerConfig, geometry: &SweepGeometry) -> Self {
        Self {
            delay_ms: config.delay_ms,
            duration_ms: config.duration_ms,
            echo_duration_ms: config.echo_duration_ms(),
            echo_enabled: config.echo_enabled,
            echo_easing: Easing::Accelerate { factor: 2.0 },
            travel_from: geometry.travel_from(),
            travel_range: geometry.travel_range(),
            mask_rect_width: geometry.mask_rect_width(),
            state: SequencerState::Armed,
            cycle_start_ms: 0,
            completed_loops: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Number of completed sweep cycles since the sequencer was built.
    pub fn completed_loops(&self) -> u64 {
        self.completed_loops
    }

    /// Cancel the sequencer. No further tick produces offsets.
    pub fn stop(&mut self) {
        self.state = SequencerState::Stopped;
    }

    /// Advance to `now_ms` and produce this frame's pass offsets.
    ///
    /// The first tick after arming fixes the cycle epoch. The tick that
    /// observes natural completion reports unset offsets (the boundary frame
    /// draws no shimmer) and re-arms the next cycle from the current time.
    pub fn tick(&mut self, now_ms: u64) -> FrameUpdate {
        match self.state {
            SequencerState::Stopped => return FrameUpdate::IDLE,
            SequencerState::Armed => {
                self.cycle_start_ms = now_ms;
                self.state = SequencerState::Running;
            }
            SequencerState::Running => {}
        }

        let elapsed = now_ms.saturating_sub(self.cycle_start_ms);

        // Delay segment: both passes stay unset.
        if elapsed < self.delay_ms {
            return FrameUpdate::IDLE;
        }

        let t = elapsed - self.delay_ms;

        if t >= self.duration_ms {
            // CompletedLoop: unset offsets for the boundary frame, then run
            // the next cycle from a new epoch.
            self.completed_loops += 1;
            self.cycle_start_ms = now_ms;
            debug!(loops = self.completed_loops, "sweep cycle completed, restarting");
            return FrameUpdate {
                primary_offset: None,
                echo_offset: None,
                redraw: true,
            };
        }

        let primary_offset = self.offset_at(t, self.duration_ms, Easing::Linear);
        let echo_offset = if self.echo_enabled {
            Some(self.offset_at(t, self.echo_duration_ms, self.echo_easing))
        } else {
            None
        };

        let redraw = self.approaching_visible(Some(primary_offset))
            || self.approaching_visible(echo_offset);

        FrameUpdate {
            primary_offset: Some(primary_offset),
            echo_offset,
            redraw,
        }
    }

    fn offset_at(&self, t: u64, duration_ms: u64, easing: Easing) -> i32 {
        let progress = if duration_ms == 0 {
            1.0
        } else {
            (t as f32 / duration_ms as f32).min(1.0)
        };
        self.travel_from + (self.travel_range as f32 * easing.apply(progress)) as i32
    }

    fn approaching_visible(&self, offset: Option<i32>) -> bool {
        offset.is_some_and(|o| o + self.mask_rect_width as i32 >= 0)
    }
}

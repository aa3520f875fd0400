//! Animation module
//!
//! Easing curves and the looping sweep sequencer.

pub mod easing;
pub mod sequencer;

//! Timestamp value generators.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use synth_core::TimeWindow;

/// Generate a random timestamp inside the window, at whole-second resolution.
pub fn generate_timestamp<R: Rng>(rng: &mut R, window: &TimeWindow) -> NaiveDateTime {
    let span = window.span_secs();
    if span <= 0 {
        return window.start;
    }
    window.start + Duration::seconds(rng.gen_range(0..=span))
}

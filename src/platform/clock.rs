//! Fixed-timestep frame clock
//!
//! Converts host frame timestamps (milliseconds, e.g. `requestAnimationFrame`)
//! into a whole number of simulation ticks.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::sim::GamePhase;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame (after a pause or a new session) so the next
    /// frame doesn't replay the gap
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
    }

    /// Feed a frame timestamp and get the number of ticks to run.
    ///
    /// The first frame after a reset runs exactly one tick. Long frames are
    /// clamped and at most `MAX_SUBSTEPS` ticks run per frame; leftover time
    /// beyond that is dropped.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => SIM_DT_MS,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut ticks = 0;
        while self.accumulator_ms >= SIM_DT_MS && ticks < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator_ms = 0.0;
        }
        ticks
    }

    /// Timestamp for tick `index` of the `ticks` run in a frame stamped
    /// `frame_ms`. Ticks are spaced one step apart and the last one lands on
    /// the frame time.
    pub fn tick_time(frame_ms: f64, ticks: u32, index: u32) -> f64 {
        let behind = ticks.saturating_sub(index + 1);
        frame_ms - f64::from(behind) * SIM_DT_MS
    }
}

/// Whether the host has to schedule a frame: a run is live but nothing is
/// queued, e.g. after the page was hidden and restored or a run just began.
pub fn needs_frame(phase: GamePhase, frame_pending: bool) -> bool {
    phase == GamePhase::Playing && !frame_pending
}

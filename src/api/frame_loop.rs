//! Frame scheduling with dirty-flag gating.
//!
//! The loop draws only while some animation is in flight: a frame that finds
//! no redraw flag set cancels the pending state and stops, and any state
//! mutation that sets a flag must also re-schedule.

use serde::{Deserialize, Serialize};

/// Elapsed-time cap per frame, so springs never take a giant step after a
/// stall or tab-resume.
pub const MAX_FRAME_DELTA_MS: f64 = 40.0;

/// Pending-redraw flags for the two independent chart surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedrawFlags {
    pub series: bool,
    pub labels: bool,
}

impl RedrawFlags {
    pub fn mark_all(&mut self) {
        self.series = true;
        self.labels = true;
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.series || self.labels
    }
}

/// Host-driven frame clock.
///
/// `schedule` is idempotent: while a frame is already pending it is a no-op.
/// The clock never requests frames itself — the host asks `is_pending` and
/// calls the engine's `tick` on its animation-frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    pending: bool,
    prev_ts_ms: Option<f64>,
}

impl FrameClock {
    /// Requests a frame; returns whether this call newly scheduled one.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.pending
    }

    /// Stops the loop; the next `schedule` restarts it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Starts a frame at `now_ms` and returns the capped elapsed delta every
    /// spring in this frame must share.
    pub fn begin_frame(&mut self, now_ms: f64) -> f64 {
        let prev = self.prev_ts_ms.unwrap_or(now_ms);
        self.prev_ts_ms = Some(now_ms);
        (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS)
    }
}

/// What one `tick` actually did, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    /// The series surface was cleared and redrawn.
    pub series_redrawn: bool,
    /// The label/grid surface was cleared and redrawn.
    pub labels_redrawn: bool,
    /// Whether the loop still wants another frame after this one.
    pub continues: bool,
}

#[cfg(test)]
mod tests {
    use super::{FrameClock, MAX_FRAME_DELTA_MS, RedrawFlags};

    #[test]
    fn schedule_is_idempotent_while_pending() {
        let mut clock = FrameClock::default();
        assert!(clock.schedule());
        assert!(!clock.schedule());
        clock.cancel();
        assert!(clock.schedule());
    }

    #[test]
    fn begin_frame_caps_delta_after_a_stall() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.begin_frame(1000.0), 0.0);
        assert_eq!(clock.begin_frame(1016.0), 16.0);
        // Tab-resume style gap.
        assert_eq!(clock.begin_frame(9000.0), MAX_FRAME_DELTA_MS);
    }

    #[test]
    fn redraw_flags_aggregate() {
        let mut flags = RedrawFlags::default();
        assert!(!flags.any());
        flags.labels = true;
        assert!(flags.any());
        flags = RedrawFlags::default();
        flags.mark_all();
        assert!(flags.series && flags.labels);
    }
}

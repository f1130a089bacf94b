use tracing::{debug, warn};

/// Running nominal time of the scene.
///
/// Nodes advance the timeline by their declared duration, not by what their
/// animations actually took; [`finalize`](Self::finalize) then returns the pad
/// needed to reach the requested total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineAccumulator {
    current_time: f64,
}

impl TimelineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Add `seconds` to the running total. Negative or non-finite input is ignored.
    pub fn advance(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds < 0.0 {
            warn!("Ignoring invalid timeline advance of {}s", seconds);
            return;
        }
        self.current_time += seconds;
    }

    /// Trailing wait so the scene lasts `target_total`. Overrun clamps to zero.
    pub fn finalize(&self, target_total: f64) -> f64 {
        let pad = (target_total - self.current_time).max(0.0);
        if pad == 0.0 && self.current_time > target_total {
            debug!(
                "Timeline overran target by {:.2}s ({:.2}s > {:.2}s)",
                self.current_time - target_total,
                self.current_time,
                target_total
            );
        }
        pad
    }

    pub fn reset(&mut self) {
        self.current_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_finalize() {
        let mut timeline = TimelineAccumulator::new();
        timeline.advance(4.0);
        timeline.advance(20.0);
        assert_eq!(timeline.current_time(), 24.0);
        assert_eq!(timeline.finalize(30.0), 6.0);
    }

    #[test]
    fn test_overrun_clamps_to_zero() {
        let mut timeline = TimelineAccumulator::new();
        timeline.advance(75.0);
        assert_eq!(timeline.finalize(60.0), 0.0);
    }

    #[test]
    fn test_finalize_never_negative() {
        for current in 0..40 {
            for target in 0..40 {
                let mut timeline = TimelineAccumulator::new();
                timeline.advance(current as f64 * 1.5);
                let pad = timeline.finalize(target as f64);
                assert!(pad >= 0.0);
                assert_eq!(pad, (target as f64 - current as f64 * 1.5).max(0.0));
            }
        }
    }

    #[test]
    fn test_negative_advance_ignored() {
        let mut timeline = TimelineAccumulator::new();
        timeline.advance(5.0);
        timeline.advance(-2.0);
        timeline.advance(f64::NAN);
        assert_eq!(timeline.current_time(), 5.0);

        timeline.reset();
        assert_eq!(timeline.current_time(), 0.0);
    }
}

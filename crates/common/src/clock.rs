//! Frame clock utilities.
//!
//! Detections are keyed by video frame id, not by wall time. This module
//! converts frame ids into seconds at the recording's frame rate so that
//! actions can be reported as start time and duration.

/// Converts frame ids to time offsets for a fixed frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fps: f64,
}

impl FrameClock {
    /// Create a clock for the given frame rate. A rate of zero is treated as 1 fps.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1) as f64,
        }
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Seconds from frame 0 to the start of `frame_id`.
    pub fn frame_to_secs(&self, frame_id: u64) -> f64 {
        frame_id as f64 / self.fps
    }

    /// Duration covered by the inclusive frame range `first..=last`.
    pub fn span_secs(&self, first: u64, last: u64) -> f64 {
        if last < first {
            return 0.0;
        }
        (last - first + 1) as f64 / self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_secs() {
        let clock = FrameClock::new(30);
        assert!((clock.frame_to_secs(45) - 1.5).abs() < 1e-9);
        assert_eq!(clock.frame_to_secs(0), 0.0);
    }

    #[test]
    fn test_span_is_inclusive() {
        let clock = FrameClock::new(10);
        assert!((clock.span_secs(1, 10) - 1.0).abs() < 1e-9);
        assert!((clock.span_secs(5, 5) - 0.1).abs() < 1e-9);
        assert_eq!(clock.span_secs(6, 5), 0.0);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let clock = FrameClock::new(0);
        assert!((clock.fps() - 1.0).abs() < 1e-9);
        assert!(clock.frame_to_secs(3).is_finite());
    }
}

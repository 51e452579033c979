//! The GUI action classifier.
//!
//! Turns a validated, frame-ordered detection sequence into GUI actions.
//!
//! # Stages
//!
//! 1. **Segment** frames into runs of consecutive ids.
//! 2. **Track** taps across frames within each run.
//! 3. **Type** each track as click, long click, or swipe.
//! 4. **Split** presses at opacity rising edges, re-type, drop short actions.
//! 5. **Merge** adjacent click/swipe pairs into swipes.
//! 6. **Refine**: drop swipe-contained and degenerate actions, trim swipe tails.
//!
//! Each stage depends on the invariants of the previous one, so they always
//! run in this order. The classifier holds no state between calls and can be
//! shared across threads.

use serde::Serialize;
use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{
    filter_by_confidence, validate_frames, Action, ActionType, Frame, ValidationError,
};

use crate::action_typer::type_tracks;
use crate::complex_merge::merge_complex_actions;
use crate::frame_runs::segment_frame_runs;
use crate::opacity::segment_by_opacity;
use crate::refine::refine_actions;
use crate::tap_tracker::build_tracks;

/// Per-stage counts collected during one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    /// Frames handed to segmentation.
    pub frames: usize,
    /// Frame runs longer than the tap threshold.
    pub runs: usize,
    /// Tracks after stitching.
    pub tracks: usize,
    /// Actions after typing.
    pub typed: usize,
    /// Actions after opacity segmentation and the length filter.
    pub opacity_segmented: usize,
    /// Actions after complex-action merging.
    pub merged: usize,
    /// Final actions after refinement.
    pub refined: usize,
}

/// Classification result with diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub counts: StageCounts,
    pub actions: Vec<Action>,
}

impl ClassificationReport {
    /// Number of final actions of the given type.
    pub fn count_of(&self, kind: ActionType) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }
}

/// The GUI action classifier.
#[derive(Debug, Clone)]
pub struct GuiActionClassifier {
    config: ClassifierConfig,
}

impl GuiActionClassifier {
    /// Create a new classifier with the given thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify frames that were already filtered by touch confidence.
    pub fn classify(&self, frames: &[Frame]) -> Result<Vec<Action>, ValidationError> {
        Ok(self.classify_with_report(frames)?.actions)
    }

    /// Filter raw detections by touch confidence, then classify them.
    pub fn classify_raw(&self, frames: Vec<Frame>) -> Result<Vec<Action>, ValidationError> {
        let filtered = filter_by_confidence(frames, self.config.min_touch_confidence);
        self.classify(&filtered)
    }

    /// Classify and return both the actions and per-stage diagnostics.
    pub fn classify_with_report(
        &self,
        frames: &[Frame],
    ) -> Result<ClassificationReport, ValidationError> {
        validate_frames(frames)?;

        let config = &self.config;
        let mut counts = StageCounts {
            frames: frames.len(),
            ..Default::default()
        };

        let runs = segment_frame_runs(frames, config.tap_threshold);
        counts.runs = runs.len();

        let tracks = build_tracks(&runs, config);
        counts.tracks = tracks.len();

        let actions = type_tracks(tracks, config);
        counts.typed = actions.len();

        let actions = segment_by_opacity(actions, config);
        counts.opacity_segmented = actions.len();

        let actions = merge_complex_actions(actions, config.distance_merge_complex);
        counts.merged = actions.len();

        let actions = refine_actions(actions, config);
        counts.refined = actions.len();

        tracing::debug!(?counts, "classification complete");

        Ok(ClassificationReport { counts, actions })
    }
}

impl Default for GuiActionClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_frames(ids: std::ops::RangeInclusive<u64>, x: f64, y: f64) -> Vec<Frame> {
        ids.map(|id| Frame::new(id).with_tap(x, y, 0.9)).collect()
    }

    #[test]
    fn test_empty_input() {
        let classifier = GuiActionClassifier::with_defaults();
        let report = classifier.classify_with_report(&[]).unwrap();
        assert!(report.actions.is_empty());
        assert_eq!(report.counts, StageCounts::default());
    }

    #[test]
    fn test_short_isolated_run_produces_nothing() {
        let classifier = GuiActionClassifier::with_defaults();
        let actions = classifier
            .classify(&static_frames(1..=3, 10.0, 10.0))
            .unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_counts_follow_stages() {
        let classifier = GuiActionClassifier::with_defaults();
        let mut frames = static_frames(1..=5, 50.0, 50.0);
        frames.extend(static_frames(20..=25, 200.0, 200.0));
        frames.extend(static_frames(40..=41, 10.0, 10.0));

        let report = classifier.classify_with_report(&frames).unwrap();
        assert_eq!(report.counts.frames, 13);
        assert_eq!(report.counts.runs, 2);
        assert_eq!(report.counts.tracks, 2);
        assert_eq!(report.counts.refined, 2);
        assert_eq!(report.count_of(ActionType::Click), 2);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let classifier = GuiActionClassifier::with_defaults();
        let mut frames = static_frames(1..=5, 0.0, 0.0);
        frames.swap(1, 2);
        assert!(matches!(
            classifier.classify(&frames),
            Err(ValidationError::NonAscendingFrame {
                previous_id: 3,
                frame_id: 2
            })
        ));
    }

    #[test]
    fn test_classify_raw_filters_low_confidence() {
        let classifier = GuiActionClassifier::with_defaults();
        let mut frames = static_frames(1..=6, 80.0, 80.0);
        // A low-confidence frame in the middle would otherwise keep the run intact.
        frames[3].taps[0].touch_confidence = 0.1;

        let actions = classifier.classify_raw(frames).unwrap();
        // Frames 1-3 and 5-6 are both too short once frame 4 is dropped.
        assert!(actions.is_empty());
    }
}

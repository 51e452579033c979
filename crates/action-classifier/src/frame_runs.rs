//! Frame-run segmentation.
//!
//! Splits the filtered frame sequence into runs of consecutive frame ids.
//! Runs with `tap_threshold` frames or fewer are too short to be a real
//! touch and are dropped.

use touchtrace_detection_model::Frame;

/// Split `frames` into runs of consecutive ids longer than `tap_threshold`.
pub fn segment_frame_runs(frames: &[Frame], tap_threshold: usize) -> Vec<&[Frame]> {
    let mut runs = Vec::new();
    let mut start = 0;

    for end in 1..=frames.len() {
        let continues =
            end < frames.len() && frames[end - 1].id.checked_add(1) == Some(frames[end].id);
        if continues {
            continue;
        }

        let run = &frames[start..end];
        if run.len() > tap_threshold {
            runs.push(run);
        } else {
            tracing::trace!(
                first_frame = run[0].id,
                len = run.len(),
                "dropping short frame run"
            );
        }
        start = end;
    }

    tracing::debug!(frames = frames.len(), runs = runs.len(), "frame-run segmentation");
    runs
}

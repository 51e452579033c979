//! Show per-stage diagnostics for one recording.

use std::path::PathBuf;

use serde::Serialize;
use touchtrace_action_classifier::{GuiActionClassifier, StageCounts};
use touchtrace_common::clock::FrameClock;
use touchtrace_common::config::AppConfig;
use touchtrace_common::error::TouchtraceError;
use touchtrace_detection_model::{load_filtered_detections, Action, ActionType};

/// One line of the action table.
#[derive(Debug, Serialize)]
struct ActionRow {
    kind: ActionType,
    first_frame: u64,
    last_frame: u64,
    taps: usize,
    start_secs: f64,
    duration_secs: f64,
    x: f64,
    y: f64,
    mean_opacity: Option<f64>,
}

impl ActionRow {
    fn new(action: &Action, clock: &FrameClock) -> Option<Self> {
        let (first_frame, last_frame) = action.frame_span()?;
        let centroid = action.centroid()?;
        Some(Self {
            kind: action.kind(),
            first_frame,
            last_frame,
            taps: action.len(),
            start_secs: clock.frame_to_secs(first_frame),
            duration_secs: clock.span_secs(first_frame, last_frame),
            x: centroid.x,
            y: centroid.y,
            mean_opacity: action.mean_opacity(),
        })
    }
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    fps: f64,
    counts: &'a StageCounts,
    actions: Vec<ActionRow>,
}

pub fn run(
    app_config: &AppConfig,
    path: PathBuf,
    profile: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = app_config.classifier_for(profile.as_deref())?;
    let clock = FrameClock::new(app_config.recording.fps);
    let classifier = GuiActionClassifier::new(config);

    let frames = load_filtered_detections(&path, classifier.config().min_touch_confidence)
        .map_err(|e| TouchtraceError::detection(e.to_string()))?;
    let report = classifier
        .classify_with_report(&frames)
        .map_err(|e| TouchtraceError::classification(e.to_string()))?;

    let rows: Vec<ActionRow> = report
        .actions
        .iter()
        .filter_map(|action| ActionRow::new(action, &clock))
        .collect();

    if json {
        let output = InspectOutput {
            fps: clock.fps(),
            counts: &report.counts,
            actions: rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let counts = &report.counts;
    println!("Recording: {}", path.display());
    println!("  Frames: {} @ {}fps", counts.frames, clock.fps());
    println!();

    println!("Stages:");
    println!("  Frame runs: {}", counts.runs);
    println!("  Tracks: {}", counts.tracks);
    println!("  Typed actions: {}", counts.typed);
    println!("  After opacity split: {}", counts.opacity_segmented);
    println!("  After merge: {}", counts.merged);
    println!("  After refinement: {}", counts.refined);
    println!();

    if rows.is_empty() {
        println!("No actions found.");
        return Ok(());
    }

    println!(
        "{:<11} {:>7} {:>7} {:>5} {:>8} {:>7} {:>8} {:>8} {:>7}",
        "TYPE", "FIRST", "LAST", "TAPS", "START", "DUR", "X", "Y", "OPAC"
    );
    for row in &rows {
        let opacity = row
            .mean_opacity
            .map(|o| format!("{o:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<11} {:>7} {:>7} {:>5} {:>7.2}s {:>6.2}s {:>8.1} {:>8.1} {:>7}",
            row.kind.label(),
            row.first_frame,
            row.last_frame,
            row.taps,
            row.start_secs,
            row.duration_secs,
            row.x,
            row.y,
            opacity
        );
    }

    Ok(())
}

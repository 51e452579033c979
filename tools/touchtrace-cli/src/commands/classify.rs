//! Classify detection files into GUI action lists.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::task::JoinSet;
use touchtrace_action_classifier::GuiActionClassifier;
use touchtrace_common::config::AppConfig;
use touchtrace_common::error::TouchtraceError;
use touchtrace_detection_model::{load_filtered_detections, serialize_actions, ActionType};

/// Outcome of one recording.
struct Summary {
    frames: usize,
    clicks: usize,
    long_clicks: usize,
    swipes: usize,
}

pub async fn run(
    app_config: &AppConfig,
    files: Vec<PathBuf>,
    profile: Option<String>,
    min_confidence: Option<f64>,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = app_config.classifier_for(profile.as_deref())?;
    if let Some(min_confidence) = min_confidence {
        config.min_touch_confidence = min_confidence;
        config.validate()?;
    }

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let classifier = GuiActionClassifier::new(config);
    println!("Classifying {} recording(s)...", files.len());

    let jobs = plan_outputs(files, output_dir.as_deref())?;

    // Recordings are independent; each runs on its own blocking task.
    let mut tasks = JoinSet::new();
    for (input, output) in jobs {
        let classifier = classifier.clone();
        tasks.spawn_blocking(move || {
            let result = classify_file(&classifier, &input, &output);
            (input, output, result)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (input, output, result) = joined.context("Classification task panicked")?;
        match result {
            Ok(summary) => println!(
                "  {} -> {} ({} frames: {} click, {} long click, {} swipe)",
                input.display(),
                output.display(),
                summary.frames,
                summary.clicks,
                summary.long_clicks,
                summary.swipes
            ),
            Err(e) => {
                failed += 1;
                tracing::error!(input = %input.display(), "classification failed: {e:#}");
                eprintln!("  {}: {e:#}", input.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} recording(s) failed to classify");
    }
    println!("\nClassification complete.");
    Ok(())
}

fn classify_file(
    classifier: &GuiActionClassifier,
    input: &Path,
    output: &Path,
) -> anyhow::Result<Summary> {
    let frames = load_filtered_detections(input, classifier.config().min_touch_confidence)
        .map_err(|e| TouchtraceError::detection(e.to_string()))?;

    let report = classifier
        .classify_with_report(&frames)
        .map_err(|e| TouchtraceError::classification(e.to_string()))?;

    let json = serialize_actions(&report.actions)?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(Summary {
        frames: report.counts.frames,
        clicks: report.count_of(ActionType::Click),
        long_clicks: report.count_of(ActionType::LongClick),
        swipes: report.count_of(ActionType::Swipe),
    })
}

/// `<stem>.actions.json` next to the input, or
/// `<recording dir>.<stem>.actions.json` inside `output_dir`.
///
/// The detector names every file `detection_full.json`, so the enclosing
/// recording directory keeps outputs from different recordings apart.
fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "detections".to_string());
    match output_dir {
        Some(dir) => {
            let recording = input
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned());
            match recording {
                Some(recording) => dir.join(format!("{recording}.{stem}.actions.json")),
                None => dir.join(format!("{stem}.actions.json")),
            }
        }
        None => input.with_file_name(format!("{stem}.actions.json")),
    }
}

/// Pair every input with its output path, refusing inputs that would
/// write to the same file.
fn plan_outputs(
    files: Vec<PathBuf>,
    output_dir: Option<&Path>,
) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());
    for input in files {
        let output = output_path(&input, output_dir);
        if let Some(previous) = claimed.insert(output.clone(), input.clone()) {
            anyhow::bail!(
                "{} and {} would both write {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
        jobs.push((input, output));
    }
    Ok(jobs)
}

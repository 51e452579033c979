use std::path::PathBuf;

use touchtrace_action_classifier::GuiActionClassifier;
use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{load_detections, Action, ActionType, Frame, FrameId, Tap};

fn frame_with(id: FrameId, taps: &[(f64, f64, Option<f64>)]) -> Frame {
    let mut frame = Frame::new(id);
    for &(x, y, opacity) in taps {
        let tap = Tap::new(id, x, y, 0.95);
        frame.push_tap(match opacity {
            Some(o) => tap.with_opacity(o),
            None => tap,
        });
    }
    frame
}

fn single_finger(
    ids: impl IntoIterator<Item = FrameId>,
    at: impl Fn(FrameId) -> (f64, f64, Option<f64>),
) -> Vec<Frame> {
    ids.into_iter().map(|id| frame_with(id, &[at(id)])).collect()
}

fn spans(actions: &[Action]) -> Vec<(ActionType, FrameId, FrameId)> {
    actions
        .iter()
        .filter_map(|a| a.frame_span().map(|(first, last)| (a.kind(), first, last)))
        .collect()
}

fn classify(frames: &[Frame]) -> Vec<Action> {
    GuiActionClassifier::with_defaults()
        .classify(frames)
        .expect("scenario frames are valid")
}

#[test]
fn held_press_is_a_long_click() {
    let frames = single_finger(1..=40, |_| (300.0, 500.0, Some(0.8)));
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::LongClick, 1, 40)]);
    let mean = actions[0].mean_opacity().unwrap();
    assert!((mean - 0.8).abs() < 1e-9);
}

#[test]
fn early_opacity_rise_keeps_one_long_click() {
    let frames = single_finger(1..=40, |i| {
        let opacity = if i < 5 { 0.1 } else { 0.95 };
        (100.0, 100.0, Some(opacity))
    });
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::LongClick, 1, 40)]);
    // The tap just before the rise is too early to split on and is discarded.
    assert_eq!(actions[0].len(), 39);
    assert!(!actions[0].frames().contains(&4));
}

#[test]
fn early_opacity_rise_can_shorten_a_long_click_to_a_click() {
    let frames = single_finger(1..=30, |i| {
        let opacity = if i < 5 { 0.1 } else { 0.95 };
        (100.0, 100.0, Some(opacity))
    });
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::Click, 1, 30)]);
    assert_eq!(actions[0].len(), 29);
}

#[test]
fn steady_drag_is_a_swipe() {
    let frames = single_finger(1..=10, |i| (45.0 * i as f64, 200.0, None));
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::Swipe, 1, 10)]);
    assert_eq!(actions[0].len(), 10);
}

#[test]
fn separated_taps_are_two_clicks() {
    let mut frames = single_finger(1..=5, |_| (50.0, 50.0, None));
    frames.extend(single_finger(20..=25, |_| (200.0, 200.0, None)));
    let actions = classify(&frames);

    assert_eq!(
        spans(&actions),
        vec![(ActionType::Click, 1, 5), (ActionType::Click, 20, 25)]
    );
}

#[test]
fn press_that_starts_moving_becomes_one_swipe() {
    let frames = single_finger(1..=15, |i| {
        if i <= 5 {
            (100.0, 100.0, None)
        } else {
            (102.0 + 33.0 * (i - 6) as f64, 100.0, None)
        }
    });
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::Swipe, 1, 15)]);
}

#[test]
fn click_and_adjacent_swipe_are_merged() {
    // The jump from frame 5 to 6 is too far to link but close enough to merge.
    let config = ClassifierConfig {
        tap_epsilon: 30.0,
        distance_merge_complex: 40.0,
        ..ClassifierConfig::default()
    };
    let frames = single_finger(1..=15, |i| {
        if i <= 5 {
            (100.0, 100.0, None)
        } else {
            (135.0 + 25.0 * (i - 6) as f64, 100.0, None)
        }
    });

    let report = GuiActionClassifier::new(config)
        .classify_with_report(&frames)
        .unwrap();
    assert_eq!(report.counts.tracks, 2);
    assert_eq!(report.counts.opacity_segmented, 2);
    assert!(report.counts.merged < report.counts.opacity_segmented);
    assert_eq!(spans(&report.actions), vec![(ActionType::Swipe, 1, 15)]);
    assert_eq!(report.actions[0].len(), 15);
}

#[test]
fn swipe_ending_in_a_hold_is_trimmed() {
    let path = [0.0, 40.0, 80.0, 120.0, 160.0, 163.0, 165.0, 162.0, 164.0];
    let frames = single_finger(1..=9, |i| (path[i as usize - 1], 300.0, None));
    let actions = classify(&frames);

    assert_eq!(spans(&actions), vec![(ActionType::Swipe, 1, 5)]);
    assert_eq!(actions[0].last_tap().map(|t| t.location.x), Some(160.0));
}

#[test]
fn overlapping_presses_split_on_opacity() {
    let frames = single_finger(1..=40, |i| {
        let opacity = if i <= 20 { 0.2 } else { 0.95 };
        (250.0, 250.0, Some(opacity))
    });
    let actions = classify(&frames);

    assert_eq!(
        spans(&actions),
        vec![(ActionType::Click, 1, 20), (ActionType::Click, 21, 40)]
    );
}

#[test]
fn two_fingers_at_once_stay_separate() {
    let frames: Vec<Frame> = (1..=10)
        .map(|id| frame_with(id, &[(100.0, 100.0, None), (600.0, 600.0, None)]))
        .collect();
    let actions = classify(&frames);

    assert_eq!(
        spans(&actions),
        vec![(ActionType::Click, 1, 10), (ActionType::Click, 1, 10)]
    );
    let xs: Vec<f64> = actions
        .iter()
        .filter_map(|a| a.first_tap().map(|t| t.location.x))
        .collect();
    assert_eq!(xs, vec![100.0, 600.0]);
}

#[test]
fn touch_during_a_swipe_is_dropped() {
    let frames: Vec<Frame> = (1..=20)
        .map(|id| {
            let swipe = (40.0 * id as f64, 100.0, None);
            if (5..=10).contains(&id) {
                frame_with(id, &[swipe, (600.0, 900.0, None)])
            } else {
                frame_with(id, &[swipe])
            }
        })
        .collect();

    let report = GuiActionClassifier::with_defaults()
        .classify_with_report(&frames)
        .unwrap();
    assert_eq!(report.counts.tracks, 2);
    assert_eq!(spans(&report.actions), vec![(ActionType::Swipe, 1, 20)]);
}

#[test]
fn flickering_detections_are_ignored() {
    let frames: Vec<Frame> = [1, 2, 3, 10, 11, 20]
        .into_iter()
        .map(|id| frame_with(id, &[(50.0, 50.0, None)]))
        .collect();
    assert!(classify(&frames).is_empty());
    assert!(classify(&[]).is_empty());
}

#[test]
fn custom_thresholds_change_typing() {
    let config = ClassifierConfig {
        long_click_frames: 8,
        ..ClassifierConfig::default()
    };
    let frames = single_finger(1..=10, |_| (10.0, 10.0, None));
    let actions = GuiActionClassifier::new(config).classify(&frames).unwrap();
    assert_eq!(spans(&actions), vec![(ActionType::LongClick, 1, 10)]);
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-recording")
        .join("detection_full.json")
}

#[test]
fn sample_recording_fixture_classifies() {
    let frames = load_detections(fixture_path()).expect("fixture detections should load");
    let classifier = GuiActionClassifier::with_defaults();
    let report = classifier
        .classify_with_report(&touchtrace_detection_model::filter_by_confidence(
            frames,
            classifier.config().min_touch_confidence,
        ))
        .expect("fixture frames should be valid");

    assert_eq!(
        spans(&report.actions),
        vec![
            (ActionType::Click, 1, 6),
            (ActionType::Swipe, 30, 41),
            (ActionType::LongClick, 60, 99),
        ]
    );
    assert_eq!(report.counts.frames, 63);
    assert_eq!(report.counts.runs, 3);

    let json = touchtrace_detection_model::serialize_actions(&report.actions).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["act_type"], "CLICK");
    assert_eq!(value[1]["act_type"], "SWIPE");
    assert_eq!(value[2]["act_type"], "LONG_CLICK");
    // Frame 61 precedes an opacity rise that comes too early to split on.
    assert_eq!(value[2]["frames"].as_array().map(Vec::len), Some(39));
}

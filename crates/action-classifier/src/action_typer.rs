//! Assigns an action type to each track.

use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{Action, ActionType, Tap};

/// Type a track by its length and its displacement from the first tap.
///
/// Any tap at least `swipes_threshold` away from the first tap makes the
/// track a swipe. Otherwise it is a long click when it spans at least
/// `long_click_frames` taps, and a click when shorter.
pub fn classify_track(track: &[Tap], config: &ClassifierConfig) -> ActionType {
    let moved = track.first().is_some_and(|initial| {
        track
            .iter()
            .any(|tap| tap.distance(initial) >= config.swipes_threshold)
    });

    if moved {
        ActionType::Swipe
    } else {
        press_type(track.len(), config)
    }
}

/// Click or long click purely from tap count.
pub fn press_type(tap_count: usize, config: &ClassifierConfig) -> ActionType {
    if tap_count >= config.long_click_frames {
        ActionType::LongClick
    } else {
        ActionType::Click
    }
}

/// Turn tracks into typed actions, one per track.
pub fn type_tracks(tracks: Vec<Vec<Tap>>, config: &ClassifierConfig) -> Vec<Action> {
    let actions: Vec<Action> = tracks
        .into_iter()
        .map(|track| {
            let kind = classify_track(&track, config);
            Action::from_taps(kind, track)
        })
        .collect();

    let swipes = actions
        .iter()
        .filter(|a| a.kind() == ActionType::Swipe)
        .count();
    tracing::debug!(
        actions = actions.len(),
        swipes,
        presses = actions.len() - swipes,
        "action typing"
    );
    actions
}

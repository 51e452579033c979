//! Opacity-based splitting of press actions.
//!
//! The on-screen touch indicator fades in for every new contact. When the
//! opacity confidence jumps from below `opacity_threshold` to at or above it
//! in the middle of a click, a second contact overlapped the tail of the
//! first one, and the action is split at that point.

use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{Action, ActionType, Tap};

use crate::action_typer::press_type;

/// Opacity rises across `threshold` between `current` and `next`.
///
/// A `next` tap without opacity signal (missing or exactly 0) never forms
/// a rising edge. A missing `current` value reads as 0.
pub fn is_rising_edge(current: &Tap, next: &Tap, threshold: f64) -> bool {
    match next.opacity_confidence {
        None => false,
        Some(next_opacity) if next_opacity == 0.0 => false,
        Some(next_opacity) => current.opacity_or_zero() < threshold && next_opacity >= threshold,
    }
}

/// Split one press action at opacity rising edges.
///
/// A split only happens once the pending sub-group holds more than
/// `tap_threshold` taps. A rising edge hit before that discards the tap
/// right before the edge. Every emitted piece is provisionally a click.
pub fn split_action(action: Action, config: &ClassifierConfig) -> Vec<Action> {
    let mut taps = action.into_taps().into_iter();
    let Some(mut current) = taps.next() else {
        return Vec::new();
    };

    let mut pieces = Vec::new();
    let mut group: Vec<Tap> = Vec::new();

    for next in taps {
        if !is_rising_edge(&current, &next, config.opacity_threshold) {
            group.push(current);
        } else if group.len() > config.tap_threshold {
            group.push(current);
            pieces.push(Action::from_taps(
                ActionType::Click,
                std::mem::take(&mut group),
            ));
        } else {
            tracing::trace!(
                frame = current.frame_id,
                "dropping tap before early opacity edge"
            );
        }
        current = next;
    }

    group.push(current);
    pieces.push(Action::from_taps(ActionType::Click, group));
    pieces
}

/// Re-type every non-swipe action from its tap count.
pub fn retype_presses(actions: &mut [Action], config: &ClassifierConfig) {
    for action in actions.iter_mut().filter(|a| a.kind() != ActionType::Swipe) {
        action.set_kind(press_type(action.len(), config));
    }
}

/// Split press actions by opacity, re-type them, and drop short actions.
///
/// Swipes pass through the split untouched, but the final length filter
/// applies to every action.
pub fn segment_by_opacity(actions: Vec<Action>, config: &ClassifierConfig) -> Vec<Action> {
    let mut segmented: Vec<Action> = actions
        .into_iter()
        .flat_map(|action| {
            if action.kind().is_press() {
                split_action(action, config)
            } else {
                vec![action]
            }
        })
        .collect();

    retype_presses(&mut segmented, config);

    let before = segmented.len();
    segmented.retain(|action| action.len() > config.tap_threshold);
    tracing::debug!(
        kept = segmented.len(),
        dropped = before - segmented.len(),
        "opacity segmentation"
    );
    segmented
}

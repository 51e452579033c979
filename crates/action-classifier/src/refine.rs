//! Final refinement of classified actions.
//!
//! 1. Actions whose frame range lies strictly inside a swipe are removed.
//! 2. Long clicks with a degenerate mean opacity (all ~0 or all ~1) are removed.
//! 3. Swipes lose their stationary tail.

use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{Action, ActionType};

/// Remove actions that lie strictly inside some swipe's frame range.
pub fn remove_swipe_contained(actions: Vec<Action>) -> Vec<Action> {
    let contained: Vec<bool> = actions
        .iter()
        .map(|action| {
            actions
                .iter()
                .filter(|a| a.kind() == ActionType::Swipe)
                .any(|swipe| swipe.strictly_contains(action))
        })
        .collect();

    actions
        .into_iter()
        .zip(contained)
        .filter_map(|(action, contained)| (!contained).then_some(action))
        .collect()
}

/// A long click whose opacity signal carries no information.
///
/// Long clicks without any opacity data are exempt.
pub fn is_degenerate_long_click(action: &Action, epsilon: f64) -> bool {
    if action.kind() != ActionType::LongClick {
        return false;
    }
    match action.mean_opacity() {
        Some(mean) => mean.abs() < epsilon || (1.0 - mean).abs() < epsilon,
        None => false,
    }
}

/// Number of trailing taps that barely moved from their predecessor.
pub fn stationary_tail_len(action: &Action, tail_distance: f64) -> usize {
    action
        .taps()
        .windows(2)
        .rev()
        .take_while(|pair| pair[1].distance(&pair[0]) < tail_distance)
        .count()
}

/// Cut the stationary tail off a swipe so it ends where motion stopped.
pub fn trim_stationary_tail(action: &mut Action, tail_distance: f64) {
    let tail = stationary_tail_len(action, tail_distance);
    if tail > 0 {
        action.truncate(action.len() - tail);
    }
}

/// Run all refinement steps in order.
pub fn refine_actions(actions: Vec<Action>, config: &ClassifierConfig) -> Vec<Action> {
    let before = actions.len();
    let mut refined = remove_swipe_contained(actions);
    let contained = before - refined.len();

    let before = refined.len();
    refined.retain(|a| !is_degenerate_long_click(a, config.degenerate_opacity_epsilon));
    let degenerate = before - refined.len();

    for swipe in refined
        .iter_mut()
        .filter(|a| a.kind() == ActionType::Swipe)
    {
        trim_stationary_tail(swipe, config.stationary_tail_distance);
    }

    tracing::debug!(
        kept = refined.len(),
        contained,
        degenerate,
        "refinement"
    );
    refined
}

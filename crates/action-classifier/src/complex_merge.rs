//! Fusing clicks into adjacent swipes.
//!
//! A click that ends right where a swipe begins (or begins right where a
//! swipe ends) is the same physical gesture split by earlier stages. The
//! merge is a single left-to-right fold with no backtracking.

use touchtrace_detection_model::{Action, ActionType};

/// Whether `next` should be fused into `current`.
pub fn can_merge(current: &Action, next: &Action, max_gap: f64) -> bool {
    let types_fit = matches!(
        (current.kind(), next.kind()),
        (ActionType::Click, ActionType::Swipe) | (ActionType::Swipe, ActionType::Click)
    );
    if !types_fit {
        return false;
    }

    let frame_adjacent = match (current.last_frame(), next.first_frame()) {
        (Some(last), Some(first)) => last.checked_add(1) == Some(first),
        _ => false,
    };

    let close = match (current.last_tap(), next.first_tap()) {
        (Some(last), Some(first)) => last.distance(first) < max_gap,
        _ => false,
    };

    frame_adjacent && close
}

/// Fold adjacent click/swipe pairs into swipes.
pub fn merge_complex_actions(actions: Vec<Action>, max_gap: f64) -> Vec<Action> {
    let mut actions = actions.into_iter();
    let Some(mut current) = actions.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in actions {
        if can_merge(&current, &next, max_gap) {
            current.absorb(next);
            current.set_kind(ActionType::Swipe);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);

    tracing::debug!(actions = merged.len(), "complex action merge");
    merged
}

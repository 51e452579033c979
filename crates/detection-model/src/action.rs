//! Classified GUI actions.
//!
//! An action owns an ordered list of taps and the matching frame ids.
//! The frame list is always derived from the taps, so `frames[i]` is the
//! frame of `taps[i]` for every action built through this API.

use serde::Serialize;

use crate::detection::{FrameId, Tap};
use crate::geometry::Point;

/// Gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Click,
    LongClick,
    Swipe,
}

impl ActionType {
    /// Label used in reports and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Click => "CLICK",
            ActionType::LongClick => "LONG_CLICK",
            ActionType::Swipe => "SWIPE",
        }
    }

    /// Click or long click, i.e. stationary contact.
    pub fn is_press(&self) -> bool {
        matches!(self, ActionType::Click | ActionType::LongClick)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed gesture made of consecutive taps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(rename = "act_type")]
    kind: ActionType,
    taps: Vec<Tap>,
    frames: Vec<FrameId>,
}

impl Action {
    /// Build an action; frame ids are taken from the taps.
    pub fn from_taps(kind: ActionType, taps: Vec<Tap>) -> Self {
        let frames = taps.iter().map(|tap| tap.frame_id).collect();
        Self { kind, taps, frames }
    }

    pub fn kind(&self) -> ActionType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ActionType) {
        self.kind = kind;
    }

    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn first_frame(&self) -> Option<FrameId> {
        self.frames.first().copied()
    }

    pub fn last_frame(&self) -> Option<FrameId> {
        self.frames.last().copied()
    }

    pub fn first_tap(&self) -> Option<&Tap> {
        self.taps.first()
    }

    pub fn last_tap(&self) -> Option<&Tap> {
        self.taps.last()
    }

    /// Inclusive `(first, last)` frame range.
    pub fn frame_span(&self) -> Option<(FrameId, FrameId)> {
        Some((self.first_frame()?, self.last_frame()?))
    }

    /// Mean location of the taps.
    pub fn centroid(&self) -> Option<Point> {
        Point::mean(self.taps.iter().map(|tap| &tap.location))
    }

    /// Mean opacity over the taps that carry an opacity value.
    ///
    /// `None` when no tap has opacity data.
    pub fn mean_opacity(&self) -> Option<f64> {
        let (count, sum) = self
            .taps
            .iter()
            .filter_map(|tap| tap.opacity_confidence)
            .fold((0usize, 0.0), |(n, s), o| (n + 1, s + o));
        (count > 0).then(|| sum / count as f64)
    }

    /// `self` starts strictly before and ends strictly after `other`.
    pub fn strictly_contains(&self, other: &Action) -> bool {
        match (self.frame_span(), other.frame_span()) {
            (Some((first, last)), Some((other_first, other_last))) => {
                first < other_first && last > other_last
            }
            _ => false,
        }
    }

    /// Append the taps and frames of `other` to this action.
    pub fn absorb(&mut self, other: Action) {
        self.taps.extend(other.taps);
        self.frames.extend(other.frames);
    }

    /// Keep only the first `len` taps and frames.
    pub fn truncate(&mut self, len: usize) {
        self.taps.truncate(len);
        self.frames.truncate(len);
    }

    pub fn into_taps(self) -> Vec<Tap> {
        self.taps
    }
}

/// Serialize actions to the downstream JSON list format.
pub fn serialize_actions(actions: &[Action]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(actions)
}

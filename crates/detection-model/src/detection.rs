//! Per-frame touch detections.
//!
//! The upstream detector writes one record per video frame that contains
//! at least one detected touch. Opacity confidence is produced by a second
//! model and may be absent when detections are first ingested.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::validation::{validate_frames, ValidationError};

/// Video frame identifier.
pub type FrameId = u64;

/// One detected touch point in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tap {
    #[serde(flatten)]
    pub location: Point,

    /// Confidence that this is a real touch.
    #[serde(rename = "confidence")]
    pub touch_confidence: f64,

    /// Confidence from the opacity model; `None` until that model has run.
    #[serde(rename = "confidenceOpacity")]
    pub opacity_confidence: Option<f64>,

    /// Frame this tap was detected in.
    #[serde(rename = "frame")]
    pub frame_id: FrameId,
}

impl Tap {
    pub fn new(frame_id: FrameId, x: f64, y: f64, touch_confidence: f64) -> Self {
        Self {
            location: Point::new(x, y),
            touch_confidence,
            opacity_confidence: None,
            frame_id,
        }
    }

    /// Builder-style setter for the opacity confidence.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity_confidence = Some(opacity);
        self
    }

    /// Distance between the locations of two taps.
    pub fn distance(&self, other: &Tap) -> f64 {
        self.location.distance(&other.location)
    }

    /// Opacity confidence, reading a missing value as 0.
    pub fn opacity_or_zero(&self) -> f64 {
        self.opacity_confidence.unwrap_or(0.0)
    }
}

/// All taps detected in one video frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(rename = "screenId")]
    pub id: FrameId,

    #[serde(rename = "screenTap")]
    pub taps: Vec<Tap>,
}

impl Frame {
    pub fn new(id: FrameId) -> Self {
        Self {
            id,
            taps: Vec::new(),
        }
    }

    /// Append a tap at `(x, y)` stamped with this frame's id.
    pub fn with_tap(mut self, x: f64, y: f64, touch_confidence: f64) -> Self {
        self.taps.push(Tap::new(self.id, x, y, touch_confidence));
        self
    }

    /// Append a fully specified tap, restamping its frame id.
    pub fn push_tap(&mut self, mut tap: Tap) {
        tap.frame_id = self.id;
        self.taps.push(tap);
    }
}

/// Detection record as written by the upstream detector.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionRecord {
    #[serde(rename = "screenId")]
    pub screen_id: FrameId,

    #[serde(rename = "screenTap", default)]
    pub screen_taps: Vec<TapRecord>,
}

/// Tap entry inside a [`DetectionRecord`].
#[derive(Debug, Clone, Deserialize)]
pub struct TapRecord {
    pub x: f64,
    pub y: f64,

    #[serde(rename = "confidence")]
    pub touch_confidence: f64,

    #[serde(rename = "confidenceOpacity", default)]
    pub opacity_confidence: Option<f64>,

    /// Some writers repeat the frame id on every tap.
    #[serde(default)]
    pub frame: Option<FrameId>,
}

impl TryFrom<DetectionRecord> for Frame {
    type Error = ValidationError;

    fn try_from(record: DetectionRecord) -> Result<Self, Self::Error> {
        let id = record.screen_id;
        let taps = record
            .screen_taps
            .into_iter()
            .enumerate()
            .map(|(slot, tap)| match tap.frame {
                Some(named) if named != id => Err(ValidationError::TapFrameMismatch {
                    frame_id: id,
                    slot,
                    tap_frame_id: named,
                }),
                _ => Ok(Tap {
                    location: Point::new(tap.x, tap.y),
                    touch_confidence: tap.touch_confidence,
                    opacity_confidence: tap.opacity_confidence,
                    frame_id: id,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Frame { id, taps })
    }
}

/// Errors that can occur while loading detections.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error: {source}")]
    ParseError { source: serde_json::Error },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parse detections from the detector's JSON array format.
///
/// Frame records keep their input order; taps are stamped with the id of
/// the record they appear in.
pub fn parse_detections(json: &str) -> Result<Vec<Frame>, DetectionError> {
    let records: Vec<DetectionRecord> =
        serde_json::from_str(json).map_err(|source| DetectionError::ParseError { source })?;
    let frames = records
        .into_iter()
        .map(Frame::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(frames)
}

/// Read and parse a detection file.
pub fn load_detections(path: impl AsRef<Path>) -> Result<Vec<Frame>, DetectionError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DetectionError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    parse_detections(&content)
}

/// Drop taps below `min_touch_confidence`, then drop frames left empty.
pub fn filter_by_confidence(frames: Vec<Frame>, min_touch_confidence: f64) -> Vec<Frame> {
    frames
        .into_iter()
        .filter_map(|mut frame| {
            frame
                .taps
                .retain(|tap| tap.touch_confidence >= min_touch_confidence);
            (!frame.taps.is_empty()).then_some(frame)
        })
        .collect()
}

/// Parse, filter, and validate in one step.
pub fn load_filtered_detections(
    path: impl AsRef<Path>,
    min_touch_confidence: f64,
) -> Result<Vec<Frame>, DetectionError> {
    let frames = filter_by_confidence(load_detections(path)?, min_touch_confidence);
    validate_frames(&frames)?;
    Ok(frames)
}

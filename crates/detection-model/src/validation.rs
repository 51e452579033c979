//! Input checks run before classification.

use crate::detection::{Frame, FrameId};

/// A precondition on the detection sequence does not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("frame {frame_id} does not follow frame {previous_id}: ids must be strictly ascending")]
    NonAscendingFrame {
        previous_id: FrameId,
        frame_id: FrameId,
    },

    #[error("frame {frame_id} has no taps; empty frames must be removed before classification")]
    EmptyFrame { frame_id: FrameId },

    #[error("tap {slot} of frame {frame_id} references frame {tap_frame_id}")]
    TapFrameMismatch {
        frame_id: FrameId,
        slot: usize,
        tap_frame_id: FrameId,
    },

    #[error("tap {slot} of frame {frame_id} has a non-finite location")]
    NonFiniteLocation { frame_id: FrameId, slot: usize },
}

/// Check that frames are strictly ascending, non-empty, and that every tap
/// belongs to the frame that holds it.
pub fn validate_frames(frames: &[Frame]) -> Result<(), ValidationError> {
    let mut previous: Option<FrameId> = None;

    for frame in frames {
        if let Some(previous_id) = previous {
            if frame.id <= previous_id {
                return Err(ValidationError::NonAscendingFrame {
                    previous_id,
                    frame_id: frame.id,
                });
            }
        }
        previous = Some(frame.id);

        if frame.taps.is_empty() {
            return Err(ValidationError::EmptyFrame { frame_id: frame.id });
        }

        for (slot, tap) in frame.taps.iter().enumerate() {
            if tap.frame_id != frame.id {
                return Err(ValidationError::TapFrameMismatch {
                    frame_id: frame.id,
                    slot,
                    tap_frame_id: tap.frame_id,
                });
            }
            if !tap.location.is_finite() {
                return Err(ValidationError::NonFiniteLocation {
                    frame_id: frame.id,
                    slot,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Tap;

    #[test]
    fn test_valid_sequence_with_gaps() {
        let frames = vec![
            Frame::new(1).with_tap(0.0, 0.0, 0.9),
            Frame::new(2).with_tap(1.0, 0.0, 0.9),
            Frame::new(10).with_tap(5.0, 5.0, 0.9),
        ];
        assert_eq!(validate_frames(&frames), Ok(()));
        assert_eq!(validate_frames(&[]), Ok(()));
    }

    #[test]
    fn test_rejects_repeated_frame_id() {
        let frames = vec![
            Frame::new(4).with_tap(0.0, 0.0, 0.9),
            Frame::new(4).with_tap(0.0, 0.0, 0.9),
        ];
        assert_eq!(
            validate_frames(&frames),
            Err(ValidationError::NonAscendingFrame {
                previous_id: 4,
                frame_id: 4
            })
        );
    }

    #[test]
    fn test_rejects_empty_frame() {
        let frames = vec![Frame::new(1).with_tap(0.0, 0.0, 0.9), Frame::new(2)];
        assert_eq!(
            validate_frames(&frames),
            Err(ValidationError::EmptyFrame { frame_id: 2 })
        );
    }

    #[test]
    fn test_rejects_misplaced_tap() {
        let mut frame = Frame::new(3);
        frame.taps.push(Tap::new(5, 1.0, 1.0, 0.9));
        let err = validate_frames(&[frame]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TapFrameMismatch {
                frame_id: 3,
                slot: 0,
                tap_frame_id: 5
            }
        );
        assert_eq!(err.to_string(), "tap 0 of frame 3 references frame 5");
    }

    #[test]
    fn test_rejects_nan_location() {
        let frames = vec![Frame::new(1).with_tap(f64::NAN, 0.0, 0.9)];
        assert_eq!(
            validate_frames(&frames),
            Err(ValidationError::NonFiniteLocation {
                frame_id: 1,
                slot: 0
            })
        );
    }
}

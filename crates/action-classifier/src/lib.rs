//! touchtrace Action Classifier
//!
//! Reconstructs GUI gestures from per-frame touch detections:
//! - **Frame runs:** split the recording at gaps in frame ids
//! - **Tap tracking:** link taps across frames into finger tracks
//! - **Typing:** click, long click, or swipe from length and displacement
//! - **Opacity segmentation:** split overlapping presses at indicator fade-ins
//! - **Complex merge:** fuse clicks into adjacent swipes
//! - **Refinement:** drop subsumed and degenerate actions, trim swipe tails
//!
//! This crate is pure computation: no I/O, no shared state.
//! All inputs are data; all outputs are data.

pub mod action_typer;
pub mod complex_merge;
pub mod frame_runs;
pub mod opacity;
pub mod pipeline;
pub mod refine;
pub mod tap_tracker;

pub use pipeline::{ClassificationReport, GuiActionClassifier, StageCounts};

//! touchtrace Common Utilities
//!
//! Shared infrastructure for all touchtrace crates:
//! - Error types and result aliases
//! - Frame clock for converting frame ids to time
//! - Tracing/logging initialization
//! - Configuration loading and per-device classifier profiles

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;

//! Application and classifier configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TouchtraceError, TouchtraceResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Classifier thresholds used when no profile is selected.
    pub classifier: ClassifierConfig,

    /// Named per-device threshold sets (e.g. "pixel-3", "nexus-5x").
    pub profiles: BTreeMap<String, ClassifierConfig>,

    /// Recording parameters.
    pub recording: RecordingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Thresholds that drive GUI action classification.
///
/// Distances are in screen pixels of the recorded video; counts are in frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum frame-run / track / action length to be meaningful.
    /// Anything at or below this many frames is noise.
    pub tap_threshold: usize,

    /// Tap count at which a stationary touch becomes a long click.
    pub long_click_frames: usize,

    /// Displacement from the first tap that turns a track into a swipe.
    pub swipes_threshold: f64,

    /// Maximum distance between taps on consecutive frames to link them.
    pub tap_epsilon: f64,

    /// Opacity confidence crossing point for rising-edge detection.
    pub opacity_threshold: f64,

    /// Maximum gap between a click and a swipe that still fuses them.
    pub distance_merge_complex: f64,

    /// Step size below which trailing swipe taps count as stationary.
    pub stationary_tail_distance: f64,

    /// Tolerance around 0 and 1 for a degenerate mean opacity.
    pub degenerate_opacity_epsilon: f64,

    /// Taps below this touch confidence are dropped before classification.
    pub min_touch_confidence: f64,
}

/// Recording parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingDefaults {
    /// Frame rate of the analysed video.
    pub fps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "touchtrace=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            profiles: BTreeMap::new(),
            recording: RecordingDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tap_threshold: 3,
            long_click_frames: 30,
            swipes_threshold: 50.0,
            tap_epsilon: 60.0,
            opacity_threshold: 0.9,
            distance_merge_complex: 40.0,
            stationary_tail_distance: 10.0,
            degenerate_opacity_epsilon: 1e-3,
            min_touch_confidence: 0.5,
        }
    }
}

impl Default for RecordingDefaults {
    fn default() -> Self {
        Self { fps: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl ClassifierConfig {
    /// Reject threshold sets the pipeline cannot run with.
    pub fn validate(&self) -> TouchtraceResult<()> {
        let distances = [
            ("swipes_threshold", self.swipes_threshold),
            ("tap_epsilon", self.tap_epsilon),
            ("distance_merge_complex", self.distance_merge_complex),
            ("stationary_tail_distance", self.stationary_tail_distance),
            ("degenerate_opacity_epsilon", self.degenerate_opacity_epsilon),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(TouchtraceError::config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !(self.opacity_threshold > 0.0 && self.opacity_threshold <= 1.0) {
            return Err(TouchtraceError::config(format!(
                "opacity_threshold must be in (0, 1], got {}",
                self.opacity_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.min_touch_confidence) {
            return Err(TouchtraceError::config(format!(
                "min_touch_confidence must be in [0, 1], got {}",
                self.min_touch_confidence
            )));
        }

        if self.long_click_frames == 0 {
            return Err(TouchtraceError::config(
                "long_click_frames must be at least 1",
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> TouchtraceResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TouchtraceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }

    /// Resolve the classifier thresholds for a device profile.
    ///
    /// `None` selects the top-level `classifier` section.
    pub fn classifier_for(&self, profile: Option<&str>) -> TouchtraceResult<ClassifierConfig> {
        let config = match profile {
            None => self.classifier.clone(),
            Some(name) => self
                .profiles
                .get(name)
                .cloned()
                .ok_or_else(|| TouchtraceError::UnknownProfile {
                    name: name.to_string(),
                })?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("touchtrace").join("config.json")
}

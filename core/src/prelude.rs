use crate::processing::{FilterParams, FlickParams, GestureThresholds, ZoneLayout};
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::HandTracker`]. Defaults reproduce the shipped
/// behaviour; every section can be omitted from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub gesture: GestureThresholds,
    pub filter: FilterParams,
    pub flick: FlickParams,
    pub zones: ZoneLayout,
    /// Hands scored below this by the detector are treated as absent.
    /// Zero disables the gate.
    pub min_confidence: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            gesture: GestureThresholds::default(),
            filter: FilterParams::default(),
            flick: FlickParams::default(),
            zones: ZoneLayout::default(),
            min_confidence: 0.0,
        }
    }
}

/// Failure to bring up the capture device or detection model.
///
/// Fatal to the tracking subsystem only; the host decides how to fall back.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InitializationError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("detection model could not be loaded: {0}")]
    ModelUnavailable(String),
}

/// Malformed landmark data for a single hand in a single frame.
///
/// Recovered locally by treating the hand as absent for that frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassificationDegenerate {
    #[error("expected 21 landmarks, found {found}")]
    WrongLandmarkCount { found: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
    #[error("unknown handedness label {0:?}")]
    UnknownHandedness(String),
    #[error("detection carries no handedness label")]
    MissingHandedness,
    #[error("wrist and middle knuckle coincide; hand scale is zero")]
    DegenerateScale,
}

pub type TrackerResult<T> = Result<T, InitializationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let config = TrackerConfig::default();
        assert_eq!(config.gesture.extended_ratio, 1.5);
        assert_eq!(config.gesture.curled_ratio, 1.2);
        assert_eq!(config.filter.min_cutoff, 1.0);
        assert_eq!(config.filter.beta, 0.007);
        assert_eq!(config.filter.derivative_cutoff, 1.0);
        assert_eq!(config.flick.threshold, 0.20);
        assert_eq!(config.zones.split, 0.5);
        assert!(config.zones.mirror_x);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"flick":{"threshold":0.3},"min_confidence":0.6}"#).unwrap();
        assert_eq!(config.flick.threshold, 0.3);
        assert_eq!(config.min_confidence, 0.6);
        assert_eq!(config.filter, FilterParams::default());
    }
}

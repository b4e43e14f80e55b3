use crate::landmark_interface::frame::{Handedness, LandmarkFrame, LandmarkPoint};
use crate::prelude::ClassificationDegenerate;
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};

/// One classification entry as the detector reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub category_name: String,
    #[serde(default)]
    pub score: f32,
}

/// Detector output for one video frame, before validation.
///
/// `landmarks[i]` and `handedness[i]` describe the same hand. Nothing here is
/// trusted until it passes through [`RawDetection::frames`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<f64>,
    #[serde(default)]
    pub landmarks: Vec<Vec<LandmarkPoint>>,
    #[serde(default)]
    pub handedness: Vec<Vec<RawCategory>>,
}

impl RawDetection {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn hand_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Validates each detected hand independently.
    pub fn frames(
        &self,
    ) -> impl Iterator<Item = Result<LandmarkFrame, ClassificationDegenerate>> + '_ {
        self.landmarks.iter().enumerate().map(move |(i, points)| {
            let category = self
                .handedness
                .get(i)
                .and_then(|categories| categories.first())
                .ok_or(ClassificationDegenerate::MissingHandedness)?;
            let handedness: Handedness = category.category_name.parse()?;
            LandmarkFrame::from_slice(points, handedness, category.score)
        })
    }

    /// Keeps the hands that validate and logs the rest.
    pub fn valid_frames(&self) -> Vec<LandmarkFrame> {
        let logger = LogManager::new();
        self.frames()
            .filter_map(|frame| match frame {
                Ok(frame) => Some(frame),
                Err(err) => {
                    logger.rejected_hand(&err);
                    None
                }
            })
            .collect()
    }
}

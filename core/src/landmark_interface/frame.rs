use crate::math::planar_distance;
use crate::prelude::ClassificationDegenerate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// One detector landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl LandmarkPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Detector-provided label for which physical hand was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl FromStr for Handedness {
    type Err = ClassificationDegenerate;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("left") {
            Ok(Self::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Ok(Self::Right)
        } else {
            Err(ClassificationDegenerate::UnknownHandedness(label.to_string()))
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated single-hand detection: exactly 21 finite landmarks plus the
/// detector's handedness label and confidence.
///
/// Fields are private so a frame cannot change after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [LandmarkPoint; LANDMARK_COUNT],
    handedness: Handedness,
    confidence: f32,
}

impl LandmarkFrame {
    pub fn new(
        points: [LandmarkPoint; LANDMARK_COUNT],
        handedness: Handedness,
        confidence: f32,
    ) -> Result<Self, ClassificationDegenerate> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ClassificationDegenerate::NonFiniteLandmark { index });
        }
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(Self {
            points,
            handedness,
            confidence,
        })
    }

    /// Validates an arbitrary-length landmark list from the detector.
    pub fn from_slice(
        points: &[LandmarkPoint],
        handedness: Handedness,
        confidence: f32,
    ) -> Result<Self, ClassificationDegenerate> {
        let points: [LandmarkPoint; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| ClassificationDegenerate::WrongLandmarkCount {
                    found: points.len(),
                })?;
        Self::new(points, handedness, confidence)
    }

    pub fn point(&self, index: usize) -> &LandmarkPoint {
        &self.points[index]
    }

    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Wrist to middle-finger knuckle; the unit every pose threshold scales by.
    pub fn hand_scale(&self) -> f32 {
        planar_distance(&self.points[WRIST], &self.points[MIDDLE_MCP])
    }

    /// Distance from a landmark to the wrist.
    pub fn reach(&self, index: usize) -> f32 {
        planar_distance(&self.points[index], &self.points[WRIST])
    }
}

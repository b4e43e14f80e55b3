//! Static pose classification from a single frame.
//!
//! Finger states are judged by fingertip-to-wrist distance as a multiple of
//! the hand scale (wrist to middle knuckle), so the result does not depend on
//! how far the hand is from the camera. The curled and extended bands leave a
//! gap between them; hands in transition land in [`Gesture::None`].

use crate::landmark_interface::{
    LandmarkFrame, INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP,
};
use crate::prelude::ClassificationDegenerate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gesture {
    Fist,
    Gun,
    Palm,
    None,
}

impl Gesture {
    pub const ALL: [Gesture; 4] = [Gesture::Fist, Gesture::Gun, Gesture::Palm, Gesture::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Fist => "FIST",
            Gesture::Gun => "GUN",
            Gesture::Palm => "PALM",
            Gesture::None => "NONE",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finger-state bands, as multiples of the hand scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// A tip farther than this from the wrist is extended.
    pub extended_ratio: f32,
    /// A tip nearer than this to the wrist is curled.
    pub curled_ratio: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            extended_ratio: 1.5,
            curled_ratio: 1.2,
        }
    }
}

/// Hand scale, or an error when it is zero or not a number.
pub fn check_scale(frame: &LandmarkFrame) -> Result<f32, ClassificationDegenerate> {
    let scale = frame.hand_scale();
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ClassificationDegenerate::DegenerateScale)
    }
}

struct FingerBands<'a> {
    frame: &'a LandmarkFrame,
    extended_limit: f32,
    curled_limit: f32,
}

impl FingerBands<'_> {
    fn extended(&self, tip: usize) -> bool {
        self.frame.reach(tip) > self.extended_limit
    }

    fn curled(&self, tip: usize) -> bool {
        self.frame.reach(tip) < self.curled_limit
    }
}

fn bands<'a>(frame: &'a LandmarkFrame, thresholds: &GestureThresholds) -> Option<FingerBands<'a>> {
    let scale = check_scale(frame).ok()?;
    Some(FingerBands {
        frame,
        extended_limit: thresholds.extended_ratio * scale,
        curled_limit: thresholds.curled_ratio * scale,
    })
}

/// Labels the hand pose. First match wins: FIST, then GUN, then PALM.
/// A degenerate hand is [`Gesture::None`].
pub fn classify(frame: &LandmarkFrame, thresholds: &GestureThresholds) -> Gesture {
    let Some(fingers) = bands(frame, thresholds) else {
        return Gesture::None;
    };

    // thumb is ignored for a fist
    if [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]
        .iter()
        .all(|&tip| fingers.curled(tip))
    {
        return Gesture::Fist;
    }

    if fingers.extended(INDEX_TIP)
        && fingers.extended(THUMB_TIP)
        && [MIDDLE_TIP, RING_TIP, PINKY_TIP]
            .iter()
            .all(|&tip| fingers.curled(tip))
    {
        return Gesture::Gun;
    }

    if [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP, THUMB_TIP]
        .iter()
        .all(|&tip| fingers.extended(tip))
    {
        return Gesture::Palm;
    }

    Gesture::None
}

/// Whether the index fingertip alone is extended.
pub fn index_extended(frame: &LandmarkFrame, thresholds: &GestureThresholds) -> bool {
    bands(frame, thresholds).is_some_and(|fingers| fingers.extended(INDEX_TIP))
}

use crate::landmark_interface::{LandmarkFrame, INDEX_MCP, THUMB_TIP};
use crate::math::planar_distance;
use crate::processing::Gesture;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickParams {
    /// Relative growth of the thumb-to-index-knuckle distance, frame over
    /// frame, that counts as a flick.
    pub threshold: f32,
}

impl Default for FlickParams {
    fn default() -> Self {
        Self { threshold: 0.20 }
    }
}

/// Detects a thumb flick: the thumb tip springing away from the index
/// knuckle between two consecutive observed frames while the hand holds GUN.
#[derive(Debug, Clone, Default)]
pub struct FlickDetector {
    params: FlickParams,
    last_distance: Option<f32>,
}

impl FlickDetector {
    pub fn new(params: FlickParams) -> Self {
        Self {
            params,
            last_distance: None,
        }
    }

    pub fn measure(frame: &LandmarkFrame) -> f32 {
        planar_distance(frame.point(THUMB_TIP), frame.point(INDEX_MCP))
    }

    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Feeds one observation and reports whether it is a flick.
    ///
    /// The reference distance advances on every call whatever the gesture,
    /// so a flick can fire on the frame the hand first enters GUN.
    pub fn update(&mut self, distance: f32, gesture: Gesture) -> bool {
        let fired = match self.last_distance {
            Some(last) if last > 0.0 => {
                (distance - last) / last > self.params.threshold && gesture == Gesture::Gun
            }
            _ => false,
        };
        self.last_distance = Some(distance);
        fired
    }

    pub fn observe(&mut self, frame: &LandmarkFrame, gesture: Gesture) -> bool {
        self.update(Self::measure(frame), gesture)
    }
}

use crate::landmark_interface::{LandmarkFrame, LandmarkPoint, INDEX_TIP, MIDDLE_MCP};
use crate::math::clamp_unit;
use crate::processing::{Gesture, Role};
use serde::{Deserialize, Serialize};

/// How the screen is shared: the pilot owns the left part, the gunner the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneLayout {
    /// Mirrored x at which the pilot's zone ends and the gunner's begins.
    pub split: f32,
    /// Undo the front camera's mirror image.
    pub mirror_x: bool,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            split: 0.5,
            mirror_x: true,
        }
    }
}

/// Maps a role's source landmark into that role's local unit square.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateNormalizer {
    layout: ZoneLayout,
}

impl CoordinateNormalizer {
    pub fn new(layout: ZoneLayout) -> Self {
        Self { layout }
    }

    /// Palm centre, except an aiming gunner follows the index fingertip.
    pub fn source_landmark(role: Role, gesture: Gesture) -> usize {
        match (role, gesture) {
            (Role::Gunner, Gesture::Gun) => INDEX_TIP,
            _ => MIDDLE_MCP,
        }
    }

    pub fn normalize(&self, role: Role, point: &LandmarkPoint) -> (f32, f32) {
        let x = if self.layout.mirror_x {
            1.0 - point.x
        } else {
            point.x
        };
        let split = self.layout.split;
        let local_x = match role {
            Role::Pilot => x / split,
            Role::Gunner => (x - split) / (1.0 - split),
        };
        (clamp_unit(local_x), clamp_unit(point.y))
    }

    pub fn locate(&self, role: Role, gesture: Gesture, frame: &LandmarkFrame) -> (f32, f32) {
        let source = frame.point(Self::source_landmark(role, gesture));
        self.normalize(role, source)
    }
}

use crate::processing::{Gesture, Role};
use serde::{Deserialize, Serialize};

/// Control signal for one role in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandState {
    /// Role-local, filtered, in `[0, 1]`.
    pub x: f32,
    /// Role-local, filtered, in `[0, 1]`.
    pub y: f32,
    pub gesture: Gesture,
    /// One-frame pulse; always false for the pilot.
    pub flick_detected: bool,
    /// Index fingertip is extended, whatever the overall gesture.
    pub index_extended: bool,
}

/// The published snapshot. `None` means no qualifying hand this frame, not
/// that the role's last coordinate became invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandsResult {
    pub pilot: Option<HandState>,
    pub gunner: Option<HandState>,
}

impl HandsResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<&HandState> {
        match role {
            Role::Pilot => self.pilot.as_ref(),
            Role::Gunner => self.gunner.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, role: Role, state: HandState) {
        match role {
            Role::Pilot => self.pilot = Some(state),
            Role::Gunner => self.gunner = Some(state),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pilot.is_none() && self.gunner.is_none()
    }
}

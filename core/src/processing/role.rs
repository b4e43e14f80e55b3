use crate::landmark_interface::Handedness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two control channels. Chosen by handedness label, not by where the
/// hand is on screen, and re-decided every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pilot,
    Gunner,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Pilot, Role::Gunner];

    pub fn for_handedness(handedness: Handedness) -> Self {
        match handedness {
            Handedness::Left => Role::Pilot,
            Handedness::Right => Role::Gunner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pilot => "pilot",
            Role::Gunner => "gunner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-frame role bookkeeping: the first hand seen with a label takes the
/// role and later hands with the same label are turned away.
#[derive(Debug, Default)]
pub struct RoleAssigner {
    pilot_taken: bool,
    gunner_taken: bool,
}

impl RoleAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, handedness: Handedness) -> Option<Role> {
        let role = Role::for_handedness(handedness);
        let slot = match role {
            Role::Pilot => &mut self.pilot_taken,
            Role::Gunner => &mut self.gunner_taken,
        };
        if *slot {
            return None;
        }
        *slot = true;
        Some(role)
    }

    pub fn is_taken(&self, role: Role) -> bool {
        match role {
            Role::Pilot => self.pilot_taken,
            Role::Gunner => self.gunner_taken,
        }
    }
}

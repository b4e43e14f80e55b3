pub mod facade;
pub mod source;

pub use facade::{HandTracker, RoleState, TrackerStatus};
pub use source::{LandmarkSource, ManualSource};

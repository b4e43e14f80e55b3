//! Hand-tracking core for two-role gesture control.
//!
//! Noisy per-frame hand landmarks from an external detector are classified
//! into poses, assigned to the pilot or gunner role by handedness, mapped into
//! each role's half of the screen, smoothed with a One-Euro filter and, for the
//! gunner, checked for thumb flicks. The result is published as one immutable
//! [`HandsResult`] snapshot per detection frame.

pub mod landmark_interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;
pub mod tracker;

pub use landmark_interface::{
    HandState, Handedness, HandsResult, LandmarkFrame, LandmarkPoint, RawDetection,
};
pub use prelude::{ClassificationDegenerate, InitializationError, TrackerConfig, TrackerResult};
pub use processing::{Gesture, Role};
pub use tracker::{HandTracker, LandmarkSource, ManualSource, TrackerStatus};

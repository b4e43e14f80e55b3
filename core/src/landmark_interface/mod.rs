pub mod frame;
pub mod raw;
pub mod snapshot;

pub use frame::{
    Handedness, LandmarkFrame, LandmarkPoint, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST,
};
pub use raw::{RawCategory, RawDetection};
pub use snapshot::{HandState, HandsResult};

#[cfg(test)]
pub(crate) mod fixtures;

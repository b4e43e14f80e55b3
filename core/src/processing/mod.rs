pub mod flick;
pub mod gesture;
pub mod normalize;
pub mod one_euro;
pub mod role;

pub use flick::{FlickDetector, FlickParams};
pub use gesture::{check_scale, classify, index_extended, Gesture, GestureThresholds};
pub use normalize::{CoordinateNormalizer, ZoneLayout};
pub use one_euro::{FilterParams, OneEuroFilter, OneEuroFilter2D};
pub use role::{Role, RoleAssigner};

pub mod geometry;
pub mod stats;

pub use geometry::{clamp_unit, planar_distance};
pub use stats::StatsHelper;

use crate::landmark_interface::LandmarkPoint;

/// Euclidean distance in the image plane. Depth is ignored.
pub fn planar_distance(a: &LandmarkPoint, b: &LandmarkPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Clamps into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

use crate::generator::template::{pose_points, HandPlacement};
use handcore::{
    Gesture, Handedness, InitializationError, LandmarkFrame, LandmarkPoint, LandmarkSource,
};
use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Script for the synthetic two-hand performer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Uniform per-coordinate jitter, in normalized image units.
    pub noise: f32,
    pub hand_scale: f32,
    pub pilot_gesture: Gesture,
    /// Radius of the pilot's circular path.
    pub pilot_orbit: f32,
    /// Seconds per pilot orbit.
    pub orbit_period: f32,
    pub gunner_gesture: Gesture,
    /// Half-width of the gunner's horizontal sweep.
    pub gunner_sweep: f32,
    /// Thumb flick every this many frames; 0 disables flicks.
    pub flick_every: u64,
    pub thumb_spread: f32,
    /// Thumb spread multiplier on a flick frame.
    pub flick_gain: f32,
    /// When false, initialization fails as if no camera were attached.
    pub camera_available: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            noise: 0.002,
            hand_scale: 0.1,
            pilot_gesture: Gesture::Fist,
            pilot_orbit: 0.1,
            orbit_period: 4.0,
            gunner_gesture: Gesture::Gun,
            gunner_sweep: 0.15,
            flick_every: 45,
            thumb_spread: 1.3,
            flick_gain: 1.4,
            camera_available: true,
        }
    }
}

/// Stands in for camera plus detector: poses two hands along a scripted path
/// with seeded jitter.
pub struct SyntheticSource {
    config: GeneratorConfig,
    rng: StdRng,
    enabled: bool,
    frames: u64,
}

impl SyntheticSource {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            enabled: false,
            frames: 0,
        }
    }

    fn is_flick_frame(&self) -> bool {
        self.config.flick_every > 0 && self.frames % self.config.flick_every == 0
    }

    fn jitter(&mut self, points: &mut [LandmarkPoint]) {
        let noise = self.config.noise;
        if noise <= 0.0 {
            return;
        }
        for point in points.iter_mut() {
            point.x += self.rng.gen_range(-noise..noise);
            point.y += self.rng.gen_range(-noise..noise);
        }
    }

    fn hand(
        &mut self,
        handedness: Handedness,
        gesture: Gesture,
        placement: HandPlacement,
    ) -> Option<LandmarkFrame> {
        let mut points = pose_points(gesture, &placement);
        self.jitter(&mut points);
        match LandmarkFrame::new(points, handedness, 0.95) {
            Ok(frame) => Some(frame),
            Err(err) => {
                warn!("synthetic {} hand rejected: {}", handedness, err);
                None
            }
        }
    }
}

impl LandmarkSource for SyntheticSource {
    fn initialize(&mut self) -> Result<(), InitializationError> {
        if !self.config.camera_available {
            return Err(InitializationError::DeviceUnavailable(
                "synthetic camera disabled".into(),
            ));
        }
        self.enabled = true;
        Ok(())
    }

    fn detect(&mut self, frame_timestamp_ms: f64) -> Vec<LandmarkFrame> {
        if !self.enabled {
            return Vec::new();
        }
        self.frames += 1;
        let t = (frame_timestamp_ms / 1000.0) as f32;
        let phase = 2.0 * PI * t / self.config.orbit_period.max(f32::EPSILON);

        // raw image coordinates: the left hand appears on the right of the
        // unmirrored frame
        let pilot = HandPlacement {
            palm: (
                0.75 + self.config.pilot_orbit * phase.cos(),
                0.5 + self.config.pilot_orbit * phase.sin(),
            ),
            scale: self.config.hand_scale,
            thumb_spread: self.config.thumb_spread,
        };
        let spread = if self.is_flick_frame() {
            self.config.thumb_spread * self.config.flick_gain
        } else {
            self.config.thumb_spread
        };
        let gunner = HandPlacement {
            palm: (0.25 + self.config.gunner_sweep * (0.5 * phase).sin(), 0.55),
            scale: self.config.hand_scale,
            thumb_spread: spread,
        };

        let pilot_gesture = self.config.pilot_gesture;
        let gunner_gesture = self.config.gunner_gesture;
        [
            self.hand(Handedness::Left, pilot_gesture, pilot),
            self.hand(Handedness::Right, gunner_gesture, gunner),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

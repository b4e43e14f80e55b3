use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use handcore::math::StatsHelper;
use handcore::processing::{check_scale, classify, CoordinateNormalizer, GestureThresholds};
use handcore::telemetry::TrackerMetrics;
use handcore::{
    Gesture, HandState, HandTracker, HandsResult, InitializationError, LandmarkFrame,
    LandmarkSource, Role,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GestureCounts {
    pub fist: usize,
    pub gun: usize,
    pub palm: usize,
    pub none: usize,
}

impl GestureCounts {
    fn record(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Fist => self.fist += 1,
            Gesture::Gun => self.gun += 1,
            Gesture::Palm => self.palm += 1,
            Gesture::None => self.none += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub frames_present: usize,
    pub gestures: GestureCounts,
    pub flicks: usize,
    /// Frame-to-frame RMS of the unfiltered role-local x.
    pub raw_jitter: f32,
    /// Same measure on the published x.
    pub filtered_jitter: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub frames: usize,
    pub pilot: RoleSummary,
    pub gunner: RoleSummary,
    pub last_hands: HandsResult,
    pub metrics: TrackerMetrics,
}

#[derive(Default)]
struct RoleTrace {
    gestures: GestureCounts,
    flicks: usize,
    raw_x: Vec<f32>,
    filtered_x: Vec<f32>,
}

impl RoleTrace {
    fn record(&mut self, state: &HandState, raw_x: Option<f32>) {
        self.gestures.record(state.gesture);
        if state.flick_detected {
            self.flicks += 1;
        }
        if let Some(raw_x) = raw_x {
            self.raw_x.push(raw_x);
            self.filtered_x.push(state.x);
        }
    }

    fn summary(&self) -> RoleSummary {
        let gestures = self.gestures;
        RoleSummary {
            frames_present: gestures.fist + gestures.gun + gestures.palm + gestures.none,
            gestures,
            flicks: self.flicks,
            raw_jitter: StatsHelper::jitter(&self.raw_x),
            filtered_jitter: StatsHelper::jitter(&self.filtered_x),
        }
    }
}

/// Forwards to the wrapped source and keeps a copy of the latest detection so
/// the runner can compare raw and published coordinates.
struct TapSource<S> {
    inner: S,
    last: Vec<LandmarkFrame>,
}

impl<S: LandmarkSource> LandmarkSource for TapSource<S> {
    fn initialize(&mut self) -> Result<(), InitializationError> {
        self.inner.initialize()
    }

    fn detect(&mut self, frame_timestamp_ms: f64) -> Vec<LandmarkFrame> {
        let frames = self.inner.detect(frame_timestamp_ms);
        self.last = frames.clone();
        frames
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.inner.set_enabled(enabled)
    }
}

fn raw_x(
    frames: &[LandmarkFrame],
    role: Role,
    normalizer: &CoordinateNormalizer,
    thresholds: &GestureThresholds,
) -> Option<f32> {
    frames
        .iter()
        .filter(|frame| check_scale(frame).is_ok())
        .find(|frame| Role::for_handedness(frame.handedness()) == role)
        .map(|frame| normalizer.locate(role, classify(frame, thresholds), frame).0)
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Drives a tracker over `source`, one tick per timestamp.
    pub fn execute<S: LandmarkSource>(
        &self,
        source: S,
        timestamps: &[f64],
    ) -> anyhow::Result<WorkflowResult> {
        let tracker_config = self.config.tracker;
        let tap = TapSource {
            inner: source,
            last: Vec::new(),
        };
        let mut tracker = HandTracker::new(tap, tracker_config);
        tracker.start().context("starting hand tracker")?;

        let normalizer = CoordinateNormalizer::new(tracker_config.zones);
        let mut pilot = RoleTrace::default();
        let mut gunner = RoleTrace::default();

        for &timestamp in timestamps {
            let hands = tracker.tick(timestamp);
            for role in Role::ALL {
                let Some(state) = hands.get(role) else {
                    continue;
                };
                let raw = raw_x(
                    &tracker.source().last,
                    role,
                    &normalizer,
                    &tracker_config.gesture,
                );
                match role {
                    Role::Pilot => pilot.record(state, raw),
                    Role::Gunner => gunner.record(state, raw),
                }
            }
        }

        Ok(WorkflowResult {
            frames: timestamps.len(),
            pilot: pilot.summary(),
            gunner: gunner.summary(),
            last_hands: tracker.hands(),
            metrics: tracker.metrics(),
        })
    }
}

//! Per-frame orchestration: classify, assign, normalize, filter, flick-check,
//! then publish one [`HandsResult`].
//!
//! The tracker is single-threaded. A tick runs once per new detector frame;
//! consumers read [`HandTracker::hands`] as often as they like in between and
//! always get a complete snapshot.

use crate::landmark_interface::{HandState, HandsResult, LandmarkFrame};
use crate::math::clamp_unit;
use crate::prelude::{InitializationError, TrackerConfig, TrackerResult};
use crate::processing::{
    check_scale, classify, index_extended, CoordinateNormalizer, FlickDetector, OneEuroFilter2D,
    Role, RoleAssigner,
};
use crate::telemetry::{LogManager, MetricsRecorder, TrackerMetrics};
use crate::tracker::source::LandmarkSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerStatus {
    Uninitialized,
    Running,
    Paused,
    Failed,
}

/// Memory a role keeps for the life of the tracker. Losing the hand, pausing
/// and resuming never reset it, so a returning hand does not snap.
#[derive(Debug, Clone)]
pub struct RoleState {
    position: OneEuroFilter2D,
    flick: Option<FlickDetector>,
}

impl RoleState {
    fn new(role: Role, config: &TrackerConfig) -> Self {
        Self {
            position: OneEuroFilter2D::new(config.filter),
            flick: (role == Role::Gunner).then(|| FlickDetector::new(config.flick)),
        }
    }

    /// Last filtered position, if the role has ever been seen.
    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.position.x.last_value().zip(self.position.y.last_value())
    }

    /// Reference thumb distance of the flick detector (gunner only).
    pub fn last_flick_distance(&self) -> Option<f32> {
        self.flick.as_ref().and_then(FlickDetector::last_distance)
    }
}

/// Turns detector frames into the two-role control snapshot.
pub struct HandTracker<S: LandmarkSource> {
    source: S,
    config: TrackerConfig,
    normalizer: CoordinateNormalizer,
    pilot: RoleState,
    gunner: RoleState,
    snapshot: HandsResult,
    last_frame_ms: Option<f64>,
    status: TrackerStatus,
    failure: Option<InitializationError>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<S: LandmarkSource> HandTracker<S> {
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self {
            source,
            normalizer: CoordinateNormalizer::new(config.zones),
            pilot: RoleState::new(Role::Pilot, &config),
            gunner: RoleState::new(Role::Gunner, &config),
            config,
            snapshot: HandsResult::empty(),
            last_frame_ms: None,
            status: TrackerStatus::Uninitialized,
            failure: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    /// Initializes the source. Runs at most once; later calls report the
    /// outcome of the first without touching the source again.
    pub fn start(&mut self) -> TrackerResult<()> {
        match self.status {
            TrackerStatus::Uninitialized => {}
            TrackerStatus::Failed => {
                return match &self.failure {
                    Some(err) => Err(err.clone()),
                    None => Ok(()),
                }
            }
            TrackerStatus::Running | TrackerStatus::Paused => return Ok(()),
        }

        match self.source.initialize() {
            Ok(()) => {
                self.status = TrackerStatus::Running;
                self.logger.record("hand tracking started");
                Ok(())
            }
            Err(err) => {
                self.logger.initialization_failed(&err);
                self.status = TrackerStatus::Failed;
                self.failure = Some(err.clone());
                self.snapshot = HandsResult::empty();
                Err(err)
            }
        }
    }

    pub fn status(&self) -> TrackerStatus {
        self.status
    }

    /// The latest published snapshot.
    pub fn hands(&self) -> HandsResult {
        self.snapshot
    }

    pub fn metrics(&self) -> TrackerMetrics {
        self.metrics.snapshot()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn role_state(&self, role: Role) -> &RoleState {
        match role {
            Role::Pilot => &self.pilot,
            Role::Gunner => &self.gunner,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Pauses or resumes capture. Role state is kept either way; while paused
    /// the snapshot reports both roles absent.
    pub fn set_enabled(&mut self, enabled: bool) {
        match (self.status, enabled) {
            (TrackerStatus::Running, false) => {
                self.source.set_enabled(false);
                self.status = TrackerStatus::Paused;
                self.snapshot = HandsResult::empty();
                self.logger.record("hand tracking paused");
            }
            (TrackerStatus::Paused, true) => {
                self.source.set_enabled(true);
                self.status = TrackerStatus::Running;
                self.logger.record("hand tracking resumed");
            }
            _ => {}
        }
    }

    /// Processes the detector frame stamped `frame_timestamp_ms` and returns
    /// the new snapshot. A repeated timestamp is not reprocessed.
    pub fn tick(&mut self, frame_timestamp_ms: f64) -> HandsResult {
        if self.status != TrackerStatus::Running {
            return self.snapshot;
        }
        if !frame_timestamp_ms.is_finite() {
            self.snapshot = HandsResult::empty();
            return self.snapshot;
        }
        if self.last_frame_ms == Some(frame_timestamp_ms) {
            self.metrics.record_duplicate();
            return self.snapshot;
        }

        let frames = self.source.detect(frame_timestamp_ms);
        self.process(frame_timestamp_ms, &frames)
    }

    fn process(&mut self, timestamp_ms: f64, frames: &[LandmarkFrame]) -> HandsResult {
        self.last_frame_ms = Some(timestamp_ms);
        let mut assigner = RoleAssigner::new();
        let mut next = HandsResult::empty();

        for frame in frames {
            if frame.confidence() < self.config.min_confidence {
                self.metrics.record_low_confidence();
                continue;
            }
            if let Err(err) = check_scale(frame) {
                self.logger.rejected_hand(&err);
                self.metrics.record_degenerate();
                continue;
            }
            let Some(role) = assigner.claim(frame.handedness()) else {
                self.metrics.record_role_conflict();
                continue;
            };
            let state = self.track(role, frame, timestamp_ms);
            next.set(role, state);
        }

        self.metrics.record_processed(frames.len());
        self.snapshot = next;
        self.logger.frame(timestamp_ms, &self.snapshot);
        self.snapshot
    }

    fn track(&mut self, role: Role, frame: &LandmarkFrame, timestamp_ms: f64) -> HandState {
        let gesture = classify(frame, &self.config.gesture);
        let index_extended = index_extended(frame, &self.config.gesture);
        let target = self.normalizer.locate(role, gesture, frame);

        let role_state = match role {
            Role::Pilot => &mut self.pilot,
            Role::Gunner => &mut self.gunner,
        };
        let (x, y) = role_state.position.filter(target, timestamp_ms);
        let flick_detected = role_state
            .flick
            .as_mut()
            .is_some_and(|detector| detector.observe(frame, gesture));
        if flick_detected {
            self.metrics.record_flick();
        }

        HandState {
            x: clamp_unit(x),
            y: clamp_unit(y),
            gesture,
            flick_detected,
            index_extended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark_interface::fixtures::HandBuilder;
    use crate::landmark_interface::{Handedness, LandmarkPoint, MIDDLE_MCP};
    use crate::processing::Gesture;
    use crate::tracker::source::ManualSource;

    const FRAME_MS: f64 = 1000.0 / 30.0;

    fn running_tracker() -> HandTracker<ManualSource> {
        let mut tracker = HandTracker::new(ManualSource::new(), TrackerConfig::default());
        tracker.start().unwrap();
        tracker
    }

    fn feed(
        tracker: &mut HandTracker<ManualSource>,
        frame: u32,
        hands: Vec<LandmarkFrame>,
    ) -> HandsResult {
        tracker.source_mut().submit(hands);
        tracker.tick(frame as f64 * FRAME_MS)
    }

    fn gunner_gun(thumb_distance: f32) -> LandmarkFrame {
        HandBuilder::gun(Handedness::Right)
            .thumb_to_index_knuckle(thumb_distance)
            .palm_at(0.3, 0.5)
            .build()
    }

    #[test]
    fn no_hands_reports_both_roles_absent() {
        let mut tracker = running_tracker();
        let hands = feed(&mut tracker, 1, Vec::new());
        assert_eq!(hands, HandsResult::empty());
        assert_eq!(tracker.hands(), tracker.hands());
        assert!(tracker.hands().is_empty());
    }

    #[test]
    fn handedness_selects_role() {
        let mut tracker = running_tracker();
        let hands = feed(
            &mut tracker,
            1,
            vec![
                HandBuilder::gun(Handedness::Right).build(),
                HandBuilder::fist(Handedness::Left).build(),
            ],
        );
        assert_eq!(hands.pilot.map(|h| h.gesture), Some(Gesture::Fist));
        assert_eq!(hands.gunner.map(|h| h.gesture), Some(Gesture::Gun));
        assert!(!hands.pilot.unwrap().flick_detected);
    }

    #[test]
    fn first_hand_with_a_label_wins() {
        let mut tracker = running_tracker();
        let hands = feed(
            &mut tracker,
            1,
            vec![
                HandBuilder::palm(Handedness::Right).palm_at(0.1, 0.5).build(),
                HandBuilder::fist(Handedness::Right).palm_at(0.4, 0.5).build(),
            ],
        );
        let gunner = hands.gunner.unwrap();
        assert_eq!(gunner.gesture, Gesture::Palm);
        assert!((gunner.x - 0.8).abs() < 1e-5);
        assert!(hands.pilot.is_none());
        assert_eq!(tracker.metrics().role_conflicts, 1);
    }

    #[test]
    fn pilot_palm_maps_into_left_half() {
        let mut tracker = running_tracker();
        let hands = feed(
            &mut tracker,
            1,
            vec![HandBuilder::palm(Handedness::Left).palm_at(0.75, 0.4).build()],
        );
        let pilot = hands.pilot.unwrap();
        assert!((pilot.x - 0.5).abs() < 1e-5);
        assert!((pilot.y - 0.4).abs() < 1e-5);
        assert!(pilot.index_extended);
    }

    #[test]
    fn aiming_gunner_follows_index_tip() {
        let mut tracker = running_tracker();
        let hands = feed(&mut tracker, 1, vec![gunner_gun(0.15)]);
        let gunner = hands.gunner.unwrap();
        assert_eq!(gunner.gesture, Gesture::Gun);
        // index tip sits 0.03 left of and 0.1 above the middle knuckle
        assert!((gunner.x - 0.46).abs() < 1e-4, "x {}", gunner.x);
        assert!((gunner.y - 0.4).abs() < 1e-4, "y {}", gunner.y);
    }

    #[test]
    fn flick_pulses_for_one_frame() {
        let mut tracker = running_tracker();
        let mut fired = Vec::new();
        for (i, distance) in [0.15, 0.15, 0.15, 0.195, 0.195].iter().enumerate() {
            let hands = feed(&mut tracker, i as u32 + 1, vec![gunner_gun(*distance)]);
            fired.push(hands.gunner.unwrap().flick_detected);
            if i == 3 {
                assert!(tracker.hands().gunner.unwrap().flick_detected);
                assert_eq!(tracker.hands(), hands);
            }
        }
        assert_eq!(fired, vec![false, false, false, true, false]);
        assert_eq!(tracker.metrics().flicks, 1);
    }

    #[test]
    fn pilot_never_flicks() {
        let mut tracker = running_tracker();
        for (i, distance) in [0.15, 0.15, 0.3].iter().enumerate() {
            let pilot = HandBuilder::gun(Handedness::Left)
                .thumb_to_index_knuckle(*distance)
                .build();
            let hands = feed(&mut tracker, i as u32 + 1, vec![pilot]);
            assert!(!hands.pilot.unwrap().flick_detected);
        }
        assert_eq!(tracker.role_state(Role::Pilot).last_flick_distance(), None);
    }

    #[test]
    fn duplicate_frame_is_not_reprocessed() {
        let mut tracker = running_tracker();
        let first = feed(&mut tracker, 1, vec![HandBuilder::fist(Handedness::Left).build()]);
        let again = feed(&mut tracker, 1, vec![HandBuilder::palm(Handedness::Right).build()]);
        assert_eq!(first, again);
        let metrics = tracker.metrics();
        assert_eq!(metrics.frames_processed, 1);
        assert_eq!(metrics.duplicate_frames, 1);
    }

    #[test]
    fn returning_hand_does_not_snap() {
        let mut tracker = running_tracker();
        for frame in 1..=10 {
            feed(
                &mut tracker,
                frame,
                vec![HandBuilder::palm(Handedness::Right).palm_at(0.1, 0.5).build()],
            );
        }
        for frame in 11..=15 {
            assert!(feed(&mut tracker, frame, Vec::new()).gunner.is_none());
        }
        let (held_x, _) = tracker.role_state(Role::Gunner).last_position().unwrap();
        assert!((held_x - 0.8).abs() < 1e-4);

        let hands = feed(
            &mut tracker,
            16,
            vec![HandBuilder::palm(Handedness::Right).palm_at(0.4, 0.5).build()],
        );
        let x = hands.gunner.unwrap().x;
        assert!(x > 0.3 && x < 0.8, "x {}", x);
    }

    #[test]
    fn pause_keeps_filter_memory() {
        let mut tracker = running_tracker();
        feed(
            &mut tracker,
            1,
            vec![HandBuilder::palm(Handedness::Left).palm_at(0.9, 0.5).build()],
        );

        tracker.set_enabled(false);
        assert_eq!(tracker.status(), TrackerStatus::Paused);
        assert!(tracker.hands().is_empty());
        let hands = feed(
            &mut tracker,
            2,
            vec![HandBuilder::palm(Handedness::Left).build()],
        );
        assert!(hands.is_empty());
        assert!(!tracker.source().is_enabled());

        tracker.set_enabled(true);
        assert_eq!(tracker.status(), TrackerStatus::Running);
        let hands = feed(
            &mut tracker,
            3,
            vec![HandBuilder::palm(Handedness::Left).palm_at(0.6, 0.5).build()],
        );
        // raw 0.9 -> 0.2, raw 0.6 -> 0.8; filtered output starts between them
        let x = hands.pilot.unwrap().x;
        assert!(x > 0.2 && x < 0.8, "x {}", x);
    }

    #[test]
    fn failed_initialization_is_reported_once_then_quiet() {
        let source =
            ManualSource::failing(InitializationError::ModelUnavailable("hand.task".into()));
        let mut tracker = HandTracker::new(source, TrackerConfig::default());
        assert_eq!(
            tracker.start(),
            Err(InitializationError::ModelUnavailable("hand.task".into()))
        );
        assert_eq!(tracker.status(), TrackerStatus::Failed);

        for frame in 1..5 {
            assert!(tracker.tick(frame as f64 * FRAME_MS).is_empty());
        }
        tracker.set_enabled(true);
        assert_eq!(tracker.status(), TrackerStatus::Failed);
        assert!(tracker.hands().is_empty());
        assert_eq!(tracker.metrics().frames_processed, 0);
    }

    #[test]
    fn ticks_before_start_are_ignored() {
        let mut tracker = HandTracker::new(ManualSource::new(), TrackerConfig::default());
        assert_eq!(tracker.status(), TrackerStatus::Uninitialized);
        assert!(tracker.tick(0.0).is_empty());
        assert_eq!(tracker.metrics().frames_processed, 0);
    }

    #[test]
    fn degenerate_hand_does_not_block_the_role() {
        let mut tracker = running_tracker();
        let flat = HandBuilder::palm(Handedness::Right)
            .point(MIDDLE_MCP, LandmarkPoint::new(0.5, 0.8, 0.0))
            .build();
        let hands = feed(
            &mut tracker,
            1,
            vec![flat, HandBuilder::gun(Handedness::Right).build()],
        );
        assert_eq!(hands.gunner.map(|h| h.gesture), Some(Gesture::Gun));
        assert_eq!(tracker.metrics().degenerate_hands, 1);
        assert_eq!(tracker.metrics().role_conflicts, 0);
    }

    #[test]
    fn confidence_gate_drops_weak_hands() {
        let config = TrackerConfig {
            min_confidence: 0.5,
            ..TrackerConfig::default()
        };
        let mut tracker = HandTracker::new(ManualSource::new(), config);
        tracker.start().unwrap();
        let hands = feed(
            &mut tracker,
            1,
            vec![
                HandBuilder::fist(Handedness::Left).confidence(0.3).build(),
                HandBuilder::fist(Handedness::Right).confidence(0.9).build(),
            ],
        );
        assert!(hands.pilot.is_none());
        assert!(hands.gunner.is_some());
        assert_eq!(tracker.metrics().low_confidence_hands, 1);
    }

    #[test]
    fn boxed_sources_are_accepted() {
        let source: Box<dyn LandmarkSource> = Box::new(ManualSource::new());
        let mut tracker = HandTracker::new(source, TrackerConfig::default());
        tracker.start().unwrap();
        assert!(tracker.tick(0.0).is_empty());
        assert_eq!(tracker.metrics().frames_processed, 1);
    }
}

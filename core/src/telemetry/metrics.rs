use serde::{Deserialize, Serialize};

/// Counters for one tracker. Owned by the tracker, so no locking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerMetrics {
    pub frames_processed: usize,
    pub duplicate_frames: usize,
    pub hands_seen: usize,
    pub role_conflicts: usize,
    pub degenerate_hands: usize,
    pub low_confidence_hands: usize,
    pub flicks: usize,
}

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: TrackerMetrics,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self, hands: usize) {
        self.inner.frames_processed += 1;
        self.inner.hands_seen += hands;
    }

    pub fn record_duplicate(&mut self) {
        self.inner.duplicate_frames += 1;
    }

    pub fn record_role_conflict(&mut self) {
        self.inner.role_conflicts += 1;
    }

    pub fn record_degenerate(&mut self) {
        self.inner.degenerate_hands += 1;
    }

    pub fn record_low_confidence(&mut self) {
        self.inner.low_confidence_hands += 1;
    }

    pub fn record_flick(&mut self) {
        self.inner.flicks += 1;
    }

    pub fn snapshot(&self) -> TrackerMetrics {
        self.inner
    }
}

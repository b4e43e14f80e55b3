use handcore::telemetry::TrackerMetrics;
use handcore::{HandsResult, TrackerStatus};
use serde::{Deserialize, Serialize};

/// What the bridge reports on `GET /status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BridgeStatus {
    pub status: TrackerStatus,
    pub metrics: TrackerMetrics,
    pub hands: HandsResult,
}

/// Body of `POST /enabled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnableRequest {
    pub enabled: bool,
}

use crate::gui_bridge::model::{BridgeStatus, EnableRequest};
use handcore::{HandTracker, HandsResult, ManualSource, RawDetection, TrackerConfig, TrackerResult};
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

struct BridgeState {
    tracker: HandTracker<ManualSource>,
    /// Stamp for posted detections that carry none.
    clock_ms: f64,
    frame_period_ms: f64,
}

/// Hosts a tracker for an external detector that posts its output over HTTP.
#[derive(Clone)]
pub struct GuiBridge {
    state: Arc<RwLock<BridgeState>>,
}

impl GuiBridge {
    pub fn new(config: TrackerConfig, frame_period_ms: f64) -> TrackerResult<Self> {
        let mut tracker = HandTracker::new(ManualSource::new(), config);
        tracker.start()?;
        Ok(Self {
            state: Arc::new(RwLock::new(BridgeState {
                tracker,
                clock_ms: 0.0,
                frame_period_ms,
            })),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, BridgeState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BridgeState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Feeds one detection through the tracker and returns the new snapshot.
    pub fn ingest(&self, raw: &RawDetection) -> HandsResult {
        let mut guard = self.write();
        let state = &mut *guard;
        let timestamp = match raw.timestamp_ms {
            Some(t) => t,
            None => state.clock_ms + state.frame_period_ms,
        };
        if timestamp.is_finite() {
            state.clock_ms = state.clock_ms.max(timestamp);
        }
        state.tracker.source_mut().submit_raw(raw);
        state.tracker.tick(timestamp)
    }

    pub fn hands(&self) -> HandsResult {
        self.read().tracker.hands()
    }

    pub fn status(&self) -> BridgeStatus {
        let guard = self.read();
        BridgeStatus {
            status: guard.tracker.status(),
            metrics: guard.tracker.metrics(),
            hands: guard.tracker.hands(),
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> BridgeStatus {
        self.write().tracker.set_enabled(enabled);
        self.status()
    }

    /// Serves the bridge on a background thread with its own runtime.
    pub fn serve(&self, addr: SocketAddr) -> thread::JoinHandle<()> {
        let bridge = self.clone();
        let bridge_filter = warp::any().map(move || bridge.clone());

        let hands_route = warp::path("hands")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: GuiBridge| warp::reply::json(&bridge.hands()));

        let status_route = warp::path("status")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: GuiBridge| warp::reply::json(&bridge.status()));

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter.clone())
            .map(|raw: RawDetection, bridge: GuiBridge| warp::reply::json(&bridge.ingest(&raw)));

        let enabled_route = warp::path("enabled")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .map(|request: EnableRequest, bridge: GuiBridge| {
                warp::reply::json(&bridge.set_enabled(request.enabled))
            });

        thread::spawn(move || {
            let routes = hands_route
                .or(status_route)
                .or(ingest_route)
                .or(enabled_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            info!("bridge listening on {}", addr);
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        })
    }
}

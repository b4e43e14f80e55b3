use crate::landmark_interface::{HandState, HandsResult};
use crate::prelude::{ClassificationDegenerate, InitializationError};
use log::{debug, error, info, warn};

/// Thin wrapper over the `log` facade with one method per event worth reporting.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn initialization_failed(&self, err: &InitializationError) {
        error!("hand tracking unavailable: {}", err);
    }

    pub fn rejected_hand(&self, err: &ClassificationDegenerate) {
        warn!("dropping hand: {}", err);
    }

    pub fn frame(&self, timestamp_ms: f64, hands: &HandsResult) {
        debug!(
            "frame {:.1}ms pilot={} gunner={}",
            timestamp_ms,
            describe(hands.pilot.as_ref()),
            describe(hands.gunner.as_ref()),
        );
    }
}

fn describe(state: Option<&HandState>) -> String {
    match state {
        Some(hand) => format!(
            "{}@({:.3},{:.3}){}",
            hand.gesture,
            hand.x,
            hand.y,
            if hand.flick_detected { " flick" } else { "" }
        ),
        None => "-".to_string(),
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

//! One Euro filter: an adaptive low-pass filter for jitter reduction.
//!
//! Smooth when the signal is still, responsive when it moves. The cutoff
//! frequency rises with the (smoothed) speed of the signal.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Frame period assumed for samples that arrive without a timestamp.
const UNTIMED_PERIOD_SECS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Cutoff (Hz) at rest; lower is smoother.
    pub min_cutoff: f32,
    /// Speed coefficient; higher trades smoothing for less lag in motion.
    pub beta: f32,
    /// Cutoff (Hz) for the derivative estimate.
    pub derivative_cutoff: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_cutoff: 1.0,
            beta: 0.007,
            derivative_cutoff: 1.0,
        }
    }
}

/// Exponential smoother whose first sample passes straight through.
#[derive(Debug, Clone, Copy, Default)]
struct LowPass {
    raw: f32,
    smoothed: f32,
    initialized: bool,
}

impl LowPass {
    fn filter(&mut self, value: f32, alpha: f32) -> f32 {
        let result = if self.initialized {
            alpha * value + (1.0 - alpha) * self.smoothed
        } else {
            self.initialized = true;
            value
        };
        self.raw = value;
        self.smoothed = result;
        result
    }
}

fn smoothing_factor(dt_secs: f32, cutoff: f32) -> f32 {
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / dt_secs)
}

/// One axis of One Euro filtering over millisecond timestamps.
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    params: FilterParams,
    value: LowPass,
    derivative: LowPass,
    last_timestamp_ms: Option<f64>,
}

impl OneEuroFilter {
    pub fn new(params: FilterParams) -> Self {
        Self {
            params,
            value: LowPass::default(),
            derivative: LowPass::default(),
            last_timestamp_ms: None,
        }
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Last filtered output, if any sample has been seen.
    pub fn last_value(&self) -> Option<f32> {
        self.value.initialized.then_some(self.value.smoothed)
    }

    /// Filters one sample taken at `timestamp_ms`.
    ///
    /// The first sample is returned unchanged. A sample whose timestamp does
    /// not advance past the previous one returns the previous output and
    /// leaves the state untouched.
    pub fn filter(&mut self, value: f32, timestamp_ms: f64) -> f32 {
        if !value.is_finite() || !timestamp_ms.is_finite() {
            return self.last_value().unwrap_or(0.0);
        }

        let Some(last_ms) = self.last_timestamp_ms else {
            self.last_timestamp_ms = Some(timestamp_ms);
            let alpha = smoothing_factor(UNTIMED_PERIOD_SECS, self.params.min_cutoff);
            return self.value.filter(value, alpha);
        };

        let dt = ((timestamp_ms - last_ms) / 1000.0) as f32;
        if dt <= 0.0 {
            return self.value.smoothed;
        }

        let speed = (value - self.value.raw) / dt;
        let smoothed_speed = self.derivative.filter(
            speed,
            smoothing_factor(dt, self.params.derivative_cutoff),
        );
        let cutoff = self.params.min_cutoff + self.params.beta * smoothed_speed.abs();
        let result = self.value.filter(value, smoothing_factor(dt, cutoff));
        self.last_timestamp_ms = Some(timestamp_ms);
        result
    }

    /// Filters a sample with no timestamp, assuming a 60 Hz frame period.
    /// The next timed sample restarts the clock without dropping the output.
    pub fn filter_untimed(&mut self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.last_value().unwrap_or(0.0);
        }
        self.last_timestamp_ms = None;
        let alpha = smoothing_factor(UNTIMED_PERIOD_SECS, self.params.min_cutoff);
        self.value.filter(value, alpha)
    }

    pub fn reset(&mut self) {
        self.value = LowPass::default();
        self.derivative = LowPass::default();
        self.last_timestamp_ms = None;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(FilterParams::default())
    }
}

/// Pair of One Euro filters for a 2D position.
#[derive(Debug, Clone, Default)]
pub struct OneEuroFilter2D {
    pub x: OneEuroFilter,
    pub y: OneEuroFilter,
}

impl OneEuroFilter2D {
    pub fn new(params: FilterParams) -> Self {
        Self {
            x: OneEuroFilter::new(params),
            y: OneEuroFilter::new(params),
        }
    }

    pub fn filter(&mut self, pos: (f32, f32), timestamp_ms: f64) -> (f32, f32) {
        (
            self.x.filter(pos.0, timestamp_ms),
            self.y.filter(pos.1, timestamp_ms),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

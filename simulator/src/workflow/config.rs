use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use handcore::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub frames: usize,
    pub fps: f64,
    pub tracker: TrackerConfig,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            fps: 30.0,
            tracker: TrackerConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(frames: usize, fps: f64, seed: u64, noise: f32) -> Self {
        Self {
            frames,
            fps,
            generator: GeneratorConfig {
                seed,
                noise,
                ..GeneratorConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn frame_period_ms(&self) -> f64 {
        1000.0 / self.fps.max(1.0)
    }

    /// Detector timestamps for a synthetic run.
    pub fn timestamps(&self) -> Vec<f64> {
        let period = self.frame_period_ms();
        (0..self.frames).map(|i| i as f64 * period).collect()
    }
}

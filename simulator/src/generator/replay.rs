use anyhow::Context;
use handcore::{InitializationError, LandmarkFrame, LandmarkSource, RawDetection};
use std::fs;
use std::path::Path;

/// Plays back recorded detector output, one JSON `RawDetection` per line.
pub struct ReplaySource {
    records: Vec<(f64, RawDetection)>,
    cursor: usize,
    enabled: bool,
}

impl ReplaySource {
    pub fn load<P: AsRef<Path>>(path: P, frame_period_ms: f64) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading replay {}", path_ref.display()))?;
        Self::parse(&contents, frame_period_ms)
            .with_context(|| format!("parsing replay {}", path_ref.display()))
    }

    /// Records without `timestampMs` are placed on a regular clock.
    pub fn parse(text: &str, frame_period_ms: f64) -> anyhow::Result<Self> {
        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let raw = RawDetection::from_json(line)
                .with_context(|| format!("line {}", line_no + 1))?;
            let timestamp = raw
                .timestamp_ms
                .unwrap_or(records.len() as f64 * frame_period_ms);
            records.push((timestamp, raw));
        }
        Ok(Self {
            records,
            cursor: 0,
            enabled: false,
        })
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.records.iter().map(|(t, _)| *t).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LandmarkSource for ReplaySource {
    fn initialize(&mut self) -> Result<(), InitializationError> {
        if self.records.is_empty() {
            return Err(InitializationError::DeviceUnavailable(
                "replay contains no frames".into(),
            ));
        }
        self.enabled = true;
        Ok(())
    }

    fn detect(&mut self, frame_timestamp_ms: f64) -> Vec<LandmarkFrame> {
        if !self.enabled {
            return Vec::new();
        }
        while self
            .records
            .get(self.cursor)
            .is_some_and(|(t, _)| *t < frame_timestamp_ms)
        {
            self.cursor += 1;
        }
        match self.records.get(self.cursor) {
            Some((t, raw)) if *t == frame_timestamp_ms => raw.valid_frames(),
            _ => Vec::new(),
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

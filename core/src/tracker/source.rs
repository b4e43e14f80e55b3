use crate::landmark_interface::{LandmarkFrame, RawDetection};
use crate::prelude::InitializationError;

/// The external detector: capture device plus landmark model.
pub trait LandmarkSource {
    /// Acquires the capture device and loads the model.
    fn initialize(&mut self) -> Result<(), InitializationError>;

    /// Hands found in the video frame stamped `frame_timestamp_ms`.
    fn detect(&mut self, frame_timestamp_ms: f64) -> Vec<LandmarkFrame>;

    /// Pauses or resumes capture.
    fn set_enabled(&mut self, enabled: bool);
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn initialize(&mut self) -> Result<(), InitializationError> {
        (**self).initialize()
    }

    fn detect(&mut self, frame_timestamp_ms: f64) -> Vec<LandmarkFrame> {
        (**self).detect(frame_timestamp_ms)
    }

    fn set_enabled(&mut self, enabled: bool) {
        (**self).set_enabled(enabled)
    }
}

/// Source for hosts that run the detector themselves and hand over its output.
///
/// Each [`ManualSource::submit`] replaces the pending frame; `detect` takes it.
#[derive(Debug, Default)]
pub struct ManualSource {
    pending: Vec<LandmarkFrame>,
    enabled: bool,
    failure: Option<InitializationError>,
}

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose initialization always fails with `err`.
    pub fn failing(err: InitializationError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn submit(&mut self, frames: Vec<LandmarkFrame>) {
        if self.enabled {
            self.pending = frames;
        }
    }

    /// Validates and submits raw detector output; returns the accepted count.
    pub fn submit_raw(&mut self, raw: &RawDetection) -> usize {
        let frames = raw.valid_frames();
        let accepted = frames.len();
        self.submit(frames);
        accepted
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl LandmarkSource for ManualSource {
    fn initialize(&mut self) -> Result<(), InitializationError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.enabled = true;
        Ok(())
    }

    fn detect(&mut self, _frame_timestamp_ms: f64) -> Vec<LandmarkFrame> {
        std::mem::take(&mut self.pending)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending.clear();
        }
    }
}

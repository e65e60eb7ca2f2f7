//! StreamSession: one connection's detection and tracking lifecycle.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, SessionError};
use crate::tracker::{Detection, IouTracker, TrackStore, TrackerConfig};

use super::DetectionSource;

/// Lifecycle of a stream session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Accepting frames
    #[default]
    Active,
    /// Terminal; the track store has been discarded
    Closed,
}

/// Annotated output for one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub detections: Vec<Detection>,
    pub width: u32,
    pub height: u32,
}

/// Tracks objects across the ordered frames of one stream.
///
/// A session owns its detector and its track store. Frames are applied one at
/// a time through `&mut self`, so two frames can never update the same store
/// concurrently. Nothing is shared between sessions.
pub struct StreamSession<D: DetectionSource> {
    id: u64,
    detector: D,
    tracker: IouTracker,
    state: SessionState,
}

impl<D: DetectionSource> StreamSession<D> {
    /// Create a new active session. Fails if `config` is invalid.
    pub fn new(id: u64, detector: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        let tracker = IouTracker::new(config)?;
        debug!(session_id = id, "stream session opened");
        Ok(Self {
            id,
            detector,
            tracker,
            state: SessionState::Active,
        })
    }

    /// Run detection on a frame and associate the result with this stream's
    /// tracks.
    ///
    /// If the detector fails the frame is skipped and the track store is left
    /// exactly as it was.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameResult, SessionError<D::Error>> {
        self.ensure_active()?;
        let detections = match self.detector.detect(input, width, height) {
            Ok(detections) => detections,
            Err(e) => {
                warn!(session_id = self.id, "detector failed, frame skipped");
                return Err(SessionError::Detector(e));
            }
        };
        self.apply_detections(detections, width, height)
    }

    /// Associate detector output that was obtained elsewhere.
    pub fn apply_detections(
        &mut self,
        detections: Vec<Detection>,
        width: u32,
        height: u32,
    ) -> Result<FrameResult, SessionError<D::Error>> {
        self.ensure_active()?;

        let min_confidence = self.tracker.config().confidence_threshold;
        let admitted: Vec<Detection> = detections
            .into_iter()
            .filter(|d| d.score >= min_confidence)
            .map(|mut d| {
                d.track_id = None;
                d
            })
            .collect();

        let detections = self.tracker.update(admitted);
        debug!(
            session_id = self.id,
            detections = detections.len(),
            tracks = self.tracker.store().len(),
            "frame associated"
        );

        Ok(FrameResult {
            detections,
            width,
            height,
        })
    }

    /// Close the session and discard its tracks. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.tracker.reset();
        self.state = SessionState::Closed;
        debug!(session_id = self.id, "stream session closed");
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &TrackStore {
        self.tracker.store()
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    fn ensure_active(&self) -> Result<(), SessionError<D::Error>> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Closed => Err(SessionError::Closed(self.id)),
        }
    }
}

//! Per-stream object tracking for streamed detector output.
//!
//! Each stream owns a [`StreamSession`] that filters a frame's detections by
//! confidence and associates them with the stream's tracks by greedy IoU
//! matching, so every returned detection carries a stable track id.

pub mod error;
pub mod integration;
pub mod protocol;
pub mod tracker;

#[cfg(feature = "server")]
pub mod server;

pub use error::{ConfigError, ProtocolError, RelayError, SessionError};
pub use integration::{
    DetectionBuilder, DetectionSource, FrameResult, RelayDetector, SessionState, StreamSession,
};
pub use tracker::{Detection, IouTracker, Rect, Track, TrackStore, TrackerConfig, associate};

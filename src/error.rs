//! Error types.

use thiserror::Error;

/// A tracker setting outside its accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
}

/// Failure to process a frame in a stream session.
///
/// A frame that fails leaves the session's tracks exactly as they were.
#[derive(Debug, Error)]
pub enum SessionError<E> {
    #[error("stream session {0} is closed")]
    Closed(u64),
    #[error("detector failed: {0}")]
    Detector(#[source] E),
}

/// A relayed detector payload that could not be decoded.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed detector payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// A client message that does not follow the stream protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid frame message: {0}")]
    InvalidFrame(#[from] serde_json::Error),
}

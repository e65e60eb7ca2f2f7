//! Messages exchanged over the frame stream.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::ProtocolError;
use crate::integration::FrameResult;

/// One incoming frame.
///
/// `detections` is kept as raw JSON and handed to the session's detector
/// untouched.
#[derive(Debug, Deserialize)]
pub struct FrameMessage {
    pub width: u32,
    pub height: u32,
    pub detections: Box<RawValue>,
}

impl FrameMessage {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The raw detector payload.
    pub fn payload(&self) -> &[u8] {
        self.detections.get().as_bytes()
    }
}

/// Outgoing message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Status { status: String },
    Detections(FrameResult),
    Error { message: String },
}

impl ServerMessage {
    pub fn connected() -> Self {
        Self::Status {
            status: "connected".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing these plain structs cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

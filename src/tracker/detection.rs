//! Per-frame detector output.

use serde::{Deserialize, Serialize};

use crate::tracker::rect::Rect;

/// One detector output for a single frame.
///
/// Serializes as a flat `{x1, y1, x2, y2, confidence, class, track_id}`
/// record. `track_id` is never read from input; it stays `None` until the
/// detection has been associated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    #[serde(flatten)]
    pub bbox: Rect,
    /// Detection confidence score
    #[serde(rename = "confidence")]
    pub score: f32,
    /// Detector class index
    #[serde(rename = "class", default)]
    pub class_id: u32,
    /// Identifier of the track this detection was assigned to
    #[serde(skip_deserializing)]
    pub track_id: Option<u64>,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self::from_rect(Rect::new(x1, y1, x2, y2), score)
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            score,
            class_id: 0,
            track_id: None,
        }
    }

    pub fn with_class(mut self, class_id: u32) -> Self {
        self.class_id = class_id;
        self
    }
}

//! Single object track for one stream.

use crate::tracker::rect::Rect;

/// Persistent per-object state.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier, never reused within a store
    pub track_id: u64,
    /// Last matched bounding box
    pub bbox: Rect,
    /// Consecutive frames since the track was last matched
    pub missed: u32,
}

impl Track {
    /// Create a new track seeded from a detection box.
    pub fn new(track_id: u64, bbox: Rect) -> Self {
        Self {
            track_id,
            bbox,
            missed: 0,
        }
    }

    /// Apply a matched detection box.
    pub fn update(&mut self, bbox: Rect) {
        self.bbox = bbox;
        self.missed = 0;
    }

    pub fn mark_missed(&mut self) {
        self.missed = self.missed.saturating_add(1);
    }

    pub fn is_stale(&self, max_missed: u32) -> bool {
        self.missed > max_missed
    }
}

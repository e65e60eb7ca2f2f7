//! Alive tracks of one stream plus its identifier counter.

use tracing::debug;

use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// The set of alive tracks for one stream.
///
/// Identifiers start at 1 and are handed out in strictly increasing order.
/// The counter never goes backwards, so an evicted identifier is never
/// reused for the lifetime of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackStore {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackStore {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The identifier the next new track will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, track_id: u64) -> Option<&Track> {
        self.tracks.iter().find(|t| t.track_id == track_id)
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    /// Start a new track at `bbox` and return its identifier.
    pub(crate) fn spawn(&mut self, bbox: Rect) -> u64 {
        let track_id = self.next_id;
        self.next_id += 1;
        self.tracks.push(Track::new(track_id, bbox));
        debug!(track_id, "track created");
        track_id
    }

    /// Bump `missed` on every track.
    pub(crate) fn mark_all_missed(&mut self) {
        for track in &mut self.tracks {
            track.mark_missed();
        }
    }

    /// Drop every track whose `missed` exceeds `max_missed`.
    ///
    /// Returns the number of evicted tracks.
    pub(crate) fn evict_stale(&mut self, max_missed: u32) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| {
            let stale = t.is_stale(max_missed);
            if stale {
                debug!(track_id = t.track_id, missed = t.missed, "track evicted");
            }
            !stale
        });
        before - self.tracks.len()
    }

    /// Forget every track. The identifier counter is kept.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

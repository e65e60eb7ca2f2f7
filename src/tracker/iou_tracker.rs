//! Frame-to-track association.

use serde::Deserialize;
use tracing::trace;

use crate::error::ConfigError;
use crate::tracker::detection::Detection;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::{Rect, overlap_matrix};
use crate::tracker::track_store::TrackStore;

/// Configuration for the IoU tracker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum detection confidence admitted into association
    pub confidence_threshold: f32,
    /// Minimum overlap to accept a detection-track match
    pub iou_threshold: f32,
    /// Consecutive unmatched frames a track survives before eviction
    pub max_missed: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            iou_threshold: 0.3,
            max_missed: 10,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::OutOfRange {
                name: "confidence_threshold",
                value: self.confidence_threshold,
                min: 0.0,
                max: 1.0,
            });
        }
        // A zero threshold would let disjoint boxes merge identities.
        if self.iou_threshold.is_nan() || self.iou_threshold <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "iou_threshold",
                value: self.iou_threshold,
            });
        }
        if self.iou_threshold > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "iou_threshold",
                value: self.iou_threshold,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

/// Associate one frame's detections with the tracks in `store`.
///
/// Every returned detection carries a track id: either the id of the track it
/// was matched to, or a freshly allocated one. Unmatched tracks age by one
/// frame and are evicted once they exceed `config.max_missed`. Detections are
/// returned in input order.
pub fn associate(
    mut detections: Vec<Detection>,
    store: &mut TrackStore,
    config: &TrackerConfig,
) -> Vec<Detection> {
    if detections.is_empty() {
        store.mark_all_missed();
        store.evict_stale(config.max_missed);
        return detections;
    }

    let det_rects: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
    let track_rects: Vec<Rect> = store.tracks().iter().map(|t| t.bbox).collect();
    let scores = overlap_matrix(&det_rects, &track_rects);

    let AssignmentResult {
        matches,
        unmatched_detections,
        unmatched_tracks,
    } = matching::greedy_assignment(&scores, config.iou_threshold);

    let tracks = store.tracks_mut();
    for (idet, itrack) in matches {
        let track = &mut tracks[itrack];
        track.update(detections[idet].bbox);
        detections[idet].track_id = Some(track.track_id);
        trace!(
            track_id = track.track_id,
            iou = scores[[idet, itrack]],
            "track matched"
        );
    }
    for itrack in unmatched_tracks {
        tracks[itrack].mark_missed();
    }

    store.evict_stale(config.max_missed);

    for idet in unmatched_detections {
        let det = &mut detections[idet];
        det.track_id = Some(store.spawn(det.bbox));
    }

    detections
}

/// IoU tracker for a single ordered frame stream.
///
/// Owns the stream's [`TrackStore`] and applies [`associate`] frame by frame.
#[derive(Debug, Clone)]
pub struct IouTracker {
    store: TrackStore,
    config: TrackerConfig,
}

impl IouTracker {
    /// Create a tracker with an empty store. Fails if `config` is invalid.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: TrackStore::new(),
            config,
        })
    }

    pub fn update(&mut self, detections: Vec<Detection>) -> Vec<Detection> {
        associate(detections, &mut self.store, &self.config)
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Drop every track. Identifiers already handed out stay retired.
    pub fn reset(&mut self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_missed: u32) -> TrackerConfig {
        TrackerConfig {
            max_missed,
            ..TrackerConfig::default()
        }
    }

    fn det(x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        Detection::new(x1, y1, x2, y2, 0.9)
    }

    fn ids(dets: &[Detection]) -> Vec<Option<u64>> {
        dets.iter().map(|d| d.track_id).collect()
    }

    #[test]
    fn test_new_object_gets_id_one() {
        let mut store = TrackStore::new();
        let out = associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &config(3));

        assert_eq!(ids(&out), vec![Some(1)]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.tracks()[0].track_id, 1);
        assert_eq!(store.tracks()[0].missed, 0);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn test_identical_detection_keeps_id() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        for _ in 0..3 {
            let out = associate(vec![det(10.0, 10.0, 50.0, 50.0)], &mut store, &cfg);
            assert_eq!(ids(&out), vec![Some(1)]);
            assert_eq!(store.tracks()[0].missed, 0);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_frames_drain_store() {
        let mut store = TrackStore::new();
        let cfg = config(2);
        associate(
            vec![det(0.0, 0.0, 10.0, 10.0), det(50.0, 50.0, 60.0, 60.0)],
            &mut store,
            &cfg,
        );
        let next_id = store.next_id();

        for frame in 0..=cfg.max_missed {
            assert_eq!(store.len(), 2, "evicted early at frame {frame}");
            let out = associate(Vec::new(), &mut store, &cfg);
            assert!(out.is_empty());
            assert_eq!(store.next_id(), next_id);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_matched_track_box_is_updated() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);

        let moved = det(1.0, 1.0, 11.0, 11.0);
        let out = associate(vec![moved.clone()], &mut store, &cfg);

        assert_eq!(ids(&out), vec![Some(1)]);
        assert_eq!(store.get(1).map(|t| t.bbox), Some(moved.bbox));
    }

    #[test]
    fn test_unmatched_track_ages_and_new_track_spawns() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);

        let out = associate(vec![det(100.0, 100.0, 110.0, 110.0)], &mut store, &cfg);

        assert_eq!(ids(&out), vec![Some(2)]);
        assert_eq!(store.get(1).map(|t| t.missed), Some(1));
        assert_eq!(store.get(2).map(|t| t.missed), Some(0));
    }

    #[test]
    fn test_reappearance_within_budget_keeps_id() {
        let mut store = TrackStore::new();
        let cfg = config(2);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);
        associate(Vec::new(), &mut store, &cfg);
        associate(Vec::new(), &mut store, &cfg);

        let out = associate(vec![det(0.5, 0.5, 10.5, 10.5)], &mut store, &cfg);
        assert_eq!(ids(&out), vec![Some(1)]);
    }

    #[test]
    fn test_reappearance_after_eviction_gets_new_id() {
        let mut store = TrackStore::new();
        let cfg = config(1);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);
        associate(Vec::new(), &mut store, &cfg);
        associate(Vec::new(), &mut store, &cfg);
        assert!(store.is_empty());

        let out = associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);
        assert_eq!(ids(&out), vec![Some(2)]);
    }

    #[test]
    fn test_eviction_applies_in_frames_with_detections() {
        let mut store = TrackStore::new();
        let cfg = config(0);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);

        associate(vec![det(200.0, 200.0, 210.0, 210.0)], &mut store, &cfg);
        assert!(store.get(1).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.tracks().iter().all(|t| t.missed <= cfg.max_missed));
    }

    #[test]
    fn test_equal_overlap_resolves_to_first_track() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        // Two tracks mirrored around the detection, so both score the same.
        associate(
            vec![det(0.0, 0.0, 10.0, 10.0), det(10.0, 0.0, 20.0, 10.0)],
            &mut store,
            &cfg,
        );

        let out = associate(vec![det(5.0, 0.0, 15.0, 10.0)], &mut store, &cfg);

        assert_eq!(ids(&out), vec![Some(1)]);
        assert_eq!(store.get(1).map(|t| t.missed), Some(0));
        assert_eq!(store.get(2).map(|t| t.missed), Some(1));
    }

    #[test]
    fn test_one_to_one_matching() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);

        // Both detections overlap track 1; only the better one may claim it.
        let out = associate(
            vec![det(2.0, 0.0, 12.0, 10.0), det(0.0, 0.0, 10.0, 10.0)],
            &mut store,
            &cfg,
        );

        assert_eq!(ids(&out), vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_associate_is_deterministic() {
        let cfg = config(3);
        let mut seed = TrackStore::new();
        associate(
            vec![
                det(0.0, 0.0, 10.0, 10.0),
                det(8.0, 0.0, 18.0, 10.0),
                det(40.0, 40.0, 60.0, 60.0),
            ],
            &mut seed,
            &cfg,
        );
        let frame = vec![
            det(4.0, 0.0, 14.0, 10.0),
            det(41.0, 41.0, 61.0, 61.0),
            det(300.0, 300.0, 310.0, 310.0),
        ];

        let mut a = seed.clone();
        let mut b = seed.clone();
        let out_a = associate(frame.clone(), &mut a, &cfg);
        let out_b = associate(frame, &mut b, &cfg);

        assert_eq!(out_a, out_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_detection_never_matches() {
        let mut store = TrackStore::new();
        let cfg = config(3);
        associate(vec![det(0.0, 0.0, 10.0, 10.0)], &mut store, &cfg);

        let out = associate(vec![det(5.0, 5.0, 5.0, 5.0)], &mut store, &cfg);
        assert_eq!(ids(&out), vec![Some(2)]);
        assert_eq!(store.get(1).map(|t| t.missed), Some(1));
    }

    #[test]
    fn test_config_validation() {
        assert!(TrackerConfig::default().validate().is_ok());

        let bad_conf = TrackerConfig {
            confidence_threshold: 1.5,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            bad_conf.validate(),
            Err(ConfigError::OutOfRange {
                name: "confidence_threshold",
                ..
            })
        ));

        let zero_iou = TrackerConfig {
            iou_threshold: 0.0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            zero_iou.validate(),
            Err(ConfigError::NotPositive { .. })
        ));

        let nan_iou = TrackerConfig {
            iou_threshold: f32::NAN,
            ..TrackerConfig::default()
        };
        assert!(nan_iou.validate().is_err());
    }

    #[test]
    fn test_iou_tracker_rejects_invalid_threshold() {
        for iou_threshold in [0.0, -0.1, f32::NAN] {
            let cfg = TrackerConfig {
                iou_threshold,
                ..TrackerConfig::default()
            };
            assert!(IouTracker::new(cfg).is_err(), "accepted {iou_threshold}");
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let cfg: TrackerConfig = serde_json::from_str(r#"{"iou_threshold": 0.45}"#).unwrap();
        assert_eq!(cfg.iou_threshold, 0.45);
        assert_eq!(cfg.confidence_threshold, 0.5);
        assert_eq!(cfg.max_missed, 10);

        let cfg: TrackerConfig = serde_json::from_str(r#"{"max_missed": 3}"#).unwrap();
        assert!(IouTracker::new(cfg).is_ok());
    }

    #[test]
    fn test_iou_tracker_reset_retires_ids() {
        let mut tracker = IouTracker::new(config(3)).unwrap();
        tracker.update(vec![det(0.0, 0.0, 10.0, 10.0)]);
        tracker.reset();
        assert!(tracker.store().is_empty());

        let out = tracker.update(vec![det(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(ids(&out), vec![Some(2)]);
    }
}

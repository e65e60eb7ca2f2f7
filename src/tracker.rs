mod detection;
mod iou_tracker;
mod matching;
mod rect;
mod track;
mod track_store;

pub use detection::Detection;
pub use iou_tracker::{IouTracker, TrackerConfig, associate};
pub use matching::{AssignmentResult, greedy_assignment};
pub use rect::{Rect, overlap, overlap_matrix};
pub use track::Track;
pub use track_store::TrackStore;

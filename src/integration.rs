//! Integration module for connecting detection backends with the tracker.
//!
//! This module provides the detector trait, input helpers and the per-stream
//! session that feeds detector output through association in arrival order.

mod builder;
mod detector;
mod relay;
mod session;

pub use builder::DetectionBuilder;
pub use detector::DetectionSource;
pub use relay::RelayDetector;
pub use session::{FrameResult, SessionState, StreamSession};

//! Server settings from flags and environment variables.

use std::net::SocketAddr;

use clap::Parser;

use crate::tracker::TrackerConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "facetrack-server", about = "Face tracking stream server")]
pub struct Settings {
    /// Application name reported in logs
    #[arg(long, env = "APP_NAME", default_value = "Face Karaoke AI")]
    pub app_name: String,

    /// Comma-separated list of origins allowed by CORS
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Minimum detection confidence admitted into tracking
    #[arg(long, env = "CONFIDENCE_THRESHOLD", default_value_t = 0.5)]
    pub confidence_threshold: f32,

    /// Minimum IoU to continue an existing track
    #[arg(long, env = "IOU_THRESHOLD", default_value_t = 0.3)]
    pub iou_threshold: f32,

    /// Consecutive frames a track may go unmatched before it is dropped
    #[arg(long, env = "MAX_MISSED_FRAMES", default_value_t = 10)]
    pub max_missed: u32,
}

impl Settings {
    /// Configured origins, trimmed, with empty entries dropped.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            max_missed: self.max_missed,
        }
    }
}

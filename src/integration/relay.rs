//! Detector output relayed from the client.

use crate::error::RelayError;
use crate::tracker::Detection;

use super::DetectionSource;

/// A `DetectionSource` for detectors that run upstream of the server.
///
/// The frame payload is the detector's raw output as a JSON array of
/// `{x1, y1, x2, y2, confidence, class}` objects. Decoding it is the
/// detection step, so a malformed payload fails the frame like any other
/// detector failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayDetector;

impl DetectionSource for RelayDetector {
    type Error = RelayError;

    fn detect(
        &mut self,
        input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        Ok(serde_json::from_slice(input)?)
    }
}

//! CaptionBurn Core Type Definitions
//!
//! Defines fundamental types shared across the crate.

use serde::{Deserialize, Serialize};

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

// =============================================================================
// Video Properties
// =============================================================================

/// Dimensions and timing of the source video, as reported by ffprobe.
///
/// Width and height drive the responsive font-size and margin computation
/// in the subtitle compiler; fps and duration are informational.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProperties {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (frames per second)
    pub fps: f64,
    /// Duration in seconds
    pub duration_sec: TimeSec,
}

impl VideoProperties {
    /// Width-to-height ratio; zero heights yield 0.0 instead of dividing by zero.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

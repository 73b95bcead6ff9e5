//! Subtitle Timestamp Formatting
//!
//! One shared implementation covering both target encodings; every component
//! that renders timestamps goes through here.

use crate::TimeSec;

/// Target timestamp encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimecodeFormat {
    /// ASS event time: `H:MM:SS.cc` (centiseconds, single-digit hour field)
    Ass,
    /// SRT cue time: `HH:MM:SS,mmm` (milliseconds, zero-padded hours)
    Srt,
}

/// Formats non-negative seconds in the requested encoding.
///
/// The sub-second fraction is truncated, not rounded, matching how players
/// interpret the trailing digits. Negative input is clamped to zero.
pub fn format_timestamp(seconds: TimeSec, format: TimecodeFormat) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    let whole = seconds as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    let fract = seconds.fract();

    match format {
        TimecodeFormat::Ass => {
            let centis = ((fract * 100.0) as u64).min(99);
            format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
        }
        TimecodeFormat::Srt => {
            let millis = ((fract * 1000.0) as u64).min(999);
            format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
        }
    }
}

/// Formats seconds as an ASS event timestamp (`H:MM:SS.cc`)
pub fn ass_timestamp(seconds: TimeSec) -> String {
    format_timestamp(seconds, TimecodeFormat::Ass)
}

/// Formats seconds as an SRT cue timestamp (`HH:MM:SS,mmm`)
pub fn srt_timestamp(seconds: TimeSec) -> String {
    format_timestamp(seconds, TimecodeFormat::Srt)
}

// =============================================================================
// Tests
// =============================================================================

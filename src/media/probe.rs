//! Video Probing
//!
//! Reads container and stream properties with `ffprobe -print_format json`.
//! Only the fields the caption pipeline consumes are parsed; the rest of the
//! probe output is ignored.

use std::path::Path;

use super::{MediaError, MediaResult};

/// Probed container properties plus the first video stream, if any
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// Container duration in seconds
    pub duration_sec: f64,
    /// First video stream, `None` for audio-only files
    pub video: Option<VideoStream>,
}

/// Properties of a probed video stream
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStream {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate in frames per second
    pub fps: f64,
}

/// Probes a media file for duration and video stream properties.
///
/// Uses the `ffprobe` binary on `PATH` unless an explicit path is given.
pub async fn probe_media(input: &Path, ffprobe_path: Option<&str>) -> MediaResult<MediaInfo> {
    if !input.exists() {
        return Err(MediaError::InputNotFound(
            input.to_string_lossy().to_string(),
        ));
    }

    let ffprobe = ffprobe_path.unwrap_or("ffprobe");
    let output = tokio::process::Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            &input.to_string_lossy(),
        ])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::ProbeFailed(stderr.to_string()));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parses ffprobe JSON into [`MediaInfo`]
fn parse_probe_output(json_str: &str) -> MediaResult<MediaInfo> {
    let json: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| MediaError::ProbeParse(e.to_string()))?;

    let format = json
        .get("format")
        .ok_or_else(|| MediaError::ProbeParse("missing format section".to_string()))?;

    // ffprobe emits numeric fields as JSON strings
    let duration_sec = format
        .get("duration")
        .and_then(|d| d.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let video = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.get("codec_type").and_then(|c| c.as_str()) == Some("video"))
        })
        .map(parse_video_stream);

    Ok(MediaInfo {
        duration_sec,
        video,
    })
}

fn parse_video_stream(stream: &serde_json::Value) -> VideoStream {
    let width = stream.get("width").and_then(|w| w.as_u64()).unwrap_or(0) as u32;
    let height = stream.get("height").and_then(|h| h.as_u64()).unwrap_or(0) as u32;

    // r_frame_rate is a fraction such as "30/1" or "30000/1001"
    let fps = stream
        .get("r_frame_rate")
        .and_then(|f| f.as_str())
        .and_then(parse_frame_rate)
        .unwrap_or(30.0);

    VideoStream { width, height, fps }
}

fn parse_frame_rate(raw: &str) -> Option<f64> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            (den > 0.0).then(|| num / den)
        }
        None => raw.parse().ok(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output_with_video() {
        let json = r#"{
            "format": { "duration": "12.480000" },
            "streams": [
                {
                    "codec_type": "audio",
                    "codec_name": "aac",
                    "sample_rate": "48000"
                },
                {
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1080,
                    "height": 1920,
                    "r_frame_rate": "30/1"
                }
            ]
        }"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.duration_sec, 12.48);

        let video = info.video.unwrap();
        assert_eq!(video.width, 1080);
        assert_eq!(video.height, 1920);
        assert_eq!(video.fps, 30.0);
    }

    #[test]
    fn test_parse_fractional_frame_rate() {
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("24"), Some(24.0));
        assert_eq!(parse_frame_rate("30/0"), None);
        assert_eq!(parse_frame_rate("garbage"), None);
    }

    #[test]
    fn test_parse_probe_output_audio_only() {
        let json = r#"{
            "format": { "duration": "3.0" },
            "streams": [
                { "codec_type": "audio", "codec_name": "mp3" }
            ]
        }"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.duration_sec, 3.0);
        assert!(info.video.is_none());
    }

    #[test]
    fn test_parse_probe_output_missing_format() {
        let result = parse_probe_output(r#"{ "streams": [] }"#);
        assert!(matches!(result, Err(MediaError::ProbeParse(_))));
    }

    #[test]
    fn test_parse_probe_output_invalid_json() {
        assert!(parse_probe_output("not json").is_err());
    }

    #[tokio::test]
    async fn test_probe_missing_input() {
        let result = probe_media(Path::new("/nonexistent/clip.mp4"), None).await;
        assert!(matches!(result, Err(MediaError::InputNotFound(_))));
    }
}

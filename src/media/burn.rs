//! Subtitle Burn-in
//!
//! Re-encodes a video with an ASS track composited into the picture via the
//! ffmpeg `ass` filter. The audio stream is copied through untouched.

use std::path::Path;

use tracing::debug;

use super::{MediaError, MediaResult};

/// Burns an ASS subtitle file into a video.
///
/// Re-encodes video with libx264 (`-preset fast`) and stream-copies audio.
/// The output is overwritten if it exists; its parent directory is created
/// when missing. Uses the `ffmpeg` binary on `PATH` unless an explicit path
/// is given.
pub async fn burn_subtitles(
    input: &Path,
    ass_path: &Path,
    output: &Path,
    ffmpeg_path: Option<&str>,
) -> MediaResult<()> {
    if !input.exists() {
        return Err(MediaError::InputNotFound(
            input.to_string_lossy().to_string(),
        ));
    }
    if !ass_path.exists() {
        return Err(MediaError::InputNotFound(
            ass_path.to_string_lossy().to_string(),
        ));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let filter = subtitle_filter(ass_path);
    debug!(input = %input.display(), filter = %filter, "starting burn-in encode");

    let ffmpeg = ffmpeg_path.unwrap_or("ffmpeg");
    let result = tokio::process::Command::new(ffmpeg)
        .args([
            "-i",
            &input.to_string_lossy(),
            "-vf",
            &filter,
            "-c:v",
            "libx264",
            "-preset",
            "fast",
            "-c:a",
            "copy",
            "-y",
            &output.to_string_lossy(),
        ])
        .output()
        .await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(MediaError::EncodeFailed(stderr.to_string()));
    }

    Ok(())
}

/// Builds the `-vf` argument, escaping the characters the filter parser
/// treats specially in filenames.
fn subtitle_filter(ass_path: &Path) -> String {
    let escaped = ass_path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'");
    format!("ass={}", escaped)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_subtitle_filter_plain_path() {
        assert_eq!(
            subtitle_filter(Path::new("/tmp/captions.ass")),
            "ass=/tmp/captions.ass"
        );
    }

    #[test]
    fn test_subtitle_filter_escapes_special_chars() {
        assert_eq!(
            subtitle_filter(Path::new("/tmp/a:b's.ass")),
            "ass=/tmp/a\\:b\\'s.ass"
        );
    }

    #[tokio::test]
    async fn test_burn_missing_input() {
        let result = burn_subtitles(
            Path::new("/nonexistent/clip.mp4"),
            Path::new("/nonexistent/captions.ass"),
            Path::new("/tmp/out.mp4"),
            None,
        )
        .await;
        assert!(matches!(result, Err(MediaError::InputNotFound(_))));
    }

    #[tokio::test]
    async fn test_burn_missing_subtitle_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("clip.mp4");
        std::fs::write(&input, b"stub").unwrap();

        let result = burn_subtitles(
            &input,
            Path::new("/nonexistent/captions.ass"),
            &temp_dir.path().join("out.mp4"),
            None,
        )
        .await;
        assert!(matches!(result, Err(MediaError::InputNotFound(_))));
    }
}

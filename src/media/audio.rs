//! Audio Extraction
//!
//! Pulls the audio track out of a video as 16kHz mono 16-bit PCM WAV, the
//! input format the transcription engine expects, and loads WAV samples back
//! as normalized f32.

use std::path::Path;
use std::process::Command;

use super::{MediaError, MediaResult};

/// Sample rate required by the transcription engine
const TRANSCRIPTION_SAMPLE_RATE: u32 = 16_000;

// =============================================================================
// Extraction
// =============================================================================

/// Extracts audio from a video or audio file as 16kHz mono WAV.
///
/// Blocks on the ffmpeg process; use
/// [`extract_audio_for_transcription_async`] from async contexts. Uses the
/// `ffmpeg` binary on `PATH` unless an explicit path is given.
pub fn extract_audio_for_transcription(
    input_path: &Path,
    output_path: &Path,
    ffmpeg_path: Option<&str>,
) -> MediaResult<()> {
    if !input_path.exists() {
        return Err(MediaError::InputNotFound(
            input_path.to_string_lossy().to_string(),
        ));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(MediaError::OutputDirNotFound(
                parent.to_string_lossy().to_string(),
            ));
        }
    }

    let ffmpeg = ffmpeg_path.unwrap_or("ffmpeg");
    let output = Command::new(ffmpeg)
        .args([
            "-i",
            &input_path.to_string_lossy(),
            "-ar",
            "16000",
            "-ac",
            "1",
            "-c:a",
            "pcm_s16le",
            "-y",
            &output_path.to_string_lossy(),
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::EncodeFailed(stderr.to_string()));
    }

    Ok(())
}

/// Extracts audio without blocking the async runtime.
pub async fn extract_audio_for_transcription_async(
    input_path: &Path,
    output_path: &Path,
    ffmpeg_path: Option<&str>,
) -> MediaResult<()> {
    let input = input_path.to_path_buf();
    let output = output_path.to_path_buf();
    let ffmpeg = ffmpeg_path.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || {
        extract_audio_for_transcription(&input, &output, ffmpeg.as_deref())
    })
    .await
    .map_err(|e| MediaError::EncodeFailed(e.to_string()))?
}

// =============================================================================
// Sample Loading
// =============================================================================

/// Loads a 16kHz mono WAV as f32 samples normalized to [-1.0, 1.0].
///
/// Rejects files that are not 16kHz mono, since feeding the engine resampled
/// or multichannel audio silently degrades timestamps.
pub fn load_audio_samples(wav_path: &Path) -> MediaResult<Vec<f32>> {
    let reader = hound::WavReader::open(wav_path)
        .map_err(|e| MediaError::AudioFormat(format!("failed to open WAV: {}", e)))?;

    let spec = reader.spec();

    if spec.sample_rate != TRANSCRIPTION_SAMPLE_RATE {
        return Err(MediaError::AudioFormat(format!(
            "expected 16kHz sample rate, got {} Hz",
            spec.sample_rate
        )));
    }

    if spec.channels != 1 {
        return Err(MediaError::AudioFormat(format!(
            "expected mono audio, got {} channels",
            spec.channels
        )));
    }

    let samples = match spec.bits_per_sample {
        16 => reader
            .into_samples::<i16>()
            .filter_map(Result::ok)
            .map(|s| s as f32 / 32768.0)
            .collect(),
        32 => reader
            .into_samples::<i32>()
            .filter_map(Result::ok)
            .map(|s| s as f32 / 2147483648.0)
            .collect(),
        bits => {
            return Err(MediaError::AudioFormat(format!(
                "unsupported bit depth: {}",
                bits
            )));
        }
    };

    Ok(samples)
}

// =============================================================================
// Tests
// =============================================================================

//! Media Collaborators
//!
//! Wraps the external encoder tooling (ffmpeg/ffprobe) and WAV decoding:
//!
//! - `probe` reads stream properties via ffprobe JSON output
//! - `audio` extracts 16kHz mono WAV for transcription and loads samples
//! - `burn` re-encodes a video with an ASS track composited in
//!
//! Everything here shells out or touches the filesystem; the caption core
//! never imports this module.

use thiserror::Error;

mod audio;
mod burn;
mod probe;

pub use audio::{
    extract_audio_for_transcription, extract_audio_for_transcription_async, load_audio_samples,
};
pub use burn::burn_subtitles;
pub use probe::{probe_media, MediaInfo, VideoStream};

// =============================================================================
// Error Types
// =============================================================================

/// Errors from the external encoder and WAV decoding
#[derive(Error, Debug)]
pub enum MediaError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    /// Output directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirNotFound(String),

    /// ffprobe exited with an error
    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),

    /// ffprobe output could not be interpreted
    #[error("Failed to parse ffprobe output: {0}")]
    ProbeParse(String),

    /// ffmpeg exited with an error
    #[error("ffmpeg failed: {0}")]
    EncodeFailed(String),

    /// WAV file was unreadable or not in the expected format
    #[error("Audio format error: {0}")]
    AudioFormat(String),

    /// Process launch or file operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

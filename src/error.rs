//! CaptionBurn Error Definitions
//!
//! Defines the crate-level error type aggregating collaborator failures.
//! The caption core itself (grouping, compiling, presets) is fallback-first
//! and never returns these; only the I/O collaborators and the orchestrator do.

use thiserror::Error;

use crate::media::MediaError;
use crate::transcribe::TranscribeError;

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Media processing failed: {0}")]
    Media(#[from] MediaError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscribeError),

    #[error("Input has no video stream: {0}")]
    NoVideoStream(String),

    #[error("Stage timed out after {timeout_sec}s: {stage}")]
    StageTimeout { stage: &'static str, timeout_sec: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline result type
pub type PipelineResult<T> = Result<T, PipelineError>;

//! Transcription Collaborator Module
//!
//! The caption core consumes an ordered stream of word-level timestamps and
//! makes no assumption about which speech-to-text engine produced it. This
//! module defines that contract ([`Word`], [`Transcriber`]) plus an optional
//! local Whisper implementation behind the `whisper` feature, mirroring the
//! engine/stub split so the crate builds without native inference libraries.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TimeSec;

mod whisper;

pub use whisper::{default_models_dir, is_whisper_available, WhisperModel, WhisperTranscriber};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during transcription
#[derive(Error, Debug)]
pub enum TranscribeError {
    /// Model file not found
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    /// Failed to load the model
    #[error("Failed to load model: {0}")]
    ModelLoadError(String),

    /// Audio file not found
    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    /// Failed to read audio samples
    #[error("Failed to read audio: {0}")]
    AudioReadError(String),

    /// Inference failed
    #[error("Transcription failed: {0}")]
    InferenceError(String),

    /// Whisper feature not enabled
    #[error("Whisper feature not enabled. Rebuild with --features whisper")]
    FeatureNotEnabled,
}

/// Result type for transcription operations
pub type TranscribeResult<T> = Result<T, TranscribeError>;

// =============================================================================
// Word Data Model
// =============================================================================

/// A single transcribed word with timing.
///
/// Words arrive ordered by `start` ascending (ties broken by input order) and
/// are immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Start time in seconds (non-negative)
    pub start: TimeSec,
    /// End time in seconds (strictly after start)
    pub end: TimeSec,
    /// Word text, whitespace-trimmed
    pub text: String,
}

impl Word {
    /// Creates a new word
    pub fn new(start: TimeSec, end: TimeSec, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.trim().to_string(),
        }
    }

    /// Returns the duration of this word in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}

// =============================================================================
// Transcription Options
// =============================================================================

/// Options for transcription
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    /// Language code (e.g., "en", "ko", "ja") or "auto" for detection
    pub language: Option<String>,
    /// Whether to translate to English
    pub translate: bool,
    /// Number of threads to use (0 = auto)
    pub threads: u32,
    /// Initial prompt to guide the model
    pub initial_prompt: Option<String>,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: Some("auto".to_string()),
            translate: false,
            threads: 0,
            initial_prompt: None,
        }
    }
}

// =============================================================================
// Transcriber Contract
// =============================================================================

/// Narrow interface to an external speech-to-text engine.
///
/// Implementations take a 16 kHz mono WAV file and return word-level
/// timestamps ordered by start time. The caption core never calls an engine
/// directly; the pipeline orchestrator passes one in.
pub trait Transcriber: Send + Sync {
    /// Transcribes a 16 kHz mono WAV file into timed words
    fn transcribe_file(
        &self,
        wav_path: &Path,
        options: &TranscriptionOptions,
    ) -> TranscribeResult<Vec<Word>>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_creation_trims_text() {
        let word = Word::new(0.5, 1.2, " hello ");
        assert_eq!(word.text, "hello");
        assert_eq!(word.duration(), 0.7);
    }

    #[test]
    fn test_word_serde_roundtrip() {
        let word = Word::new(1.25, 1.75, "there");
        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains("\"start\":1.25"));

        let parsed: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, word);
    }

    #[test]
    fn test_transcription_options_default() {
        let options = TranscriptionOptions::default();
        assert_eq!(options.language, Some("auto".to_string()));
        assert!(!options.translate);
        assert_eq!(options.threads, 0);
        assert!(options.initial_prompt.is_none());
    }
}

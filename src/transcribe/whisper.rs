//! Whisper Transcription Engine
//!
//! Speech-to-text via whisper.cpp (whisper-rs), conditionally compiled when
//! the `whisper` feature is enabled. Token-level timestamps are merged into
//! whole words so the caption grouper receives the word stream it expects.

use std::path::{Path, PathBuf};

use super::{TranscribeError, TranscribeResult, TranscriptionOptions, Word};

// =============================================================================
// Whisper Model Types
// =============================================================================

/// Available Whisper model sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhisperModel {
    /// Tiny model (~75MB) - fastest, lowest accuracy
    Tiny,
    /// Base model (~142MB) - good balance
    #[default]
    Base,
    /// Small model (~466MB) - better accuracy
    Small,
    /// Medium model (~1.5GB) - high accuracy
    Medium,
    /// Large model (~2.9GB) - highest accuracy
    Large,
}

impl WhisperModel {
    /// Returns the filename for this model size
    pub fn filename(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin",
            WhisperModel::Base => "ggml-base.bin",
            WhisperModel::Small => "ggml-small.bin",
            WhisperModel::Medium => "ggml-medium.bin",
            WhisperModel::Large => "ggml-large.bin",
        }
    }

    /// Returns the model name for logging/display
    pub fn name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

impl std::str::FromStr for WhisperModel {
    type Err = TranscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(WhisperModel::Tiny),
            "base" => Ok(WhisperModel::Base),
            "small" => Ok(WhisperModel::Small),
            "medium" => Ok(WhisperModel::Medium),
            "large" => Ok(WhisperModel::Large),
            _ => Err(TranscribeError::ModelLoadError(format!(
                "Unknown model size: {}",
                s
            ))),
        }
    }
}

/// Checks if whisper transcription is compiled in
pub fn is_whisper_available() -> bool {
    cfg!(feature = "whisper")
}

/// Returns the recommended model directory
pub fn default_models_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("captionburn")
        .join("models")
        .join("whisper")
}

// =============================================================================
// Whisper Engine - Feature-gated Implementation
// =============================================================================

#[cfg(feature = "whisper")]
mod engine_impl {
    use super::*;
    use crate::media::load_audio_samples;
    use crate::transcribe::Transcriber;
    use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

    /// Local Whisper transcriber producing word-level timestamps
    pub struct WhisperTranscriber {
        context: WhisperContext,
        model_name: String,
    }

    impl WhisperTranscriber {
        /// Creates a transcriber from a ggml model file
        pub fn new(model_path: &Path) -> TranscribeResult<Self> {
            if !model_path.exists() {
                return Err(TranscribeError::ModelNotFound(
                    model_path.to_string_lossy().to_string(),
                ));
            }

            let params = WhisperContextParameters::default();
            let context =
                WhisperContext::new_with_params(model_path.to_str().unwrap_or_default(), params)
                    .map_err(|e| TranscribeError::ModelLoadError(e.to_string()))?;

            let model_name = model_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            Ok(Self {
                context,
                model_name,
            })
        }

        /// Transcribes normalized f32 samples into timed words
        pub fn transcribe(
            &self,
            samples: &[f32],
            options: &TranscriptionOptions,
        ) -> TranscribeResult<Vec<Word>> {
            let mut state = self
                .context
                .create_state()
                .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

            if let Some(ref lang) = options.language {
                if lang != "auto" {
                    params.set_language(Some(lang));
                }
            }

            params.set_translate(options.translate);
            params.set_token_timestamps(true);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);

            if options.threads > 0 {
                params.set_n_threads(options.threads as i32);
            }

            if let Some(ref prompt) = options.initial_prompt {
                params.set_initial_prompt(prompt);
            }

            state
                .full(params, samples)
                .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

            let num_segments = state
                .full_n_segments()
                .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

            let mut words = Vec::new();

            for seg in 0..num_segments {
                let num_tokens = state
                    .full_n_tokens(seg)
                    .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

                // Merge subword tokens into words: a token starting with a
                // space begins a new word. Special tokens ("[_BEG_]" etc.)
                // are skipped entirely.
                let mut current_text = String::new();
                let mut current_start: Option<TimeSecCs> = None;
                let mut current_end: TimeSecCs = 0;

                for tok in 0..num_tokens {
                    let text = state
                        .full_get_token_text(seg, tok)
                        .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

                    if text.starts_with("[_") {
                        continue;
                    }

                    let data = state
                        .full_get_token_data(seg, tok)
                        .map_err(|e| TranscribeError::InferenceError(e.to_string()))?;

                    if text.starts_with(' ') && !current_text.trim().is_empty() {
                        if let Some(start) = current_start.take() {
                            words.push(make_word(start, current_end, &current_text));
                        }
                        current_text.clear();
                    }

                    if current_start.is_none() {
                        current_start = Some(data.t0);
                    }
                    current_end = data.t1;
                    current_text.push_str(&text);
                }

                if let (Some(start), false) = (current_start, current_text.trim().is_empty()) {
                    words.push(make_word(start, current_end, &current_text));
                }
            }

            Ok(words)
        }
    }

    /// Token timestamps are in centiseconds
    type TimeSecCs = i64;

    fn make_word(start_cs: TimeSecCs, end_cs: TimeSecCs, text: &str) -> Word {
        // Guard against zero-length token spans so downstream invariants hold
        let start = start_cs as f64 / 100.0;
        let end = (end_cs.max(start_cs + 1)) as f64 / 100.0;
        Word::new(start, end, text)
    }

    impl Transcriber for WhisperTranscriber {
        fn transcribe_file(
            &self,
            wav_path: &Path,
            options: &TranscriptionOptions,
        ) -> TranscribeResult<Vec<Word>> {
            if !wav_path.exists() {
                return Err(TranscribeError::AudioNotFound(
                    wav_path.to_string_lossy().to_string(),
                ));
            }

            let samples = load_audio_samples(wav_path)
                .map_err(|e| TranscribeError::AudioReadError(e.to_string()))?;

            self.transcribe(&samples, options)
        }

        fn name(&self) -> &str {
            &self.model_name
        }
    }
}

#[cfg(feature = "whisper")]
pub use engine_impl::WhisperTranscriber;

// =============================================================================
// Stub Implementation (when whisper feature is disabled)
// =============================================================================

#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperTranscriber;

#[cfg(not(feature = "whisper"))]
impl WhisperTranscriber {
    /// Creates a transcriber (stub - returns error)
    pub fn new(_model_path: &Path) -> TranscribeResult<Self> {
        Err(TranscribeError::FeatureNotEnabled)
    }
}

#[cfg(not(feature = "whisper"))]
impl super::Transcriber for WhisperTranscriber {
    fn transcribe_file(
        &self,
        _wav_path: &Path,
        _options: &TranscriptionOptions,
    ) -> TranscribeResult<Vec<Word>> {
        Err(TranscribeError::FeatureNotEnabled)
    }

    fn name(&self) -> &str {
        ""
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Caption Pipeline Orchestrator
//!
//! Sequences the full job: probe the input, extract audio, transcribe, group
//! words, compile the ASS track, and burn it into a re-encoded copy. Each
//! collaborator step runs under a bounded timeout; progress milestones are
//! reported over an optional channel so a caller can surface job status.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};
use ulid::Ulid;

use crate::captions::{export_srt, group_words, render_ass, DisplaySegment};
use crate::media;
use crate::style;
use crate::transcribe::{TranscribeError, Transcriber, TranscriptionOptions};
use crate::{PipelineError, PipelineResult, VideoProperties};

// =============================================================================
// Progress Reporting
// =============================================================================

/// A job progress milestone
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Completion percentage, 0 to 100
    pub percent: u8,
    /// Human-readable stage description
    pub message: String,
}

/// Channel end a caller hands in to observe progress
pub type ProgressSender = mpsc::UnboundedSender<ProgressUpdate>;

// =============================================================================
// Pipeline Configuration
// =============================================================================

/// Tunables for a caption job
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory where the finished video lands
    pub output_dir: PathBuf,
    /// Explicit ffmpeg binary, `None` for `PATH` lookup
    pub ffmpeg_path: Option<String>,
    /// Explicit ffprobe binary, `None` for `PATH` lookup
    pub ffprobe_path: Option<String>,
    /// Upper bound for each collaborator stage
    pub stage_timeout_sec: u64,
    /// Options forwarded to the transcription engine
    pub transcription: TranscriptionOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            ffmpeg_path: None,
            ffprobe_path: None,
            stage_timeout_sec: 600,
            transcription: TranscriptionOptions::default(),
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// One caption job: a unique id plus the configuration it runs under.
///
/// The pipeline owns no engine; the caller passes a [`Transcriber`] in, which
/// keeps the heavy inference dependency at the edge.
pub struct CaptionPipeline {
    job_id: String,
    config: PipelineConfig,
}

impl CaptionPipeline {
    /// Creates a pipeline with a fresh job id
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            job_id: Ulid::new().to_string(),
            config,
        }
    }

    /// Returns this job's unique id
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Runs the full caption job and returns the finished video path.
    ///
    /// Unknown preset names fall back to the default preset inside
    /// [`style::preset`]; the raw name still appears in progress messages and
    /// the output filename. Temp artifacts (WAV, ASS) live in a per-job temp
    /// directory that is removed when the job finishes, success or not.
    pub async fn process(
        &self,
        input: &Path,
        preset_name: &str,
        transcriber: Arc<dyn Transcriber>,
        progress: Option<ProgressSender>,
    ) -> PipelineResult<PathBuf> {
        info!(job_id = %self.job_id, input = %input.display(), preset = preset_name, "starting caption job");

        report(&progress, 15, "Analyzing video properties...");
        let probed = self
            .bounded("probe", media::probe_media(input, self.config.ffprobe_path.as_deref()))
            .await?;
        let video = probed
            .video
            .ok_or_else(|| PipelineError::NoVideoStream(input.to_string_lossy().to_string()))?;
        let props = VideoProperties {
            width: video.width,
            height: video.height,
            fps: video.fps,
            duration_sec: probed.duration_sec,
        };
        info!(
            width = props.width,
            height = props.height,
            aspect_ratio = props.aspect_ratio(),
            fps = props.fps,
            duration_sec = props.duration_sec,
            "probed input"
        );

        let workdir = tempfile::tempdir()?;
        let wav_path = workdir.path().join(format!("audio_{}.wav", self.job_id));

        report(&progress, 25, "Extracting audio for transcription...");
        self.bounded(
            "extract_audio",
            media::extract_audio_for_transcription_async(
                input,
                &wav_path,
                self.config.ffmpeg_path.as_deref(),
            ),
        )
        .await?;

        report(&progress, 40, "Transcribing audio...");
        let words = self
            .bounded("transcribe", run_transcription(
                Arc::clone(&transcriber),
                wav_path.clone(),
                self.config.transcription.clone(),
            ))
            .await?;
        info!(words = words.len(), engine = transcriber.name(), "transcription finished");
        if words.is_empty() {
            warn!(job_id = %self.job_id, "no speech detected, rendering placeholder track");
        }

        report(&progress, 60, "Generating subtitle overlays...");
        let preset = style::preset(preset_name);
        let segments = group_words(&words, preset.words_per_line);
        let ass_document = render_ass(&segments, props.width, props.height, &preset);

        let ass_path = workdir.path().join(format!("subtitles_{}.ass", self.job_id));
        tokio::fs::write(&ass_path, &ass_document).await?;

        report(
            &progress,
            80,
            format!("Rendering final video with {} style...", preset_name),
        );
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let output_path = self
            .config
            .output_dir
            .join(format!("{}_{}_with_subtitles.mp4", self.job_id, preset_name));
        self.bounded(
            "burn",
            media::burn_subtitles(
                input,
                &ass_path,
                &output_path,
                self.config.ffmpeg_path.as_deref(),
            ),
        )
        .await?;

        report(&progress, 100, "Video processing completed!");
        info!(job_id = %self.job_id, output = %output_path.display(), "caption job finished");

        Ok(output_path)
    }

    /// Writes an SRT sidecar for already-grouped segments
    pub async fn write_srt(
        &self,
        segments: &[DisplaySegment],
        output_path: &Path,
    ) -> PipelineResult<()> {
        tokio::fs::write(output_path, export_srt(segments)).await?;
        Ok(())
    }

    /// Wraps a collaborator future in the configured stage timeout
    async fn bounded<T, E, F>(&self, stage: &'static str, fut: F) -> PipelineResult<T>
    where
        F: std::future::Future<Output = Result<T, E>>,
        PipelineError: From<E>,
    {
        let limit = Duration::from_secs(self.config.stage_timeout_sec);
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(PipelineError::StageTimeout {
                stage,
                timeout_sec: self.config.stage_timeout_sec,
            }),
        }
    }
}

/// Runs the blocking transcription call off the async runtime
async fn run_transcription(
    transcriber: Arc<dyn Transcriber>,
    wav_path: PathBuf,
    options: TranscriptionOptions,
) -> Result<Vec<crate::transcribe::Word>, TranscribeError> {
    tokio::task::spawn_blocking(move || transcriber.transcribe_file(&wav_path, &options))
        .await
        .map_err(|e| TranscribeError::InferenceError(e.to_string()))?
}

/// Sends a milestone if a channel was provided; a closed receiver is not an
/// error, the job keeps running.
fn report(progress: &Option<ProgressSender>, percent: u8, message: impl Into<String>) {
    if let Some(tx) = progress {
        let _ = tx.send(ProgressUpdate {
            percent,
            message: message.into(),
        });
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::{TranscribeResult, Word};
    use tempfile::TempDir;

    /// Installs a test-writer subscriber so stage logs surface under
    /// `--nocapture`; repeated calls are no-ops.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    }

    struct FixedTranscriber(Vec<Word>);

    impl Transcriber for FixedTranscriber {
        fn transcribe_file(
            &self,
            _wav_path: &Path,
            _options: &TranscriptionOptions,
        ) -> TranscribeResult<Vec<Word>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_job_ids_are_unique() {
        let a = CaptionPipeline::new(PipelineConfig::default());
        let b = CaptionPipeline::new(PipelineConfig::default());
        assert_ne!(a.job_id(), b.job_id());
        assert_eq!(a.job_id().len(), 26);
    }

    #[test]
    fn test_report_sends_milestone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        report(&Some(tx), 40, "Transcribing audio...");

        let update = rx.try_recv().unwrap();
        assert_eq!(update.percent, 40);
        assert_eq!(update.message, "Transcribing audio...");
    }

    #[test]
    fn test_report_without_channel_is_noop() {
        report(&None, 15, "Analyzing video properties...");
    }

    #[test]
    fn test_report_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        report(&Some(tx), 100, "Video processing completed!");
    }

    #[tokio::test]
    async fn test_process_missing_input_fails_fast() {
        init_tracing();
        let pipeline = CaptionPipeline::new(PipelineConfig::default());
        let transcriber = Arc::new(FixedTranscriber(vec![]));

        let result = pipeline
            .process(
                Path::new("/nonexistent/clip.mp4"),
                "instagram_classic",
                transcriber,
                None,
            )
            .await;

        assert!(matches!(result, Err(PipelineError::Media(_))));
    }

    #[tokio::test]
    async fn test_write_srt_sidecar() {
        let pipeline = CaptionPipeline::new(PipelineConfig::default());
        let words = vec![Word::new(0.0, 0.5, "hello"), Word::new(0.5, 1.0, "world")];
        let segments = group_words(&words, 3);

        let dir = TempDir::new().unwrap();
        let srt_path = dir.path().join("captions.srt");
        pipeline.write_srt(&segments, &srt_path).await.unwrap();

        let contents = std::fs::read_to_string(&srt_path).unwrap();
        assert!(contents.starts_with("1\n00:00:00,000 --> 00:00:00,500\nhello world\n"));
    }

    #[tokio::test]
    async fn test_stage_timeout_maps_to_error() {
        let config = PipelineConfig {
            stage_timeout_sec: 0,
            ..Default::default()
        };
        let pipeline = CaptionPipeline::new(config);

        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<(), PipelineError>(())
        };

        let result = pipeline.bounded("probe", slow).await;
        assert!(matches!(
            result,
            Err(PipelineError::StageTimeout { stage: "probe", .. })
        ));
    }
}

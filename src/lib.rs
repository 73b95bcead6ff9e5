//! CaptionBurn Core Engine
//!
//! Turns a video file into a copy with burned-in, word-highlighted captions.
//! The core is a pure data transformation: word-level transcription timestamps
//! are grouped into overlap-free display segments, which are compiled together
//! with a style preset into an ASS subtitle document. External collaborators
//! (ffprobe, ffmpeg, the speech-to-text engine) are driven through narrow
//! interfaces in [`media`] and [`transcribe`], sequenced by [`pipeline`].

pub mod captions;
pub mod media;
pub mod pipeline;
pub mod style;
pub mod transcribe;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

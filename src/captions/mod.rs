//! Caption Generation Module
//!
//! The algorithmic heart of the crate:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption Pipeline Core                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  grouping.rs   - word stream → overlap-free display segments    │
//! │  timecode.rs   - shared ASS/SRT timestamp formatting            │
//! │  ass.rs        - segments + style → ASS document                │
//! │  srt.rs        - segments → SRT document                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure and stateless: no I/O, no locks, safe to call
//! concurrently for independent jobs.

mod ass;
mod grouping;
mod srt;
mod timecode;

pub use ass::render_ass;
pub use grouping::{group_words, DisplaySegment, DEFAULT_WORDS_PER_GROUP};
pub use srt::export_srt;
pub use timecode::{ass_timestamp, format_timestamp, srt_timestamp, TimecodeFormat};

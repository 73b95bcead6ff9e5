//! Caption Style Module
//!
//! Defines the configurable visual parameters of a caption style and the
//! fixed catalog of named presets. Styles are plain immutable value objects;
//! the preset catalog is built once, lazily, and only exposed through read
//! accessors.

mod config;
mod presets;

pub use config::{AssColor, FontWeight, GlowIntensity, HighlightStyle, StyleConfig, VerticalPosition};
pub use presets::{preset, preset_info, preset_names, PresetInfo};

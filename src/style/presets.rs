//! Style Preset Catalog
//!
//! A fixed, process-wide mapping from preset name to [`StyleConfig`], built
//! lazily on first access and never mutated afterwards. Unknown preset names
//! silently resolve to the default preset.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{
    AssColor, GlowIntensity, HighlightStyle, StyleConfig, VerticalPosition,
};

/// Name of the preset used when a requested name is unrecognized
pub const DEFAULT_PRESET: &str = "instagram_classic";

/// Preset names in their stable catalog order
const PRESET_NAMES: [&str; 5] = [
    "instagram_classic",
    "tiktok_viral",
    "youtube_professional",
    "minimalist",
    "gaming",
];

// =============================================================================
// Preset Metadata
// =============================================================================

/// Human-readable metadata for a preset, for UI listings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    /// Display name
    pub name: &'static str,
    /// Short description of the look
    pub description: &'static str,
    /// Content the preset works best for
    pub best_for: &'static str,
}

// =============================================================================
// Catalog
// =============================================================================

static PRESETS: LazyLock<BTreeMap<&'static str, StyleConfig>> = LazyLock::new(|| {
    let mut presets = BTreeMap::new();

    // Clean white text with gold highlight
    presets.insert(
        "instagram_classic",
        StyleConfig {
            font_size_ratio: 0.05,
            highlight_color: AssColor::from_packed(0x00D7FF), // Gold
            highlight_style: HighlightStyle::ColorChange,
            outline_width: 2,
            words_per_line: 3,
            margin_ratio: 0.08,
            ..StyleConfig::default()
        },
    );

    // Bold text with cyan glow
    presets.insert(
        "tiktok_viral",
        StyleConfig {
            font_size_ratio: 0.055,
            highlight_color: AssColor::from_packed(0xFFFF00), // Cyan
            highlight_style: HighlightStyle::GlowPulse,
            outline_width: 1,
            glow_enabled: true,
            glow_intensity: GlowIntensity::Strong,
            words_per_line: 4,
            margin_ratio: 0.07,
            ..StyleConfig::default()
        },
    );

    // Red background-highlight over a boxed line
    presets.insert(
        "youtube_professional",
        StyleConfig {
            font_size_ratio: 0.045,
            highlight_color: AssColor::from_packed(0x0000FF), // Red
            highlight_style: HighlightStyle::BackgroundHighlight,
            outline_width: 2,
            background_enabled: true,
            background_color: AssColor::black(),
            background_opacity: 70,
            words_per_line: 3,
            margin_ratio: 0.09,
            ..StyleConfig::default()
        },
    );

    // Subtle scale effect with soft colors
    presets.insert(
        "minimalist",
        StyleConfig {
            font_size_ratio: 0.04,
            highlight_color: AssColor::from_packed(0xE2904A), // Soft blue
            outline_color: AssColor::from_packed(0x404040),   // Gray
            highlight_style: HighlightStyle::ScaleUp,
            outline_width: 1,
            words_per_line: 3,
            position: VerticalPosition::Center,
            margin_ratio: 0.1,
            ..StyleConfig::default()
        },
    );

    // Bold green glow with thick outline
    presets.insert(
        "gaming",
        StyleConfig {
            font_size_ratio: 0.06,
            highlight_color: AssColor::from_packed(0x00FF00), // Green
            highlight_style: HighlightStyle::GlowPulse,
            outline_width: 3,
            glow_enabled: true,
            glow_intensity: GlowIntensity::Strong,
            words_per_line: 2,
            margin_ratio: 0.06,
            ..StyleConfig::default()
        },
    );

    presets
});

static PRESET_INFO: LazyLock<BTreeMap<&'static str, PresetInfo>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "instagram_classic",
            PresetInfo {
                name: "Instagram Classic",
                description: "Clean white text with gold highlight",
                best_for: "Professional content, tutorials",
            },
        ),
        (
            "tiktok_viral",
            PresetInfo {
                name: "TikTok Viral",
                description: "Bold text with cyan glow effect",
                best_for: "Dance videos, trends, young audience",
            },
        ),
        (
            "youtube_professional",
            PresetInfo {
                name: "YouTube Professional",
                description: "Red background highlight style",
                best_for: "Educational content, business videos",
            },
        ),
        (
            "minimalist",
            PresetInfo {
                name: "Minimalist",
                description: "Subtle scale effect with soft colors",
                best_for: "Aesthetic content, quotes",
            },
        ),
        (
            "gaming",
            PresetInfo {
                name: "Gaming/Streamer",
                description: "Bold green glow with thick outline",
                best_for: "Gaming content, reactions",
            },
        ),
    ])
});

// =============================================================================
// Read Accessors
// =============================================================================

/// Returns the available preset names in stable catalog order
pub fn preset_names() -> &'static [&'static str] {
    &PRESET_NAMES
}

/// Resolves a preset name to its style configuration.
///
/// Unknown names fall back to the `instagram_classic` default; this never
/// fails.
pub fn preset(name: &str) -> StyleConfig {
    if let Some(style) = PRESETS.get(name) {
        return style.clone();
    }
    warn!(
        "Unknown style preset '{}', falling back to {}",
        name, DEFAULT_PRESET
    );
    PRESETS
        .get(DEFAULT_PRESET)
        .cloned()
        .unwrap_or_default()
}

/// Returns the metadata map for all presets
pub fn preset_info() -> &'static BTreeMap<&'static str, PresetInfo> {
    &PRESET_INFO
}

// =============================================================================
// Tests
// =============================================================================

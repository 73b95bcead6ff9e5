//! Style Configuration
//!
//! The [`StyleConfig`] value object and its component types, including the
//! packed ASS color encoding used throughout the subtitle compiler.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Packed ASS Color
// =============================================================================

/// Color in the packed ASS encoding: `&HBBGGRR`, byte order reversed relative
/// to RGB hex, no alpha. This is the libass convention, not a defect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssColor {
    /// Packed value, layout `0x00BBGGRR`
    packed: u32,
}

impl AssColor {
    /// Creates a color from a packed `0x00BBGGRR` value
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            packed: packed & 0x00FF_FFFF,
        }
    }

    /// White (`&Hffffff`)
    pub const fn white() -> Self {
        Self::from_packed(0x00FF_FFFF)
    }

    /// Black (`&H000000`)
    pub const fn black() -> Self {
        Self::from_packed(0x0000_0000)
    }

    /// Parses a `#RRGGBB` hex string (case-insensitive, `#` optional).
    pub fn try_from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 {
            return Err(format!("Invalid hex color length: {}", hex.len()));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| e.to_string());
        let r = channel(&hex[0..2])?;
        let g = channel(&hex[2..4])?;
        let b = channel(&hex[4..6])?;

        Ok(Self::from_packed(
            ((b as u32) << 16) | ((g as u32) << 8) | r as u32,
        ))
    }

    /// Parses a `#RRGGBB` hex string, falling back to white on invalid input.
    pub fn from_hex(hex: &str) -> Self {
        match Self::try_from_hex(hex) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "Failed to parse hex color '{}': {}, defaulting to white",
                    hex, e
                );
                Self::white()
            }
        }
    }

    /// Converts to an uppercase `#RRGGBB` hex string
    pub fn to_hex(self) -> String {
        let r = self.packed & 0xFF;
        let g = (self.packed >> 8) & 0xFF;
        let b = (self.packed >> 16) & 0xFF;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Returns the packed `0x00BBGGRR` value
    pub const fn packed(self) -> u32 {
        self.packed
    }
}

impl Default for AssColor {
    fn default() -> Self {
        Self::white()
    }
}

impl std::fmt::Display for AssColor {
    /// Renders the `&Hbbggrr` form used inside ASS documents
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "&H{:06x}", self.packed)
    }
}

impl From<String> for AssColor {
    /// Accepts either the packed `&Hbbggrr` form or a `#RRGGBB` hex string.
    /// Malformed input falls back to white; this conversion never fails.
    fn from(s: String) -> Self {
        let trimmed = s.trim();
        if let Some(rest) = trimmed
            .strip_prefix("&H")
            .or_else(|| trimmed.strip_prefix("&h"))
        {
            if rest.len() >= 6 {
                if let Ok(packed) = u32::from_str_radix(&rest[..6], 16) {
                    return Self::from_packed(packed);
                }
            }
            warn!("Failed to parse ASS color '{}', defaulting to white", s);
            return Self::white();
        }
        Self::from_hex(trimmed)
    }
}

impl From<AssColor> for String {
    fn from(color: AssColor) -> Self {
        color.to_string()
    }
}

// =============================================================================
// Style Component Enums
// =============================================================================

/// Per-word highlight rendering mode.
///
/// Closed set dispatched once per segment by the subtitle compiler; unknown
/// values deserialize to [`HighlightStyle::ColorChange`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStyle {
    /// Scale the highlighted word to 120% in the highlight color
    ScaleUp,
    /// Colored glow via outline + shadow tags (degrades to color change
    /// when glow is disabled)
    GlowPulse,
    /// Simulated background box via an oversized border in the highlight color
    BackgroundHighlight,
    /// Switch the highlighted word to the highlight color; the catch-all
    /// variant, so it must stay last in the enum
    #[default]
    #[serde(other)]
    ColorChange,
}

/// Glow effect strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowIntensity {
    #[default]
    None,
    Soft,
    Strong,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
    Light,
}

/// Vertical position of captions on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalPosition {
    Top,
    Center,
    /// Bottom of screen (default for subtitles)
    #[default]
    Bottom,
}

// =============================================================================
// Style Configuration
// =============================================================================

/// Complete visual configuration for a caption style.
///
/// Immutable value object: construct via a preset ([`super::preset`]) or
/// struct literal, never mutate a shared instance across jobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    // Font settings
    /// Font family name
    pub font_family: String,
    /// Font size as a ratio of video height
    pub font_size_ratio: f64,
    /// Font weight
    pub font_weight: FontWeight,

    // Colors (packed ASS encoding)
    /// Color of non-highlighted words
    pub base_color: AssColor,
    /// Color of the highlighted word
    pub highlight_color: AssColor,
    /// Text outline color
    pub outline_color: AssColor,

    // Effects
    /// Highlight rendering mode
    pub highlight_style: HighlightStyle,
    /// Outline width in ASS border units
    pub outline_width: u32,
    /// Whether the glow effect is active (only meaningful for glow_pulse)
    pub glow_enabled: bool,
    /// Glow strength
    pub glow_intensity: GlowIntensity,

    // Layout
    /// Words shown per display group
    pub words_per_line: usize,
    /// Vertical placement
    pub position: VerticalPosition,
    /// ASS numpad alignment (1=left, 2=center, 3=right)
    pub alignment: u8,
    /// Distance from the screen edge as a ratio of video height
    pub margin_ratio: f64,

    // Background
    /// Whether a background box is drawn behind the text
    pub background_enabled: bool,
    /// Background box color
    pub background_color: AssColor,
    /// Background opacity percentage (0 = invisible, 100 = opaque)
    pub background_opacity: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size_ratio: 0.05,
            font_weight: FontWeight::Bold,
            base_color: AssColor::white(),
            highlight_color: AssColor::from_packed(0x00D7FF), // Gold
            outline_color: AssColor::black(),
            highlight_style: HighlightStyle::ColorChange,
            outline_width: 2,
            glow_enabled: false,
            glow_intensity: GlowIntensity::None,
            words_per_line: 3,
            position: VerticalPosition::Bottom,
            alignment: 2,
            margin_ratio: 0.08,
            background_enabled: false,
            background_color: AssColor::black(),
            background_opacity: 80,
        }
    }
}

impl StyleConfig {
    /// Scale percentage applied to the highlighted word (120 for scale_up,
    /// otherwise the neutral 100).
    pub fn highlight_scale(&self) -> u32 {
        match self.highlight_style {
            HighlightStyle::ScaleUp => 120,
            _ => 100,
        }
    }

    /// The `Bold` field value for ASS style records
    pub fn bold_flag(&self) -> u8 {
        match self.font_weight {
            FontWeight::Bold => 1,
            FontWeight::Normal | FontWeight::Light => 0,
        }
    }

    /// ASS numpad alignment combining horizontal alignment with vertical
    /// position (1-3 bottom row, 4-6 middle, 7-9 top).
    pub fn numpad_alignment(&self) -> u8 {
        let horizontal = self.alignment.clamp(1, 3);
        match self.position {
            VerticalPosition::Bottom => horizontal,
            VerticalPosition::Center => horizontal + 3,
            VerticalPosition::Top => horizontal + 6,
        }
    }

    /// The `BackColour` value for ASS style records: the configured color with
    /// the opacity folded into the ASS alpha byte (00 = opaque), or the
    /// conventional semi-transparent black when no background is enabled.
    pub fn back_colour(&self) -> String {
        if self.background_enabled {
            let opacity = self.background_opacity.min(100) as u32;
            let alpha = (100 - opacity) * 255 / 100;
            format!("&H{:02x}{:06x}", alpha, self.background_color.packed())
        } else {
            "&H80000000".to_string()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Color Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_color_hex_roundtrip() {
        for hex in ["#FF0000", "#00FF00", "#0000FF", "#1A2B3C", "#FFD700"] {
            assert_eq!(AssColor::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_color_hex_case_insensitive() {
        assert_eq!(AssColor::from_hex("#ffd700"), AssColor::from_hex("#FFD700"));
        assert_eq!(AssColor::from_hex("ffd700").to_hex(), "#FFD700");
    }

    #[test]
    fn test_color_byte_order_reversed() {
        // #RRGGBB becomes &Hbbggrr
        let gold = AssColor::from_hex("#FFD700");
        assert_eq!(gold.to_string(), "&H00d7ff");
        assert_eq!(gold.packed(), 0x00D7FF);
    }

    #[test]
    fn test_color_malformed_falls_back_to_white() {
        assert_eq!(AssColor::from_hex("not a color"), AssColor::white());
        assert_eq!(AssColor::from_hex("#12345"), AssColor::white());
        assert_eq!(AssColor::from_hex("#GGGGGG"), AssColor::white());
        assert_eq!(AssColor::from_hex(""), AssColor::white());
    }

    #[test]
    fn test_color_from_ass_string() {
        let c = AssColor::from("&H00d7ff".to_string());
        assert_eq!(c.to_hex(), "#FFD700");

        let bad = AssColor::from("&Hxyz".to_string());
        assert_eq!(bad, AssColor::white());
    }

    #[test]
    fn test_color_serde_roundtrip() {
        let gold = AssColor::from_packed(0x00D7FF);
        let json = serde_json::to_string(&gold).unwrap();
        assert_eq!(json, "\"&H00d7ff\"");

        let parsed: AssColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, gold);
    }

    // -------------------------------------------------------------------------
    // Highlight Style Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_highlight_style_serde() {
        let s: HighlightStyle = serde_json::from_str("\"glow_pulse\"").unwrap();
        assert_eq!(s, HighlightStyle::GlowPulse);

        // The catch-all variant still round-trips under its own name
        let json = serde_json::to_string(&HighlightStyle::ColorChange).unwrap();
        assert_eq!(json, "\"color_change\"");
        let s: HighlightStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(s, HighlightStyle::ColorChange);
    }

    #[test]
    fn test_highlight_style_unknown_falls_back() {
        let s: HighlightStyle = serde_json::from_str("\"laser_beam\"").unwrap();
        assert_eq!(s, HighlightStyle::ColorChange);
    }

    // -------------------------------------------------------------------------
    // Style Config Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();
        assert_eq!(style.font_family, "Arial");
        assert_eq!(style.font_size_ratio, 0.05);
        assert_eq!(style.highlight_color.to_string(), "&H00d7ff");
        assert_eq!(style.words_per_line, 3);
        assert_eq!(style.alignment, 2);
    }

    #[test]
    fn test_highlight_scale() {
        let mut style = StyleConfig::default();
        assert_eq!(style.highlight_scale(), 100);

        style.highlight_style = HighlightStyle::ScaleUp;
        assert_eq!(style.highlight_scale(), 120);
    }

    #[test]
    fn test_back_colour_disabled() {
        let style = StyleConfig::default();
        assert_eq!(style.back_colour(), "&H80000000");
    }

    #[test]
    fn test_back_colour_enabled() {
        let style = StyleConfig {
            background_enabled: true,
            background_color: AssColor::black(),
            background_opacity: 100,
            ..Default::default()
        };
        // Fully opaque black
        assert_eq!(style.back_colour(), "&H00000000");
    }

    #[test]
    fn test_style_config_serde_roundtrip() {
        let style = StyleConfig::default();
        let json = serde_json::to_string(&style).unwrap();
        let parsed: StyleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, style);
    }

    #[test]
    fn test_style_config_partial_deserialization() {
        // Missing fields take defaults; unknown highlight styles fall back.
        let json = r#"{"highlightStyle":"sparkle","wordsPerLine":5}"#;
        let parsed: StyleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.highlight_style, HighlightStyle::ColorChange);
        assert_eq!(parsed.words_per_line, 5);
        assert_eq!(parsed.font_family, "Arial");
    }
}

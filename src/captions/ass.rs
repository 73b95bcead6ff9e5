//! ASS Subtitle Compiler
//!
//! Compiles display segments plus a style configuration into a complete ASS
//! (Advanced SubStation Alpha) document: a header with two named style
//! records ("Default" and "Highlight") followed by one `Dialogue:` event per
//! segment. The per-word highlight animation is encoded with inline override
//! tags on the segment's first word only.

use crate::style::{GlowIntensity, HighlightStyle, StyleConfig};

use super::grouping::DisplaySegment;
use super::timecode::ass_timestamp;

/// Minimum font size in ASS units regardless of video height
const MIN_FONT_SIZE: u32 = 16;

/// Minimum bottom margin in ASS units regardless of video height
const MIN_MARGIN_V: u32 = 20;

/// Fixed left/right margin in ASS units
const MARGIN_SIDE: u32 = 20;

// =============================================================================
// Document Rendering
// =============================================================================

/// Renders a complete ASS document for the given segments, style, and video
/// dimensions.
///
/// Font size and vertical margin scale with video height
/// (`max(round(height * ratio), minimum)`); width is accepted for interface
/// symmetry with the probe step but does not affect the output. An empty
/// segment list produces a well-formed document with a single placeholder
/// event, never a header-only file.
pub fn render_ass(
    segments: &[DisplaySegment],
    _width: u32,
    height: u32,
    style: &StyleConfig,
) -> String {
    let font_size = scaled(height, style.font_size_ratio, MIN_FONT_SIZE);
    let margin_v = scaled(height, style.margin_ratio, MIN_MARGIN_V);

    let header = render_header(font_size, MARGIN_SIDE, margin_v, style);

    if segments.is_empty() {
        return format!(
            "{}Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,No speech detected\n",
            header
        );
    }

    let events: Vec<String> = segments
        .iter()
        .map(|segment| {
            format!(
                "Dialogue: 0,{},{},Default,,0,0,0,,{}",
                ass_timestamp(segment.start),
                ass_timestamp(segment.end),
                styled_text(segment, style)
            )
        })
        .collect();

    header + &events.join("\n")
}

fn scaled(height: u32, ratio: f64, minimum: u32) -> u32 {
    ((height as f64 * ratio).round() as u32).max(minimum)
}

fn render_header(font_size: u32, margin_side: u32, margin_v: u32, style: &StyleConfig) -> String {
    let alignment = style.numpad_alignment();
    let scale = style.highlight_scale();

    format!(
        "[Script Info]\n\
         Title: CaptionBurn - {font}\n\
         ScriptType: v4.00+\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: Default,{font},{size},{base},{base},{outline},{back},{bold},0,0,0,100,100,0,0,1,{bord},0,{align},{ml},{ml},{mv},1\n\
         Style: Highlight,{font},{size},{hl},{hl},{outline},{back},{bold},0,0,0,{scale},{scale},0,0,1,{bord},0,{align},{ml},{ml},{mv},1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        font = style.font_family,
        size = font_size,
        base = style.base_color,
        hl = style.highlight_color,
        outline = style.outline_color,
        back = style.back_colour(),
        bold = style.bold_flag(),
        bord = style.outline_width,
        align = alignment,
        ml = margin_side,
        mv = margin_v,
        scale = scale,
    )
}

// =============================================================================
// Per-Segment Text
// =============================================================================

/// Builds the event text for one segment: highlight markup wraps the first
/// word, every other word passes through unmodified, space-joined.
fn styled_text(segment: &DisplaySegment, style: &StyleConfig) -> String {
    let mut parts = Vec::with_capacity(segment.words.len());

    for (i, word) in segment.words.iter().enumerate() {
        if i == segment.highlight_index {
            parts.push(highlight_markup(word, style));
        } else {
            parts.push(word.clone());
        }
    }

    parts.join(" ")
}

/// Wraps a word in the override tags for the style's highlight mode.
///
/// Each arm is a pure function of `(word, style)`; adding a mode means adding
/// an arm without touching the others.
fn highlight_markup(word: &str, style: &StyleConfig) -> String {
    match style.highlight_style {
        HighlightStyle::ColorChange => color_change(word, style),

        HighlightStyle::ScaleUp => {
            let scale = style.highlight_scale();
            format!(
                "{{\\fscx{scale}\\fscy{scale}\\c{hl}&}}{word}{{\\fscx100\\fscy100\\c{base}&}}",
                hl = style.highlight_color,
                base = style.base_color,
            )
        }

        HighlightStyle::GlowPulse => {
            if !style.glow_enabled {
                return color_change(word, style);
            }
            // Colored fill with outline plus a same-colored shadow for the glow
            let shadow = match style.glow_intensity {
                GlowIntensity::Strong => 3,
                GlowIntensity::Soft | GlowIntensity::None => 2,
            };
            format!(
                "{{\\c{hl}&\\3c{out}&\\4c{hl}&\\bord{bord}\\shad{shadow}}}{word}\
                 {{\\c{base}&\\3c{out}&\\4c&H00000000&\\bord2\\shad0}}",
                hl = style.highlight_color,
                out = style.outline_color,
                base = style.base_color,
                bord = style.outline_width,
            )
        }

        // Simulated background box: the format has no per-span background
        // primitive, so paint an oversized border in the highlight color.
        HighlightStyle::BackgroundHighlight => format!(
            "{{\\c{base}&\\3c{hl}&\\bord6}}{word}{{\\3c{out}&\\bord2}}",
            base = style.base_color,
            hl = style.highlight_color,
            out = style.outline_color,
        ),
    }
}

fn color_change(word: &str, style: &StyleConfig) -> String {
    format!(
        "{{\\c{hl}&}}{word}{{\\c{base}&}}",
        hl = style.highlight_color,
        base = style.base_color,
    )
}

// =============================================================================
// Tests
// =============================================================================

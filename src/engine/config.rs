// Session settings shared by the pacing calculator and the formatter.

use std::ops::RangeInclusive;

/// Allowed reading speed in words per minute.
pub const WPM_RANGE: RangeInclusive<u32> = 100..=1000;

/// Step used by the speed up/down keys.
pub const WPM_STEP: i32 = 25;

/// Pacing and presentation settings for one application session.
///
/// Only the reading speed is validated; the remaining fields are a plain
/// record that the UI may change at any time. Changes are picked up by the
/// next delay computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    words_per_minute: u32,

    /// Extra pause after a chapter-start word, in seconds (default 2.0)
    pub chapter_pause_seconds: f64,

    /// Extra pause after a sentence-ending word, in seconds (default 0.3)
    pub sentence_pause_seconds: f64,

    /// Extra milliseconds per character beyond the threshold (default 40)
    pub long_word_bonus_ms: u64,

    /// Word length above which the bonus applies (default 5)
    pub long_word_threshold: usize,

    pub highlight_fixation_point: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 500,
            chapter_pause_seconds: 2.0,
            sentence_pause_seconds: 0.3,
            long_word_bonus_ms: 40,
            long_word_threshold: 5,
            highlight_fixation_point: true,
        }
    }
}

impl SessionSettings {
    pub fn words_per_minute(&self) -> u32 {
        self.words_per_minute
    }

    pub fn set_words_per_minute(&mut self, wpm: u32) -> u32 {
        self.words_per_minute = wpm.clamp(*WPM_RANGE.start(), *WPM_RANGE.end());
        self.words_per_minute
    }

    pub fn adjust_words_per_minute(&mut self, delta: i32) -> u32 {
        let target = (self.words_per_minute as i64 + delta as i64).max(0);
        self.set_words_per_minute(target.min(u32::MAX as i64) as u32)
    }

    pub fn set_chapter_pause_seconds(&mut self, seconds: f64) {
        self.chapter_pause_seconds = non_negative(seconds);
    }

    pub fn set_sentence_pause_seconds(&mut self, seconds: f64) {
        self.sentence_pause_seconds = non_negative(seconds);
    }

    pub fn set_long_word_bonus_ms(&mut self, bonus_ms: u64) {
        self.long_word_bonus_ms = bonus_ms;
    }

    pub fn set_long_word_threshold(&mut self, threshold: usize) {
        self.long_word_threshold = threshold.max(1);
    }

    pub fn toggle_highlight(&mut self) -> bool {
        self.highlight_fixation_point = !self.highlight_fixation_point;
        self.highlight_fixation_point
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

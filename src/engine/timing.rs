use crate::engine::config::SessionSettings;
use crate::engine::Token;
use std::time::Duration;

/// Longest time a single word is scheduled for.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Milliseconds one word stays on screen at `wpm`, before any pauses.
pub fn base_delay_ms(wpm: u32) -> f64 {
    60_000.0 / wpm.max(1) as f64
}

/// Display duration of `token` in milliseconds.
///
/// The pauses are alternatives checked in order, not bonuses that stack:
/// a chapter start ignores the sentence pause and the long-word bonus, and
/// a sentence end ignores the long-word bonus.
pub fn delay_for(token: &Token, settings: &SessionSettings) -> f64 {
    let base = base_delay_ms(settings.words_per_minute());

    if token.is_chapter_start && settings.chapter_pause_seconds > 0.0 {
        return base + settings.chapter_pause_seconds * 1000.0;
    }

    if token.is_sentence_end && settings.sentence_pause_seconds > 0.0 {
        return base + settings.sentence_pause_seconds * 1000.0;
    }

    base + long_word_bonus_ms(&token.text, settings)
}

fn long_word_bonus_ms(word: &str, settings: &SessionSettings) -> f64 {
    let excess = word
        .chars()
        .count()
        .saturating_sub(settings.long_word_threshold);
    (excess as u64).saturating_mul(settings.long_word_bonus_ms) as f64
}

/// [`delay_for`] as a schedulable duration, capped at [`MAX_DELAY`].
pub fn delay_duration(token: &Token, settings: &SessionSettings) -> Duration {
    Duration::try_from_secs_f64(delay_for(token, settings) / 1000.0)
        .unwrap_or(MAX_DELAY)
        .min(MAX_DELAY)
}

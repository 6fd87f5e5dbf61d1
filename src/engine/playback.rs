use crate::engine::config::SessionSettings;
use crate::engine::timing::delay_duration;
use crate::engine::Token;
use log::debug;
use std::time::Instant;

/// Receives the transitions of a [`PlaybackEngine`].
///
/// Both callbacks run synchronously inside the engine call that caused
/// them; the engine does not wait for any work they start.
pub trait PlaybackObserver {
    /// The cursor moved to `index` during playback.
    fn on_word(&mut self, index: usize, token: &Token);

    /// Playback reached the end of the token sequence.
    fn on_complete(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No tokens loaded.
    Idle,
    Paused,
    Playing,
}

/// The single scheduled advance of a playing engine.
///
/// A handle captures the generation it was scheduled under. Firing it after
/// a pause, seek or reload does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    generation: u64,
    due: Instant,
}

impl ScheduledAdvance {
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// Cursor and play/pause state machine over a token sequence.
///
/// Time is passed in by the caller: `play` schedules an advance relative to
/// `now`, and `tick` fires it once `now` has reached the due instant. At most
/// one advance is pending at any time. Every schedule and every cancel bumps
/// the generation counter, so a [`ScheduledAdvance`] taken before a pause,
/// seek or reload can never fire afterwards.
pub struct PlaybackEngine {
    tokens: Vec<Token>,
    current_index: usize,
    settings: SessionSettings,
    generation: u64,
    pending: Option<ScheduledAdvance>,
}

impl PlaybackEngine {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            tokens: Vec::new(),
            current_index: 0,
            settings,
            generation: 0,
            pending: None,
        }
    }

    /// Replaces the token sequence and rewinds to the first word, paused.
    pub fn load(&mut self, tokens: Vec<Token>) {
        self.cancel();
        debug!("loading {} tokens", tokens.len());
        self.tokens = tokens;
        self.current_index = 0;
    }

    pub fn state(&self) -> PlaybackState {
        if self.tokens.is_empty() {
            PlaybackState::Idle
        } else if self.pending.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    pub fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts playback from the current word.
    ///
    /// On the last word there is nothing left to show: the engine stays
    /// paused and reports completion instead. Calling `play` while already
    /// playing keeps the existing schedule.
    pub fn play(&mut self, now: Instant, observer: &mut dyn PlaybackObserver) {
        if self.tokens.is_empty() || self.is_playing() {
            return;
        }

        if self.current_index >= self.last_index() {
            self.stop();
            observer.on_complete();
            return;
        }

        debug!("play from index {}", self.current_index);
        self.schedule(now);
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            debug!("pause at index {}", self.current_index);
        }
        self.cancel();
    }

    pub fn stop(&mut self) {
        self.pause();
    }

    /// Pauses when playing, plays when paused. Returns the resulting
    /// playing state.
    pub fn toggle_play(&mut self, now: Instant, observer: &mut dyn PlaybackObserver) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now, observer);
        }
        self.is_playing()
    }

    /// Fires the pending advance if it is due. Returns true when the engine
    /// advanced or completed.
    pub fn tick(&mut self, now: Instant, observer: &mut dyn PlaybackObserver) -> bool {
        match self.pending {
            Some(advance) => self.fire(advance, now, observer),
            None => false,
        }
    }

    /// Fires `advance` if it is still the current schedule and due.
    ///
    /// This is the timer callback for hosts that keep their own timers: take
    /// the handle from [`scheduled_advance`](Self::scheduled_advance) and
    /// fire it when the timer elapses. A handle from an earlier generation
    /// is ignored.
    pub fn fire(
        &mut self,
        advance: ScheduledAdvance,
        now: Instant,
        observer: &mut dyn PlaybackObserver,
    ) -> bool {
        if self.pending.is_none() || advance.generation != self.generation {
            return false;
        }

        if now < advance.due {
            return false;
        }

        self.pending = None;
        self.advance(now, observer);
        true
    }

    fn advance(&mut self, now: Instant, observer: &mut dyn PlaybackObserver) {
        if self.current_index >= self.last_index() {
            self.cancel();
            debug!("reached end of {} tokens", self.tokens.len());
            observer.on_complete();
            return;
        }

        self.current_index += 1;
        observer.on_word(self.current_index, &self.tokens[self.current_index]);
        self.schedule(now);
    }

    /// Moves the cursor by `delta` words, clamped to the sequence.
    ///
    /// Playback is always stopped. The return value tells whether it was
    /// running, so the caller can repaint before resuming.
    pub fn navigate(&mut self, delta: isize) -> bool {
        let was_playing = self.is_playing();
        self.cancel();

        if !self.tokens.is_empty() {
            let target = (self.current_index as isize).saturating_add(delta);
            self.current_index = target.clamp(0, self.last_index() as isize) as usize;
        }

        was_playing
    }

    /// Seeks to `fraction` of the sequence (0.0 = start, 1.0 = end) without
    /// touching the play state.
    pub fn jump_to_fraction(&mut self, fraction: f64) {
        if self.tokens.is_empty() {
            return;
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = (fraction * self.tokens.len() as f64).floor() as usize;
        self.current_index = target.min(self.last_index());
    }

    /// Changes the reading speed by `delta` wpm. The word currently on
    /// screen keeps its scheduled time; the new speed applies from the next
    /// word on.
    pub fn adjust_speed(&mut self, delta: i32) -> u32 {
        self.settings.adjust_words_per_minute(delta)
    }

    /// Due instant of the pending advance, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.due)
    }

    pub fn scheduled_advance(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Share of the text shown so far, counting the current word, in percent.
    pub fn progress_percent(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        (self.current_index + 1) as f64 / self.tokens.len() as f64 * 100.0
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SessionSettings {
        &mut self.settings
    }

    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn schedule(&mut self, now: Instant) {
        let Some(token) = self.current_token() else {
            return;
        };
        let due = now
            .checked_add(delay_duration(token, &self.settings))
            .unwrap_or(now);

        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(ScheduledAdvance {
            generation: self.generation,
            due,
        });
    }

    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }
}

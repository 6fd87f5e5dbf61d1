use super::event::{AppEvent, SettingChange};
use super::mode::AppMode;
use super::render_state::{LoadingView, RenderState, StatusMessage, WordView};
use crate::engine::config::WPM_STEP;
use crate::engine::{tokenize_text, PlaybackEngine, PlaybackObserver, SessionSettings, Token};
use crate::input::job::{JobTracker, LoadRequest, LoadUpdate};
use crate::input::ocr::{OcrLanguage, OcrStatus};
use crate::input::{LoadError, LoadedDocument};
use crate::storage::{Language, Preferences};
use crate::ui::command::{command_to_app_event, parse_command};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long the chapter indicator stays up after a chapter-start word.
pub const CHAPTER_INDICATOR_DURATION: Duration = Duration::from_millis(1500);

const SMALL_STEP: isize = 1;
const LARGE_STEP: isize = 10;

/// Collects what playback reports between two engine calls.
#[derive(Debug, Default)]
struct ReadingFeedback {
    now: Option<Instant>,
    chapter_since: Option<Instant>,
    completed: bool,
}

impl ReadingFeedback {
    fn at(&mut self, now: Instant) -> &mut Self {
        self.now = Some(now);
        self
    }
}

impl PlaybackObserver for ReadingFeedback {
    fn on_word(&mut self, _index: usize, token: &Token) {
        if token.is_chapter_start {
            self.chapter_since = self.now;
        }
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}

struct LoadingState {
    label: String,
    percent: Option<u8>,
    ocr_status: Option<OcrStatus>,
}

pub struct App {
    mode: AppMode,
    engine: PlaybackEngine,
    preferences: Preferences,
    preferences_path: Option<PathBuf>,
    jobs: JobTracker,
    feedback: ReadingFeedback,
    loading: Option<LoadingState>,
    input: String,
    status: Option<StatusMessage>,
    show_help: bool,
}

impl App {
    /// App with preferences from the user's config directory.
    pub fn new() -> Self {
        let path = Preferences::default_path().ok();
        let preferences = path
            .as_deref()
            .map(Preferences::load_from)
            .unwrap_or_default();
        Self::with_preferences(preferences, path, JobTracker::default())
    }

    /// App with explicit preferences; `preferences_path` of `None` keeps
    /// changes in memory only.
    pub fn with_preferences(
        preferences: Preferences,
        preferences_path: Option<PathBuf>,
        jobs: JobTracker,
    ) -> Self {
        Self {
            mode: AppMode::Command,
            engine: PlaybackEngine::new(SessionSettings::default()),
            preferences,
            preferences_path,
            jobs,
            feedback: ReadingFeedback::default(),
            loading: None,
            input: String::new(),
            status: None,
            show_help: false,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn get_wpm(&self) -> u32 {
        self.engine.settings().words_per_minute()
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let chapter_end = self
            .feedback
            .chapter_since
            .map(|since| since + CHAPTER_INDICATOR_DURATION);
        match (self.engine.next_deadline(), chapter_end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advances time: applies finished loads and fires due playback.
    pub fn tick(&mut self, now: Instant) {
        self.poll_jobs(now);

        self.engine.tick(now, self.feedback.at(now));
        self.take_completion();

        if let Some(since) = self.feedback.chapter_since {
            if now.duration_since(since) >= CHAPTER_INDICATOR_DURATION {
                self.feedback.chapter_since = None;
            }
        }
    }

    fn poll_jobs(&mut self, now: Instant) {
        for update in self.jobs.poll() {
            match update {
                LoadUpdate::Progress(percent) => {
                    if let Some(loading) = self.loading.as_mut() {
                        loading.percent = Some(percent);
                    }
                }
                LoadUpdate::Status(status) => {
                    if let Some(loading) = self.loading.as_mut() {
                        loading.ocr_status = Some(status);
                    }
                }
                LoadUpdate::Finished(Ok(document)) => {
                    self.loading = None;
                    self.start_session(document, now);
                }
                LoadUpdate::Finished(Err(e)) => {
                    self.loading = None;
                    self.fail_load(e);
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Quit => {
                self.jobs.cancel();
                self.engine.stop();
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => {
                self.show_help = !self.show_help;
            }
            AppEvent::LoadFile(path) => {
                let path = expand_home(&path);
                self.begin_load(path.display().to_string(), LoadRequest::File(path));
            }
            AppEvent::LoadClipboard => {
                self.begin_load("clipboard".to_string(), LoadRequest::Clipboard);
            }
            AppEvent::LoadImage { path, language } => {
                let path = expand_home(&path);
                let language = language.unwrap_or(match self.preferences.language {
                    Language::En => OcrLanguage::English,
                    Language::De => OcrLanguage::German,
                });
                self.begin_load(
                    path.display().to_string(),
                    LoadRequest::Image { path, language },
                );
            }
            AppEvent::ReadText(text) => {
                let document = LoadedDocument {
                    text,
                    source: "input".to_string(),
                };
                self.start_session(document, now);
            }
            AppEvent::Setting(change) => self.apply_setting(change),
            AppEvent::Warning(message) => {
                self.status = Some(StatusMessage::Warning(message));
            }
            AppEvent::InvalidCommand(input) => {
                self.status = Some(StatusMessage::Warning(format!("Unknown command: {}", input)));
            }
        }
    }

    fn begin_load(&mut self, label: String, request: LoadRequest) {
        self.engine.stop();
        self.jobs.start(request);
        self.loading = Some(LoadingState {
            label,
            percent: None,
            ocr_status: None,
        });
        self.status = None;
        self.show_help = false;
        self.mode = AppMode::Loading;
    }

    fn fail_load(&mut self, error: LoadError) {
        warn!("load failed: {}", error);
        self.status = Some(StatusMessage::Error(error.to_string()));
        self.mode = AppMode::Command;
    }

    fn start_session(&mut self, document: LoadedDocument, now: Instant) {
        let tokens = tokenize_text(&document.text);
        if tokens.is_empty() {
            self.fail_load(LoadError::EmptyDocument);
            return;
        }

        info!("loaded {} words from {}", tokens.len(), document.source);
        self.feedback = ReadingFeedback::default();
        self.status = Some(StatusMessage::Loaded {
            words: tokens.len(),
            source: document.source,
        });
        self.engine.load(tokens);
        self.mark_chapter(now);
        self.show_help = false;
        self.mode = AppMode::Reading;
    }

    fn apply_setting(&mut self, change: SettingChange) {
        let description = match change {
            SettingChange::Theme(theme) => {
                self.preferences.theme = theme;
                self.persist_preferences();
                format!("theme {}", theme.as_str())
            }
            SettingChange::Language(language) => {
                self.preferences.language = language;
                self.persist_preferences();
                format!("language {}", language.as_str())
            }
            session => apply_session_setting(self.engine.settings_mut(), session),
        };
        debug!("setting changed: {}", description);
        self.status = Some(StatusMessage::SettingApplied(description));
    }

    fn persist_preferences(&mut self) {
        let Some(path) = self.preferences_path.as_deref() else {
            return;
        };
        if let Err(e) = self.preferences.save_to(path) {
            warn!("could not save preferences: {}", e);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.handle_event(AppEvent::Quit, now);
            return;
        }

        match self.mode {
            AppMode::Command => self.handle_command_key(key, now),
            AppMode::Loading => {
                if key.code == KeyCode::Esc && self.jobs.cancel() {
                    self.loading = None;
                    self.status = Some(StatusMessage::LoadCancelled);
                    self.mode = AppMode::Command;
                }
            }
            AppMode::Reading => self.handle_reading_key(key, now),
            AppMode::Quit => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => self.submit_command(now),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                if !self.input.is_empty() {
                    self.input.clear();
                } else if self.show_help {
                    self.show_help = false;
                } else if !self.engine.is_empty() {
                    self.mode = AppMode::Reading;
                }
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Parses and runs the command deck input.
    pub fn submit_command(&mut self, now: Instant) {
        let input = std::mem::take(&mut self.input);
        if input.trim().is_empty() {
            return;
        }
        let event = command_to_app_event(parse_command(&input));
        self.handle_event(event, now);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Appends pasted text to the command deck input.
    pub fn paste(&mut self, text: &str) {
        if self.mode == AppMode::Command {
            self.input.push_str(text);
        }
    }

    fn handle_reading_key(&mut self, key: KeyEvent, now: Instant) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char(' ') => {
                self.engine.toggle_play(now, self.feedback.at(now));
                self.take_completion();
            }
            KeyCode::Left if shift => self.navigate(-LARGE_STEP, now),
            KeyCode::Right if shift => self.navigate(LARGE_STEP, now),
            KeyCode::Left => self.navigate(-SMALL_STEP, now),
            KeyCode::Right => self.navigate(SMALL_STEP, now),
            KeyCode::Char('[') => self.navigate(-LARGE_STEP, now),
            KeyCode::Char(']') => self.navigate(LARGE_STEP, now),
            KeyCode::Up => {
                let wpm = self.engine.adjust_speed(WPM_STEP);
                self.status = Some(StatusMessage::SettingApplied(format!("{} wpm", wpm)));
            }
            KeyCode::Down => {
                let wpm = self.engine.adjust_speed(-WPM_STEP);
                self.status = Some(StatusMessage::SettingApplied(format!("{} wpm", wpm)));
            }
            KeyCode::Char(c @ '0'..='9') => {
                let tenth = c.to_digit(10).unwrap_or(0);
                self.engine.jump_to_fraction(f64::from(tenth) / 10.0);
                self.mark_chapter(now);
            }
            KeyCode::Char('h') => {
                self.engine.settings_mut().toggle_highlight();
            }
            KeyCode::Esc => {
                self.engine.pause();
                self.mode = AppMode::Command;
            }
            _ => {}
        }
    }

    /// Moves the cursor and resumes playback if it was running.
    fn navigate(&mut self, delta: isize, now: Instant) {
        let resume = self.engine.navigate(delta);
        self.mark_chapter(now);
        if resume {
            self.engine.play(now, self.feedback.at(now));
        }
        self.take_completion();
    }

    /// Shows the chapter indicator when the cursor sits on a chapter start.
    fn mark_chapter(&mut self, now: Instant) {
        if self
            .engine
            .current_token()
            .is_some_and(|token| token.is_chapter_start)
        {
            self.feedback.chapter_since = Some(now);
        }
    }

    fn take_completion(&mut self) {
        if std::mem::take(&mut self.feedback.completed) {
            info!("finished reading at word {}", self.engine.current_index() + 1);
            self.status = Some(StatusMessage::Finished);
        }
    }

    pub fn get_render_state(&self, now: Instant) -> RenderState {
        let settings = self.engine.settings();
        let chapter_indicator = self
            .feedback
            .chapter_since
            .map(|since| now.saturating_duration_since(since) < CHAPTER_INDICATOR_DURATION)
            .unwrap_or(false);

        RenderState {
            mode: self.mode,
            theme: self.preferences.theme,
            language: self.preferences.language,
            current_word: self
                .engine
                .current_token()
                .map(|token| WordView::new(&token.text, settings.highlight_fixation_point)),
            highlight: settings.highlight_fixation_point,
            progress: (self.engine.current_index(), self.engine.len()),
            progress_percent: self.engine.progress_percent(),
            wpm: settings.words_per_minute(),
            playing: self.engine.is_playing(),
            chapter_indicator,
            input: self.input.clone(),
            status: self.status.clone(),
            loading: self.loading.as_ref().map(|loading| LoadingView {
                label: loading.label.clone(),
                percent: loading.percent,
                ocr_status: loading.ocr_status,
            }),
            show_help: self.show_help,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_session_setting(settings: &mut SessionSettings, change: SettingChange) -> String {
    match change {
        SettingChange::Wpm(wpm) => format!("{} wpm", settings.set_words_per_minute(wpm)),
        SettingChange::ChapterPause(seconds) => {
            settings.set_chapter_pause_seconds(seconds);
            format!("chapter pause {} s", settings.chapter_pause_seconds)
        }
        SettingChange::SentencePause(seconds) => {
            settings.set_sentence_pause_seconds(seconds);
            format!("sentence pause {} s", settings.sentence_pause_seconds)
        }
        SettingChange::LongWordBonus(bonus) => {
            settings.set_long_word_bonus_ms(bonus);
            format!("long word bonus {} ms", settings.long_word_bonus_ms)
        }
        SettingChange::LongWordThreshold(threshold) => {
            settings.set_long_word_threshold(threshold);
            format!("long word threshold {}", settings.long_word_threshold)
        }
        SettingChange::Highlight(on) => {
            settings.highlight_fixation_point = on;
            format!("highlight {}", if on { "on" } else { "off" })
        }
        SettingChange::Theme(theme) => format!("theme {}", theme.as_str()),
        SettingChange::Language(language) => format!("language {}", language.as_str()),
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

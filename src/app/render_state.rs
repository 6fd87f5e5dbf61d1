use crate::app::mode::AppMode;
use crate::engine::format_word;
use crate::input::ocr::OcrStatus;
use crate::storage::{Language, ThemeId};

/// Message shown in the command deck status line.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Loaded { words: usize, source: String },
    Finished,
    LoadCancelled,
    SettingApplied(String),
    Warning(String),
    Error(String),
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Warning(_) | StatusMessage::Error(_))
    }
}

/// The current word split around its fixation character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView {
    pub before: String,
    pub center: String,
    pub after: String,
}

impl WordView {
    pub fn new(word: &str, highlight: bool) -> Self {
        let split = format_word(word, highlight);
        Self {
            before: split.before.to_string(),
            center: split.center.to_string(),
            after: split.after.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingView {
    pub label: String,
    pub percent: Option<u8>,
    pub ocr_status: Option<OcrStatus>,
}

/// Render state for UI components
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    pub theme: ThemeId,
    pub language: Language,
    pub current_word: Option<WordView>,
    pub highlight: bool,
    /// (current index, total tokens)
    pub progress: (usize, usize),
    pub progress_percent: f64,
    pub wpm: u32,
    pub playing: bool,
    pub chapter_indicator: bool,
    pub input: String,
    pub status: Option<StatusMessage>,
    pub loading: Option<LoadingView>,
    pub show_help: bool,
}

impl RenderState {
    /// Create an empty render state for when no document is loaded
    pub fn empty(mode: AppMode) -> Self {
        Self {
            mode,
            theme: ThemeId::default(),
            language: Language::default(),
            current_word: None,
            highlight: true,
            progress: (0, 0),
            progress_percent: 0.0,
            wpm: 0,
            playing: false,
            chapter_indicator: false,
            input: String::new(),
            status: None,
            loading: None,
            show_help: false,
        }
    }

    /// One-based `current / total` counter, or `None` without a document.
    pub fn counter(&self) -> Option<(usize, usize)> {
        let (current, total) = self.progress;
        if total == 0 {
            None
        } else {
            Some((current + 1, total))
        }
    }
}

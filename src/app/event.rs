use crate::input::ocr::OcrLanguage;
use crate::storage::{Language, ThemeId};

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    LoadClipboard,
    LoadImage {
        path: String,
        language: Option<OcrLanguage>,
    },
    ReadText(String),
    Setting(SettingChange),
    Quit,
    Help,
    Warning(String),
    InvalidCommand(String),
}

/// A runtime change to session settings or preferences.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SettingChange {
    Wpm(u32),
    ChapterPause(f64),
    SentencePause(f64),
    LongWordBonus(u64),
    LongWordThreshold(usize),
    Highlight(bool),
    Theme(ThemeId),
    Language(Language),
}

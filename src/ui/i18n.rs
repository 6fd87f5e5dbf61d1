//! Interface strings in English and German.

use crate::app::StatusMessage;
use crate::input::ocr::OcrStatus;
use crate::storage::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Chapter,
    Playing,
    Paused,
    Loading,
    PreparingRecognition,
    Recognizing,
    Finished,
    LoadCancelled,
    Words,
    CommandHint,
    ReadingHint,
    LoadingHint,
}

pub fn text(key: Text, language: Language) -> &'static str {
    match language {
        Language::En => match key {
            Text::Chapter => "CHAPTER",
            Text::Playing => "playing",
            Text::Paused => "paused",
            Text::Loading => "Loading",
            Text::PreparingRecognition => "Preparing text recognition",
            Text::Recognizing => "Recognising text",
            Text::Finished => "Finished reading",
            Text::LoadCancelled => "Loading cancelled",
            Text::Words => "words",
            Text::CommandHint => "@file  @@ clipboard  :ocr image  :h help  :q quit",
            Text::ReadingHint => "space play/pause  ←/→ word  [/] 10 words  ↑/↓ speed  0-9 jump  esc menu",
            Text::LoadingHint => "esc cancel",
        },
        Language::De => match key {
            Text::Chapter => "KAPITEL",
            Text::Playing => "läuft",
            Text::Paused => "pausiert",
            Text::Loading => "Lade",
            Text::PreparingRecognition => "Texterkennung wird vorbereitet",
            Text::Recognizing => "Text wird erkannt",
            Text::Finished => "Fertig gelesen",
            Text::LoadCancelled => "Laden abgebrochen",
            Text::Words => "Wörter",
            Text::CommandHint => "@Datei  @@ Zwischenablage  :ocr Bild  :h Hilfe  :q Ende",
            Text::ReadingHint => "Leertaste Start/Pause  ←/→ Wort  [/] 10 Wörter  ↑/↓ Tempo  0-9 Sprung  Esc Menü",
            Text::LoadingHint => "Esc abbrechen",
        },
    }
}

/// Status line text for `status`.
pub fn status_text(status: &StatusMessage, language: Language) -> String {
    match status {
        StatusMessage::Loaded { words, source } => {
            format!("{} {} · {}", words, text(Text::Words, language), source)
        }
        StatusMessage::Finished => text(Text::Finished, language).to_string(),
        StatusMessage::LoadCancelled => text(Text::LoadCancelled, language).to_string(),
        StatusMessage::SettingApplied(description) => description.clone(),
        StatusMessage::Warning(message) | StatusMessage::Error(message) => message.clone(),
    }
}

pub fn ocr_status_text(status: OcrStatus, language: Language) -> String {
    match status {
        OcrStatus::Loading => text(Text::PreparingRecognition, language).to_string(),
        OcrStatus::Recognizing(Some(percent)) => {
            format!("{} {}%", text(Text::Recognizing, language), percent)
        }
        OcrStatus::Recognizing(None) => format!("{}…", text(Text::Recognizing, language)),
    }
}

pub const HELP_EN: &[&str] = &[
    "@path              load a TXT, PDF, EPUB or DOCX file",
    "@@                 read the clipboard",
    ":ocr path [lang]   recognise text in an image (eng, deu)",
    "any other text     read it directly",
    ":wpm N             words per minute (100-1000)",
    ":chapter S         pause after chapter headings in seconds",
    ":sentence S        pause after sentences in seconds",
    ":bonus MS          extra time per letter of long words",
    ":threshold N       letters before a word counts as long",
    ":highlight on|off  mark the fixation letter",
    ":theme dark|light  colour scheme",
    ":lang en|de        interface language",
    ":q                 quit",
];

pub const HELP_DE: &[&str] = &[
    "@Pfad              TXT-, PDF-, EPUB- oder DOCX-Datei laden",
    "@@                 Zwischenablage lesen",
    ":ocr Pfad [Spr.]   Text in einem Bild erkennen (eng, deu)",
    "anderer Text       direkt lesen",
    ":wpm N             Wörter pro Minute (100-1000)",
    ":chapter S         Pause nach Kapitelüberschriften in Sekunden",
    ":sentence S        Pause nach Sätzen in Sekunden",
    ":bonus MS          Zusatzzeit pro Buchstabe langer Wörter",
    ":threshold N       Buchstaben, ab denen ein Wort lang ist",
    ":highlight on|off  Fixationsbuchstaben markieren",
    ":theme dark|light  Farbschema",
    ":lang en|de        Sprache der Oberfläche",
    ":q                 beenden",
];

pub fn help_lines(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => HELP_EN,
        Language::De => HELP_DE,
    }
}

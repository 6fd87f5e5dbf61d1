//! Command parsing for the TUI command deck
//!
//! Parses user input in Command mode, supporting:
//! - `:q` or `:quit` → Quit command
//! - `:h` or `:help` → Help command
//! - `@filename.pdf` or `@filename.epub` → Load file command
//! - `@@` → Load clipboard
//! - `:ocr image.png [eng|deu]` → Recognise text in an image
//! - `:wpm`, `:chapter`, `:sentence`, `:bonus`, `:threshold`, `:highlight`,
//!   `:theme`, `:lang` → Change a setting
//! - anything else → Read the typed text directly

use crate::app::event::{AppEvent, SettingChange};
use crate::input::ocr::OcrLanguage;
use crate::storage::{Language, ThemeId};

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadClipboard,
    LoadImage {
        path: String,
        language: Option<OcrLanguage>,
    },
    ReadText(String),
    Set(SettingChange),
    /// A known command with an unusable argument.
    Invalid(String),
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, argument) = match cmd.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (cmd, ""),
        };
        match name {
            "q" | "quit" => Command::Quit,
            "h" | "help" => Command::Help,
            "ocr" => parse_ocr(argument),
            "wpm" => parse_number(name, argument, |wpm| SettingChange::Wpm(wpm)),
            "chapter" => parse_seconds(name, argument, SettingChange::ChapterPause),
            "sentence" => parse_seconds(name, argument, SettingChange::SentencePause),
            "bonus" => parse_number(name, argument, SettingChange::LongWordBonus),
            "threshold" => parse_number(name, argument, SettingChange::LongWordThreshold),
            "highlight" => match argument {
                "on" => Command::Set(SettingChange::Highlight(true)),
                "off" => Command::Set(SettingChange::Highlight(false)),
                _ => invalid(name, argument),
            },
            "theme" => ThemeId::parse(argument)
                .map(|theme| Command::Set(SettingChange::Theme(theme)))
                .unwrap_or_else(|| invalid(name, argument)),
            "lang" => Language::parse(argument)
                .map(|language| Command::Set(SettingChange::Language(language)))
                .unwrap_or_else(|| invalid(name, argument)),
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::ReadText(input.to_string())
    }
}

/// `:ocr <path> [language]`; a trailing word that names a language is taken
/// as the language, everything before it as the path.
fn parse_ocr(argument: &str) -> Command {
    if argument.is_empty() {
        return invalid("ocr", argument);
    }

    if let Some((path, last)) = argument.rsplit_once(char::is_whitespace) {
        if let Some(language) = OcrLanguage::parse(last) {
            return Command::LoadImage {
                path: path.trim().to_string(),
                language: Some(language),
            };
        }
    }

    Command::LoadImage {
        path: argument.to_string(),
        language: None,
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    argument: &str,
    change: impl FnOnce(T) -> SettingChange,
) -> Command {
    match argument.parse::<T>() {
        Ok(value) => Command::Set(change(value)),
        Err(_) => invalid(name, argument),
    }
}

fn parse_seconds(name: &str, argument: &str, change: fn(f64) -> SettingChange) -> Command {
    match argument.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Command::Set(change(value)),
        _ => invalid(name, argument),
    }
}

fn invalid(name: &str, argument: &str) -> Command {
    if argument.is_empty() {
        Command::Invalid(format!(":{} needs a value", name))
    } else {
        Command::Invalid(format!("Invalid value for :{}: {}", name, argument))
    }
}

/// Convert a parsed command into an AppEvent
///
/// This is the translation layer between command deck input and App core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::LoadImage { path, language } => AppEvent::LoadImage { path, language },
        Command::ReadText(text) => AppEvent::ReadText(text),
        Command::Set(change) => AppEvent::Setting(change),
        Command::Invalid(message) => AppEvent::Warning(message),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}

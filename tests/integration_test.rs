use speedreader::engine::{format_word, tokenize_text, PlaybackEngine, PlaybackObserver};
use speedreader::engine::{SessionSettings, Token};
use speedreader::input::{load_document, LoadError};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Screen {
    shown: Vec<String>,
    completed: usize,
}

impl PlaybackObserver for Screen {
    fn on_word(&mut self, _index: usize, token: &Token) {
        self.shown.push(token.text.clone());
    }

    fn on_complete(&mut self) {
        self.completed += 1;
    }
}

#[test]
fn end_to_end_reading() {
    let test_file = "test_e2e.txt";
    let content = "Chapter 1\nHello world! This is a test of the reader.";

    let mut file = File::create(test_file).unwrap();
    file.write_all(content.as_bytes()).unwrap();

    let document = load_document(Path::new(test_file), &mut |_| {})
        .expect("Should load file successfully");
    assert_eq!(document.text, content);

    let tokens = tokenize_text(&document.text);
    assert_eq!(tokens.len(), 11);
    assert!(tokens[0].is_chapter_start);
    assert_eq!(tokens[3].text, "world!");
    assert!(tokens[3].is_sentence_end);

    let mut settings = SessionSettings::default();
    settings.set_words_per_minute(600);
    settings.set_chapter_pause_seconds(0.0);
    settings.set_sentence_pause_seconds(0.0);
    settings.set_long_word_bonus_ms(0);

    let mut engine = PlaybackEngine::new(settings);
    engine.load(tokens);

    let mut screen = Screen::default();
    let start = Instant::now();
    engine.play(start, &mut screen);

    let mut now = start;
    for _ in 0..20 {
        now += Duration::from_millis(150);
        engine.tick(now, &mut screen);
    }

    assert_eq!(screen.shown.len(), 10);
    assert_eq!(screen.shown.last().map(String::as_str), Some("reader."));
    assert_eq!(screen.completed, 1);
    assert_eq!(engine.current_index(), 10);
    assert!(!engine.is_playing());

    let split = format_word(&engine.current_token().unwrap().text, true);
    assert_eq!(
        format!("{}{}{}", split.before, split.center, split.after),
        "reader."
    );
    assert_eq!(split.center, "a");

    fs::remove_file(test_file).unwrap();
}

#[test]
fn unsupported_and_missing_files_are_distinguishable() {
    let test_file = "test_e2e_unsupported.odt";
    fs::write(test_file, b"content").unwrap();

    assert!(matches!(
        load_document(Path::new(test_file), &mut |_| {}),
        Err(LoadError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        load_document(Path::new("test_e2e_missing.txt"), &mut |_| {}),
        Err(LoadError::FileNotFound(_))
    ));

    fs::remove_file(test_file).unwrap();
}

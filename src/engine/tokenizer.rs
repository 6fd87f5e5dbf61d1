use crate::engine::token::{ends_sentence, Token};
use lazy_static::lazy_static;
use regex::Regex;

/// Number of words (the candidate included) a heading pattern may span.
const HEADING_LOOKAHEAD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLanguage {
    English,
    German,
    Neutral,
}

pub struct ChapterPattern {
    pub language: HeadingLanguage,
    pub regex: Regex,
}

fn pattern(language: HeadingLanguage, source: &str) -> ChapterPattern {
    ChapterPattern {
        language,
        regex: Regex::new(source).expect("chapter pattern must compile"),
    }
}

lazy_static! {
    /// Heading patterns tested against the joined lookahead of each word.
    ///
    /// All patterns except the Roman numeral one ignore case. Bare heading
    /// words are anchored at both ends, so they only match when nothing
    /// follows them within the lookahead.
    pub static ref CHAPTER_PATTERNS: Vec<ChapterPattern> = {
        use HeadingLanguage::*;
        vec![
            pattern(German, r"(?i)^kapitel\s+\d+"),
            pattern(English, r"(?i)^chapter\s+\d+"),
            pattern(German, r"(?i)^teil\s+\d+"),
            pattern(English, r"(?i)^part\s+\d+"),
            pattern(German, r"(?i)^abschnitt\s+\d+"),
            pattern(English, r"(?i)^section\s+\d+"),
            pattern(German, r"(?i)^\d+\.\s*kapitel"),
            pattern(Neutral, r"^[IVX]+\."),
            pattern(Neutral, r"(?i)^prolog(?:ue)?$"),
            pattern(Neutral, r"(?i)^epilog(?:ue)?$"),
            pattern(English, r"(?i)^introduction$"),
            pattern(German, r"(?i)^einleitung$"),
            pattern(English, r"(?i)^conclusion$"),
            pattern(German, r"(?i)^fazit$"),
        ]
    };
}

/// Returns true when `lookahead` starts with a chapter or section heading.
pub fn is_chapter_heading(lookahead: &str) -> bool {
    CHAPTER_PATTERNS
        .iter()
        .any(|pattern| pattern.regex.is_match(lookahead))
}

/// Splits text into words and annotates chapter and sentence boundaries.
///
/// Whitespace of any kind and length only separates words; it never
/// produces a token. Empty or whitespace-only input yields no tokens.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let end = (index + HEADING_LOOKAHEAD).min(words.len());
            let lookahead = words[index..end].join(" ");

            Token {
                text: word.to_string(),
                is_chapter_start: is_chapter_heading(&lookahead),
                is_sentence_end: ends_sentence(word),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_flags(text: &str) -> Vec<bool> {
        tokenize_text(text)
            .iter()
            .map(|t| t.is_chapter_start)
            .collect()
    }

    #[test]
    fn test_tokenize_single_word() {
        let tokens = tokenize_text("hello");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "hello");
        assert!(!tokens[0].is_chapter_start);
        assert!(!tokens[0].is_sentence_end);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        let tokens = tokenize_text("  hello \t\n\n  world\r\n ");
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize_text("").is_empty());
        assert!(tokenize_text(" \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_punctuation_in_text() {
        let tokens = tokenize_text("Hello, world.");
        assert_eq!(tokens[0].text, "Hello,");
        assert_eq!(tokens[1].text, "world.");
    }

    #[test]
    fn test_sentence_end_flags() {
        let tokens = tokenize_text("Stop. Go! Why? Because, \"quoted.\" end.)");
        let flags: Vec<bool> = tokens.iter().map(|t| t.is_sentence_end).collect();
        assert_eq!(flags, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn test_whitespace_insensitive_round_trip() {
        let input = "Kapitel 1\n\nEs war   einmal.\tDas Ende!";
        let tokens = tokenize_text(input);
        let rejoined = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let expected: Vec<&str> = input.split_whitespace().collect();
        assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_chapter_english_numbered() {
        assert_eq!(
            chapter_flags("Chapter 12 The Return"),
            vec![true, false, false, false]
        );
        assert_eq!(chapter_flags("PART 3 begins"), vec![true, false, false]);
        assert_eq!(chapter_flags("section 4"), vec![true, false]);
    }

    #[test]
    fn test_chapter_german_numbered() {
        assert_eq!(chapter_flags("Kapitel 2 Der Wald"), vec![true, false, false, false]);
        assert_eq!(chapter_flags("Teil 1"), vec![true, false]);
        assert_eq!(chapter_flags("Abschnitt 7"), vec![true, false]);
        assert_eq!(chapter_flags("3. Kapitel"), vec![true, false]);
    }

    #[test]
    fn test_chapter_roman_numeral() {
        assert_eq!(chapter_flags("IV. Die Reise"), vec![true, false, false]);
        assert_eq!(chapter_flags("iv. lowercase"), vec![false, false]);
    }

    #[test]
    fn test_chapter_heading_words() {
        assert_eq!(chapter_flags("EPILOGUE"), vec![true]);
        assert_eq!(chapter_flags("Prolog"), vec![true]);
        assert_eq!(chapter_flags("Fazit"), vec![true]);
        assert_eq!(chapter_flags("Introduction"), vec![true]);
        assert_eq!(chapter_flags("end of the Conclusion"), vec![false, false, false, true]);
    }

    #[test]
    fn test_heading_words_ignore_case() {
        assert_eq!(chapter_flags("prologue"), vec![true]);
        assert_eq!(chapter_flags("EINLEITUNG"), vec![true]);
        assert_eq!(chapter_flags("fazit"), vec![true]);
    }

    #[test]
    fn test_heading_words_must_end_the_lookahead() {
        assert_eq!(chapter_flags("Prologue It began"), vec![false, false, false]);
        assert_eq!(chapter_flags("Einleitung: Worum"), vec![false, false]);
        assert_eq!(chapter_flags("Conclusion."), vec![false]);
    }

    #[test]
    fn test_heading_words_in_prose_are_ignored() {
        assert_eq!(
            chapter_flags("the introduction of prologues"),
            vec![false, false, false, false]
        );
        assert_eq!(chapter_flags("Introductions matter"), vec![false, false]);
    }

    #[test]
    fn test_chapter_number_must_follow() {
        assert_eq!(chapter_flags("Chapter and verse"), vec![false, false, false]);
    }

    #[test]
    fn test_chapter_number_near_end_of_text() {
        // Lookahead shrinks to the remaining words at the end of the input.
        assert_eq!(chapter_flags("end Chapter 9"), vec![false, true, false]);
    }

    #[test]
    fn test_chapter_and_sentence_flags_coexist() {
        let tokens = tokenize_text("IV.");
        assert!(tokens[0].is_chapter_start);
        assert!(tokens[0].is_sentence_end);
    }

    #[test]
    fn test_patterns_cover_both_languages() {
        let english = CHAPTER_PATTERNS
            .iter()
            .filter(|p| p.language == HeadingLanguage::English)
            .count();
        let german = CHAPTER_PATTERNS
            .iter()
            .filter(|p| p.language == HeadingLanguage::German)
            .count();
        assert!(english > 0 && german > 0);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Chapter 1 A dark night. Rain!";
        assert_eq!(tokenize_text(text), tokenize_text(text));
    }
}

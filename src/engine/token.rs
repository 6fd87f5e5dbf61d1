/// A single word of the reading stream.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub text: String,
    /// Set when this word opens a chapter or section heading.
    pub is_chapter_start: bool,
    /// Set when the word ends with `.`, `!` or `?`.
    pub is_sentence_end: bool,
}

impl Token {
    /// Builds a token for a word with no heading context.
    pub fn word(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_chapter_start: false,
            is_sentence_end: ends_sentence(text),
        }
    }
}

pub(crate) fn ends_sentence(word: &str) -> bool {
    matches!(word.chars().last(), Some('.' | '!' | '?'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_marks_sentence_end() {
        assert!(Token::word("done.").is_sentence_end);
        assert!(Token::word("really?").is_sentence_end);
        assert!(Token::word("wow!").is_sentence_end);
        assert!(!Token::word("comma,").is_sentence_end);
        assert!(!Token::word("3.14x").is_sentence_end);
    }

    #[test]
    fn test_word_is_not_chapter_start() {
        assert!(!Token::word("Chapter").is_chapter_start);
    }
}

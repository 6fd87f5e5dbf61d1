//! Fixation point (optimal viewing position) of a displayed word.
//!
//! The eye rests slightly left of the middle of a word. The fixation
//! character sits at 40% of the word length, counted in user-perceived
//! characters so that combining marks and emoji sequences stay intact.

use unicode_segmentation::UnicodeSegmentation;

/// Share of the word length that precedes the fixation character.
const FIXATION_RATIO: f64 = 0.4;

/// A word partitioned around its fixation character.
///
/// `before + center + after` always equals the original word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixationSplit<'a> {
    pub before: &'a str,
    pub center: &'a str,
    pub after: &'a str,
}

/// Index of the fixation character for a word of `len` characters.
pub fn fixation_index(len: usize) -> usize {
    (len as f64 * FIXATION_RATIO).floor() as usize
}

/// Splits `word` around its fixation character.
///
/// Without highlighting, or for words shorter than two characters, the
/// whole word is returned as the center.
pub fn format_word(word: &str, highlight: bool) -> FixationSplit<'_> {
    let boundaries: Vec<usize> = word.grapheme_indices(true).map(|(i, _)| i).collect();

    if !highlight || boundaries.len() <= 1 {
        return FixationSplit {
            before: "",
            center: word,
            after: "",
        };
    }

    let index = fixation_index(boundaries.len());
    let start = boundaries[index];
    let end = boundaries.get(index + 1).copied().unwrap_or(word.len());

    FixationSplit {
        before: &word[..start],
        center: &word[start..end],
        after: &word[end..],
    }
}

impl FixationSplit<'_> {
    /// Renders the split as three spans for a markup renderer, with every
    /// fragment escaped.
    pub fn to_markup(&self) -> String {
        format!(
            "<span class=\"orp-before\">{}</span><span class=\"orp-center\">{}</span><span class=\"orp-after\">{}</span>",
            escape_markup(self.before),
            escape_markup(self.center),
            escape_markup(self.after),
        )
    }
}

/// Escapes the characters that are significant in HTML/XML text.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

use crate::storage::ThemeId;
use ratatui::style::Color;

/// Reader colour scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub anchor: Color,
    pub dimmed: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    /// Dark theme, the default
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26 Stormy Dark
            surface: Color::Rgb(36, 40, 59),    // #24283B
            text: Color::Rgb(169, 177, 214),    // #A9B1D6 Light Blue
            anchor: Color::Rgb(247, 118, 142),  // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),  // #646E96 Dimmed Blue
            error: Color::Rgb(224, 175, 104),   // #E0AF68 Amber
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 243, 237), // #F5F3ED Paper
            surface: Color::Rgb(230, 226, 215),    // #E6E2D7
            text: Color::Rgb(52, 59, 88),          // #343B58 Ink
            anchor: Color::Rgb(191, 38, 66),       // #BF2642 Crimson
            dimmed: Color::Rgb(130, 134, 150),     // #828696 Slate
            error: Color::Rgb(150, 80, 0),         // #965000 Rust
        }
    }

    pub fn for_id(id: ThemeId) -> Self {
        match id {
            ThemeId::Dark => Self::dark(),
            ThemeId::Light => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_for_id() {
        assert_eq!(Theme::for_id(ThemeId::Dark), Theme::dark());
        assert_eq!(Theme::for_id(ThemeId::Light), Theme::light());
        assert_ne!(Theme::dark().background, Theme::light().background);
    }
}

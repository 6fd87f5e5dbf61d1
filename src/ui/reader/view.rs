use crate::app::mode::AppMode;
use crate::app::render_state::{LoadingView, RenderState, WordView};
use crate::input::ocr::OcrStatus;
use crate::storage::Language;
use crate::ui::i18n::{help_lines, ocr_status_text, status_text, text, Text};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PROGRESS_BAR_WIDTH: usize = 40;

/// Builds the word line so that the fixation character starts at column
/// `width / 2` regardless of the word length.
pub fn render_word_display(word: &WordView, width: u16, theme: &Theme) -> Line<'static> {
    let anchor_column = usize::from(width / 2);
    let padding = anchor_column.saturating_sub(word.before.width());

    let text_style = Style::default().fg(theme.text);
    let mut spans = vec![Span::raw(" ".repeat(padding))];
    if !word.before.is_empty() {
        spans.push(Span::styled(word.before.clone(), text_style));
    }

    let highlighted = !word.before.is_empty() || !word.after.is_empty();
    let center_style = if highlighted {
        Style::default().fg(theme.anchor).add_modifier(Modifier::BOLD)
    } else {
        text_style
    };
    spans.push(Span::styled(word.center.clone(), center_style));

    if !word.after.is_empty() {
        spans.push(Span::styled(word.after.clone(), text_style));
    }

    Line::from(spans)
}

/// Thin bar of `─` with the read share in the text colour.
pub fn render_progress_bar(progress_percent: f64, theme: &Theme) -> Line<'static> {
    let share = (progress_percent / 100.0).clamp(0.0, 1.0);
    let filled_len = (share * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let empty_len = PROGRESS_BAR_WIDTH - filled_len;

    Line::from(vec![
        Span::styled("─".repeat(filled_len), Style::default().fg(theme.text)),
        Span::styled("─".repeat(empty_len), Style::default().fg(theme.dimmed)),
    ])
    .alignment(Alignment::Center)
}

/// `index / total · wpm · state`
pub fn render_counter(state: &RenderState, theme: &Theme) -> Line<'static> {
    let Some((current, total)) = state.counter() else {
        return Line::default();
    };
    let play_state = if state.playing {
        text(Text::Playing, state.language)
    } else {
        text(Text::Paused, state.language)
    };

    Line::from(vec![
        Span::styled(
            format!("{} / {}", current, total),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("  ·  {} wpm  ·  {}", state.wpm, play_state),
            Style::default().fg(theme.dimmed),
        ),
    ])
    .alignment(Alignment::Center)
}

pub fn render_chapter_indicator(language: Language, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text(Text::Chapter, language),
        Style::default()
            .fg(theme.anchor)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}

pub fn render_loading(loading: &LoadingView, language: Language, theme: &Theme) -> Gauge<'static> {
    let label = match (loading.ocr_status, loading.percent) {
        (Some(status), _) => ocr_status_text(status, language),
        (None, Some(percent)) => format!("{} {} {}%", text(Text::Loading, language), loading.label, percent),
        (None, None) => format!("{} {}…", text(Text::Loading, language), loading.label),
    };
    let percent = match loading.ocr_status {
        Some(OcrStatus::Recognizing(Some(percent))) => percent,
        Some(_) => 0,
        None => loading.percent.unwrap_or(0),
    };

    Gauge::default()
        .gauge_style(Style::default().fg(theme.anchor).bg(theme.surface))
        .percent(u16::from(percent.min(100)))
        .label(label)
}

pub fn render_help(language: Language, theme: &Theme) -> Paragraph<'static> {
    let lines: Vec<Line> = help_lines(language)
        .iter()
        .map(|line| Line::from(Span::styled(*line, Style::default().fg(theme.text))))
        .collect();

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dimmed))
            .style(Style::default().bg(theme.surface)),
    )
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState, theme: &Theme) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar =
        Paragraph::new("▌").style(Style::default().fg(theme.anchor).bg(theme.surface));
    frame.render_widget(accent_bar, layout[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(layout[1]);

    let mode_indicator = match state.mode {
        AppMode::Command => " COMMAND ",
        AppMode::Loading => " LOADING ",
        AppMode::Reading => " READING ",
        AppMode::Quit => " QUIT ",
    };
    let prompt = Line::from(vec![
        Span::styled(
            mode_indicator,
            Style::default().fg(theme.background).bg(theme.anchor),
        ),
        Span::styled(" > ", Style::default().fg(theme.dimmed)),
        Span::styled(state.input.clone(), Style::default().fg(theme.text)),
    ]);
    frame.render_widget(
        Paragraph::new(prompt).style(Style::default().bg(theme.surface)),
        rows[0],
    );

    let status_line = match &state.status {
        Some(status) => {
            let color = if status.is_error() { theme.error } else { theme.text };
            Line::from(Span::styled(
                status_text(status, state.language),
                Style::default().fg(color),
            ))
        }
        None => Line::default(),
    };
    frame.render_widget(
        Paragraph::new(status_line).style(Style::default().bg(theme.surface)),
        rows[1],
    );

    let hint = match state.mode {
        AppMode::Reading => Text::ReadingHint,
        AppMode::Loading => Text::LoadingHint,
        _ => Text::CommandHint,
    };
    frame.render_widget(
        Paragraph::new(text(hint, state.language))
            .style(Style::default().fg(theme.dimmed).bg(theme.surface)),
        rows[2],
    );
}

/// Draws a whole frame for `state`.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    let theme = Theme::for_id(state.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);
    let main_area = chunks[0];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // chapter indicator
            Constraint::Length(1), // word
            Constraint::Length(1),
            Constraint::Length(1), // progress bar
            Constraint::Length(1), // counter
            Constraint::Fill(1),
        ])
        .split(main_area);

    if state.show_help {
        frame.render_widget(render_help(state.language, &theme), main_area);
    } else if let Some(loading) = &state.loading {
        let gauge_area = centered_row(rows[2], 50);
        frame.render_widget(render_loading(loading, state.language, &theme), gauge_area);
    } else if let Some(word) = &state.current_word {
        if state.chapter_indicator {
            frame.render_widget(render_chapter_indicator(state.language, &theme), rows[1]);
        }
        let word_line = render_word_display(word, rows[2].width, &theme);
        frame.render_widget(Paragraph::new(word_line), rows[2]);
        frame.render_widget(render_progress_bar(state.progress_percent, &theme), rows[4]);
        frame.render_widget(render_counter(state, &theme), rows[5]);
    }

    render_command_deck(frame, chunks[1], state, &theme);
}

fn centered_row(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_word_display_aligns_fixation_column() {
        let theme = Theme::dark();
        for word in ["a", "word", "extraordinary"] {
            let view = WordView::new(word, true);
            let line = render_word_display(&view, 40, &theme);
            let rendered = line_text(&line);
            let prefix = rendered.len() - view.center.len() - view.after.len();
            assert_eq!(prefix, 20, "fixation of {:?} must start at column 20", word);
        }
    }

    #[test]
    fn test_word_display_anchor_is_highlighted() {
        let theme = Theme::dark();
        let line = render_word_display(&WordView::new("test", true), 20, &theme);
        let center = line
            .spans
            .iter()
            .find(|span| span.content == "e")
            .unwrap();
        assert_eq!(center.style.fg, Some(theme.anchor));
    }

    #[test]
    fn test_word_display_without_highlight_is_plain() {
        let theme = Theme::dark();
        let line = render_word_display(&WordView::new("test", false), 20, &theme);
        assert!(line
            .spans
            .iter()
            .all(|span| span.style.fg != Some(theme.anchor)));
    }

    #[test]
    fn test_word_display_wide_characters() {
        let theme = Theme::dark();
        let view = WordView::new("日本語です", true);
        let line = render_word_display(&view, 40, &theme);
        // "日本" occupies four columns before the fixation character.
        assert_eq!(line.spans[0].content.len(), 16);
    }

    #[test]
    fn test_render_progress_bar_bounds() {
        let theme = Theme::dark();
        for percent in [0.0, 50.0, 100.0, 250.0] {
            let line = render_progress_bar(percent, &theme);
            assert_eq!(line_text(&line).chars().count(), PROGRESS_BAR_WIDTH);
        }
        let half = render_progress_bar(50.0, &theme);
        assert_eq!(half.spans[0].content.chars().count(), 20);
    }

    #[test]
    fn test_counter_text() {
        let mut state = RenderState::empty(AppMode::Reading);
        state.progress = (4, 10);
        state.wpm = 300;
        state.language = Language::En;
        let line = render_counter(&state, &Theme::dark());
        assert_eq!(line_text(&line), "5 / 10  ·  300 wpm  ·  paused");
    }

    #[test]
    fn test_draw_reading_frame() {
        let mut state = RenderState::empty(AppMode::Reading);
        state.current_word = Some(WordView::new("Kapitel", true));
        state.progress = (0, 3);
        state.progress_percent = 33.3;
        state.wpm = 500;
        state.chapter_indicator = true;

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Kapitel"));
        assert!(screen.contains("KAPITEL"));
        assert!(screen.contains("1 / 3"));
        assert!(screen.contains("READING"));
    }

    #[test]
    fn test_draw_loading_and_help_frames() {
        let mut state = RenderState::empty(AppMode::Loading);
        state.loading = Some(LoadingView {
            label: "book.pdf".to_string(),
            percent: Some(50),
            ocr_status: None,
        });
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        state.loading = None;
        state.mode = AppMode::Command;
        state.show_help = true;
        terminal.draw(|frame| draw(frame, &state)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains(":wpm"));
    }
}

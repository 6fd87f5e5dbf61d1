use crate::app::{mode::AppMode, App};
use crate::ui::reader::view::draw;
use crate::ui::terminal_guard::TerminalGuard;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Longest wait between two redraws while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Redraw rate while a background load reports progress.
const LOADING_POLL: Duration = Duration::from_millis(1000 / 30);

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Runs until the app switches to [`AppMode::Quit`].
    ///
    /// The poll timeout is the time left until the app's next deadline, so
    /// a word changes as soon as its display time is over and keys are
    /// handled in between.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        loop {
            app.tick(Instant::now());
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            self.render_frame(app)?;

            let timeout = poll_timeout(app.next_deadline(), app.mode(), Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => app.handle_key(key, Instant::now()),
                    Event::Paste(text) => app.paste(&text),
                    _ => {}
                }
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let render_state = app.get_render_state(Instant::now());
        self.terminal.draw(|frame| draw(frame, &render_state))?;
        Ok(())
    }
}

/// How long to wait for input before the next tick.
pub fn poll_timeout(deadline: Option<Instant>, mode: AppMode, now: Instant) -> Duration {
    let idle = if mode == AppMode::Loading {
        LOADING_POLL
    } else {
        IDLE_POLL
    };
    match deadline {
        Some(deadline) => deadline.saturating_duration_since(now).min(idle),
        None => idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_waits_for_deadline() {
        let now = Instant::now();
        let timeout = poll_timeout(Some(now + Duration::from_millis(120)), AppMode::Reading, now);
        assert_eq!(timeout, Duration::from_millis(120));
    }

    #[test]
    fn test_poll_timeout_past_deadline_is_zero() {
        let now = Instant::now();
        let timeout = poll_timeout(Some(now), AppMode::Reading, now + Duration::from_millis(5));
        assert_eq!(timeout, Duration::ZERO);
    }

    #[test]
    fn test_poll_timeout_is_capped() {
        let now = Instant::now();
        assert_eq!(poll_timeout(None, AppMode::Command, now), IDLE_POLL);
        assert_eq!(
            poll_timeout(Some(now + Duration::from_secs(2)), AppMode::Reading, now),
            IDLE_POLL
        );
        assert_eq!(poll_timeout(None, AppMode::Loading, now), LOADING_POLL);
    }
}

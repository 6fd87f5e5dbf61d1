use env_logger::{Env, Target};
use speedreader::app::{App, AppEvent};
use speedreader::storage;
use speedreader::ui::TuiManager;
use std::fs::{self, OpenOptions};
use std::time::Instant;

const LOG_FILE: &str = "speedreader.log";

/// Logs go to a file; the terminal belongs to the TUI.
fn init_logging() {
    let Ok(dir) = storage::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    log::info!("speedreader {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = App::new();
    if let Some(path) = std::env::args().nth(1) {
        app.handle_event(AppEvent::LoadFile(path), Instant::now());
    }

    // Run the main TUI event loop
    // The TUI will handle all user input including file loading commands
    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}

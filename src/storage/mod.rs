use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub mod preferences;

pub use preferences::{Language, Preferences, ThemeId};

const APP_DIR: &str = "speedreader";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid preferences file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("No configuration directory available")]
    NoConfigDir,
}

/// `<config_dir>/speedreader`, e.g. `~/.config/speedreader` on Linux.
pub fn config_dir() -> Result<PathBuf, StorageError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(StorageError::NoConfigDir)
}

/// `<data_dir>/speedreader`, where the log file lives.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(StorageError::NoConfigDir)
}

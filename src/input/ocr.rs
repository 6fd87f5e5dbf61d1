//! Text recognition from images.
//!
//! Recognition itself is done by an external engine. [`TesseractCli`] runs
//! the `tesseract` executable; anything else can plug in through the
//! [`Recognizer`] trait.

use super::{check_file_size, LoadError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Phases reported while recognising an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrStatus {
    /// Language data and engine start-up.
    Loading,
    /// Recognition running, with a completion percentage when known.
    Recognizing(Option<u8>),
}

/// Recognition languages offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrLanguage {
    English,
    German,
}

impl OcrLanguage {
    /// Tesseract traineddata code.
    pub fn code(self) -> &'static str {
        match self {
            OcrLanguage::English => "eng",
            OcrLanguage::German => "deu",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "eng" | "en" | "english" => Some(OcrLanguage::English),
            "deu" | "de" | "ger" | "german" | "deutsch" => Some(OcrLanguage::German),
            _ => None,
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "pnm"];

/// True when the path looks like an image the recognizer can read.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub trait Recognizer: Send + Sync {
    /// Recognises the text in `image`; the result is trimmed.
    fn recognize(
        &self,
        image: &Path,
        language: OcrLanguage,
        on_status: &mut dyn FnMut(OcrStatus),
    ) -> Result<String, LoadError>;
}

/// Runs `tesseract <image> stdout -l <lang>`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
        }
    }
}

impl TesseractCli {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Recognizer for TesseractCli {
    fn recognize(
        &self,
        image: &Path,
        language: OcrLanguage,
        on_status: &mut dyn FnMut(OcrStatus),
    ) -> Result<String, LoadError> {
        if !image.exists() {
            return Err(LoadError::FileNotFound(image.to_path_buf()));
        }
        check_file_size(image)?;
        if !is_image_path(image) {
            return Err(LoadError::UnsupportedFormat(image.display().to_string()));
        }

        on_status(OcrStatus::Loading);
        let mut command = Command::new(&self.program);
        command
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language.code());
        log::debug!("running {:?}", command);

        on_status(OcrStatus::Recognizing(None));
        let output = command.output().map_err(|e| {
            LoadError::Recognition(format!("cannot run {}: {}", self.program.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LoadError::Recognition(
                stderr.lines().last().unwrap_or("tesseract failed").trim().to_string(),
            ));
        }

        on_status(OcrStatus::Recognizing(Some(100)));
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod clipboard;
pub mod docx;
pub mod epub;
pub mod html_text;
pub mod job;
pub mod ocr;
pub mod pdf;
pub mod txt;

/// Largest document accepted for extraction (50 MiB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("{format} extraction failed: {message}")]
    Extraction {
        format: DocumentFormat,
        message: String,
    },

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No readable text found")]
    EmptyDocument,

    #[error("Loading stopped before it finished")]
    Interrupted,
}

impl LoadError {
    pub(crate) fn extraction(format: DocumentFormat, err: impl fmt::Display) -> Self {
        LoadError::Extraction {
            format,
            message: err.to_string(),
        }
    }
}

/// Text produced by a loader, ready to be tokenized.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub text: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Epub,
    Docx,
}

impl DocumentFormat {
    /// Picks the extractor from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(DocumentFormat::Txt),
            "pdf" => Ok(DocumentFormat::Pdf),
            "epub" => Ok(DocumentFormat::Epub),
            "docx" | "doc" => Ok(DocumentFormat::Docx),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn label(self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_ascii_uppercase())
    }
}

/// Rejects files above [`MAX_FILE_SIZE`] before anything is parsed.
pub fn check_file_size(path: &Path) -> Result<u64, LoadError> {
    let metadata = fs::metadata(path).map_err(|_| LoadError::FileNotFound(path.to_path_buf()))?;
    let size = metadata.len();

    if size > MAX_FILE_SIZE {
        return Err(LoadError::FileTooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(size)
}

/// Extracts the plain text of a document, reporting progress in percent.
pub fn extract(path: &Path, on_progress: &mut dyn FnMut(u8)) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    check_file_size(path)?;
    let format = DocumentFormat::from_path(path)?;
    log::debug!("extracting {} as {}", path.display(), format);

    match format {
        DocumentFormat::Txt => txt::extract(path, on_progress),
        DocumentFormat::Pdf => pdf::extract(path, on_progress),
        DocumentFormat::Epub => epub::extract(path, on_progress),
        DocumentFormat::Docx => docx::extract(path, on_progress),
    }
}

/// Loads a document and checks that it contains something to read.
pub fn load_document(
    path: &Path,
    on_progress: &mut dyn FnMut(u8),
) -> Result<LoadedDocument, LoadError> {
    let text = extract(path, on_progress)?;

    if text.trim().is_empty() {
        return Err(LoadError::EmptyDocument);
    }

    let format = DocumentFormat::from_path(path)?;
    Ok(LoadedDocument {
        text,
        source: format!("{}:{}", format.label(), path.display()),
    })
}

/// Percentage of `done` out of `total` steps, rounded.
pub(crate) fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.EPUB")).unwrap(),
            DocumentFormat::Epub
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b/notes.txt")).unwrap(),
            DocumentFormat::Txt
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("paper.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("letter.doc")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        assert!(matches!(
            DocumentFormat::from_path(Path::new("image.png")),
            Err(LoadError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_path(Path::new("README")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract(Path::new("/nonexistent/path/book.txt"), &mut |_| {});
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_extract_unsupported_existing_file() {
        let test_file = "test_input_unsupported.xyz";
        File::create(test_file).unwrap().write_all(b"data").unwrap();

        let result = extract(Path::new(test_file), &mut |_| {});
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_size_cap_checked_before_format() {
        let test_file = "test_input_too_large.xyz";
        let file = File::create(test_file).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        let result = extract(Path::new(test_file), &mut |_| {});
        assert!(matches!(
            result,
            Err(LoadError::FileTooLarge { size, limit }) if size == MAX_FILE_SIZE + 1 && limit == MAX_FILE_SIZE
        ));

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_load_document_rejects_blank_text() {
        let test_file = "test_input_blank.txt";
        File::create(test_file).unwrap().write_all(b"  \n\t ").unwrap();

        let result = load_document(Path::new(test_file), &mut |_| {});
        assert!(matches!(result, Err(LoadError::EmptyDocument)));

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_load_document_source_label() {
        let test_file = "test_input_source.txt";
        File::create(test_file).unwrap().write_all(b"hello").unwrap();

        let doc = load_document(Path::new(test_file), &mut |_| {}).unwrap();
        assert_eq!(doc.text, "hello");
        assert_eq!(doc.source, "txt:test_input_source.txt");

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn test_extraction_error_message() {
        let err = LoadError::extraction(DocumentFormat::Pdf, "bad xref");
        assert_eq!(err.to_string(), "PDF extraction failed: bad xref");
    }
}

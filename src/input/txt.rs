use super::{DocumentFormat, LoadError};
use std::fs;
use std::path::Path;

/// Reads a plain-text file. Invalid UTF-8 sequences are replaced rather
/// than rejected, and a leading byte-order mark is dropped.
pub fn extract(path: &Path, on_progress: &mut dyn FnMut(u8)) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::extraction(DocumentFormat::Txt, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text
        .strip_prefix('\u{feff}')
        .unwrap_or(text.as_ref())
        .to_string();

    on_progress(100);
    Ok(text)
}

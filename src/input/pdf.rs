use super::{percent, DocumentFormat, LoadError};
use std::fs;
use std::path::Path;

/// Load text from PDF file using pdf-extract crate.
///
/// Pages are extracted in order and separated by a blank line. Progress is
/// reported once per page.
pub fn extract(path: &Path, on_progress: &mut dyn FnMut(u8)) -> Result<String, LoadError> {
    let buffer = fs::read(path).map_err(|e| LoadError::extraction(DocumentFormat::Pdf, e))?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&buffer)
        .map_err(|e| LoadError::extraction(DocumentFormat::Pdf, e))?;

    Ok(join_pages(&pages, on_progress))
}

fn join_pages(pages: &[String], on_progress: &mut dyn FnMut(u8)) -> String {
    let mut text = String::new();

    for (index, page) in pages.iter().enumerate() {
        text.push_str(page.trim_end());
        text.push_str("\n\n");
        on_progress(percent(index + 1, pages.len()));
    }

    text
}

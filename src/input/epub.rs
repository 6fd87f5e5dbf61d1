use super::html_text::extract_plain_text;
use super::{percent, DocumentFormat, LoadError};
use std::path::Path;

/// Load text from EPUB file using epub crate.
///
/// Chapters are read in spine order, stripped of markup and separated by a
/// blank line. Progress is reported once per chapter.
pub fn extract(path: &Path, on_progress: &mut dyn FnMut(u8)) -> Result<String, LoadError> {
    let mut doc = epub::doc::EpubDoc::new(path)
        .map_err(|e| LoadError::extraction(DocumentFormat::Epub, e))?;

    let num_chapters = doc.get_num_chapters();

    if num_chapters == 0 {
        return Err(LoadError::extraction(
            DocumentFormat::Epub,
            "No chapters found in EPUB",
        ));
    }

    let mut chapters = Vec::with_capacity(num_chapters);

    for chapter_idx in 0..num_chapters {
        if doc.set_current_chapter(chapter_idx) {
            if let Some((chapter_content, _mime)) = doc.get_current_str() {
                chapters.push(extract_plain_text(&chapter_content));
            }
        }
        on_progress(percent(chapter_idx + 1, num_chapters));
    }

    Ok(join_chapters(chapters))
}

fn join_chapters(chapters: Vec<String>) -> String {
    chapters
        .into_iter()
        .filter(|chapter| !chapter.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

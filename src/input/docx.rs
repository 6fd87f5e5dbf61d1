use super::{DocumentFormat, LoadError};
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

/// Load text from a DOCX file: the text runs of the main document part,
/// one paragraph per line.
pub fn extract(path: &Path, on_progress: &mut dyn FnMut(u8)) -> Result<String, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::extraction(DocumentFormat::Docx, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| LoadError::extraction(DocumentFormat::Docx, e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| LoadError::extraction(DocumentFormat::Docx, e))?
        .read_to_string(&mut xml)
        .map_err(|e| LoadError::extraction(DocumentFormat::Docx, e))?;

    let text = document_text(&xml)?;
    on_progress(100);
    Ok(text)
}

/// Collects `w:t` runs; `w:p` ends a line, `w:tab` and `w:br` become
/// whitespace.
fn document_text(xml: &str) -> Result<String, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_run {
                    let run = e.decode().map_err(|e| {
                        LoadError::extraction(DocumentFormat::Docx, format!("{:?}", e))
                    })?;
                    text.push_str(&run);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text_run {
                    let name = e.decode().map_err(|e| {
                        LoadError::extraction(DocumentFormat::Docx, format!("{:?}", e))
                    })?;
                    let entity = format!("&{};", name);
                    let resolved = unescape(&entity)
                        .map_err(|e| LoadError::extraction(DocumentFormat::Docx, e))?;
                    text.push_str(&resolved);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(LoadError::extraction(DocumentFormat::Docx, e)),
        }
    }

    Ok(text.trim_end().to_string())
}

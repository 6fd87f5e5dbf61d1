use super::{LoadError, LoadedDocument};
use arboard::Clipboard;

/// Reads the system clipboard as a document.
pub fn load() -> Result<LoadedDocument, LoadError> {
    let mut clipboard = Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;

    document_from_text(text)
}

fn document_from_text(text: String) -> Result<LoadedDocument, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::EmptyDocument);
    }

    Ok(LoadedDocument {
        text,
        source: "clipboard".to_string(),
    })
}

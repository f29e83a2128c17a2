//! PDF text reader using pdf-extract.

use std::path::Path;

use super::FileReader;
use crate::error::{Result, WordlitError};

/// Reads PDF documents; page texts are joined by newlines.
pub struct PdfReader;

impl FileReader for PdfReader {
    fn can_read(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("pdf")
    }

    fn read(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            WordlitError::Acquire(format!("Unreadable PDF {}: {}", path.display(), e))
        })?;

        // pdf-extract marks page breaks with form feeds
        Ok(text.replace('\x0C', "\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match() {
        let reader = PdfReader;
        assert!(reader.can_read("pdf"));
        assert!(reader.can_read("PDF"));
        assert!(!reader.can_read("docx"));
    }

    #[test]
    fn test_invalid_pdf_is_acquire_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let reader = PdfReader;
        let result = reader.read(&path);
        assert!(matches!(result, Err(WordlitError::Acquire(_))));
    }
}

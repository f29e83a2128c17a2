//! Text acquisition: file readers (txt/docx/pdf) and URL fetch.
//!
//! All acquisition failures surface as errors; the extraction core is
//! never handed a failure message as if it were document text.

pub mod docx;
pub mod pdf;
pub mod web;

pub use web::{build_fetch_client, fetch_url};

use std::path::Path;

use crate::error::{Result, WordlitError};

/// Trait for file-format text readers
pub trait FileReader {
    /// Check if this reader can handle the given file extension
    fn can_read(&self, extension: &str) -> bool;

    /// Read the file and return its text content
    fn read(&self, path: &Path) -> Result<String>;
}

/// Plain UTF-8 text reader
pub struct PlainTextReader;

impl FileReader for PlainTextReader {
    fn can_read(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("txt")
    }

    fn read(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Reader registry that selects the appropriate reader by extension
pub struct ReaderRegistry {
    readers: Vec<Box<dyn FileReader>>,
}

impl ReaderRegistry {
    /// Create a new registry with all built-in readers
    pub fn new() -> Self {
        let mut registry = Self {
            readers: Vec::new(),
        };

        registry.register(Box::new(PlainTextReader));
        registry.register(Box::new(docx::DocxReader));
        registry.register(Box::new(pdf::PdfReader));

        registry
    }

    /// Register a reader
    pub fn register(&mut self, reader: Box<dyn FileReader>) {
        self.readers.push(reader);
    }

    /// Find a reader that can handle the given extension
    pub fn find_reader(&self, extension: &str) -> Option<&dyn FileReader> {
        self.readers
            .iter()
            .find(|r| r.can_read(extension))
            .map(|r| r.as_ref())
    }

    /// Read a file's text using the reader matching its extension.
    pub fn read_file(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let reader = self.find_reader(extension).ok_or_else(|| {
            WordlitError::InvalidInput(format!(
                "Unsupported file type '{}' for {} (expected txt, docx, or pdf)",
                extension,
                path.display()
            ))
        })?;

        reader.read(path)
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

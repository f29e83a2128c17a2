//! DOCX text reader using docx-rs.

use std::path::Path;

use docx_rs::read_docx;

use super::FileReader;
use crate::error::{Result, WordlitError};

/// Reads Word documents; paragraph texts are joined by newlines.
pub struct DocxReader;

impl FileReader for DocxReader {
    fn can_read(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("docx")
    }

    fn read(&self, path: &Path) -> Result<String> {
        let buf = std::fs::read(path)?;
        let docx = read_docx(&buf).map_err(|e| {
            WordlitError::Acquire(format!("Unreadable DOCX {}: {}", path.display(), e))
        })?;

        let mut paragraphs = Vec::new();
        for child in docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(para) = child {
                let mut para_text = String::new();
                for child in &para.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for run_child in &run.children {
                            if let docx_rs::RunChild::Text(text) = run_child {
                                para_text.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(para_text);
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

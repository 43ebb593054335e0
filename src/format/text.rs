//! Plain text format.

use super::FormatHandler;
use crate::error::Result;
use crate::model::{Document, Paragraph};

/// Handler for `.txt` files: one paragraph per line, run text only.
///
/// Only case changes survive a save; other styling has no plain-text form.
#[derive(Debug, Clone, Default)]
pub struct TextHandler;

impl TextHandler {
    /// Create a new text handler.
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for TextHandler {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let mut doc = Document::new();
        for line in content.split('\n') {
            doc.add_paragraph(Paragraph::with_text(line));
        }
        Ok(doc)
    }

    fn render(&self, doc: &Document) -> Result<String> {
        Ok(doc.plain_text())
    }
}

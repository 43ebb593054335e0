//! Document-level types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A document as an ordered sequence of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author)
    #[serde(default)]
    pub metadata: Metadata,

    /// Paragraphs in document order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Indices of the paragraphs structurally marked as headings.
    pub fn heading_indices(&self) -> Vec<usize> {
        self.paragraphs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_heading())
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if the document has any paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

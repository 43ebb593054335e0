//! Rich-run JSON format.

use super::FormatHandler;
use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Handler for `.json` documents: the serde form of [`Document`].
#[derive(Debug, Clone, Default)]
pub struct JsonHandler {
    format: JsonFormat,
}

impl JsonHandler {
    /// Create a handler writing pretty JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl FormatHandler for JsonHandler {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        serde_json::from_str(content)
            .map_err(|e| Error::Corrupted(format!("invalid JSON document: {}", e)))
    }

    fn render(&self, doc: &Document) -> Result<String> {
        let result = match self.format {
            JsonFormat::Pretty => serde_json::to_string_pretty(doc),
            JsonFormat::Compact => serde_json::to_string(doc),
        };

        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Rgb, TextRun};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("Test".to_string());
        doc.add_paragraph(Paragraph::heading("Hello", 1));
        let mut p = Paragraph::new();
        let mut run = TextRun::bold("world");
        run.style.color = Some(Rgb::new(0, 128, 255));
        p.add_run(run);
        doc.add_paragraph(p);
        doc
    }

    #[test]
    fn test_render_pretty() {
        let json = JsonHandler::new().render(&sample()).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Heading 1"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_render_compact() {
        let json = JsonHandler::new()
            .with_format(JsonFormat::Compact)
            .render(&sample())
            .unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_parse_preserves_runs() {
        let handler = JsonHandler::new();
        let doc = sample();
        let parsed = handler.parse(&handler.render(&doc).unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_parse_corrupted() {
        let handler = JsonHandler::new();
        assert!(matches!(handler.parse("{ nope"), Err(Error::Corrupted(_))));
        assert!(matches!(
            handler.parse(r#"{"paragraphs":[{"runs":[{"text":"x","style":{"color":[1,2]}}]}]}"#),
            Err(Error::Corrupted(_))
        ));
    }
}

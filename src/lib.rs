//! # restyle
//!
//! Randomized, percentage-scoped styling of documents.
//!
//! Rules such as "bold 50% of headings" or "color 30% of nouns red" are
//! applied to documents made of paragraphs and styled text runs. Headings are
//! selected structurally; words are selected by part of speech through a
//! pluggable token classifier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use restyle::{style_file, RuleSet, StyleOptions, StyleRule};
//!
//! fn main() -> restyle::Result<()> {
//!     let mut rules = RuleSet::new();
//!     rules.push("bold 50% of heading".parse::<StyleRule>()?);
//!     rules.push("color 30% of noun (255,0,0)".parse::<StyleRule>()?);
//!
//!     let options = StyleOptions::new().with_seed(42);
//!     let output = style_file("notes.md", "styled", &rules, &options)?;
//!     println!("wrote {}", output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reproducible**: seeded selection gives byte-identical output
//! - **Lossless**: paragraphs are rebuilt token by token, whitespace intact
//! - **Formats**: rich-run JSON, Markdown with emphasis markers, plain text
//! - **Batches**: per-document failure isolation, progress events, cancellation,
//!   parallel processing with Rayon

pub mod batch;
pub mod classify;
pub mod error;
pub mod format;
pub mod model;
pub mod rule;
pub mod style;

// Re-export commonly used types
pub use batch::{
    BatchEvent, BatchHandle, BatchReport, BatchRunner, BatchSummary, CancelToken,
    DocumentOutcome, DocumentStatus,
};
pub use classify::{LexiconClassifier, PartOfSpeech, Token, TokenClassifier};
pub use error::{Error, ErrorKind, Result};
pub use format::{FormatHandler, FormatRegistry};
pub use model::{Document, Metadata, Paragraph, ParagraphStyle, Rgb, TextRun, TextStyle};
pub use rule::{Action, RuleSet, StyleRule, Target};
pub use style::{DocumentStyler, Selector, StyleOptions, StyleStats};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Style an in-memory document with the built-in classifier.
///
/// # Example
///
/// ```
/// use restyle::{style_document, Document, Paragraph, StyleOptions, StyleRule};
///
/// let mut doc = Document::new();
/// doc.add_paragraph(Paragraph::with_text("Dogs bark."));
///
/// let rules: Vec<StyleRule> = vec!["uppercase 100% of noun".parse().unwrap()];
/// style_document(&mut doc, &rules, &StyleOptions::new().with_seed(1)).unwrap();
/// assert_eq!(doc.plain_text(), "DOGS bark.");
/// ```
pub fn style_document(
    doc: &mut Document,
    rules: &[StyleRule],
    options: &StyleOptions,
) -> Result<StyleStats> {
    DocumentStyler::new(Arc::new(LexiconClassifier::new()))
        .with_options(options.clone())
        .style(doc, rules)
}

/// Style one file and write `<stem>_styled.<ext>` into `output_dir`.
///
/// Returns the path of the written document. The source is never modified.
pub fn style_file<P, Q>(
    path: P,
    output_dir: Q,
    rules: &RuleSet,
    options: &StyleOptions,
) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path = path.as_ref();
    let output_dir = output_dir.as_ref();

    let registry = FormatRegistry::with_defaults();
    let handler = registry.for_path(path)?;
    let output = batch::output_path(path, output_dir)?;

    let mut doc = handler.load(path)?;
    let rules = rules.snapshot();
    style_document(&mut doc, &rules, options)?;

    fs::create_dir_all(output_dir)?;
    handler.save(&doc, &output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_document_heading_only() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::heading("Intro", 1));
        doc.add_paragraph(Paragraph::with_text("text"));

        let rules = vec![StyleRule::new(Target::Heading, Action::Italic, 100).unwrap()];
        let stats = style_document(&mut doc, &rules, &StyleOptions::new()).unwrap();

        assert_eq!(stats.headings_styled, 1);
        assert!(doc.paragraphs[0].runs[0].style.italic);
        assert!(!doc.paragraphs[1].runs[0].style.italic);
    }

    #[test]
    fn test_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plain.txt");
        fs::write(&source, "the cat sat").unwrap();

        let rules: RuleSet = vec!["uppercase 100% of noun".parse::<StyleRule>().unwrap()].into();
        let output = style_file(&source, dir.path().join("out"), &rules, &StyleOptions::new())
            .unwrap();

        assert_eq!(output, dir.path().join("out").join("plain_styled.txt"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "the CAT sat");
        assert_eq!(fs::read_to_string(&source).unwrap(), "the cat sat");
    }

    #[test]
    fn test_style_file_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("slides.pptx");
        fs::write(&source, "x").unwrap();

        let result = style_file(&source, dir.path(), &RuleSet::new(), &StyleOptions::new());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}

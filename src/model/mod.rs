//! Document model types.
//!
//! A document is an ordered sequence of paragraphs, each an ordered sequence
//! of styled text runs. Headings are marked structurally through the
//! paragraph style name. The model is format-agnostic; the `format` module
//! maps it to and from files.

mod document;
mod paragraph;

pub use document::{Document, Metadata};
pub use paragraph::{Paragraph, ParagraphStyle, Rgb, TextRun, TextStyle, HEADING_STYLE_PREFIX};

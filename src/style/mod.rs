//! The rule application engine.
//!
//! - [`Selector`] picks a bounded random subset of candidate units.
//! - [`apply_rule`] applies one rule's effect to a text run.
//! - [`DocumentStyler`] classifies paragraphs, runs the selector per rule,
//!   and rebuilds the run structure.
//!
//! # Example
//!
//! ```
//! use restyle::classify::LexiconClassifier;
//! use restyle::model::{Document, Paragraph};
//! use restyle::rule::StyleRule;
//! use restyle::style::{DocumentStyler, StyleOptions};
//! use std::sync::Arc;
//!
//! let mut doc = Document::new();
//! doc.add_paragraph(Paragraph::heading("Intro", 1));
//! doc.add_paragraph(Paragraph::with_text("Birds sing in the morning."));
//!
//! let rules: Vec<StyleRule> = vec!["bold 100% of heading".parse().unwrap()];
//! let styler = DocumentStyler::new(Arc::new(LexiconClassifier::new()))
//!     .with_options(StyleOptions::new().with_seed(1));
//! let stats = styler.style(&mut doc, &rules).unwrap();
//!
//! assert_eq!(stats.headings_styled, 1);
//! assert!(doc.paragraphs[0].runs[0].style.bold);
//! ```

mod apply;
mod options;
mod reconstruct;
mod select;

pub use apply::{apply_action, apply_rule, apply_rules};
pub use options::StyleOptions;
pub use reconstruct::{rebuild_runs, DocumentStyler, StyleAccumulator, StyleStats};
pub use select::{selection_size, Selector};

//! Rule application over whole documents.

use super::{apply_rule, Selector, StyleOptions};
use crate::classify::{classify_with_timeout, join_tokens, PartOfSpeech, Token, TokenClassifier};
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, TextRun};
use crate::rule::StyleRule;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Rules recorded per token of one paragraph.
///
/// Rule indices are kept sorted so effects apply in registration order.
#[derive(Debug, Clone, Default)]
pub struct StyleAccumulator {
    marks: BTreeMap<usize, Vec<usize>>,
}

impl StyleAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that rule `rule_index` selected token `token`.
    pub fn record(&mut self, token: usize, rule_index: usize) {
        let rules = self.marks.entry(token).or_default();
        if let Err(pos) = rules.binary_search(&rule_index) {
            rules.insert(pos, rule_index);
        }
    }

    /// Rule indices recorded for a token, in registration order.
    pub fn rules_for(&self, token: usize) -> &[usize] {
        self.marks.get(&token).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of tokens with at least one rule.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if no token was selected.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Rebuild a paragraph's runs as one run per token, applying recorded rules.
pub fn rebuild_runs(
    tokens: &[Token],
    accumulator: &StyleAccumulator,
    rules: &[StyleRule],
) -> Vec<TextRun> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let mut run = TextRun::new(token.text_with_ws());
            for &rule_index in accumulator.rules_for(i) {
                if let Some(rule) = rules.get(rule_index) {
                    apply_rule(&mut run, rule);
                }
            }
            run
        })
        .collect()
}

/// Indices of the tokens that start inside the paragraph's first run.
///
/// A heading rule styles the first run; once runs are rebuilt from tokens,
/// these are the tokens that carry that run's text.
fn tokens_in_first_run(tokens: &[Token], paragraph: &Paragraph) -> Vec<usize> {
    let first_len = match paragraph.runs.first() {
        Some(run) => run.text.len(),
        None => return (0..tokens.len()).collect(),
    };

    let mut start = 0;
    let mut covered = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if start >= first_len {
            break;
        }
        covered.push(i);
        start += token.text.len() + token.whitespace.len();
    }
    covered
}

/// Counters describing what a styling pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleStats {
    /// Paragraphs whose runs were rebuilt from tokens
    pub paragraphs_rebuilt: usize,

    /// Distinct headings selected by heading rules
    pub headings_styled: usize,

    /// Tokens selected by at least one rule
    pub tokens_styled: usize,
}

impl StyleStats {
    /// Add another pass's counters to this one.
    pub fn merge(&mut self, other: &StyleStats) {
        self.paragraphs_rebuilt += other.paragraphs_rebuilt;
        self.headings_styled += other.headings_styled;
        self.tokens_styled += other.tokens_styled;
    }
}

/// Applies rule sets to documents.
///
/// Random draws happen in a fixed order: heading rules in registration
/// order, then paragraphs in document order with category rules in
/// registration order. A seeded selector therefore gives byte-identical
/// output for the same rules and document.
pub struct DocumentStyler {
    classifier: Arc<dyn TokenClassifier>,
    options: StyleOptions,
}

impl DocumentStyler {
    /// Create a styler with default options.
    pub fn new(classifier: Arc<dyn TokenClassifier>) -> Self {
        Self {
            classifier,
            options: StyleOptions::default(),
        }
    }

    /// Set styling options.
    pub fn with_options(mut self, options: StyleOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the styling options.
    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &Arc<dyn TokenClassifier> {
        &self.classifier
    }

    /// Style a document with a selector derived from the options.
    pub fn style(&self, doc: &mut Document, rules: &[StyleRule]) -> Result<StyleStats> {
        let mut selector = self.options.selector_for(0);
        self.style_with(doc, rules, &mut selector)
    }

    /// Style a document drawing from the given selector.
    ///
    /// On error the document may be partially styled.
    pub fn style_with<R: Rng>(
        &self,
        doc: &mut Document,
        rules: &[StyleRule],
        selector: &mut Selector<R>,
    ) -> Result<StyleStats> {
        let mut stats = StyleStats::default();

        let category_rules: Vec<(usize, &StyleRule, PartOfSpeech)> = rules
            .iter()
            .enumerate()
            .filter_map(|(i, rule)| rule.target().category().map(|pos| (i, rule, pos)))
            .collect();

        let headings: Vec<usize> = doc
            .heading_indices()
            .into_iter()
            .filter(|&i| !doc.paragraphs[i].is_verbatim())
            .collect();
        let heading_selections: Vec<(usize, BTreeSet<usize>)> = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.target().is_heading())
            .map(|(i, rule)| (i, selector.select(&headings, rule.percent())))
            .collect();

        let styled_headings: BTreeSet<usize> = heading_selections
            .iter()
            .flat_map(|(_, selected)| selected.iter().copied())
            .collect();
        stats.headings_styled = styled_headings.len();

        if category_rules.is_empty() {
            for (rule_index, selected) in &heading_selections {
                let rule = &rules[*rule_index];
                for &p in selected {
                    apply_rule(doc.paragraphs[p].first_run_mut(), rule);
                }
            }
            log::debug!(
                "Styled {} of {} headings without rebuilding runs",
                stats.headings_styled,
                headings.len()
            );
            return Ok(stats);
        }

        for (p, paragraph) in doc.paragraphs.iter_mut().enumerate() {
            if paragraph.is_verbatim() {
                continue;
            }
            let text = paragraph.plain_text();
            let tokens = self.classify(&text)?;

            let mut accumulator = StyleAccumulator::new();
            let first_run_tokens = tokens_in_first_run(&tokens, paragraph);
            for (rule_index, selected) in &heading_selections {
                if selected.contains(&p) {
                    for &t in &first_run_tokens {
                        accumulator.record(t, *rule_index);
                    }
                }
            }
            for (rule_index, rule, category) in &category_rules {
                let candidates: Vec<usize> = tokens
                    .iter()
                    .enumerate()
                    .filter(|(_, token)| token.category == *category)
                    .map(|(i, _)| i)
                    .collect();
                for t in selector.select(&candidates, rule.percent()) {
                    accumulator.record(t, *rule_index);
                }
            }

            paragraph.runs = rebuild_runs(&tokens, &accumulator, rules);
            stats.paragraphs_rebuilt += 1;
            stats.tokens_styled += accumulator.len();
        }

        log::debug!(
            "Rebuilt {} paragraphs, styled {} tokens and {} headings",
            stats.paragraphs_rebuilt,
            stats.tokens_styled,
            stats.headings_styled
        );
        Ok(stats)
    }

    /// Classify paragraph text, enforcing the length limit and timeout.
    pub fn classify(&self, text: &str) -> Result<Vec<Token>> {
        if let Some(limit) = self.options.max_paragraph_chars {
            let chars = text.chars().count();
            if chars > limit {
                return Err(Error::Classification(format!(
                    "paragraph has {} characters, limit is {}",
                    chars, limit
                )));
            }
        }

        let tokens = match self.options.classify_timeout {
            Some(timeout) => classify_with_timeout(&self.classifier, text, timeout)?,
            None => self.classifier.classify(text)?,
        };

        if join_tokens(&tokens) != text {
            return Err(Error::Classification(format!(
                "classifier '{}' output does not reproduce the paragraph text",
                self.classifier.name()
            )));
        }
        Ok(tokens)
    }
}

//! Markdown format with inline style markers.

use super::FormatHandler;
use crate::error::Result;
use crate::model::{Document, Paragraph, TextRun, TextStyle};
use regex::Regex;
use std::sync::OnceLock;

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(#{1,6})([ \t]+.*)$").expect("heading pattern is valid")
    })
}

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("fence pattern is valid"))
}

/// Inline markup this handler would otherwise double up on render.
fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"\*\*\S|\*[^*\s][^*]*\*|~~\S|__\S|(?:^|[^\w])_[^_\s][^_]*_(?:[^\w]|$)|`|</?(?:u|span)\b",
        )
        .expect("markup pattern is valid")
    })
}

/// Handler for Markdown documents.
///
/// Each line is a paragraph; ATX `#` lines are headings and keep their
/// separator whitespace as part of the heading text. Styled runs are
/// written with emphasis markers, and color as an HTML span.
///
/// Lines of fenced code blocks and lines that already carry inline markup
/// are loaded as verbatim paragraphs, which styling leaves untouched.
#[derive(Debug, Clone, Default)]
pub struct MarkdownHandler;

impl MarkdownHandler {
    /// Create a new Markdown handler.
    pub fn new() -> Self {
        Self
    }

    fn render_paragraph(&self, output: &mut String, paragraph: &Paragraph) {
        if let Some(level) = paragraph.heading_level() {
            for _ in 0..level {
                output.push('#');
            }
            let separated = paragraph
                .runs
                .iter()
                .find(|run| !run.text.is_empty())
                .is_some_and(|run| run.text.starts_with(|c: char| c == ' ' || c == '\t'));
            if !separated {
                output.push(' ');
            }
        }
        for run in &paragraph.runs {
            output.push_str(&self.render_run(run));
        }
    }

    fn render_run(&self, run: &TextRun) -> String {
        if !run.style.has_styling() || run.text.trim().is_empty() {
            return run.text.clone();
        }

        // Markers must hug the text, so surrounding whitespace stays outside.
        let after_lead = run.text.trim_start();
        let lead = &run.text[..run.text.len() - after_lead.len()];
        let core = after_lead.trim_end();
        let trail = &after_lead[core.len()..];

        format!("{}{}{}", lead, self.apply_text_style(core, &run.style), trail)
    }

    fn apply_text_style(&self, text: &str, style: &TextStyle) -> String {
        let mut result = text.to_string();

        // Apply styles (innermost first)
        if style.strikethrough {
            result = format!("~~{}~~", result);
        }
        if style.italic {
            result = format!("*{}*", result);
        }
        if style.bold {
            result = format!("**{}**", result);
        }
        if style.underline {
            result = format!("<u>{}</u>", result);
        }
        if let Some(color) = style.color {
            result = format!("<span style=\"color:{}\">{}</span>", color.to_hex(), result);
        }

        result
    }
}

/// A closing fence repeats the opening character at least as many times.
fn closes_fence(line: &str, open: &str) -> bool {
    let Some(marker) = open.chars().next() else {
        return false;
    };
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let run = trimmed.len() - trimmed.trim_start_matches(marker).len();
    run >= open.len() && trimmed[run..].trim().is_empty()
}

impl FormatHandler for MarkdownHandler {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn parse(&self, content: &str) -> Result<Document> {
        let mut doc = Document::new();
        // Opening fence marker while inside a code block
        let mut fence: Option<&str> = None;

        for line in content.split('\n') {
            if let Some(open) = fence {
                if closes_fence(line, open) {
                    fence = None;
                }
                doc.add_paragraph(Paragraph::verbatim(line));
                continue;
            }
            if let Some(caps) = fence_pattern().captures(line) {
                fence = caps.get(1).map(|m| m.as_str());
                doc.add_paragraph(Paragraph::verbatim(line));
                continue;
            }

            let mut paragraph = match heading_pattern().captures(line) {
                Some(caps) => Paragraph::heading(&caps[2], caps[1].len() as u8),
                None => Paragraph::with_text(line),
            };
            paragraph.style.verbatim = markup_pattern().is_match(line);
            doc.add_paragraph(paragraph);
        }
        Ok(doc)
    }

    fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        for (i, paragraph) in doc.paragraphs.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            self.render_paragraph(&mut output, paragraph);
        }
        Ok(output)
    }
}

//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Style-name prefix that structurally marks a heading paragraph.
pub const HEADING_STYLE_PREFIX: &str = "Heading";

/// A paragraph of text content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph (style name `Heading {level}`).
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.style.name = Some(format!("{} {}", HEADING_STYLE_PREFIX, level.clamp(1, 6)));
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(TextRun::is_empty)
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.style
            .name
            .as_deref()
            .is_some_and(|name| name.starts_with(HEADING_STYLE_PREFIX))
    }

    /// Get the heading level parsed from the style name, or None.
    ///
    /// A heading style without a trailing number counts as level 1.
    pub fn heading_level(&self) -> Option<u8> {
        if !self.is_heading() {
            return None;
        }
        let name = self.style.name.as_deref()?;
        let level = name[HEADING_STYLE_PREFIX.len()..]
            .trim()
            .parse::<u8>()
            .unwrap_or(1);
        Some(level.clamp(1, 6))
    }

    /// Create a paragraph whose text must be passed through unchanged.
    pub fn verbatim(text: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style.verbatim = true;
        p
    }

    /// Check if the paragraph is excluded from styling.
    pub fn is_verbatim(&self) -> bool {
        self.style.verbatim
    }

    /// Get the first run, inserting an empty one if the paragraph has none.
    pub fn first_run_mut(&mut self) -> &mut TextRun {
        if self.runs.is_empty() {
            self.runs.push(TextRun::new(String::new()));
        }
        &mut self.runs[0]
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Bold text
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,

    /// Italic text
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,

    /// Underlined text
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,

    /// Strikethrough text
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,

    /// Foreground color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough || self.color.is_some()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Paragraph styling properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    /// Named paragraph style (e.g. "Normal", "Heading 2")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source text kept as-is: never classified, never styled
    #[serde(skip_serializing_if = "is_false")]
    pub verbatim: bool,
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from raw integer channels.
    ///
    /// Exactly three channels, each in `0..=255`, are required.
    pub fn from_channels(channels: &[i64]) -> Result<Self, String> {
        let [r, g, b] = channels else {
            return Err(format!(
                "color needs exactly 3 channels, got {}",
                channels.len()
            ));
        };
        let channel = |value: i64| {
            u8::try_from(value).map_err(|_| format!("color channel {} is outside 0..=255", value))
        };
        Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?))
    }

    /// Hex notation, e.g. `#ff0000`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl TryFrom<Vec<i64>> for Rgb {
    type Error = String;

    fn try_from(channels: Vec<i64>) -> Result<Self, Self::Error> {
        Self::from_channels(&channels)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

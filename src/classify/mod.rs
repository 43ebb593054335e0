//! Grammatical classification of paragraph text.
//!
//! A [`TokenClassifier`] splits text into an ordered sequence of [`Token`]s,
//! each tagged with a [`PartOfSpeech`] and carrying its trailing whitespace,
//! so that concatenating `text + whitespace` over all tokens reproduces the
//! input exactly.
//!
//! The crate ships [`LexiconClassifier`], a deterministic heuristic tagger
//! for English. Statistical taggers plug in by implementing the trait.
//!
//! # Example
//!
//! ```
//! use restyle::classify::{LexiconClassifier, PartOfSpeech, TokenClassifier};
//!
//! let tokens = LexiconClassifier::new().classify("The fox jumps.").unwrap();
//! assert_eq!(tokens[2].text, "jumps");
//! assert_eq!(tokens[2].category, PartOfSpeech::Verb);
//! ```

mod lexicon;

pub use lexicon::LexiconClassifier;

use crate::error::{Error, Result};
use crossbeam_channel::RecvTimeoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Trait for grammatical token classifiers.
///
/// Implementations must be deterministic: the same text always yields the
/// same tokens, and the tokens must cover the text losslessly.
pub trait TokenClassifier: Send + Sync {
    /// Get the name of this classifier.
    fn name(&self) -> &str;

    /// Split `text` into tagged tokens.
    fn classify(&self, text: &str) -> Result<Vec<Token>>;
}

/// A text fragment with its grammatical category and trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text without surrounding whitespace
    pub text: String,

    /// Whitespace following the token in the source text
    pub whitespace: String,

    /// Grammatical category
    pub category: PartOfSpeech,
}

impl Token {
    /// Create a new token.
    pub fn new(
        text: impl Into<String>,
        whitespace: impl Into<String>,
        category: PartOfSpeech,
    ) -> Self {
        Self {
            text: text.into(),
            whitespace: whitespace.into(),
            category,
        }
    }

    /// Token text followed by its trailing whitespace.
    pub fn text_with_ws(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + self.whitespace.len());
        out.push_str(&self.text);
        out.push_str(&self.whitespace);
        out
    }
}

/// Rebuild the source text from a token sequence.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text_with_ws).collect()
}

/// Coarse part-of-speech category (universal tag set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Main verb
    Verb,
    /// Auxiliary or modal verb
    Auxiliary,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Pronoun
    Pronoun,
    /// Determiner
    Determiner,
    /// Preposition or postposition
    Adposition,
    /// Coordinating or subordinating conjunction
    Conjunction,
    /// Particle ("not", infinitival "to")
    Particle,
    /// Numeral
    Numeral,
    /// Interjection
    Interjection,
    /// Punctuation
    Punctuation,
    /// Symbol
    Symbol,
    /// Whitespace-only token
    Space,
    /// Anything else
    Other,
}

impl PartOfSpeech {
    /// All categories, in declaration order.
    pub const ALL: [PartOfSpeech; 17] = [
        PartOfSpeech::Noun,
        PartOfSpeech::ProperNoun,
        PartOfSpeech::Verb,
        PartOfSpeech::Auxiliary,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Determiner,
        PartOfSpeech::Adposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Particle,
        PartOfSpeech::Numeral,
        PartOfSpeech::Interjection,
        PartOfSpeech::Punctuation,
        PartOfSpeech::Symbol,
        PartOfSpeech::Space,
        PartOfSpeech::Other,
    ];

    /// Canonical lowercase name, as used in rule targets.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::ProperNoun => "proper_noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Auxiliary => "auxiliary",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Adposition => "adposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Punctuation => "punctuation",
            PartOfSpeech::Symbol => "symbol",
            PartOfSpeech::Space => "space",
            PartOfSpeech::Other => "other",
        }
    }

    /// Whether the category is an open word class (noun, verb, adjective, adverb).
    pub fn is_open_class(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun
                | PartOfSpeech::ProperNoun
                | PartOfSpeech::Verb
                | PartOfSpeech::Adjective
                | PartOfSpeech::Adverb
        )
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = Error;

    /// Parse a category name; the universal short tags are accepted as aliases.
    fn from_str(s: &str) -> Result<Self> {
        let pos = match s.trim().to_lowercase().as_str() {
            "noun" | "nouns" => PartOfSpeech::Noun,
            "proper_noun" | "propn" | "proper noun" => PartOfSpeech::ProperNoun,
            "verb" | "verbs" => PartOfSpeech::Verb,
            "auxiliary" | "aux" => PartOfSpeech::Auxiliary,
            "adjective" | "adjectives" | "adj" => PartOfSpeech::Adjective,
            "adverb" | "adverbs" | "adv" => PartOfSpeech::Adverb,
            "pronoun" | "pron" => PartOfSpeech::Pronoun,
            "determiner" | "det" => PartOfSpeech::Determiner,
            "adposition" | "adp" | "preposition" => PartOfSpeech::Adposition,
            "conjunction" | "conj" | "cconj" | "sconj" => PartOfSpeech::Conjunction,
            "particle" | "part" => PartOfSpeech::Particle,
            "numeral" | "num" => PartOfSpeech::Numeral,
            "interjection" | "intj" => PartOfSpeech::Interjection,
            "punctuation" | "punct" => PartOfSpeech::Punctuation,
            "symbol" | "sym" => PartOfSpeech::Symbol,
            "space" => PartOfSpeech::Space,
            "other" | "x" => PartOfSpeech::Other,
            other => {
                return Err(Error::Validation(format!(
                    "unknown grammatical category '{}'",
                    other
                )))
            }
        };
        Ok(pos)
    }
}

/// Run `classifier` on a helper thread, giving up after `timeout`.
///
/// A classifier that does not answer in time is left to finish on its own
/// thread; its result is discarded.
pub fn classify_with_timeout(
    classifier: &Arc<dyn TokenClassifier>,
    text: &str,
    timeout: Duration,
) -> Result<Vec<Token>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let worker = Arc::clone(classifier);
    let owned = text.to_owned();

    thread::Builder::new()
        .name("restyle-classify".into())
        .spawn(move || {
            let _ = tx.send(worker.classify(&owned));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            log::warn!(
                "Classifier '{}' timed out after {:?} on {} chars",
                classifier.name(),
                timeout,
                text.len()
            );
            Err(Error::Classification(format!(
                "classifier '{}' timed out after {:?}",
                classifier.name(),
                timeout
            )))
        }
        Err(RecvTimeoutError::Disconnected) => Err(Error::Classification(format!(
            "classifier '{}' stopped without a result",
            classifier.name()
        ))),
    }
}

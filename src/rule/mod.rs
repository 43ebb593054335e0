//! Style rule model.
//!
//! A [`StyleRule`] says *what* to do (an [`Action`]), to *which* units (a
//! [`Target`]) and to *how many* of them (a percentage). Rules are validated
//! on construction, so a rule that exists is always applicable.
//!
//! # Example
//!
//! ```
//! use restyle::rule::{Action, StyleRule, Target};
//! use restyle::model::Rgb;
//!
//! let rule: StyleRule = "color 40% of noun (255,0,0)".parse().unwrap();
//! assert_eq!(rule.action(), &Action::Color(Rgb::new(255, 0, 0)));
//! assert_eq!(rule.to_string(), "color 40% of noun (255,0,0)");
//!
//! let heading = StyleRule::new(Target::Heading, Action::Bold, 50).unwrap();
//! assert_eq!(heading.description(), "bold 50% of heading");
//! ```

mod set;

pub use set::RuleSet;

use crate::classify::PartOfSpeech;
use crate::error::{Error, Result};
use crate::model::Rgb;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// What a rule selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Whole heading paragraphs
    Heading,
    /// Tokens of one grammatical category
    Category(PartOfSpeech),
}

impl Target {
    /// Check if this target selects heading paragraphs.
    pub fn is_heading(&self) -> bool {
        matches!(self, Target::Heading)
    }

    /// Get the grammatical category, if this is a category target.
    pub fn category(&self) -> Option<PartOfSpeech> {
        match self {
            Target::Heading => None,
            Target::Category(pos) => Some(*pos),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Heading => f.write_str("heading"),
            Target::Category(pos) => f.write_str(pos.as_str()),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "heading" | "headings" => Ok(Target::Heading),
            other => other
                .parse::<PartOfSpeech>()
                .map(Target::Category)
                .map_err(|_| Error::Validation(format!("unknown target '{}'", s.trim()))),
        }
    }
}

/// Styling effect of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Set the bold flag
    Bold,
    /// Set the italic flag
    Italic,
    /// Set the underline flag
    Underline,
    /// Set the strike-through flag
    Strikethrough,
    /// Upper-case the text
    Uppercase,
    /// Set the foreground color
    Color(Rgb),
}

impl Action {
    /// Lowercase action name as used in descriptions and rule files.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Bold => "bold",
            Action::Italic => "italic",
            Action::Underline => "underline",
            Action::Strikethrough => "strikethrough",
            Action::Uppercase => "uppercase",
            Action::Color(_) => "color",
        }
    }

    /// Build an action from its name and raw parameters.
    ///
    /// Parameters must be given for `color` (an RGB triple) and must be
    /// absent for every other action.
    pub fn from_parts(name: &str, parameters: Option<&[i64]>) -> Result<Self> {
        let name = name.trim().to_lowercase();
        let action = match name.as_str() {
            "color" | "colour" => {
                let channels = parameters.ok_or_else(|| {
                    Error::Validation("color action requires an RGB triple".into())
                })?;
                return Rgb::from_channels(channels)
                    .map(Action::Color)
                    .map_err(Error::Validation);
            }
            "bold" => Action::Bold,
            "italic" => Action::Italic,
            "underline" => Action::Underline,
            "strikethrough" | "strike" => Action::Strikethrough,
            "uppercase" | "upper" => Action::Uppercase,
            _ => return Err(Error::Validation(format!("unknown action '{}'", name))),
        };
        if parameters.is_some() {
            return Err(Error::Validation(format!(
                "action '{}' takes no parameters",
                name
            )));
        }
        Ok(action)
    }

    /// Action parameters (the color triple), if any.
    pub fn parameters(&self) -> Option<Rgb> {
        match self {
            Action::Color(rgb) => Some(*rgb),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable, validated styling instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct StyleRule {
    target: Target,
    action: Action,
    percent: u8,
}

impl StyleRule {
    /// Create a rule from typed parts.
    pub fn new(target: Target, action: Action, percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(Error::Validation(format!(
                "percent must be between 0 and 100, got {}",
                percent
            )));
        }
        Ok(Self {
            target,
            action,
            percent,
        })
    }

    /// Create a rule from raw authored values, as a form would supply them.
    pub fn from_parts(
        target: &str,
        action: &str,
        percent: i64,
        parameters: Option<&[i64]>,
    ) -> Result<Self> {
        let percent = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "percent must be between 0 and 100, got {}",
                    percent
                ))
            })?;
        let target = target.parse::<Target>()?;
        let action = Action::from_parts(action, parameters)?;
        Self::new(target, action, percent)
    }

    /// Get the target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Get the action.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Get the percentage of candidate units to style.
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Human-readable description, e.g. `color 40% of noun (255,0,0)`.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% of {}", self.action, self.percent, self.target)?;
        if let Some(rgb) = self.action.parameters() {
            write!(f, " ({})", rgb)?;
        }
        Ok(())
    }
}

fn rule_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*([a-z]+)\s+(-?\d+)\s*%\s+of\s+([a-z_ ]+?)\s*(?:\(([^)]*)\))?\s*$")
            .expect("rule pattern is valid")
    })
}

impl FromStr for StyleRule {
    type Err = Error;

    /// Parse the description format: `<action> <percent>% of <target> [(r,g,b)]`.
    fn from_str(s: &str) -> Result<Self> {
        let caps = rule_pattern().captures(s).ok_or_else(|| {
            Error::Validation(format!(
                "cannot parse rule '{}', expected '<action> <percent>% of <target> [(r,g,b)]'",
                s.trim()
            ))
        })?;

        let percent = caps[2]
            .parse::<i64>()
            .map_err(|_| Error::Validation(format!("percent '{}' is not a number", &caps[2])))?;
        let parameters = caps
            .get(4)
            .map(|m| parse_channels(m.as_str()))
            .transpose()?;

        Self::from_parts(&caps[3], &caps[1], percent, parameters.as_deref())
    }
}

fn parse_channels(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| Error::Validation(format!("color channel '{}' is not an integer", part.trim())))
        })
        .collect()
}

/// Serialized form of a rule, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    target: String,
    action: String,
    percent: i64,
    #[serde(default, alias = "extra", skip_serializing_if = "Option::is_none")]
    parameters: Option<Vec<i64>>,
}

impl TryFrom<RawRule> for StyleRule {
    type Error = Error;

    fn try_from(raw: RawRule) -> Result<Self> {
        Self::from_parts(
            &raw.target,
            &raw.action,
            raw.percent,
            raw.parameters.as_deref(),
        )
    }
}

impl From<StyleRule> for RawRule {
    fn from(rule: StyleRule) -> Self {
        Self {
            target: rule.target.to_string(),
            action: rule.action.name().to_string(),
            percent: i64::from(rule.percent),
            parameters: rule
                .action
                .parameters()
                .map(|rgb| vec![rgb.r.into(), rgb.g.into(), rgb.b.into()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description() {
        let rule = StyleRule::new(
            Target::Category(PartOfSpeech::Verb),
            Action::Bold,
            50,
        )
        .unwrap();
        assert_eq!(rule.description(), "bold 50% of verb");

        let rule = StyleRule::new(
            Target::Category(PartOfSpeech::Noun),
            Action::Color(Rgb::new(255, 0, 0)),
            40,
        )
        .unwrap();
        assert_eq!(rule.description(), "color 40% of noun (255,0,0)");
    }

    #[test]
    fn test_percent_bounds() {
        assert!(StyleRule::new(Target::Heading, Action::Bold, 0).is_ok());
        assert!(StyleRule::new(Target::Heading, Action::Bold, 100).is_ok());
        assert!(matches!(
            StyleRule::new(Target::Heading, Action::Bold, 101),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            StyleRule::from_parts("heading", "bold", -1, None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            StyleRule::from_parts("heading", "bold", 300, None),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_color_parameters_required() {
        assert!(StyleRule::from_parts("noun", "color", 10, Some(&[0, 128, 255])).is_ok());
        for bad in [
            None,
            Some(&[255, 0][..]),
            Some(&[255, 0, 0, 0][..]),
            Some(&[256, 0, 0][..]),
            Some(&[-1, 0, 0][..]),
        ] {
            assert!(
                matches!(
                    StyleRule::from_parts("noun", "color", 10, bad),
                    Err(Error::Validation(_))
                ),
                "parameters {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parameters_only_for_color() {
        assert!(matches!(
            StyleRule::from_parts("verb", "bold", 10, Some(&[1, 2, 3])),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_names() {
        assert!(matches!(
            StyleRule::from_parts("gerund", "bold", 10, None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            StyleRule::from_parts("verb", "blink", 10, None),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_target_aliases() {
        assert_eq!("Headings".parse::<Target>().unwrap(), Target::Heading);
        assert_eq!(
            "ADJ".parse::<Target>().unwrap(),
            Target::Category(PartOfSpeech::Adjective)
        );
        assert_eq!(
            "adverb".parse::<Target>().unwrap(),
            Target::Category(PartOfSpeech::Adverb)
        );
    }

    #[test]
    fn test_parse_description() {
        let rule: StyleRule = "Bold 50% of verb".parse().unwrap();
        assert_eq!(rule.action(), &Action::Bold);
        assert_eq!(rule.percent(), 50);
        assert_eq!(rule.target(), &Target::Category(PartOfSpeech::Verb));

        let rule: StyleRule = "color 30% of noun ( 255, 0 ,0 )".parse().unwrap();
        assert_eq!(rule.action(), &Action::Color(Rgb::new(255, 0, 0)));

        let rule: StyleRule = "underline 100 % of proper_noun".parse().unwrap();
        assert_eq!(rule.target(), &Target::Category(PartOfSpeech::ProperNoun));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "",
            "bold of verb",
            "bold 50 of verb",
            "bold 150% of verb",
            "color 30% of noun",
            "color 30% of noun (1,2)",
            "color 30% of noun (a,b,c)",
            "italic 10% of verb (1,2,3)",
        ] {
            assert!(
                matches!(text.parse::<StyleRule>(), Err(Error::Validation(_))),
                "'{}' should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_description_parses_back() {
        let rules = [
            StyleRule::new(Target::Heading, Action::Uppercase, 25).unwrap(),
            StyleRule::new(
                Target::Category(PartOfSpeech::Adverb),
                Action::Color(Rgb::new(1, 2, 3)),
                0,
            )
            .unwrap(),
        ];
        for rule in rules {
            assert_eq!(rule.to_string().parse::<StyleRule>().unwrap(), rule);
        }
    }

    #[test]
    fn test_serde_validates() {
        let rule: StyleRule = serde_json::from_str(
            r#"{"target":"noun","action":"color","percent":40,"parameters":[255,0,0]}"#,
        )
        .unwrap();
        assert_eq!(rule.description(), "color 40% of noun (255,0,0)");

        let rule: StyleRule =
            serde_json::from_str(r#"{"target":"heading","action":"bold","percent":50,"extra":null}"#)
                .unwrap();
        assert_eq!(rule.description(), "bold 50% of heading");

        let bad = serde_json::from_str::<StyleRule>(
            r#"{"target":"noun","action":"color","percent":40,"parameters":[255,0]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let rule = StyleRule::new(Target::Heading, Action::Italic, 20).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"target":"heading","action":"italic","percent":20}"#);
    }
}

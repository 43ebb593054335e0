//! Ordered, editable collection of rules.

use super::StyleRule;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// An ordered list of validated rules.
///
/// Registration order matters: when several rules style the same unit they
/// are applied in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<StyleRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Append a rule, builder style.
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.push(rule);
        self
    }

    /// Remove and return the rule at `index`, or None if out of range.
    pub fn remove(&mut self, index: usize) -> Option<StyleRule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Get a rule by position.
    pub fn get(&self, index: usize) -> Option<&StyleRule> {
        self.rules.get(index)
    }

    /// Iterate over rules in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, StyleRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Remove all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Human-readable descriptions, one per rule.
    pub fn descriptions(&self) -> Vec<String> {
        self.rules.iter().map(StyleRule::description).collect()
    }

    /// Immutable copy of the current rules, for handing to a batch.
    pub fn snapshot(&self) -> Arc<[StyleRule]> {
        Arc::from(self.rules.as_slice())
    }

    /// Parse a JSON array of rules, validating every entry.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Validation(format!("rule file: {}", e)))
    }

    /// Serialize the rules as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }

    /// Load a rule file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the rules to a file as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl From<Vec<StyleRule>> for RuleSet {
    fn from(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<StyleRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = StyleRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a StyleRule;
    type IntoIter = std::slice::Iter<'a, StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Action, Target};

    fn sample() -> RuleSet {
        ["bold 50% of heading", "color 30% of noun (255,0,0)", "italic 10% of verb"]
            .iter()
            .map(|s| s.parse::<StyleRule>().unwrap())
            .collect()
    }

    #[test]
    fn test_push_remove() {
        let mut rules = sample();
        assert_eq!(rules.len(), 3);

        let removed = rules.remove(1).unwrap();
        assert_eq!(removed.description(), "color 30% of noun (255,0,0)");
        assert_eq!(
            rules.descriptions(),
            vec!["bold 50% of heading", "italic 10% of verb"]
        );
        assert!(rules.remove(5).is_none());

        rules.push(StyleRule::new(Target::Heading, Action::Uppercase, 5).unwrap());
        assert_eq!(rules.get(2).unwrap().action(), &Action::Uppercase);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut rules = sample();
        let snapshot = rules.snapshot();
        rules.clear();
        assert!(rules.is_empty());
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let rules = sample();
        let json = rules.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(RuleSet::from_json(&json).unwrap(), rules);
    }

    #[test]
    fn test_from_json_rejects_invalid_rule() {
        let json = r#"[
            {"target": "heading", "action": "bold", "percent": 50},
            {"target": "noun", "action": "color", "percent": 40, "parameters": [300, 0, 0]}
        ]"#;
        assert!(matches!(RuleSet::from_json(json), Err(Error::Validation(_))));
        assert!(matches!(RuleSet::from_json("{"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");

        let rules = sample();
        rules.save(&path).unwrap();
        assert_eq!(RuleSet::load(&path).unwrap(), rules);

        assert!(matches!(
            RuleSet::load(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}

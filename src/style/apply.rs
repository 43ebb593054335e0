//! Applying rule effects to text runs.

use crate::model::TextRun;
use crate::rule::{Action, StyleRule};

/// Apply one rule to a run in place.
pub fn apply_rule(run: &mut TextRun, rule: &StyleRule) {
    apply_action(run, rule.action());
}

/// Apply several rules in the given order.
///
/// Flags accumulate; for color the last rule wins.
pub fn apply_rules<'a, I>(run: &mut TextRun, rules: I)
where
    I: IntoIterator<Item = &'a StyleRule>,
{
    for rule in rules {
        apply_rule(run, rule);
    }
}

/// Apply a single action in place.
pub fn apply_action(run: &mut TextRun, action: &Action) {
    match action {
        Action::Bold => run.style.bold = true,
        Action::Italic => run.style.italic = true,
        Action::Underline => run.style.underline = true,
        Action::Strikethrough => run.style.strikethrough = true,
        Action::Uppercase => {
            let upper = run.text.to_uppercase();
            if upper != run.text {
                run.text = upper;
            }
        }
        Action::Color(rgb) => run.style.color = Some(*rgb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PartOfSpeech;
    use crate::model::Rgb;
    use crate::rule::Target;

    fn rule(action: Action) -> StyleRule {
        StyleRule::new(Target::Category(PartOfSpeech::Noun), action, 50).unwrap()
    }

    #[test]
    fn test_flags_accumulate() {
        let mut run = TextRun::new("fox ");
        apply_rules(
            &mut run,
            &[rule(Action::Bold), rule(Action::Italic), rule(Action::Bold)],
        );
        assert!(run.style.bold);
        assert!(run.style.italic);
        assert!(!run.style.underline);
        assert_eq!(run.text, "fox ");
    }

    #[test]
    fn test_uppercase_unicode_and_idempotent() {
        let mut run = TextRun::new("straße ");
        apply_rule(&mut run, &rule(Action::Uppercase));
        assert_eq!(run.text, "STRASSE ");
        apply_rule(&mut run, &rule(Action::Uppercase));
        assert_eq!(run.text, "STRASSE ");
    }

    #[test]
    fn test_last_color_wins() {
        let mut run = TextRun::new("x");
        apply_rules(
            &mut run,
            &[
                rule(Action::Color(Rgb::new(255, 0, 0))),
                rule(Action::Strikethrough),
                rule(Action::Color(Rgb::new(0, 0, 255))),
            ],
        );
        assert_eq!(run.style.color, Some(Rgb::new(0, 0, 255)));
        assert!(run.style.strikethrough);
    }

    #[test]
    fn test_existing_style_kept() {
        let mut run = TextRun::italic("word");
        apply_rule(&mut run, &rule(Action::Underline));
        assert!(run.style.italic);
        assert!(run.style.underline);
    }
}

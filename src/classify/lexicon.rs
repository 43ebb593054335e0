//! Heuristic English part-of-speech tagger.
//!
//! Tagging runs in three steps: a lexicon lookup (closed word classes and a
//! core vocabulary of open-class words, with inflection stripping), suffix
//! rules for unknown words, and a left-to-right context pass that settles
//! ambiguous words from their neighbours.

use super::{PartOfSpeech, Token, TokenClassifier};
use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "no", "every", "each",
    "either", "neither", "all", "both", "another", "such", "what", "which", "whose",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const PRONOUNS: &[&str] = &[
    "me", "him", "us", "them", "myself", "yourself", "himself", "herself", "itself",
    "ourselves", "yourselves", "themselves", "mine", "yours", "hers", "ours", "theirs", "who",
    "whom", "someone", "somebody", "anyone", "anybody", "everyone", "everybody", "nobody",
    "something", "anything", "everything", "nothing",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "out", "off",
    "over", "under", "near", "across", "along", "among", "around", "behind", "beside", "beyond",
    "despite", "except", "inside", "like", "onto", "outside", "per", "since", "than", "toward",
    "towards", "upon", "via", "within", "without", "throughout", "until", "as", "to",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while",
    "whereas", "if", "unless", "whether", "once", "whenever", "wherever",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "cannot", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "won't", "wouldn't", "can't", "couldn't", "shouldn't", "hasn't", "haven't", "hadn't",
    "mustn't",
];

const PARTICLES: &[&str] = &["not", "n't"];

const INTERJECTIONS: &[&str] = &[
    "oh", "ah", "wow", "hey", "hello", "hi", "ouch", "oops", "alas", "hmm", "yes", "yeah",
    "okay", "ok", "bye",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
    "billion",
];

const NOUNS: &[&str] = &[
    "time", "people", "year", "way", "day", "man", "woman", "child", "world", "life", "hand",
    "part", "place", "case", "week", "company", "system", "program", "question", "work",
    "government", "number", "night", "point", "home", "water", "room", "mother", "area",
    "money", "story", "fact", "month", "lot", "study", "book", "eye", "job", "word", "business",
    "issue", "side", "kind", "head", "house", "service", "friend", "father", "power", "hour",
    "game", "line", "end", "member", "law", "car", "city", "community", "name", "president",
    "team", "minute", "idea", "kid", "body", "information", "parent", "face", "level", "office",
    "door", "health", "person", "art", "war", "history", "party", "result", "change", "morning",
    "reason", "research", "girl", "boy", "moment", "air", "teacher", "force", "education",
    "fox", "dog", "cat", "bird", "tree", "sun", "moon", "river", "road", "table", "light",
    "box", "paper", "music", "food", "school", "state", "country", "family", "group", "problem",
    "fish", "horse", "garden", "street", "window", "letter", "document", "page", "text",
    "sentence", "paragraph", "heading", "file", "report", "plan", "rule", "color", "colour",
    "style", "run", "walk", "play", "show", "help", "use", "look", "need", "love", "hope",
    "answer", "call", "dream", "cause", "sound",
];

const VERBS: &[&str] = &[
    "go", "get", "make", "know", "think", "take", "see", "come", "want", "look", "use", "find",
    "give", "tell", "work", "call", "try", "ask", "need", "feel", "become", "leave", "put",
    "mean", "keep", "let", "begin", "seem", "help", "show", "hear", "play", "run", "move",
    "live", "believe", "bring", "happen", "write", "sit", "stand", "lose", "pay", "meet",
    "include", "continue", "set", "learn", "change", "lead", "understand", "watch", "follow",
    "stop", "create", "speak", "read", "spend", "grow", "open", "walk", "win", "teach",
    "offer", "remember", "consider", "appear", "buy", "serve", "die", "send", "build", "stay",
    "fall", "cut", "reach", "kill", "raise", "pass", "sell", "decide", "return", "explain",
    "hope", "develop", "carry", "break", "receive", "agree", "support", "hit", "produce",
    "eat", "cover", "catch", "draw", "choose", "jump", "say", "sing", "fly", "drive", "sleep",
    "love", "like", "answer", "dream", "cause", "sound", "swim", "climb", "cry", "laugh",
    "smile", "dance", "shine", "rise", "bark", "apply", "style", "light",
];

const IRREGULAR_VERB_FORMS: &[&str] = &[
    "went", "gone", "got", "gotten", "made", "knew", "known", "thought", "took", "taken",
    "saw", "seen", "came", "gave", "given", "told", "felt", "became", "left", "meant", "kept",
    "began", "begun", "heard", "ran", "brought", "wrote", "written", "sat", "stood", "lost",
    "paid", "met", "led", "understood", "spoke", "spoken", "spent", "grew", "grown", "won",
    "taught", "bought", "sent", "built", "fell", "fallen", "sold", "broke", "broken", "caught",
    "drew", "drawn", "chose", "chosen", "ate", "eaten", "said", "sang", "sung", "flew",
    "flown", "drove", "driven", "slept", "swam", "swum", "rose", "risen", "shone", "found",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "great", "big", "small", "large", "long", "short", "high",
    "low", "young", "little", "own", "other", "same", "different", "important", "early",
    "late", "right", "wrong", "able", "free", "full", "sure", "clear", "true", "whole", "real",
    "best", "better", "happy", "sad", "easy", "hard", "simple", "red", "blue", "green", "black",
    "white", "dark", "bright", "quick", "slow", "strong", "weak", "hot", "cold", "warm",
    "fresh", "rich", "poor", "lazy", "brown", "fast", "light", "quiet", "loud", "deep",
    "nice", "fine", "last", "next", "first", "second", "final", "main", "open",
];

const ADVERBS: &[&str] = &[
    "very", "too", "also", "just", "only", "even", "still", "already", "always", "never",
    "often", "sometimes", "soon", "now", "then", "here", "there", "again", "ever", "quite",
    "rather", "almost", "perhaps", "maybe", "however", "therefore", "thus", "instead",
    "yesterday", "today", "tomorrow", "away", "back", "forward", "well", "seldom", "twice",
    "fast", "hard", "late", "early", "together", "why", "how", "when", "where",
];

const SYMBOLS: &str = "$+<=>^`|~%©®°±×÷€£¥₩§¶";

/// Suffix rules for words missing from the lexicon, longest suffixes first.
const SUFFIX_RULES: &[(&str, PartOfSpeech)] = &[
    ("ization", PartOfSpeech::Noun),
    ("ness", PartOfSpeech::Noun),
    ("ment", PartOfSpeech::Noun),
    ("tion", PartOfSpeech::Noun),
    ("sion", PartOfSpeech::Noun),
    ("ship", PartOfSpeech::Noun),
    ("hood", PartOfSpeech::Noun),
    ("ance", PartOfSpeech::Noun),
    ("ence", PartOfSpeech::Noun),
    ("ity", PartOfSpeech::Noun),
    ("ism", PartOfSpeech::Noun),
    ("ist", PartOfSpeech::Noun),
    ("ous", PartOfSpeech::Adjective),
    ("ful", PartOfSpeech::Adjective),
    ("ive", PartOfSpeech::Adjective),
    ("able", PartOfSpeech::Adjective),
    ("ible", PartOfSpeech::Adjective),
    ("less", PartOfSpeech::Adjective),
    ("ical", PartOfSpeech::Adjective),
    ("ish", PartOfSpeech::Adjective),
    ("ic", PartOfSpeech::Adjective),
    ("al", PartOfSpeech::Adjective),
    ("ly", PartOfSpeech::Adverb),
    ("ize", PartOfSpeech::Verb),
    ("ise", PartOfSpeech::Verb),
    ("ify", PartOfSpeech::Verb),
    ("ing", PartOfSpeech::Verb),
    ("ed", PartOfSpeech::Verb),
];

/// First-pass reading of a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reading {
    /// Unambiguous category (closed classes, punctuation, numerals)
    Fixed(PartOfSpeech),
    /// Lexicon hit with one or more candidate categories, most likely first
    Known(Vec<PartOfSpeech>),
    /// Guess from a suffix rule
    Suffix(PartOfSpeech),
    /// No information
    Unknown,
}

impl Reading {
    fn could_be(&self, pos: PartOfSpeech) -> bool {
        match self {
            Reading::Fixed(p) | Reading::Suffix(p) => *p == pos,
            Reading::Known(candidates) => candidates.contains(&pos),
            Reading::Unknown => false,
        }
    }
}

/// Deterministic lexicon-and-rules English tagger.
///
/// Words added with [`LexiconClassifier::with_word`] take precedence over
/// the built-in lexicon.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    token_pattern: Regex,
    fixed: HashMap<String, PartOfSpeech>,
    open: HashMap<String, Vec<PartOfSpeech>>,
    overrides: HashMap<String, PartOfSpeech>,
}

impl LexiconClassifier {
    /// Create a classifier with the built-in English lexicon.
    pub fn new() -> Self {
        let mut fixed = HashMap::new();
        let closed: [(&[&str], PartOfSpeech); 10] = [
            (DETERMINERS, PartOfSpeech::Determiner),
            (POSSESSIVES, PartOfSpeech::Pronoun),
            (SUBJECT_PRONOUNS, PartOfSpeech::Pronoun),
            (PRONOUNS, PartOfSpeech::Pronoun),
            (ADPOSITIONS, PartOfSpeech::Adposition),
            (CONJUNCTIONS, PartOfSpeech::Conjunction),
            (AUXILIARIES, PartOfSpeech::Auxiliary),
            (PARTICLES, PartOfSpeech::Particle),
            (INTERJECTIONS, PartOfSpeech::Interjection),
            (NUMBER_WORDS, PartOfSpeech::Numeral),
        ];
        for (words, pos) in closed {
            for word in words {
                fixed.entry(word.to_string()).or_insert(pos);
            }
        }

        let mut open: HashMap<String, Vec<PartOfSpeech>> = HashMap::new();
        let open_lists: [(&[&str], PartOfSpeech); 5] = [
            (VERBS, PartOfSpeech::Verb),
            (IRREGULAR_VERB_FORMS, PartOfSpeech::Verb),
            (NOUNS, PartOfSpeech::Noun),
            (ADJECTIVES, PartOfSpeech::Adjective),
            (ADVERBS, PartOfSpeech::Adverb),
        ];
        for (words, pos) in open_lists {
            for word in words {
                let entry = open.entry(word.to_string()).or_default();
                if !entry.contains(&pos) {
                    entry.push(pos);
                }
            }
        }

        Self {
            token_pattern: Regex::new(r"\d+(?:[.,]\d+)+|\w+(?:[-'’]\w+)*|[^\w\s]")
                .expect("token pattern is valid"),
            fixed,
            open,
            overrides: HashMap::new(),
        }
    }

    /// Force a word (case-insensitive) to a category.
    pub fn with_word(mut self, word: &str, category: PartOfSpeech) -> Self {
        self.overrides.insert(normalize(word), category);
        self
    }

    /// Split text into `(token, trailing whitespace)` pairs.
    ///
    /// Leading whitespace becomes its own token so the split is lossless.
    fn split<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        let spans: Vec<(usize, usize)> = self
            .token_pattern
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut pieces = Vec::with_capacity(spans.len() + 1);
        let first_start = spans.first().map_or(text.len(), |(start, _)| *start);
        if first_start > 0 {
            pieces.push((&text[..first_start], ""));
        }
        for (i, (start, end)) in spans.iter().enumerate() {
            let next_start = spans.get(i + 1).map_or(text.len(), |(s, _)| *s);
            pieces.push((&text[*start..*end], &text[*end..next_start]));
        }
        pieces
    }

    fn read(&self, word: &str) -> Reading {
        let first = match word.chars().next() {
            Some(c) => c,
            None => return Reading::Unknown,
        };
        if first.is_whitespace() {
            return Reading::Fixed(PartOfSpeech::Space);
        }
        if word.chars().count() == 1 && !first.is_alphanumeric() && first != '_' {
            return if SYMBOLS.contains(first) {
                Reading::Fixed(PartOfSpeech::Symbol)
            } else {
                Reading::Fixed(PartOfSpeech::Punctuation)
            };
        }
        if first.is_ascii_digit() {
            return Reading::Fixed(PartOfSpeech::Numeral);
        }

        let lower = normalize(word);
        if let Some(pos) = self.overrides.get(&lower) {
            return Reading::Fixed(*pos);
        }
        if let Some(pos) = self.fixed.get(&lower) {
            return Reading::Fixed(*pos);
        }
        if let Some(candidates) = self.open.get(&lower) {
            return Reading::Known(candidates.clone());
        }
        if let Some(candidates) = self.inflected(&lower) {
            return Reading::Known(candidates);
        }
        for (suffix, pos) in SUFFIX_RULES {
            if lower.len() > suffix.len() + 2 && lower.ends_with(suffix) {
                return Reading::Suffix(*pos);
            }
        }
        Reading::Unknown
    }

    /// Look up an inflected form through its stem.
    fn inflected(&self, lower: &str) -> Option<Vec<PartOfSpeech>> {
        let lookup = |stems: Vec<String>, wanted: &[PartOfSpeech]| {
            stems.iter().find_map(|stem| {
                let found: Vec<PartOfSpeech> = self
                    .open
                    .get(stem)?
                    .iter()
                    .copied()
                    .filter(|pos| wanted.contains(pos))
                    .collect();
                (!found.is_empty()).then_some(found)
            })
        };

        let verb = [PartOfSpeech::Verb];
        for suffix in ["ing", "ed"] {
            if let Some(found) = lookup(stems(lower, suffix), &verb) {
                return Some(found);
            }
        }
        if let Some(stem) = lower.strip_suffix("ied") {
            if let Some(found) = lookup(vec![format!("{}y", stem)], &verb) {
                return Some(found);
            }
        }
        let plural = [PartOfSpeech::Verb, PartOfSpeech::Noun];
        if let Some(stem) = lower.strip_suffix("ies") {
            if let Some(found) = lookup(vec![format!("{}y", stem)], &plural) {
                return Some(found);
            }
        }
        for suffix in ["es", "s"] {
            if let Some(found) = lookup(stems(lower, suffix), &plural) {
                return Some(found);
            }
        }
        let adjective = [PartOfSpeech::Adjective];
        for suffix in ["er", "est"] {
            if let Some(found) = lookup(stems(lower, suffix), &adjective) {
                return Some(found);
            }
        }
        None
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn classify(&self, text: &str) -> Result<Vec<Token>> {
        let pieces = self.split(text);
        let readings: Vec<Reading> = pieces.iter().map(|(word, _)| self.read(word)).collect();

        let mut tokens: Vec<Token> = Vec::with_capacity(pieces.len());
        let mut prev: Option<(PartOfSpeech, String)> = None;
        let mut sentence_start = true;

        for (i, ((word, ws), reading)) in pieces.iter().zip(&readings).enumerate() {
            let lower = normalize(word);
            let next = readings[i + 1..]
                .iter()
                .find(|r| **r != Reading::Fixed(PartOfSpeech::Space));
            let context = Context {
                prev: prev.as_ref().map(|(pos, w)| (*pos, w.as_str())),
                next,
                sentence_start,
            };
            let category = resolve(word, &lower, reading, &context);

            if category != PartOfSpeech::Space {
                sentence_start = matches!(*word, "." | "!" | "?");
                prev = Some((category, lower));
            }
            tokens.push(Token::new(*word, *ws, category));
        }
        Ok(tokens)
    }
}

struct Context<'a> {
    prev: Option<(PartOfSpeech, &'a str)>,
    next: Option<&'a Reading>,
    sentence_start: bool,
}

impl Context<'_> {
    /// Previous word introduces a noun phrase ("the", "my", "of", "two", "red").
    fn after_nominal_opener(&self) -> bool {
        match self.prev {
            Some((PartOfSpeech::Pronoun, word)) => POSSESSIVES.contains(&word),
            Some((pos, _)) => matches!(
                pos,
                PartOfSpeech::Determiner
                    | PartOfSpeech::Adjective
                    | PartOfSpeech::Adposition
                    | PartOfSpeech::Numeral
            ),
            None => false,
        }
    }

    /// Previous word is typically followed by a verb ("she", "will", "to", "fox").
    fn after_verbal_opener(&self) -> bool {
        match self.prev {
            Some((PartOfSpeech::Pronoun, word)) => SUBJECT_PRONOUNS.contains(&word),
            Some((pos, _)) => matches!(
                pos,
                PartOfSpeech::Auxiliary
                    | PartOfSpeech::Particle
                    | PartOfSpeech::Noun
                    | PartOfSpeech::ProperNoun
                    | PartOfSpeech::Adverb
            ),
            None => false,
        }
    }

    fn next_is_nounish(&self) -> bool {
        self.next.is_some_and(|r| {
            r.could_be(PartOfSpeech::Noun) || matches!(r, Reading::Unknown)
        })
    }
}

fn resolve(word: &str, lower: &str, reading: &Reading, context: &Context<'_>) -> PartOfSpeech {
    match reading {
        Reading::Fixed(PartOfSpeech::Adposition) if lower == "to" => {
            let verb_follows = context.next.is_some_and(|r| {
                r.could_be(PartOfSpeech::Verb)
                    && !matches!(r, Reading::Known(c) if c.first() == Some(&PartOfSpeech::Noun))
            });
            if verb_follows {
                PartOfSpeech::Particle
            } else {
                PartOfSpeech::Adposition
            }
        }
        Reading::Fixed(pos) => *pos,
        Reading::Known(candidates) if candidates.len() == 1 => candidates[0],
        Reading::Known(candidates) => {
            let has = |pos| candidates.contains(&pos);
            if matches!(context.prev, Some((PartOfSpeech::Particle, "to")))
                && has(PartOfSpeech::Verb)
            {
                PartOfSpeech::Verb
            } else if context.after_nominal_opener() {
                if has(PartOfSpeech::Adjective) && context.next_is_nounish() {
                    PartOfSpeech::Adjective
                } else if has(PartOfSpeech::Noun) {
                    PartOfSpeech::Noun
                } else {
                    candidates[0]
                }
            } else if context.after_verbal_opener() && has(PartOfSpeech::Verb) {
                PartOfSpeech::Verb
            } else if has(PartOfSpeech::Noun) && context.sentence_start {
                PartOfSpeech::Noun
            } else {
                candidates[0]
            }
        }
        Reading::Suffix(pos) => *pos,
        Reading::Unknown => {
            let capitalized = word.chars().next().is_some_and(char::is_uppercase);
            if capitalized && !context.sentence_start {
                PartOfSpeech::ProperNoun
            } else if context.after_verbal_opener()
                && !matches!(
                    context.prev,
                    Some((PartOfSpeech::Noun | PartOfSpeech::ProperNoun, _))
                )
            {
                PartOfSpeech::Verb
            } else {
                PartOfSpeech::Noun
            }
        }
    }
}

/// Lowercase a word and fold typographic apostrophes.
fn normalize(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

/// Candidate stems for `word` with `suffix` removed: the bare stem, the stem
/// with a silent "e" restored, and the stem with a doubled final consonant
/// undone.
fn stems(word: &str, suffix: &str) -> Vec<String> {
    let Some(stem) = word.strip_suffix(suffix) else {
        return Vec::new();
    };
    if stem.chars().count() < 2 {
        return Vec::new();
    }
    let mut out = vec![stem.to_string(), format!("{}e", stem)];
    let mut chars = stem.chars().rev();
    if let (Some(last), Some(before)) = (chars.next(), chars.next()) {
        if last == before && !"aeiou".contains(last) {
            out.push(stem[..stem.len() - last.len_utf8()].to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::join_tokens;

    fn tags(text: &str) -> Vec<(String, PartOfSpeech)> {
        LexiconClassifier::new()
            .classify(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.text, t.category))
            .collect()
    }

    fn tag_of(text: &str, word: &str) -> PartOfSpeech {
        tags(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, pos)| pos)
            .unwrap_or_else(|| panic!("no token '{}' in '{}'", word, text))
    }

    #[test]
    fn test_lossless_split() {
        let classifier = LexiconClassifier::new();
        for text in [
            "",
            "   ",
            "  leading and trailing  ",
            "The quick brown fox jumps over the lazy dog.",
            "Tabs\tand\nnewlines,  double  spaces!",
            "It's 3.14 o’clock — well-known café, naïve résumé.",
            "Emoji 🎉 and symbols $5 + 10%",
        ] {
            let tokens = classifier.classify(text).unwrap();
            assert_eq!(join_tokens(&tokens), text, "round trip for {:?}", text);
        }
    }

    #[test]
    fn test_whitespace_attaches_to_previous_token() {
        let tokens = LexiconClassifier::new().classify(" Hi  there").unwrap();
        assert_eq!(tokens[0].text, " ");
        assert_eq!(tokens[0].category, PartOfSpeech::Space);
        assert_eq!(tokens[1].text, "Hi");
        assert_eq!(tokens[1].whitespace, "  ");
        assert_eq!(tokens[2].text, "there");
        assert_eq!(tokens[2].whitespace, "");
    }

    #[test]
    fn test_classic_sentence() {
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(tag_of(text, "The"), PartOfSpeech::Determiner);
        assert_eq!(tag_of(text, "quick"), PartOfSpeech::Adjective);
        assert_eq!(tag_of(text, "fox"), PartOfSpeech::Noun);
        assert_eq!(tag_of(text, "jumps"), PartOfSpeech::Verb);
        assert_eq!(tag_of(text, "over"), PartOfSpeech::Adposition);
        assert_eq!(tag_of(text, "lazy"), PartOfSpeech::Adjective);
        assert_eq!(tag_of(text, "dog"), PartOfSpeech::Noun);
        assert_eq!(tag_of(text, "."), PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_inflections() {
        assert_eq!(tag_of("She walked home", "walked"), PartOfSpeech::Verb);
        assert_eq!(tag_of("They are running", "running"), PartOfSpeech::Verb);
        assert_eq!(tag_of("He tried again", "tried"), PartOfSpeech::Verb);
        assert_eq!(tag_of("The cities grow", "cities"), PartOfSpeech::Noun);
        assert_eq!(tag_of("a bigger box", "bigger"), PartOfSpeech::Adjective);
        assert_eq!(tag_of("We wrote it", "wrote"), PartOfSpeech::Verb);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tag_of("She spoke quietly", "quietly"), PartOfSpeech::Adverb);
        assert_eq!(
            tag_of("a dangerous journey", "dangerous"),
            PartOfSpeech::Adjective
        );
        assert_eq!(
            tag_of("the happiness of cats", "happiness"),
            PartOfSpeech::Noun
        );
        assert_eq!(tag_of("we modernize it", "modernize"), PartOfSpeech::Verb);
    }

    #[test]
    fn test_context_disambiguation() {
        assert_eq!(tag_of("I work daily", "work"), PartOfSpeech::Verb);
        assert_eq!(tag_of("The work is done", "work"), PartOfSpeech::Noun);
        assert_eq!(tag_of("I want to run", "run"), PartOfSpeech::Verb);
        assert_eq!(tag_of("I want to run", "to"), PartOfSpeech::Particle);
        assert_eq!(tag_of("Go to school", "to"), PartOfSpeech::Adposition);
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(tag_of("We met Alice yesterday", "Alice"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of("they glorp", "glorp"), PartOfSpeech::Verb);
        assert_eq!(tag_of("a glorp", "glorp"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_numbers_and_symbols() {
        assert_eq!(tag_of("about 3.14 units", "3.14"), PartOfSpeech::Numeral);
        assert_eq!(tag_of("two cats", "two"), PartOfSpeech::Numeral);
        assert_eq!(tag_of("pay $5", "$"), PartOfSpeech::Symbol);
        assert_eq!(tag_of("wait, no", ","), PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_with_word_override() {
        let classifier = LexiconClassifier::new().with_word("Rust", PartOfSpeech::ProperNoun);
        let tokens = classifier.classify("rust is fun").unwrap();
        assert_eq!(tokens[0].category, PartOfSpeech::ProperNoun);
    }

    #[test]
    fn test_deterministic() {
        let classifier = LexiconClassifier::new();
        let text = "Time flies like an arrow; fruit flies like a banana.";
        assert_eq!(
            classifier.classify(text).unwrap(),
            classifier.classify(text).unwrap()
        );
    }

    #[test]
    fn test_stems() {
        assert_eq!(stems("making", "ing"), vec!["mak", "make"]);
        assert!(stems("running", "ing").contains(&"run".to_string()));
        assert!(stems("sing", "ing").is_empty());
    }
}

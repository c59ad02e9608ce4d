use crate::analysis::lexicon::Lexicon;
use crate::analysis::{Analyzer, Category, TagMapping, TaggedToken};
use crate::error::LexiconError;
use crate::language::Language;

const POSSESSIVES: [&str; 7] = ["my", "your", "his", "her", "its", "our", "their"];

const ADJECTIVE_SUFFIXES: [&str; 8] = ["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

/// Lexicon-driven Universal POS tagger for English
#[derive(Debug, Clone)]
pub struct EnglishAnalyzer {
    lexicon: Lexicon,
}

impl EnglishAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn embedded() -> Result<Self, LexiconError> {
        Ok(Self::new(Lexicon::embedded(Language::English)?))
    }
}

/// Whitespace tokens with leading and trailing punctuation removed. Tokens
/// that are all punctuation are dropped; numerals are kept.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|chunk| chunk.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

/// Best-effort tag for a word the lexicon does not know
fn guess_tag(word: &str, position: usize) -> &'static str {
    if word.chars().any(|c| c.is_ascii_digit()) {
        return "NUM";
    }
    if position > 0 && word.chars().next().is_some_and(char::is_uppercase) {
        return "PROPN";
    }

    let lower = word.to_lowercase();
    let long = lower.chars().count() > 4;
    if long && lower.ends_with("ly") {
        "ADV"
    } else if long && (lower.ends_with("ing") || lower.ends_with("ed")) {
        "VERB"
    } else if ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        "ADJ"
    } else {
        "NOUN"
    }
}

fn has(candidates: &[String], tag: &str) -> bool {
    candidates.iter().any(|c| c == tag)
}

fn prefer(candidates: &[String], order: &[&str]) -> String {
    order
        .iter()
        .find(|tag| has(candidates, tag))
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| candidates[0].clone())
}

/// Pick one tag from an ambiguous entry using the neighbouring tokens
fn resolve(
    candidates: &[String],
    previous: Option<(&str, &str)>,
    next: Option<&[String]>,
) -> String {
    if candidates.len() == 1 {
        return candidates[0].clone();
    }

    if has(candidates, "PART") {
        let verb_follows = next.is_some_and(|next| has(next, "VERB") || has(next, "AUX"));
        if verb_follows {
            return "PART".to_string();
        }
        if let Some(other) = candidates.iter().find(|c| *c != "PART") {
            return other.clone();
        }
    }

    match previous {
        Some((word, tag))
            if matches!(tag, "DET" | "ADJ" | "NUM")
                || POSSESSIVES.contains(&word.to_lowercase().as_str()) =>
        {
            prefer(candidates, &["NOUN", "ADJ"])
        }
        Some((_, "PRON" | "NOUN" | "PROPN" | "AUX" | "PART")) => {
            prefer(candidates, &["VERB", "AUX"])
        }
        _ => candidates[0].clone(),
    }
}

impl Analyzer for EnglishAnalyzer {
    fn language(&self) -> Language {
        Language::English
    }

    /// Only tokens with at least one letter are words; bare numerals are not
    fn tokenize(&self, sentence: &str) -> Vec<String> {
        tokenize_words(sentence)
            .into_iter()
            .filter(|word| word.chars().any(char::is_alphabetic))
            .collect()
    }

    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let words = self.tokenize(sentence);

        let looked_up: Vec<(Vec<String>, Option<String>, bool)> = words
            .iter()
            .enumerate()
            .map(|(position, word)| match self.lexicon.lookup(word) {
                Some(entry) => (entry.tags.clone(), entry.gloss.clone(), true),
                None => (vec![guess_tag(word, position).to_string()], None, false),
            })
            .collect();

        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(words.len());
        for (position, (word, (candidates, gloss, known))) in
            words.iter().zip(looked_up.iter()).enumerate()
        {
            let previous = tagged
                .last()
                .map(|prev| (prev.text.as_str(), prev.tag.as_str()));
            let next = looked_up.get(position + 1).map(|(tags, _, _)| tags.as_slice());

            let tag = resolve(candidates, previous, next);
            tagged.push(TaggedToken {
                text: word.clone(),
                tag,
                gloss: gloss.clone(),
                known: *known,
            });
        }

        tagged
    }

    /// Universal POS tags to quiz categories
    fn map_tag(&self, tag: &str) -> TagMapping {
        match tag {
            "NOUN" | "PROPN" => TagMapping::Quiz(Category::Noun),
            "PRON" => TagMapping::Quiz(Category::Pronoun),
            "VERB" | "AUX" => TagMapping::Quiz(Category::Verb),
            "ADJ" => TagMapping::Quiz(Category::Adjective),
            "ADV" => TagMapping::Quiz(Category::Adverb),
            "ADP" => TagMapping::Quiz(Category::Preposition),
            "CONJ" | "CCONJ" | "SCONJ" => TagMapping::Quiz(Category::Conjunction),
            "INTJ" => TagMapping::Quiz(Category::Interjection),
            "DET" | "PART" | "PUNCT" | "SYM" | "SPACE" => TagMapping::Skip,
            _ => TagMapping::Unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> EnglishAnalyzer {
        EnglishAnalyzer::embedded().unwrap()
    }

    fn tags(sentence: &str) -> Vec<(String, String)> {
        analyzer()
            .tag(sentence)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    fn tag_of(sentence: &str, word: &str) -> String {
        tags(sentence)
            .into_iter()
            .find(|(text, _)| text == word)
            .map(|(_, tag)| tag)
            .unwrap()
    }

    #[test]
    fn tokenize_strips_edge_punctuation() {
        assert_eq!(
            tokenize_words("Wow, the sky looks amazing!"),
            vec!["Wow", "the", "sky", "looks", "amazing"]
        );
        assert_eq!(tokenize_words("\"Hello\" -- world..."), vec!["Hello", "world"]);
        assert_eq!(tokenize_words("don't stop"), vec!["don't", "stop"]);
        assert!(tokenize_words("  ... !! ").is_empty());
    }

    #[test]
    fn cat_sat_on_the_mat() {
        let words = analyzer().analyze("The cat sat on the mat.");
        let pairs: Vec<(&str, Category)> =
            words.iter().map(|w| (w.text.as_str(), w.category)).collect();

        assert_eq!(
            pairs,
            vec![
                ("cat", Category::Noun),
                ("sat", Category::Verb),
                ("on", Category::Preposition),
                ("mat", Category::Noun),
            ]
        );
        assert_eq!(words[0].position, 1);
        assert_eq!(words[3].position, 5);
    }

    #[test]
    fn particle_to_only_before_verbs() {
        assert_eq!(tag_of("I want to go home", "to"), "PART");
        assert_eq!(tag_of("She walked to school", "to"), "ADP");
    }

    #[test]
    fn unknown_words_are_guessed_from_shape() {
        assert_eq!(guess_tag("42", 3), "NUM");
        assert_eq!(guess_tag("Zanzibar", 2), "PROPN");
        assert_eq!(guess_tag("Zanzibar", 0), "NOUN");
        assert_eq!(guess_tag("blorfingly", 1), "ADV");
        assert_eq!(guess_tag("glorping", 1), "VERB");
        assert_eq!(guess_tag("snarfous", 1), "ADJ");
        assert_eq!(guess_tag("wug", 1), "NOUN");
    }

    #[test]
    fn unknown_tokens_are_marked() {
        let tagged = analyzer().tag("The zorblax sat");
        assert!(tagged[0].known);
        assert!(!tagged[1].known);
        assert_eq!(tagged[1].tag, "NOUN");
    }

    #[test]
    fn ambiguous_word_after_determiner_prefers_noun() {
        let candidates = vec!["VERB".to_string(), "NOUN".to_string()];
        assert_eq!(resolve(&candidates, Some(("the", "DET")), None), "NOUN");
        assert_eq!(resolve(&candidates, Some(("their", "PRON")), None), "NOUN");
        assert_eq!(resolve(&candidates, Some(("birds", "NOUN")), None), "VERB");
        assert_eq!(resolve(&candidates, None, None), "VERB");
    }

    #[test]
    fn punctuation_and_numbers_map() {
        let analyzer = analyzer();
        assert_eq!(analyzer.map_tag("PUNCT"), TagMapping::Skip);
        assert_eq!(analyzer.map_tag("DET"), TagMapping::Skip);
        assert_eq!(analyzer.map_tag("NUM"), TagMapping::Unmapped);
        assert_eq!(analyzer.map_tag("SCONJ"), TagMapping::Quiz(Category::Conjunction));
    }

    #[test]
    fn numerals_are_not_words() {
        let analyzer = analyzer();
        assert_eq!(analyzer.tokenize("I saw 3 birds"), vec!["I", "saw", "birds"]);

        let words = analyzer.analyze("I have 2 cats and 10 dogs");
        assert!(words.iter().all(|w| w.text != "2" && w.text != "10"));
        assert_eq!(words.len(), 5);
    }

    #[test]
    fn mixed_letters_and_digits_stay_words() {
        assert_eq!(tag_of("She came 3rd", "3rd"), "NUM");
    }

    #[test]
    fn glosses_come_from_lexicon() {
        let words = analyzer().analyze("The cat sat on the mat.");
        assert_eq!(words[0].gloss.as_deref(), Some("แมว"));
        assert_eq!(words[2].gloss, None);
    }
}

pub mod category;
pub mod english;
pub mod lexicon;
pub mod thai;

use std::path::Path;

use tracing::debug;

pub use category::{Category, Reference};
pub use english::EnglishAnalyzer;
pub use lexicon::Lexicon;
pub use thai::ThaiAnalyzer;

use crate::error::LexiconError;
use crate::language::Language;

/// A quizzable word in a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub category: Category,
    /// Translation into the other language, when the lexicon has one
    pub gloss: Option<String>,
    /// Index of the token in the tokenized sentence
    pub position: usize,
}

/// Raw tagger output for one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
    pub gloss: Option<String>,
    /// Whether the lexicon had the word or the tag was guessed
    pub known: bool,
}

/// How a tagger tag relates to the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMapping {
    Quiz(Category),
    /// Not a word the player is asked about (determiners, particles, punctuation)
    Skip,
    /// No table entry; lands in [`Category::DEFAULT`]
    Unmapped,
}

pub trait Analyzer {
    fn language(&self) -> Language;

    fn tokenize(&self, sentence: &str) -> Vec<String>;

    fn tag(&self, sentence: &str) -> Vec<TaggedToken>;

    fn map_tag(&self, tag: &str) -> TagMapping;

    /// Ordered quiz words for `sentence`. Deterministic.
    fn analyze(&self, sentence: &str) -> Vec<WordEntry> {
        self.tag(sentence)
            .into_iter()
            .enumerate()
            .filter_map(|(position, token)| {
                let category = match self.map_tag(&token.tag) {
                    TagMapping::Quiz(category) => category,
                    TagMapping::Skip => return None,
                    TagMapping::Unmapped => {
                        debug!(
                            language = %self.language(),
                            tag = %token.tag,
                            word = %token.text,
                            "unmapped tag, using default category"
                        );
                        Category::DEFAULT
                    }
                };

                Some(WordEntry {
                    text: token.text,
                    category,
                    gloss: token.gloss,
                    position,
                })
            })
            .collect()
    }
}

/// One analyzer per language, loaded together at startup
#[derive(Debug, Clone)]
pub struct Analyzers {
    english: EnglishAnalyzer,
    thai: ThaiAnalyzer,
}

impl Analyzers {
    /// Load both lexicons, from `lexicon_dir` when given
    pub fn load(lexicon_dir: Option<&Path>) -> Result<Self, LexiconError> {
        let english = Lexicon::load(Language::English, lexicon_dir)?;
        let thai = Lexicon::load(Language::Thai, lexicon_dir)?;
        debug!(
            english = english.name(),
            english_words = english.len(),
            thai = thai.name(),
            thai_words = thai.len(),
            "lexicons loaded"
        );

        Ok(Self {
            english: EnglishAnalyzer::new(english),
            thai: ThaiAnalyzer::new(thai),
        })
    }

    pub fn embedded() -> Result<Self, LexiconError> {
        Self::load(None)
    }

    pub fn get(&self, language: Language) -> &dyn Analyzer {
        match language {
            Language::English => &self.english,
            Language::Thai => &self.thai,
        }
    }

    pub fn analyze(&self, sentence: &str, language: Language) -> Vec<WordEntry> {
        self.get(language).analyze(sentence)
    }

    /// Token count as the tier bands measure it
    pub fn word_count(&self, sentence: &str, language: Language) -> usize {
        self.get(language).tokenize(sentence).len()
    }
}

use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::BankError;
use crate::language::{Difficulty, Language};

static LANG_DIR: Dir = include_dir!("src/lang");

#[derive(Deserialize, Debug)]
struct RawBank {
    name: String,
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

/// Built-in sentences for one language, grouped by tier.
///
/// Every tier holds at least one sentence; construction fails otherwise.
#[derive(Clone, Debug)]
pub struct SentenceBank {
    language: Language,
    name: String,
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl SentenceBank {
    /// Load the bank embedded for `language`
    pub fn new(language: Language) -> Result<Self, BankError> {
        let file_name = format!("{}.json", language.file_stem());
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| BankError::NotFound(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| BankError::NotUtf8(file_name.clone()))?;

        Self::from_json(language, contents)
    }

    pub fn from_json(language: Language, json: &str) -> Result<Self, BankError> {
        let raw: RawBank = from_str(json).map_err(|source| BankError::Parse {
            name: language.file_stem().to_string(),
            source,
        })?;

        let clean = |sentences: Vec<String>| -> Vec<String> {
            sentences
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let bank = Self {
            language,
            name: raw.name,
            easy: clean(raw.easy),
            medium: clean(raw.medium),
            hard: clean(raw.hard),
        };

        for difficulty in Difficulty::ALL {
            if bank.sentences(difficulty).is_empty() {
                return Err(BankError::EmptyTier {
                    language,
                    difficulty,
                });
            }
        }

        Ok(bank)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sentences(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Uniform random pick from a tier, skipping `avoid` when the tier has
    /// anything else to offer.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        avoid: Option<&str>,
        rng: &mut R,
    ) -> &str {
        let pool = self.sentences(difficulty);
        let candidates: Vec<&String> = pool
            .iter()
            .filter(|sentence| Some(sentence.as_str()) != avoid)
            .collect();

        if candidates.is_empty() {
            return &pool[rng.gen_range(0..pool.len())];
        }

        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// The English and Thai banks, loaded together at startup
#[derive(Clone, Debug)]
pub struct SentenceBanks {
    english: SentenceBank,
    thai: SentenceBank,
}

impl SentenceBanks {
    pub fn embedded() -> Result<Self, BankError> {
        Ok(Self {
            english: SentenceBank::new(Language::English)?,
            thai: SentenceBank::new(Language::Thai)?,
        })
    }

    pub fn get(&self, language: Language) -> &SentenceBank {
        match language {
            Language::English => &self.english,
            Language::Thai => &self.thai,
        }
    }
}

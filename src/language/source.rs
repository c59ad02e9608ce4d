use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::error::RemoteError;
use crate::language::bank::SentenceBanks;
use crate::language::remote::{HealthReport, RemoteClient};
use crate::language::{Difficulty, Language};

/// Where a drawn sentence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Origin {
    #[strum(serialize = "built-in")]
    Local,
    #[strum(serialize = "generated")]
    Remote,
    #[strum(serialize = "custom")]
    Custom,
}

/// A sentence handed to the game for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceDraw {
    pub text: String,
    pub language: Language,
    /// Tier the sentence actually belongs to, which can differ from the one
    /// requested when the generation service says so
    pub difficulty: Difficulty,
    pub origin: Origin,
    /// Set when remote generation failed and a local sentence stands in
    pub warning: Option<String>,
}

/// Supplies sentences to the game
pub trait SentenceProvider {
    /// Draw a sentence. Never fails: remote problems fall back to the local bank.
    fn sentence(&mut self, language: Language, difficulty: Difficulty) -> SentenceDraw;

    /// Draw from the built-in bank only
    fn local_sentence(&mut self, language: Language, difficulty: Difficulty) -> SentenceDraw;

    fn remote_available(&self) -> bool {
        false
    }

    fn set_remote(&mut self, _enabled: bool) {}

    fn check_health(&self) -> Result<HealthReport, RemoteError> {
        Err(RemoteError::NotConfigured)
    }
}

pub struct SentenceSource {
    banks: SentenceBanks,
    remote: Option<RemoteClient>,
    use_remote: bool,
    custom: Option<String>,
    last: HashMap<(Language, Difficulty), String>,
    rng: StdRng,
}

impl SentenceSource {
    pub fn new(banks: SentenceBanks) -> Self {
        Self {
            banks,
            remote: None,
            use_remote: false,
            custom: None,
            last: HashMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Attach a generation service; remote draws stay off until enabled
    pub fn with_remote(mut self, client: RemoteClient) -> Self {
        self.remote = Some(client);
        self
    }

    /// Use `sentence` for every round instead of drawing
    pub fn with_custom(mut self, sentence: impl Into<String>) -> Self {
        let sentence = sentence.into();
        self.custom = Some(sentence.trim().to_string()).filter(|s| !s.is_empty());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn remote_enabled(&self) -> bool {
        self.use_remote && self.remote.is_some()
    }

    pub fn banks(&self) -> &SentenceBanks {
        &self.banks
    }
}

impl SentenceProvider for SentenceSource {
    fn sentence(&mut self, language: Language, difficulty: Difficulty) -> SentenceDraw {
        if let Some(text) = &self.custom {
            return SentenceDraw {
                text: text.clone(),
                language,
                difficulty,
                origin: Origin::Custom,
                warning: None,
            };
        }

        let remote = match (&self.remote, self.use_remote) {
            (Some(client), true) => client,
            _ => return self.local_sentence(language, difficulty),
        };

        match remote.generate(language, difficulty) {
            Ok(generated) => {
                let actual = generated.difficulty.unwrap_or(difficulty);
                info!(%language, requested = %difficulty, %actual, "drew generated sentence");
                SentenceDraw {
                    text: generated.text,
                    language,
                    difficulty: actual,
                    origin: Origin::Remote,
                    warning: None,
                }
            }
            Err(err) => {
                warn!(
                    %err,
                    %language,
                    %difficulty,
                    "sentence generation failed, using built-in sentences"
                );
                let mut draw = self.local_sentence(language, difficulty);
                draw.warning = Some(format!("{err}. Using built-in sentences."));
                draw
            }
        }
    }

    fn local_sentence(&mut self, language: Language, difficulty: Difficulty) -> SentenceDraw {
        let key = (language, difficulty);
        let text = self
            .banks
            .get(language)
            .choose(difficulty, self.last.get(&key).map(String::as_str), &mut self.rng)
            .to_string();
        self.last.insert(key, text.clone());

        SentenceDraw {
            text,
            language,
            difficulty,
            origin: Origin::Local,
            warning: None,
        }
    }

    fn remote_available(&self) -> bool {
        self.remote.is_some()
    }

    fn set_remote(&mut self, enabled: bool) {
        self.use_remote = enabled && self.remote.is_some();
    }

    fn check_health(&self) -> Result<HealthReport, RemoteError> {
        match &self.remote {
            Some(client) => client.health(),
            None => Err(RemoteError::NotConfigured),
        }
    }
}

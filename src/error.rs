use std::path::PathBuf;

use thiserror::Error;

use crate::language::{Difficulty, Language};

/// Failures loading a tagging lexicon. Always fatal at startup.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("lexicon file {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("failed to read lexicon {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {name} lexicon: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} lexicon entry '{word}' has no tags")]
    MissingTags { name: String, word: String },

    #[error("{0} lexicon has no entries")]
    Empty(String),
}

/// Failures loading a built-in sentence bank. Always fatal at startup.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("sentence bank {0} is missing from the binary")]
    NotFound(String),

    #[error("sentence bank {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("malformed {name} sentence bank: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{language} sentence bank has no {difficulty} sentences")]
    EmptyTier {
        language: Language,
        difficulty: Difficulty,
    },
}

/// Failures talking to the sentence generation service.
///
/// These never reach the game: the sentence source turns them into a
/// fallback warning and draws from the local bank instead.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no API URL configured")]
    NotConfigured,

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("could not connect to {0}")]
    Connect(String),

    #[error("API request failed with status {0}")]
    HttpStatus(u16),

    #[error("API returned error: {0}")]
    Rejected(String),

    #[error("malformed API response: {0}")]
    Malformed(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Rejected answer submissions. Counters are untouched when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("word index {index} is out of range for a {len}-word sentence")]
    OutOfRange { index: usize, len: usize },

    #[error("word {0} has already been answered")]
    AlreadyAnswered(usize),

    #[error("sentence has no words to classify")]
    NoWords,
}

/// Anything that stops the quiz from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

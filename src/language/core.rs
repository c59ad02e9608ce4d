use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Languages the quiz can be played in. Each one is bound to its own
/// analyzer, lexicon and sentence bank.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Thai,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Thai];

    /// Two-letter code used on the wire
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Thai => "th",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Base name of the embedded data files for this language
    pub fn file_stem(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Thai => "thai",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Thai => "ภาษาไทย",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Thai,
            Language::Thai => Language::English,
        }
    }
}

/// Sentence length tier
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive word-count band a sentence of this tier falls in
    pub fn band(self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 4..=6,
            Difficulty::Medium => 6..=10,
            Difficulty::Hard => 11..=18,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn thai_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "ง่าย",
            Difficulty::Medium => "ปานกลาง",
            Difficulty::Hard => "ยาก",
        }
    }

    /// Cycle easy -> medium -> hard -> easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

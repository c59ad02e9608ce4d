use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::LexiconError;
use crate::language::Language;

static LEXICON_DIR: Dir = include_dir!("src/lexicon");

/// One lexicon entry as written in the JSON files: a bare tag, a list of
/// candidate tags (most likely first), or tags with a gloss.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawEntry {
    Tag(String),
    Tags(Vec<String>),
    Full {
        tags: Vec<String>,
        #[serde(default)]
        gloss: Option<String>,
    },
}

#[derive(Deserialize, Debug)]
struct RawLexicon {
    name: String,
    entries: HashMap<String, RawEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexEntry {
    pub tags: Vec<String>,
    pub gloss: Option<String>,
}

/// Word list with candidate tags, keyed by lowercase surface form
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    entries: HashMap<String, LexEntry>,
    longest_word: usize,
}

impl Lexicon {
    /// Load the lexicon for `language`, from `dir` when given, otherwise the
    /// copy compiled into the binary.
    pub fn load(language: Language, dir: Option<&Path>) -> Result<Self, LexiconError> {
        match dir {
            Some(dir) => Self::from_dir(language, dir),
            None => Self::embedded(language),
        }
    }

    pub fn embedded(language: Language) -> Result<Self, LexiconError> {
        let file_name = format!("{}.json", language.file_stem());
        let file = LEXICON_DIR
            .get_file(&file_name)
            .ok_or_else(|| LexiconError::NotFound(file_name.clone().into()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| LexiconError::NotUtf8(file_name.clone()))?;

        Self::from_json(language.file_stem(), contents)
    }

    pub fn from_dir(language: Language, dir: &Path) -> Result<Self, LexiconError> {
        let path = dir.join(format!("{}.json", language.file_stem()));
        if !path.is_file() {
            return Err(LexiconError::NotFound(path));
        }
        let contents = fs::read_to_string(&path).map_err(|source| LexiconError::Io {
            path: path.clone(),
            source,
        })?;

        Self::from_json(language.file_stem(), &contents)
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self, LexiconError> {
        let raw: RawLexicon = serde_json::from_str(json).map_err(|source| LexiconError::Parse {
            name: name.to_string(),
            source,
        })?;

        let mut entries = HashMap::with_capacity(raw.entries.len());
        for (word, entry) in raw.entries {
            let (tags, gloss) = match entry {
                RawEntry::Tag(tag) => (vec![tag], None),
                RawEntry::Tags(tags) => (tags, None),
                RawEntry::Full { tags, gloss } => (tags, gloss),
            };
            if tags.is_empty() {
                return Err(LexiconError::MissingTags {
                    name: raw.name,
                    word,
                });
            }
            entries.insert(word.to_lowercase(), LexEntry { tags, gloss });
        }

        if entries.is_empty() {
            return Err(LexiconError::Empty(raw.name));
        }

        let longest_word = entries
            .keys()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(1);

        Ok(Self {
            name: raw.name,
            entries,
            longest_word,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, word: &str) -> Option<&LexEntry> {
        self.entries.get(word)
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, word: &str) -> Option<&LexEntry> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Length in characters of the longest entry
    pub fn longest_word(&self) -> usize {
        self.longest_word
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Result};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::language::{Difficulty, Language};
use crate::session::Session;
use crate::util::{mean, percentage};

/// A finished round as stored in the history database
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    pub played_at: DateTime<Local>,
    pub language: Language,
    pub difficulty: Difficulty,
    pub sentence: String,
    pub correct: usize,
    pub total: usize,
}

impl RoundRecord {
    pub fn from_session(session: &Session) -> Self {
        Self {
            played_at: Local::now(),
            language: session.language,
            difficulty: session.difficulty,
            sentence: session.sentence.clone(),
            correct: session.correct(),
            total: session.total(),
        }
    }

    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// Aggregate over all recorded rounds for one language and tier
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub rounds: usize,
    pub best_accuracy: f64,
    pub mean_accuracy: f64,
}

/// Round history backed by SQLite
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Open the database at the default state path, creating it if needed
    pub fn new() -> Result<Self> {
        let db_path =
            AppDirs::history_db_path().unwrap_or_else(|| PathBuf::from("wordclass_history.db"));
        Self::open(&db_path)
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        Self::with_connection(Connection::open(db_path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS rounds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                played_at TEXT NOT NULL,
                language TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                sentence TEXT NOT NULL,
                correct INTEGER NOT NULL,
                total INTEGER NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_rounds_settings ON rounds(language, difficulty)",
            [],
        )?;

        Ok(HistoryDb { conn })
    }

    pub fn record_round(&self, round: &RoundRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO rounds (played_at, language, difficulty, sentence, correct, total)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                round.played_at.to_rfc3339(),
                round.language.code(),
                round.difficulty.as_str(),
                round.sentence,
                round.correct as i64,
                round.total as i64,
            ],
        )?;

        Ok(())
    }

    /// Most recent rounds first
    pub fn recent(&self, limit: usize) -> Result<Vec<RoundRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT played_at, language, difficulty, sentence, correct, total
            FROM rounds
            ORDER BY played_at DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let rounds = stmt.query_map([limit as i64], |row| {
            let played_at: String = row.get(0)?;
            let played_at = DateTime::parse_from_rfc3339(&played_at)
                .map_err(|_| invalid_column(0, "played_at"))?
                .with_timezone(&Local);
            let language: String = row.get(1)?;
            let difficulty: String = row.get(2)?;

            Ok(RoundRecord {
                played_at,
                language: Language::from_code(&language)
                    .ok_or_else(|| invalid_column(1, "language"))?,
                difficulty: Difficulty::parse(&difficulty)
                    .ok_or_else(|| invalid_column(2, "difficulty"))?,
                sentence: row.get(3)?,
                correct: row.get::<_, i64>(4)? as usize,
                total: row.get::<_, i64>(5)? as usize,
            })
        })?;

        rounds.collect()
    }

    /// Rounds, best and mean accuracy for a language and tier; `None` before
    /// the first recorded round
    pub fn summary(
        &self,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<Option<HistorySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT correct, total FROM rounds WHERE language = ?1 AND difficulty = ?2",
        )?;

        let accuracies = stmt
            .query_map(params![language.code(), difficulty.as_str()], |row| {
                let correct: i64 = row.get(0)?;
                let total: i64 = row.get(1)?;
                Ok(percentage(correct as usize, total as usize))
            })?
            .collect::<Result<Vec<f64>>>()?;

        Ok(mean(&accuracies).map(|mean_accuracy| HistorySummary {
            rounds: accuracies.len(),
            best_accuracy: accuracies.iter().copied().fold(0.0, f64::max),
            mean_accuracy,
        }))
    }

    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM rounds", [])?;
        Ok(())
    }
}

fn invalid_column(index: usize, name: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(index, name.to_string(), rusqlite::types::Type::Text)
}

pub mod bank;
pub mod core;
pub mod remote;
pub mod source;

// Re-export the main types for convenience
pub use bank::{SentenceBank, SentenceBanks};
pub use self::core::{Difficulty, Language};
pub use remote::{HealthReport, RemoteClient, RemoteSentence};
pub use source::{Origin, SentenceDraw, SentenceProvider, SentenceSource};

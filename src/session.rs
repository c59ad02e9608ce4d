use std::collections::BTreeMap;

use tracing::debug;

use crate::analysis::{Category, WordEntry};
use crate::error::SessionError;
use crate::language::{Difficulty, Language};
use crate::util::percentage;

/// Result of one submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub index: usize,
    pub word: String,
    pub chosen: Category,
    pub expected: Category,
    pub correct: bool,
    pub gloss: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    GoodJob,
    KeepPracticing,
}

impl Rating {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 80.0 {
            Rating::Excellent
        } else if accuracy >= 60.0 {
            Rating::GoodJob
        } else {
            Rating::KeepPracticing
        }
    }

    pub fn message(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, Rating::Excellent) => "Excellent! 🎉",
            (Language::English, Rating::GoodJob) => "Good job! 👍",
            (Language::English, Rating::KeepPracticing) => "Keep practicing! 💪",
            (Language::Thai, Rating::Excellent) => "ยอดเยี่ยม! 🎉",
            (Language::Thai, Rating::GoodJob) => "ทำได้ดี! 👍",
            (Language::Thai, Rating::KeepPracticing) => "ฝึกต่อไปนะ! 💪",
        }
    }
}

/// Correct and attempted answers for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

/// One round: a sentence, its quiz words and the answers given so far
#[derive(Debug, Clone)]
pub struct Session {
    pub language: Language,
    pub difficulty: Difficulty,
    pub sentence: String,
    words: Vec<WordEntry>,
    answers: Vec<Option<Category>>,
    correct: usize,
    total: usize,
}

impl Session {
    pub fn new(
        language: Language,
        difficulty: Difficulty,
        sentence: impl Into<String>,
        words: Vec<WordEntry>,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::NoWords);
        }

        Ok(Self {
            language,
            difficulty,
            sentence: sentence.into(),
            answers: vec![None; words.len()],
            words,
            correct: 0,
            total: 0,
        })
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn answer(&self, index: usize) -> Option<Category> {
        self.answers.get(index).copied().flatten()
    }

    /// Check `category` against the analyzer's category for word `index`.
    /// Each word can be answered once.
    pub fn submit_answer(
        &mut self,
        index: usize,
        category: Category,
    ) -> Result<AnswerFeedback, SessionError> {
        let word = self.words.get(index).ok_or(SessionError::OutOfRange {
            index,
            len: self.words.len(),
        })?;
        if self.answers[index].is_some() {
            return Err(SessionError::AlreadyAnswered(index));
        }

        let correct = word.category == category;
        let feedback = AnswerFeedback {
            index,
            word: word.text.clone(),
            chosen: category,
            expected: word.category,
            correct,
            gloss: word.gloss.clone(),
        };

        self.answers[index] = Some(category);
        self.total += 1;
        if correct {
            self.correct += 1;
        }
        debug!(index, word = %feedback.word, %category, correct, "answer submitted");

        Ok(feedback)
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of answered words that were right
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.total)
    }

    pub fn rating(&self) -> Rating {
        Rating::from_accuracy(self.accuracy())
    }

    pub fn next_unanswered(&self) -> Option<usize> {
        self.answers.iter().position(Option::is_none)
    }

    pub fn answered(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.next_unanswered().is_none()
    }

    /// Per expected category, how many answered words were right
    pub fn category_breakdown(&self) -> BTreeMap<Category, Tally> {
        let mut breakdown: BTreeMap<Category, Tally> = BTreeMap::new();
        for (word, answer) in self.words.iter().zip(&self.answers) {
            if let Some(answer) = answer {
                let tally = breakdown.entry(word.category).or_default();
                tally.total += 1;
                if *answer == word.category {
                    tally.correct += 1;
                }
            }
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn word(text: &str, category: Category, position: usize) -> WordEntry {
        WordEntry {
            text: text.to_string(),
            category,
            gloss: None,
            position,
        }
    }

    fn cat_on_mat() -> Session {
        Session::new(
            Language::English,
            Difficulty::Easy,
            "The cat sat on the mat.",
            vec![
                word("cat", Category::Noun, 1),
                word("sat", Category::Verb, 2),
                word("on", Category::Preposition, 3),
                word("mat", Category::Noun, 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_session_has_no_answers() {
        let session = cat_on_mat();
        assert_eq!(session.correct(), 0);
        assert_eq!(session.total(), 0);
        assert_eq!(session.accuracy(), 0.0);
        assert_eq!(session.next_unanswered(), Some(0));
        assert!(!session.is_complete());
    }

    #[test]
    fn empty_word_list_is_rejected() {
        assert_matches!(
            Session::new(Language::Thai, Difficulty::Easy, "ครับ", vec![]),
            Err(SessionError::NoWords)
        );
    }

    #[test]
    fn correct_answer_counts() {
        let mut session = cat_on_mat();
        let feedback = session.submit_answer(1, Category::Verb).unwrap();

        assert!(feedback.correct);
        assert_eq!(feedback.word, "sat");
        assert_eq!(feedback.expected, Category::Verb);
        assert_eq!(session.correct(), 1);
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn wrong_answer_reports_expected() {
        let mut session = cat_on_mat();
        let feedback = session.submit_answer(0, Category::Verb).unwrap();

        assert!(!feedback.correct);
        assert_eq!(feedback.chosen, Category::Verb);
        assert_eq!(feedback.expected, Category::Noun);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn out_of_range_leaves_counters() {
        let mut session = cat_on_mat();
        assert_eq!(
            session.submit_answer(9, Category::Noun),
            Err(SessionError::OutOfRange { index: 9, len: 4 })
        );
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn second_answer_is_rejected() {
        let mut session = cat_on_mat();
        session.submit_answer(0, Category::Noun).unwrap();
        assert_eq!(
            session.submit_answer(0, Category::Verb),
            Err(SessionError::AlreadyAnswered(0))
        );
        assert_eq!(session.correct(), 1);
        assert_eq!(session.total(), 1);
        assert_eq!(session.answer(0), Some(Category::Noun));
    }

    #[test]
    fn full_round_accuracy_and_rating() {
        let mut session = cat_on_mat();
        session.submit_answer(0, Category::Noun).unwrap();
        session.submit_answer(1, Category::Verb).unwrap();
        session.submit_answer(2, Category::Adverb).unwrap();
        session.submit_answer(3, Category::Noun).unwrap();

        assert!(session.is_complete());
        assert_eq!(session.next_unanswered(), None);
        assert_eq!(session.accuracy(), 75.0);
        assert_eq!(session.rating(), Rating::GoodJob);
    }

    #[test]
    fn answers_can_come_out_of_order() {
        let mut session = cat_on_mat();
        session.submit_answer(2, Category::Preposition).unwrap();
        assert_eq!(session.next_unanswered(), Some(0));
        session.submit_answer(0, Category::Noun).unwrap();
        assert_eq!(session.next_unanswered(), Some(1));
    }

    #[test]
    fn breakdown_groups_by_expected_category() {
        let mut session = cat_on_mat();
        session.submit_answer(0, Category::Noun).unwrap();
        session.submit_answer(3, Category::Adjective).unwrap();
        session.submit_answer(1, Category::Verb).unwrap();

        let breakdown = session.category_breakdown();
        assert_eq!(
            breakdown[&Category::Noun],
            Tally {
                correct: 1,
                total: 2
            }
        );
        assert_eq!(
            breakdown[&Category::Verb],
            Tally {
                correct: 1,
                total: 1
            }
        );
        assert!(!breakdown.contains_key(&Category::Preposition));
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(Rating::from_accuracy(100.0), Rating::Excellent);
        assert_eq!(Rating::from_accuracy(80.0), Rating::Excellent);
        assert_eq!(Rating::from_accuracy(79.9), Rating::GoodJob);
        assert_eq!(Rating::from_accuracy(60.0), Rating::GoodJob);
        assert_eq!(Rating::from_accuracy(59.0), Rating::KeepPracticing);
        assert_eq!(Rating::from_accuracy(0.0), Rating::KeepPracticing);
    }
}

use tracing::{debug, info, warn};

use crate::analysis::{Analyzers, Category};
use crate::history::RoundRecord;
use crate::language::{Difficulty, Language, Origin, SentenceProvider};
use crate::session::{AnswerFeedback, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    Feedback(AnswerFeedback),
    Results,
}

/// Everything the player can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleLanguage,
    NextDifficulty,
    ToggleRemote,
    CheckHealth,
    Start,
    SelectNext,
    SelectPrevious,
    Choose(Category),
    Confirm,
    Continue,
    PlayAgain,
    BackToSetup,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub language: Language,
    pub difficulty: Difficulty,
    pub use_remote: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            difficulty: Difficulty::Easy,
            use_remote: false,
        }
    }
}

/// The quiz state machine: Setup -> Playing -> Feedback -> ... -> Results
pub struct Game<P: SentenceProvider> {
    settings: GameSettings,
    phase: Phase,
    session: Option<Session>,
    origin: Option<Origin>,
    cursor: usize,
    notice: Option<String>,
    completed: Option<RoundRecord>,
    provider: P,
    analyzers: Analyzers,
}

impl<P: SentenceProvider> Game<P> {
    pub fn new(settings: GameSettings, mut provider: P, analyzers: Analyzers) -> Self {
        let use_remote = settings.use_remote && provider.remote_available();
        provider.set_remote(use_remote);

        Self {
            settings: GameSettings {
                use_remote,
                ..settings
            },
            phase: Phase::Setup,
            session: None,
            origin: None,
            cursor: 0,
            notice: None,
            completed: None,
            provider,
            analyzers,
        }
    }

    pub fn apply(&mut self, action: Action) -> Flow {
        if action == Action::Quit {
            return Flow::Quit;
        }
        if action == Action::BackToSetup {
            self.back_to_setup();
            return Flow::Continue;
        }

        match self.phase {
            Phase::Setup => match action {
                Action::ToggleLanguage => {
                    self.settings.language = self.settings.language.toggle();
                    self.notice = None;
                }
                Action::NextDifficulty => {
                    self.settings.difficulty = self.settings.difficulty.next();
                    self.notice = None;
                }
                Action::ToggleRemote => self.toggle_remote(),
                Action::CheckHealth => self.check_health(),
                Action::Start | Action::Confirm => self.start_round(),
                _ => {}
            },
            Phase::Playing => match action {
                Action::SelectNext => self.cursor = (self.cursor + 1) % Category::ALL.len(),
                Action::SelectPrevious => {
                    self.cursor = (self.cursor + Category::ALL.len() - 1) % Category::ALL.len()
                }
                Action::Choose(category) => {
                    self.cursor = category.index();
                    self.answer(category);
                }
                Action::Confirm => self.answer(self.selected_category()),
                _ => {}
            },
            Phase::Feedback(_) => {
                if matches!(action, Action::Continue | Action::Confirm) {
                    self.advance();
                }
            }
            Phase::Results => {
                if matches!(action, Action::PlayAgain | Action::Start | Action::Confirm) {
                    self.start_round();
                }
            }
        }

        Flow::Continue
    }

    /// Draw and analyze a sentence, then start playing it. A generated
    /// sentence with nothing to classify is swapped for a built-in one.
    pub fn start_round(&mut self) {
        let GameSettings {
            language,
            difficulty,
            ..
        } = self.settings;

        let mut draw = self.provider.sentence(language, difficulty);
        let mut words = self.analyzers.analyze(&draw.text, language);

        if words.is_empty() && draw.origin == Origin::Remote {
            warn!(
                sentence = %draw.text,
                "generated sentence has no words to classify, using built-in sentences"
            );
            draw = self.provider.local_sentence(language, difficulty);
            draw.warning = Some(
                "Generated sentence had no words to classify. Using built-in sentences."
                    .to_string(),
            );
            words = self.analyzers.analyze(&draw.text, language);
        }

        let notice = draw.warning.clone().or_else(|| {
            (draw.difficulty != difficulty)
                .then(|| format!("Difficulty level: {}", draw.difficulty))
        });

        match Session::new(language, draw.difficulty, draw.text.clone(), words) {
            Ok(session) => {
                info!(
                    %language,
                    difficulty = %draw.difficulty,
                    origin = %draw.origin,
                    words = session.words().len(),
                    sentence = %draw.text,
                    "round started"
                );
                self.session = Some(session);
                self.origin = Some(draw.origin);
                self.notice = notice;
                self.cursor = 0;
                self.completed = None;
                self.phase = Phase::Playing;
            }
            Err(err) => {
                warn!(%err, sentence = %draw.text, "cannot start round");
                self.session = None;
                self.origin = None;
                self.notice = Some(format!("Cannot start: {err}"));
                self.phase = Phase::Setup;
            }
        }
    }

    fn answer(&mut self, category: Category) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(index) = session.next_unanswered() else {
            return;
        };

        match session.submit_answer(index, category) {
            Ok(feedback) => self.phase = Phase::Feedback(feedback),
            Err(err) => warn!(%err, "answer rejected"),
        }
    }

    fn advance(&mut self) {
        let complete = self.session.as_ref().map_or(true, Session::is_complete);
        if complete {
            self.finish_round();
        } else {
            self.cursor = 0;
            self.phase = Phase::Playing;
        }
    }

    fn finish_round(&mut self) {
        if let Some(session) = &self.session {
            info!(
                correct = session.correct(),
                total = session.total(),
                accuracy = session.accuracy(),
                "round finished"
            );
            self.completed = Some(RoundRecord::from_session(session));
        }
        self.phase = Phase::Results;
    }

    pub fn back_to_setup(&mut self) {
        debug!(phase = ?self.phase, "back to setup");
        self.session = None;
        self.origin = None;
        self.cursor = 0;
        self.phase = Phase::Setup;
    }

    fn toggle_remote(&mut self) {
        if !self.provider.remote_available() {
            self.notice = Some("No API URL configured (use --api-url)".to_string());
            return;
        }
        self.settings.use_remote = !self.settings.use_remote;
        self.provider.set_remote(self.settings.use_remote);
        self.notice = None;
    }

    fn check_health(&mut self) {
        self.notice = Some(match self.provider.check_health() {
            Ok(report) if report.is_healthy() => {
                let model = match report.model_loaded {
                    Some(true) => ", model loaded",
                    Some(false) => ", model not loaded",
                    None => "",
                };
                format!("API is healthy{model}")
            }
            Ok(report) => format!("API status: {}", report.status),
            Err(err) => format!("API unavailable: {err}"),
        });
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.cursor % Category::ALL.len()]
    }

    /// Index of the word being asked about
    pub fn current_word(&self) -> Option<usize> {
        match &self.phase {
            Phase::Playing => self.session.as_ref().and_then(Session::next_unanswered),
            Phase::Feedback(feedback) => Some(feedback.index),
            _ => None,
        }
    }

    pub fn remote_available(&self) -> bool {
        self.provider.remote_available()
    }

    /// The round that just finished, handed out once for recording
    pub fn take_completed_round(&mut self) -> Option<RoundRecord> {
        self.completed.take()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

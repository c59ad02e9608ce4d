use ratatui::Frame;

use wordclass::game::Phase;

use crate::App;

/// A UI Screen boundary: responsible for rendering and the key legend it shows
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
    fn help(&self) -> &'static str;
}

/// Setup screen - settings and the category reference table
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn help(&self) -> &'static str {
        "(s)tart / (l)anguage / (d)ifficulty / (r)emote / (h)ealth / (q)uit"
    }
}

/// Quiz screen - the sentence, the current word and the category choices
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn help(&self) -> &'static str {
        "(1-8) answer / (↑↓) select / (enter) confirm / (esc) setup"
    }
}

/// Feedback screen - verdict on the last answer
pub struct FeedbackScreen;

impl Screen for FeedbackScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn help(&self) -> &'static str {
        "(enter) continue / (esc) setup"
    }
}

/// Results screen - score, rating and per-word review
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }

    fn help(&self) -> &'static str {
        "(n)ew sentence / (b)ack to setup / (q)uit"
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: &Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Setup => Box::new(SetupScreen),
        Phase::Playing => Box::new(PlayingScreen),
        Phase::Feedback(_) => Box::new(FeedbackScreen),
        Phase::Results => Box::new(ResultsScreen),
    }
}

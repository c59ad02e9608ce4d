mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info, warn};

use wordclass::{
    analysis::Analyzers,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    error::StartupError,
    game::{Action, Flow, Game, Phase},
    history::{HistoryDb, HistorySummary, RoundRecord},
    language::{Difficulty, Language, RemoteClient, SentenceBanks, SentenceSource},
    logging,
    runtime::{action_for_key, CrosstermEventSource, FixedTicker, QuizEvent, Runner},
};

const TICK_RATE_MS: u64 = 100;
const RECENT_ROUNDS: usize = 3;

/// bilingual thai/english parts-of-speech quiz in the terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Label every word of a Thai or English sentence with its part of speech. \
                  Sentences come from built-in banks or from a sentence generation service, \
                  and every answer is checked against a lexicon-driven tagger."
)]
pub struct Cli {
    /// language to practise
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// sentence length tier
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// base url of a sentence generation service; enables generated sentences
    #[clap(long)]
    api_url: Option<String>,

    /// model name to ask the sentence generation service for
    #[clap(long)]
    model: Option<String>,

    /// seconds to wait for a generated sentence before falling back to built-in ones
    #[clap(long)]
    timeout_secs: Option<u64>,

    /// directory holding english.json and thai.json lexicons to use instead of the built-in ones
    #[clap(long)]
    lexicon_dir: Option<PathBuf>,

    /// custom sentence to use for every round
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// do not record finished rounds in the history database
    #[clap(long)]
    no_history: bool,

    /// delete every recorded round and exit
    #[clap(long)]
    clear_history: bool,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// log filter such as "debug" or "wordclass=trace" (defaults to RUST_LOG, then info)
    #[clap(long)]
    log_level: Option<String>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags win over whatever the config file says
    fn apply_to(&self, config: &mut Config) {
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(url) = self.api_url.as_deref().map(str::trim) {
            if url.is_empty() {
                config.api_url = None;
                config.use_remote = false;
            } else {
                config.api_url = Some(url.to_string());
                config.use_remote = true;
            }
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(dir) = &self.lexicon_dir {
            config.lexicon_dir = Some(dir.clone());
        }
        if self.no_history {
            config.record_history = false;
        }
    }
}

pub struct App {
    pub game: Game<SentenceSource>,
    pub config: Config,
    pub history_summary: Option<HistorySummary>,
    pub recent_rounds: Vec<RoundRecord>,
    /// Shown while a blocking call is in flight
    pub busy: Option<&'static str>,
    store: FileConfigStore,
    history: Option<HistoryDb>,
}

impl App {
    pub fn new(
        cli: &Cli,
        config: Config,
        store: FileConfigStore,
        history: Option<HistoryDb>,
    ) -> Result<Self, StartupError> {
        let analyzers = Analyzers::load(config.lexicon_dir.as_deref())?;
        let mut source = SentenceSource::new(SentenceBanks::embedded()?);

        if let Some(url) = &config.api_url {
            let client = RemoteClient::new(
                url,
                config.model.clone(),
                config.request_timeout_secs,
                config.health_timeout_secs,
            )?;
            source = source.with_remote(client);
        }
        if let Some(prompt) = &cli.prompt {
            source = source.with_custom(prompt.as_str());
        }

        let game = Game::new(config.settings(), source, analyzers);
        info!(
            language = %config.language,
            difficulty = %config.difficulty,
            remote = game.settings().use_remote,
            "quiz ready"
        );

        Ok(Self {
            game,
            config,
            history_summary: None,
            recent_rounds: Vec::new(),
            busy: None,
            store,
            history,
        })
    }

    /// Message to show before `action` blocks on the network
    pub fn busy_message(&self, action: Action) -> Option<&'static str> {
        let starts_round = match self.game.phase() {
            Phase::Setup => matches!(action, Action::Start),
            Phase::Results => matches!(action, Action::PlayAgain),
            _ => false,
        };

        if starts_round && self.game.settings().use_remote {
            Some("Generating sentence...")
        } else if action == Action::CheckHealth && self.game.phase() == &Phase::Setup {
            Some("Checking API health...")
        } else {
            None
        }
    }

    /// Apply an action, then take care of what the game leaves to the app:
    /// saving settings when a round starts and recording finished rounds.
    pub fn handle(&mut self, action: Action) -> Flow {
        let was_setup = self.game.phase() == &Phase::Setup;
        let flow = self.game.apply(action);

        if was_setup && self.game.phase() == &Phase::Playing {
            self.config.remember(self.game.settings());
            if let Err(err) = self.store.save(&self.config) {
                warn!(%err, "failed to save config");
            }
        }

        if let Some(round) = self.game.take_completed_round() {
            if let Some(history) = &self.history {
                if let Err(err) = history.record_round(&round) {
                    warn!(%err, "failed to record round");
                }
                self.history_summary = history
                    .summary(round.language, round.difficulty)
                    .unwrap_or_else(|err| {
                        warn!(%err, "failed to read history");
                        None
                    });
                self.recent_rounds = history.recent(RECENT_ROUNDS).unwrap_or_else(|err| {
                    warn!(%err, "failed to read history");
                    Vec::new()
                });
            }
        }

        flow
    }
}

fn open_history(config: &Config) -> Option<HistoryDb> {
    if !config.record_history {
        return None;
    }
    match HistoryDb::new() {
        Ok(db) => Some(db),
        Err(err) => {
            warn!(%err, "history disabled");
            None
        }
    }
}

fn clear_history(history: &HistoryDb) -> Result<(), Box<dyn Error>> {
    history.clear_all()?;
    info!("history cleared");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init(cli.log_level.as_deref(), &path) {
            eprintln!("logging disabled: {err}");
        }
    }

    if cli.clear_history {
        clear_history(&HistoryDb::new()?)?;
        println!("Round history cleared.");
        return Ok(());
    }

    let store = cli.config_store();
    let mut config = store.load();
    cli.apply_to(&mut config);

    let history = open_history(&config);
    let mut app = match App::new(&cli, config, store, history) {
        Ok(app) => app,
        Err(err) => {
            error!(%err, "startup failed");
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, err.to_string()).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {}
            QuizEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            QuizEvent::Key(key) => {
                let Some(action) = action_for_key(app.game.phase(), key) else {
                    continue;
                };

                if let Some(message) = app.busy_message(action) {
                    app.busy = Some(message);
                    terminal.draw(|f| ui(app, f))?;
                }
                let flow = app.handle(action);
                app.busy = None;

                if flow == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(app.game.phase()).render(app, f);
}

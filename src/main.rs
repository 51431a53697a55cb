mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wordrace::{
    app_dirs::AppDirs,
    command::Command,
    config::{ConfigStore, FileConfigStore, Settings, MAX_ANSWERS},
    import,
    lexicon::{LexiconStore, CORPUS_FILE},
    runtime::{CrosstermEventSource, DrillEvent, DrillEventSource},
    AnswerOutcome, PolicyKind, Question, QuizSession,
};

/// The answer-count menu never goes below two choices.
const MIN_MENU_ANSWERS: usize = 2;

/// terminal vocabulary drill that keeps asking the words you keep missing
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A vocabulary drill: pick the right translation among several candidates. Words you miss come back first, words you know step aside."
)]
pub struct Cli {
    /// directory holding words.txt and its score files
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// number of answers to offer for each word (1-10)
    #[clap(short = 'a', long, value_parser = clap::value_parser!(u8).range(1..=10))]
    answers: Option<u8>,

    /// how to pick the next word
    #[clap(short = 'p', long, value_enum)]
    policy: Option<PolicyKind>,

    /// where to write the log
    #[clap(long)]
    log_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Move words from a dictionary file into the drill word list
    AddWords {
        /// tab-separated dictionary to take words from
        #[clap(long)]
        dictionary: PathBuf,

        /// how many words to move
        #[clap(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// pick words at random instead of from the top
        #[clap(long)]
        random: bool,
    },
}

impl Cli {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(AppDirs::data_dir)
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.data_dir {
            Some(dir) => FileConfigStore::with_path(dir.join("settings.json")),
            None => FileConfigStore::new(),
        }
    }

    /// Stored settings with command-line overrides applied.
    fn settings(&self, stored: Settings) -> Settings {
        Settings {
            policy: self.policy.unwrap_or(stored.policy),
            answer_count: self
                .answers
                .map(usize::from)
                .unwrap_or(stored.answer_count),
            ..stored
        }
        .clamped()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Asking(Question),
    Revealed {
        question: Question,
        chosen: usize,
        outcome: AnswerOutcome,
    },
    /// No question could be built; the reason is shown instead.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug)]
pub struct App {
    pub session: QuizSession,
    pub settings: Settings,
    pub view: View,
    pub status: Option<Status>,
}

impl App {
    pub fn new(mut session: QuizSession, settings: Settings) -> Self {
        session.face(settings.direction);
        session.set_policy(settings.policy);
        let mut app = Self {
            session,
            settings,
            view: View::Unavailable(String::new()),
            status: None,
        };
        app.next_question();
        app
    }

    fn next_question(&mut self) {
        self.view = match self.session.question(self.settings.answer_count) {
            Ok(question) => View::Asking(question),
            Err(e) => {
                warn!("cannot build a question: {e}");
                View::Unavailable(e.to_string())
            }
        };
    }

    fn notify(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(Status {
            text: text.into(),
            is_error,
        });
    }

    /// Applies one command. Returns false when the app should exit.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Next => {
                if !matches!(self.view, View::Asking(_)) {
                    self.status = None;
                    self.next_question();
                }
            }
            Command::Answer(slot) => self.answer(slot),
            Command::SwapDirection => {
                self.session.swap_direction();
                self.settings.direction = self.session.deck().direction();
                self.next_question();
            }
            Command::MarkForMemorization => match self.session.mark_for_memorization() {
                Ok(_) => {
                    self.notify("Marked for memorization", false);
                    self.next_question();
                }
                Err(e) => self.notify(e.to_string(), true),
            },
            Command::MoreAnswers => self.change_answer_count(1),
            Command::FewerAnswers => self.change_answer_count(-1),
            Command::UsePolicy(kind) => {
                self.session.set_policy(kind);
                self.settings.policy = kind;
                self.notify(format!("Word order: {kind}"), false);
            }
            Command::ToggleStats => self.settings.show_stats = !self.settings.show_stats,
        }
        true
    }

    fn answer(&mut self, slot: usize) {
        let question = match &self.view {
            View::Asking(question) if slot < question.answers.len() => question.clone(),
            View::Asking(_) => return,
            // Any answer key moves on once the result is shown.
            _ => {
                self.status = None;
                self.next_question();
                return;
            }
        };

        match self.session.submit_answer(slot) {
            Ok(outcome) => {
                self.view = View::Revealed {
                    question,
                    chosen: slot,
                    outcome,
                }
            }
            Err(e) => self.notify(e.to_string(), true),
        }
    }

    fn change_answer_count(&mut self, delta: isize) {
        let count = self
            .settings
            .answer_count
            .saturating_add_signed(delta)
            .clamp(MIN_MENU_ANSWERS, MAX_ANSWERS);
        if count != self.settings.answer_count {
            self.settings.answer_count = count;
            self.next_question();
        }
    }

    pub fn into_parts(self) -> (QuizSession, Settings) {
        (self.session, self.settings)
    }
}

fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordrace=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_file.clone().unwrap_or_else(AppDirs::log_path));

    if let Some(Commands::AddWords {
        dictionary,
        count,
        random,
    }) = &cli.command
    {
        let corpus = cli.data_dir().join(CORPUS_FILE);
        if let Some(parent) = corpus.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut rng = StdRng::from_entropy();
        let summary = import::add_words(dictionary, &corpus, *count, random.then_some(&mut rng))?;
        println!(
            "moved {} words to {} ({} words, {} left in dictionary)",
            summary.moved,
            corpus.display(),
            summary.corpus_size,
            summary.dictionary_left
        );
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = LexiconStore::in_dir(cli.data_dir());
    let config_store = cli.config_store();
    let settings = cli.settings(config_store.load());

    let lexicon = store.load()?;
    let warnings: Vec<String> = lexicon.warnings.iter().map(ToString::to_string).collect();
    let session = QuizSession::new(lexicon.into_deck(), settings.policy);
    let mut app = App::new(session, settings);
    if !warnings.is_empty() {
        app.notify(warnings.join(" | "), true);
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = start_tui(&mut terminal, &CrosstermEventSource, &mut app);
    let restored = restore_terminal(&mut terminal);

    shut_down(app, &store, &config_store, restored)?;
    run_result
}

/// Saves scores and settings, then reports a failed terminal teardown.
fn shut_down(
    app: App,
    store: &LexiconStore,
    config_store: &impl ConfigStore,
    restored: io::Result<()>,
) -> io::Result<()> {
    let (session, settings) = app.into_parts();
    if let Err(e) = store.save_deck(session.into_deck()) {
        error!("failed to save scores: {e}");
        eprintln!("failed to save scores: {e}");
    }
    if let Err(e) = config_store.save(&settings) {
        error!("failed to save settings: {e}");
        eprintln!("failed to save settings: {e}");
    }
    info!("session ended");
    restored
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn start_tui<B: Backend, E: DrillEventSource>(
    terminal: &mut Terminal<B>,
    events: &E,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;
    while let Some(event) = events.next_event() {
        if let DrillEvent::Key(key) = event {
            if let Some(command) = Command::from_key(key) {
                if !app.apply(command) {
                    break;
                }
            }
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}

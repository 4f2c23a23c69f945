use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use quizlock::{
    answer_log::AnswerLog,
    app::QuizApp,
    app_dirs::AppDirs,
    kiosk::{KioskLock, TerminalLock},
    problems::{ProblemSet, DEFAULT_PROBLEM_DIR},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, QuizEventSource, Runner, Ticker},
    session::QuizSession,
    settings::{FileSettingsStore, DEFAULT_CONFIG_FILE},
};

const TICK_RATE_MS: u64 = 1000;

/// fullscreen image-based quiz that locks the learner into typing answers
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// settings file, created with defaults when missing
    #[clap(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// folder holding the problem images
    #[clap(short = 'p', long, default_value = DEFAULT_PROBLEM_DIR)]
    problems: PathBuf,

    /// where accepted answers are appended (default: per-user state dir)
    #[clap(short = 'a', long)]
    answers: Option<PathBuf>,

    /// do not record answers
    #[clap(long, conflicts_with = "answers")]
    no_answers: bool,

    /// let Esc quit the quiz
    #[clap(long)]
    dev: bool,
}

impl Cli {
    fn answer_log(&self) -> Option<AnswerLog> {
        if self.no_answers {
            return None;
        }
        self.answers
            .clone()
            .or_else(AppDirs::answer_log_path)
            .map(AnswerLog::with_path)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let settings = match FileSettingsStore::with_path(&cli.config).load_or_create() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let problems = match ProblemSet::load(&cli.problems) {
        Ok(problems) => problems,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "starting quiz with {} questions, {:?}",
        problems.len(),
        settings
    );

    let mut lock = TerminalLock::new(io::stdout());
    lock.engage()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let session = QuizSession::start(settings, problems, Instant::now());
    let mut app = QuizApp::new(session, cli.answer_log(), cli.dev);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = run_quiz(&mut terminal, &mut app, &runner);

    lock.release()?;
    terminal.show_cursor()?;
    result
}

fn run_quiz<B: Backend, E: QuizEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut QuizApp,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            QuizEvent::Tick => app.on_tick(Instant::now()),
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => app.on_key(key, Instant::now()),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

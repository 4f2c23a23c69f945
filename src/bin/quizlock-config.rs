use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{event, event::Event, event::KeyEventKind, tty::IsTty};
use log::error;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use quizlock::{
    app::{editor::import_failure_message, editor::parse_count, EditorApp},
    importer::ProblemImporter,
    kiosk::{KioskLock, TerminalLock},
    problems::DEFAULT_PROBLEM_DIR,
    settings::{FileSettingsStore, SettingsStore, DEFAULT_CONFIG_FILE},
    QuizError,
};

/// edit quiz settings and import problem images
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Edit the quiz settings and replace the problem images. Without any action flags an interactive form opens; with --import, --min-words or --time-limit the changes are applied directly."
)]
struct Cli {
    /// settings file written by the quiz on its first run
    #[clap(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// folder the quiz reads its problem images from
    #[clap(short = 'p', long, default_value = DEFAULT_PROBLEM_DIR)]
    problems: PathBuf,

    /// replace the problem images with the .png files of this folder
    #[clap(short = 'i', long)]
    import: Option<PathBuf>,

    /// minimum words before an answer can be submitted early
    #[clap(short = 'w', long, value_parser = parse_digits)]
    min_words: Option<u64>,

    /// seconds per question
    #[clap(short = 't', long, value_parser = parse_digits)]
    time_limit: Option<u64>,
}

impl Cli {
    fn is_headless(&self) -> bool {
        self.import.is_some() || self.min_words.is_some() || self.time_limit.is_some()
    }
}

fn parse_digits(value: &str) -> Result<u64, String> {
    parse_count(value).ok_or_else(|| "must be numeric".to_string())
}

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{message}");
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let store = FileSettingsStore::with_path(&cli.config);
    let importer = ProblemImporter::new(&cli.problems);

    if cli.is_headless() {
        run_headless(&cli, &store, &importer);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = match EditorApp::new(store, importer) {
        Ok(app) => app,
        Err(e @ QuizError::ConfigMissing { .. }) => {
            fail(format!("{e}. Run the quiz once to create it. Exiting..."))
        }
        Err(e) => fail(e),
    };

    let mut lock = TerminalLock::new(io::stdout());
    lock.engage()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run_editor(&mut terminal, &mut app);

    lock.release()?;
    terminal.show_cursor()?;
    result
}

fn run_headless(cli: &Cli, store: &FileSettingsStore, importer: &ProblemImporter) {
    if cli.min_words.is_some() || cli.time_limit.is_some() {
        let mut settings = store.load().unwrap_or_else(|e| fail(e));
        if let Some(min_words) = cli.min_words {
            settings.min_words = usize::try_from(min_words).unwrap_or_else(|e| fail(e));
        }
        if let Some(time_limit) = cli.time_limit {
            settings.time_limit = time_limit;
        }
        store.save(&settings).unwrap_or_else(|e| fail(e));
        println!("Settings updated successfully!");
    } else if let Err(e) = store.load() {
        // nothing to edit means nothing to import for either
        fail(e);
    }

    if let Some(source) = &cli.import {
        match importer.import_from(source) {
            Ok(result) => println!(
                "Copied {} .png files to '{}'.",
                result.copied_count,
                importer.problem_dir().display()
            ),
            Err(e) => fail(import_failure_message(&e, importer.problem_dir())),
        }
    }
}

fn run_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut EditorApp,
) -> Result<(), Box<dyn Error>> {
    while !app.should_quit {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key);
            }
        }
    }
    Ok(())
}

use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    process,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use codlec::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    dictionary::Dictionary,
    display::TerminalDisplay,
    logging::{self, LogConfig},
    results::JsonlResultStore,
    runtime::{Console, CrosstermEventSource, FixedTicker, Runner, SystemClock},
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

/// guess the five-letter word in the terminal, with hints and saved results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal word-guessing game: pick a difficulty, guess the five-letter word from colored feedback, ask for rate-limited hints, and keep a history of your wins."
)]
pub struct Cli {
    /// word list for guesses and Easy/Medium/Demo targets (one word per line)
    #[clap(long, value_name = "PATH")]
    words: Option<PathBuf>,

    /// extra word list used for Hard targets
    #[clap(long, value_name = "PATH")]
    hard_words: Option<PathBuf>,

    /// file where won games are appended
    #[clap(long, value_name = "PATH")]
    results: Option<PathBuf>,

    /// write logs here instead of the state directory
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// store the given paths in the config file for next time
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            word_list: self.words.clone(),
            hard_word_list: self.hard_words.clone(),
            results_path: self.results.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(&LogConfig::new(cli.log_file.clone()));

    let store = FileConfigStore::new();
    let config = store.load().merged_with(&cli.to_config());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let dictionary = match Dictionary::load(
        config.word_list.as_deref(),
        config.hard_word_list.as_deref(),
    ) {
        Ok(dictionary) => dictionary,
        Err(err) => {
            error!(%err, "cannot start without word lists");
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let results_path = config.results_path.unwrap_or_else(AppDirs::results_path);
    info!(results = %results_path.display(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let outcome = run(&dictionary, JsonlResultStore::with_path(results_path));

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)?;

    if let Err(err) = &outcome {
        error!(%err, "terminal error");
    }
    outcome.map_err(Into::into)
}

fn run(dictionary: &Dictionary, store: JsonlResultStore) -> io::Result<()> {
    let display = TerminalDisplay::new(CrosstermBackend::new(io::stdout()))?;
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let mut console = Console::new(runner, display, SystemClock);

    let mut app = App::new(dictionary, store, rand::thread_rng());
    app.run(&mut console)
}

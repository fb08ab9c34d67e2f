mod ui;

use std::{io, time::Duration};

use anyhow::{bail, Context};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use scramble::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    logging::setup_logging,
    round::Round,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    word_list::{parse_custom, WordList},
};
use tracing::{info, warn};

/// unscramble shuffled words, one letter at a time
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A word unscrambling quiz. Rebuild each shuffled word letter by letter; too many mistakes reveal the answer. Unset options fall back to the saved config."
)]
pub struct Cli {
    /// number of words in a game
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// mistakes allowed per word before the answer is revealed
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..))]
    max_errors: Option<u32>,

    /// word list to draw words from
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<SupportedWordList>,

    /// comma separated words to play, in order, instead of a random selection
    #[clap(long)]
    words: Option<String>,

    /// pause in milliseconds before moving on to the next word
    #[clap(short = 'd', long)]
    delay_ms: Option<u64>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum SupportedWordList {
    English,
    Animals,
}

impl SupportedWordList {
    fn file_stem(&self) -> String {
        self.to_string().to_lowercase()
    }

    fn from_config(name: &str) -> Self {
        <Self as ValueEnum>::from_str(name, true).unwrap_or_else(|_| {
            warn!(name, "unknown word list in config, using english");
            SupportedWordList::English
        })
    }
}

/// Settings of a game after merging CLI flags over the saved config
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub number_of_words: usize,
    pub max_errors: u32,
    pub word_list: SupportedWordList,
    pub custom_words: Option<Vec<String>>,
    pub next_word_delay: Duration,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let number_of_words = cli.number_of_words.unwrap_or(config.number_of_words);
        if number_of_words == 0 {
            bail!("number of words must be at least 1");
        }

        let custom_words = match cli.words.as_deref().map(parse_custom) {
            Some(words) if words.is_empty() => bail!("--words contains no words"),
            other => other,
        };

        Ok(Self {
            number_of_words,
            max_errors: cli.max_errors.unwrap_or(config.max_errors),
            word_list: cli
                .word_list
                .unwrap_or_else(|| SupportedWordList::from_config(&config.word_list)),
            custom_words,
            next_word_delay: Duration::from_millis(
                cli.delay_ms.unwrap_or(config.next_word_delay_ms),
            ),
        })
    }

    fn pick_words(&self) -> anyhow::Result<Vec<String>> {
        if let Some(words) = &self.custom_words {
            return Ok(words.clone());
        }

        let list = WordList::load(&self.word_list.file_stem())?;
        Ok(list.pick(self.number_of_words, &mut rand::thread_rng()))
    }

    fn build_round(&self, words: Vec<String>) -> anyhow::Result<Round> {
        let game = Game::new(words, self.max_errors)?;
        Ok(Round::new(game, self.next_word_delay))
    }
}

impl From<&Settings> for Config {
    fn from(s: &Settings) -> Self {
        Self {
            number_of_words: s.number_of_words,
            max_errors: s.max_errors,
            word_list: s.word_list.file_stem(),
            next_word_delay_ms: s.next_word_delay.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Playing,
    Summary,
}

#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub round: Round,
    pub state: AppState,
    /// Tile under the keyboard cursor
    pub cursor: usize,
}

impl App {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let round = settings.build_round(settings.pick_words()?)?;
        Ok(Self {
            settings,
            round,
            state: AppState::Playing,
            cursor: 0,
        })
    }

    /// Start over, either with the same words (shuffled anew) or a fresh pick
    pub fn restart(&mut self, same_words: bool) -> anyhow::Result<()> {
        let words = if same_words {
            self.round.words()
        } else {
            self.settings.pick_words()?
        };

        info!(same_words, "restarting");
        self.round = self.settings.build_round(words)?;
        self.state = AppState::Playing;
        self.cursor = 0;
        Ok(())
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.round.tiles().len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.round.on_tick(elapsed);
        self.sync_state();
    }

    fn sync_state(&mut self) {
        if self.round.is_finished() && self.state == AppState::Playing {
            let stats = self.round.game().stats();
            info!(
                correct = stats.correct_words_number,
                errors = stats.total_errors_number,
                most_errors = %stats.most_errors_word,
                "showing summary"
            );
            self.state = AppState::Summary;
        }
        if self.cursor >= self.round.tiles().len() {
            self.cursor = 0;
        }
    }
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> anyhow::Result<Flow> {
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        return Ok(Flow::Quit);
    }

    match app.state {
        AppState::Playing => match key.code {
            KeyCode::Left => app.move_cursor(false),
            KeyCode::Right => app.move_cursor(true),
            KeyCode::Enter => {
                app.round.select_tile(app.cursor);
            }
            KeyCode::Char(c) => {
                app.round.type_letter(c);
            }
            _ => {}
        },
        AppState::Summary => match key.code {
            KeyCode::Char('r') => app.restart(true)?,
            KeyCode::Char('n') => app.restart(false)?,
            _ => {}
        },
    }

    app.sync_state();
    Ok(Flow::Continue)
}

fn run<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(runner.tick_interval()),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if handle_key(app, key)? == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !io::stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = setup_logging(&AppDirs::log_dir()).context("unable to set up logging")?;

    let store = FileConfigStore::new();
    let settings = Settings::resolve(&cli, &store.load())?;
    if cli.save_config {
        store
            .save(&Config::from(&settings))
            .with_context(|| format!("unable to save {}", store.path().display()))?;
        info!(path = %store.path().display(), "config saved");
    }

    let mut app = App::new(settings)?;
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

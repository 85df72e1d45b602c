mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keystreak::{
    app_dirs::AppDirs,
    arcade::{Arcade, ArcadePhase},
    config::{Config, ConfigStore, FileConfigStore},
    highscore::FileHighScoreStore,
    language::{
        load_arcade_levels, Difficulty, FixedTexts, TextProvider, WordPool, WordPoolProvider,
    },
    practice::Practice,
    runtime::{CrosstermEventSource, Runner, TrainerEvent, TrainerEventSource},
};
use log::{debug, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    time::Instant,
};

/// typing speed trainer with a round-robin practice loop and an arcade mode
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed trainer: type generated texts round-robin, track words per minute, accuracy and your streak, or race the clock in the levelled arcade game."
)]
pub struct Cli {
    /// difficulty tier of the generated texts (overrides the config file)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// number of texts per round (overrides the config file)
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// custom prompt to practise; repeat for several
    #[clap(short = 'p', long = "prompt")]
    prompts: Vec<String>,

    /// play the timed arcade game instead
    #[clap(long)]
    arcade: bool,
}

pub enum AppMode {
    Practice(Practice),
    Arcade(Arcade),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub mode: AppMode,
}

impl App {
    pub fn new(cli: &Cli, config: &Config) -> keystreak::error::Result<Self> {
        if cli.arcade {
            let arcade = Arcade::new(load_arcade_levels()?, Box::new(FileHighScoreStore::new()));
            return Ok(Self::with_mode(AppMode::Arcade(arcade)));
        }

        let mut settings = config.practice_settings();
        if let Some(difficulty) = cli.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(count) = cli.count.filter(|n| *n > 0) {
            settings.challenge_count = count;
        }

        let provider: Box<dyn TextProvider> = if cli.prompts.is_empty() {
            Box::new(WordPoolProvider::new(&WordPool::load()?))
        } else {
            Box::new(FixedTexts::new(cli.prompts.iter().cloned()))
        };

        Ok(Self::with_mode(AppMode::Practice(Practice::new(
            provider, settings,
        ))))
    }

    pub fn with_mode(mode: AppMode) -> Self {
        Self { mode }
    }

    pub fn next_tick_deadline(&self) -> Option<Instant> {
        match &self.mode {
            AppMode::Practice(practice) => practice.next_tick_deadline(),
            AppMode::Arcade(arcade) => arcade.next_tick_deadline(),
        }
    }

    /// Returns whether anything visible changed
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match &mut self.mode {
            AppMode::Practice(practice) => practice.tick(now),
            AppMode::Arcade(arcade) => arcade.tick(now),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if ctrl_c || key.code == KeyCode::Esc {
            return Flow::Quit;
        }

        match &mut self.mode {
            AppMode::Practice(practice) => match key.code {
                KeyCode::Char(c) => type_practice(practice, &c.to_string(), now),
                KeyCode::Backspace => {
                    let mut value = practice.typed_input().to_string();
                    if value.pop().is_some() {
                        practice.input_changed(&value, now);
                    }
                }
                KeyCode::Tab => practice.restart(),
                KeyCode::Left => practice.change_difficulty(practice.difficulty().previous()),
                KeyCode::Right => practice.change_difficulty(practice.difficulty().next()),
                _ => {}
            },
            AppMode::Arcade(arcade) => match key.code {
                KeyCode::Enter => match arcade.phase() {
                    ArcadePhase::Ready => arcade.start(now),
                    ArcadePhase::Over => {
                        arcade.restart();
                        arcade.start(now);
                    }
                    ArcadePhase::Playing(_) => {}
                },
                KeyCode::Char(c) => {
                    let value = format!("{}{c}", arcade.input());
                    arcade.input_changed(&value);
                }
                KeyCode::Backspace => {
                    let mut value = arcade.input().to_string();
                    value.pop();
                    arcade.input_changed(&value);
                }
                _ => {}
            },
        }
        Flow::Continue
    }

    pub fn on_paste(&mut self, text: &str, now: Instant) {
        match &mut self.mode {
            AppMode::Practice(practice) => type_practice(practice, text, now),
            AppMode::Arcade(arcade) => {
                let value = format!("{}{}", arcade.input(), text.trim_end_matches(['\r', '\n']));
                arcade.input_changed(&value);
            }
        }
    }
}

/// Append to the practice input without running past the reference text
fn type_practice(practice: &mut Practice, text: &str, now: Instant) {
    let typed = practice.typed_input();
    let room = practice
        .current_text()
        .chars()
        .count()
        .saturating_sub(typed.chars().count());
    let addition: String = text
        .chars()
        .filter(|c| !c.is_control())
        .take(room)
        .collect();
    if addition.is_empty() {
        return;
    }

    let value = format!("{typed}{addition}");
    if let Some(result) = practice.input_changed(&value, now) {
        debug!(
            "attempt #{} took {:.1}s",
            result.sequence_number, result.elapsed_secs
        );
    }
}

fn init_logging() {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    // logging is optional; an unwritable log file just means no log
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let config = FileConfigStore::new().load();
    let mut app = App::new(&cli, &config)?;
    info!("starting in {} mode", if cli.arcade { "arcade" } else { "practice" });

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: TrainerEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        // only a live attempt or round schedules ticks; otherwise wait for input
        let redraw = match runner.step(app.next_tick_deadline()) {
            TrainerEvent::Tick => app.on_tick(Instant::now()),
            TrainerEvent::Resize => true,
            TrainerEvent::Paste(text) => {
                app.on_paste(&text, Instant::now());
                true
            }
            TrainerEvent::Key(key) => {
                if app.on_key(key, Instant::now()) == Flow::Quit {
                    break;
                }
                true
            }
            TrainerEvent::Closed => break,
        };

        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

use std::{
    io::{self, stdin},
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;

use cosmodoro::{
    app::{App, Flow, SubMode},
    app_dirs::AppDirs,
    chat::{Category, ChatBot},
    config::{Config, ConfigStore, FileConfigStore},
    logging, modes,
    notify::{DesktopNotifier, Notifier, SilentNotifier},
    prompt::{self, FAREWELL},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    stats::{StatsRecorder, StatsStore},
    terminal::{self, TerminalSession},
    ui,
};

/// How long the color picker's confirmation stays up.
const PICKER_LINGER: Duration = Duration::from_secs(1);

/// cosmic distance-goal focus timer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A focus timer that turns minutes into meters: set a distance goal, watch the stars drift by, and keep a per-user history of finished and abandoned sessions."
)]
pub struct Cli {
    /// session history file (defaults to ~/.pomodoro_stats.json)
    #[clap(long)]
    stats_file: Option<PathBuf>,

    /// settings file to read and to save the chosen background into
    #[clap(long)]
    config: Option<PathBuf>,

    /// do not show a desktop notification when a goal is reached
    #[clap(long)]
    no_notify: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = AppDirs::log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("logging disabled ({}): {e}", log_path.display());
    }
    terminal::install_panic_hook();

    let config_store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = config_store.load();
    let stats_path = cli.stats_file.clone().unwrap_or_else(|| config.stats_path());
    log::info!("stats file: {}", stats_path.display());
    let store = Arc::new(Mutex::new(StatsStore::open(&stats_path)));

    let mut out = io::stdout();
    prompt::clear_screen(&mut out)?;
    prompt::welcome_banner(&mut out)?;
    let username = prompt::ask_name(&mut stdin().lock(), &mut out)?;
    let mut bot = ChatBot::from_entropy();
    prompt::greet(&mut out, &username, bot.quote_from(Category::Iro))?;

    let notifier: Box<dyn Notifier> = if config.notifications && !cli.no_notify {
        Box::new(DesktopNotifier)
    } else {
        Box::new(SilentNotifier)
    };
    let recorder = StatsRecorder::new(store.clone(), username.as_str());
    let mut app = App::new(username, &config, Arc::new(recorder), notifier, bot);

    #[cfg(unix)]
    let _interrupts = cosmodoro::interrupt::InterruptGuard::install(app.abandon_handle())
        .context("installing signal handlers")?;

    loop {
        let Some(goal) = prompt::ask_goal(&mut stdin().lock(), &mut out, app.rate())? else {
            break;
        };
        app.start_goal(goal)?;

        match start_tui(&mut app, &store, &config_store, &mut config)? {
            Flow::NewTimer => prompt::clear_screen(&mut out)?,
            _ => break,
        }
    }

    println!("\n{FAREWELL}");
    Ok(())
}

/// Run the timer view until the user leaves it. Returns the leaving flow.
fn start_tui(
    app: &mut App,
    store: &Mutex<StatsStore>,
    config_store: &impl ConfigStore,
    config: &mut Config,
) -> Result<Flow> {
    let mut session = TerminalSession::enter().context("entering raw mode")?;
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms)),
    );

    loop {
        session.terminal().draw(|f| ui::draw(f, &app.view()))?;

        let flow = match runner.step() {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => Flow::Continue,
        };
        app.drain_notices();
        app.advance_frame();

        match flow {
            Flow::Continue => {}
            Flow::Suspend(mode) => {
                let _cooked = session.suspend()?;
                run_sub_mode(mode, app, store, config_store, config)?;
            }
            leaving => return Ok(leaving),
        }
    }
}

fn run_sub_mode(
    mode: SubMode,
    app: &mut App,
    store: &Mutex<StatsStore>,
    config_store: &impl ConfigStore,
    config: &mut Config,
) -> io::Result<()> {
    log::debug!("entering {mode:?}");
    let mut input = stdin().lock();
    let mut out = io::stdout();
    prompt::clear_screen(&mut out)?;

    match mode {
        SubMode::Chat => modes::chat::run(&mut input, &mut out, &mut app.bot, &mut app.chat_log),
        SubMode::Stats => {
            let rows = store
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .leaderboard();
            modes::stats_view::run(&mut input, &mut out, &rows)
        }
        SubMode::ColorPicker => {
            let picked =
                modes::color_picker::run(&mut input, &mut out, app.background, PICKER_LINGER)?;
            if let Some(background) = picked {
                app.background = background;
                config.background = background;
                if let Err(e) = config_store.save(config) {
                    log::warn!("could not save background choice: {e}");
                }
            }
            Ok(())
        }
    }
}

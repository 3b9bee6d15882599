use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use capa::app::App;
use capa::config::{self, api};
use capa::infrastructure::runtime::RuntimeBridge;
use capa::modules::sidebar::viewport_units;
use capa::store::LocalStore;
use capa::{input, ui};

#[derive(Debug, Parser)]
#[command(
    name = "capa",
    version,
    about = "Capa: a terminal dashboard for corrective actions"
)]
struct Args {
    /// Path opened at startup (e.g. /actions/42)
    #[arg(long)]
    path: Option<String>,

    /// Local storage database (SQLite)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Drop the stored API configuration before starting
    #[arg(long)]
    reset_api_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(config.log_level.as_deref());
    if let Err(err) = &loaded {
        log::warn!("invalid config file, using defaults: {err}");
    }

    let store = open_store(&args, &config)?;
    if args.reset_api_config {
        api::reset(&store).context("reset API config")?;
    }

    let start_path = args
        .path
        .clone()
        .unwrap_or_else(|| config.start_path().to_string());
    let app = App::new(store, &start_path);
    let runtime = RuntimeBridge::new()?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// The terminal owns stdout, so log records go to a file
fn init_logging(level: Option<&str>) {
    let Some(path) = config::log_file_path() else {
        return;
    };
    let file = match config::open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled: {}: {err}", path.display());
            return;
        }
    };

    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_store(args: &Args, config: &config::Config) -> Result<LocalStore> {
    let path = args
        .storage
        .clone()
        .or_else(|| config.storage_path.clone())
        .or_else(config::storage_db_path);

    let Some(path) = path else {
        log::warn!("no data directory, storage is not persisted");
        return LocalStore::open_in_memory();
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create storage dir {}", parent.display()))?;
    }
    LocalStore::open(&path)
}

fn current_viewport_units() -> u32 {
    match crossterm::terminal::window_size() {
        Ok(size) => viewport_units(size.columns, size.width),
        Err(_) => crossterm::terminal::size()
            .map(|(columns, _)| viewport_units(columns, 0))
            .unwrap_or(u32::MAX),
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    app.mount(current_viewport_units());

    loop {
        pump_runtime(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(&mut app, key),
                Event::Resize(_, _) => app.on_resize(current_viewport_units()),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_runtime(app: &mut App, runtime: &RuntimeBridge) {
    for cmd in app.take_runtime_commands() {
        if let Err(err) = runtime.send(cmd) {
            log::error!("runtime unavailable: {err:#}");
        }
    }
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }
}

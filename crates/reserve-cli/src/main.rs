//! `reserve`: track volunteer candidates from the terminal.
//!
//! # Usage
//!
//! ```
//! reserve                                   # interactive UI
//! reserve add --prenom Alex --email alex@example.org
//! reserve list --status en_lecture --contribution oui
//! reserve --store ./essai.sqlite3 stats
//! ```

mod app;
mod commands;
mod config;
mod ui;

use std::{
  fs::{self, File},
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use commands::Command;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reserve_core::{registry::Registry, session::Session, store::EntryStore};
use reserve_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "reserve", version, about = "Volunteer candidate tracker")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "reserve.toml")]
  config: PathBuf,

  /// SQLite file to use instead of the configured one.
  #[arg(long, value_name = "PATH")]
  store: Option<PathBuf>,

  /// Storage key to use instead of the configured one.
  #[arg(long)]
  key: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let mut settings = config::Settings::load(&args.config)?;
  if let Some(store) = args.store {
    settings.store_path = store;
  }
  if let Some(key) = args.key {
    settings.storage_key = key;
  }
  let store_path = settings.store_path();

  let command = args.command.unwrap_or(Command::Tui);
  let interactive = matches!(command, Command::Tui);
  init_tracing(interactive, &store_path);

  let store = open_store(&store_path).await?;
  let registry = Registry::open(store, settings.storage_key).await;
  tracing::debug!(
    key = registry.key(),
    count = registry.candidates().len(),
    "collection loaded"
  );

  if interactive {
    run_tui(App::new(Session::new(registry))).await
  } else {
    commands::handle(registry, command).await
  }
}

/// Logs go to stderr, except under the TUI where they would corrupt the
/// screen; there they go to `reserve.log` beside the store.
fn init_tracing(interactive: bool, store_path: &Path) {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  if !interactive {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
    return;
  }

  let log_path = store_path
    .parent()
    .unwrap_or(Path::new("."))
    .join("reserve.log");
  let file = log_path
    .parent()
    .map_or(Ok(()), fs::create_dir_all)
    .and_then(|()| File::options().create(true).append(true).open(&log_path));

  match file {
    Ok(file) => tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init(),
    Err(_) => tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::sink)
      .init(),
  }
}

/// Open the SQLite file, falling back to a throwaway in-memory database so
/// the session can still run when the file is unusable.
async fn open_store(path: &Path) -> Result<SqliteStore> {
  match SqliteStore::open(path).await {
    Ok(store) => Ok(store),
    Err(e) => {
      tracing::warn!(
        path = %path.display(),
        error = %e,
        "could not open store; changes will not outlive this session"
      );
      SqliteStore::open_in_memory()
        .await
        .context("opening in-memory fallback store")
    }
  }
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_tui<S: EntryStore>(mut app: App<S>) -> Result<()> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop<S: EntryStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    // Windows reports releases too; only presses count.
    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}

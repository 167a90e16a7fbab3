//! `spoteando`: terminal UI for browsing and sharing Costa Rica spots.
//!
//! # Usage
//!
//! ```
//! spoteando --store ~/.local/share/spoteando/state.db --lat 9.93 --lng -84.08
//! spoteando --config ~/.config/spoteando/config.toml
//! ```

mod app;
mod config;
mod device;
mod ui;

use std::{fs::File, io, path::Path, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{Args, Config};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use spoteando_core::{
  state::AppState,
  store::{load_remote, save_remote},
};
use spoteando_store_sqlite::SqliteStateStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Logging ──────────────────────────────────────────────────────────────────

/// Log to `path` when given. The terminal belongs to the UI, so without a log
/// file nothing is installed.
fn init_tracing(path: Option<&Path>) -> Result<()> {
  let Some(path) = path else {
    return Ok(());
  };
  let file = File::options()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Open the configured store. A store that cannot be opened counts as not
/// configured; the app still runs on local state.
async fn open_store(path: Option<&Path>) -> Option<SqliteStateStore> {
  let path = path?;
  match SqliteStateStore::open(path).await {
    Ok(store) => Some(store),
    Err(e) => {
      tracing::warn!(error = %e, path = %path.display(), "state store unavailable");
      None
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let config = Config::resolve(args)?;

  init_tracing(config.log_file.as_deref())?;

  let store = open_store(config.store_path.as_deref()).await;
  let mut state = AppState::seeded();
  if let Some(doc) = load_remote(store.as_ref()).await {
    tracing::info!(updated_at = ?doc.updated_at, "restored remote state");
    state.apply(doc);
  }

  let mut app = App::new(state, config.device());

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, store.as_ref()).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  store: Option<&SqliteStateStore>,
) -> Result<()> {
  let mut last_saved = app.controller.state.persisted();

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

    let Some(Event::Key(key)) = maybe_event else {
      continue;
    };
    if key.kind != KeyEventKind::Press {
      continue;
    }

    let cont = app.handle_key(key).await;

    // Write through whenever the persisted slice changed.
    let current = app.controller.state.persisted();
    if current != last_saved {
      save_remote(store, &current).await;
      last_saved = current;
    }

    if !cont {
      break;
    }
  }

  Ok(())
}

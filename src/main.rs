use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use crossterm::{event::{DisableMouseCapture, EnableMouseCapture}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use todos::{
    config::{Config, StorageBackend},
    domain::persistence::PersistenceSink,
    infrastructure::{file_sink::FileSink, memory_sink::MemorySink},
    ui::{self, app::App},
};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    init_tracing(&config.log_file)?;
    tracing::info!(data_dir = %config.data_dir.display(), storage = ?config.storage, "starting");

    match config.storage {
        StorageBackend::File => {
            let sink = FileSink::open(&config.data_dir)
                .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
            run(sink)
        }
        StorageBackend::Memory => run(MemorySink::new()),
    }
}

fn run<S: PersistenceSink>(sink: S) -> Result<()> {
    let mut app = App::new(sink);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = ui::run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("shutdown");
    res
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_tracing(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

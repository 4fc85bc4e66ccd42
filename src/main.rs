// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod config;
mod core;
mod logging;
mod ui;

use app::App;
use config::ResolverConfig;
use crate::core::job::DownloadJob;
use crate::core::reporter::StatusReporter;
use crate::core::resolver::opener::SystemOpener;
use crate::core::resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = logging::initialize_logging()?;

    let config = ResolverConfig::from_env();
    info!(log = %log_path.display(), ?config, "Starting up.");
    let app = App::new(config.max_link_length);
    let job = DownloadJob::new(Arc::new(Resolver::new(config)?), Arc::new(SystemOpener::default()));

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, app, job).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    info!("Shut down.");
    result
}

async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App, job: DownloadJob) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(64);
    let reporter = StatusReporter::new(tx);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &job, &reporter)?;
        }

        while let Ok(message) = rx.try_recv() {
            app.push_message(message);
        }
        app.on_tick();
    }
    Ok(())
}

/// Single entry point for terminal events.
fn handle_events(app: &mut App, job: &DownloadJob, reporter: &StatusReporter) -> Result<()> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if app.show_exit_warning {
                app.dismiss_exit_warning();
            } else {
                handle_key(app, key, job, reporter);
            }
        }
        Event::Paste(text) if !app.show_exit_warning => app.handle_paste(&text),
        _ => {}
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent, job: &DownloadJob, reporter: &StatusReporter) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.request_quit(),
        KeyCode::Char('c') if ctrl => app.request_quit(),
        KeyCode::Char('u') if ctrl => app.input.clear(),
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Enter => start_download(app, job, reporter),
        _ => {}
    }
}

/// Spawns one download task for the current input.
///
/// Validation happens inside the job so its messages share the same path as
/// every other outcome.
fn start_download(app: &mut App, job: &DownloadJob, reporter: &StatusReporter) {
    app.clear_messages();
    let input = app.input.clone();
    let job = job.clone();
    let reporter = reporter.clone();

    let handle = tokio::spawn(async move {
        job.run(&input, &reporter).await;
    });
    app.track_task(handle);
}

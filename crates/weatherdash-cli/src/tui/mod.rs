//! Interactive terminal dashboard.
//!
//! The render loop lives on the calling task; a [`FetchWorker`] owns the
//! HTTP client in a background task. The two talk over bounded channels:
//! [`Command`]s go to the worker and [`LoaderEvent`]s come back.

pub mod app;
pub mod input;
pub mod ui;
pub mod worker;

pub use app::{App, Theme};
pub use worker::FetchWorker;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use time::UtcOffset;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use weatherdash_core::{Command, LoaderEvent, TelemetryClient, TimeRange};

/// Settings the dashboard starts with.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub range: TimeRange,
    pub fahrenheit: bool,
    pub theme: Theme,
    /// Offset for time labels.
    pub offset: UtcOffset,
}

/// Set up the terminal for TUI rendering.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits.
///
/// The first fetch is issued immediately; later fetches only happen on an
/// explicit reload.
pub async fn run(client: TelemetryClient, options: TuiOptions) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<LoaderEvent>(32);
    let cancel_token = CancellationToken::new();

    let url = client.base_url().to_string();
    info!(%url, range = options.range.name(), "Starting dashboard");

    let worker = FetchWorker::new(client, cmd_rx, event_tx, cancel_token.clone());
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(
        event_rx,
        url,
        options.range,
        options.fahrenheit,
        options.offset,
        options.theme,
    );

    let mut terminal = setup_terminal()?;

    let _ = cmd_tx.try_send(Command::Fetch);

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    let _ = cmd_tx.try_send(Command::Shutdown);
    cancel_token.cancel();

    restore_terminal()?;

    let _ = worker_handle.await;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();

        let completed = terminal.draw(|f| ui::draw(f, app))?;
        app.frame_area = completed.area;

        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(key.code, app.show_help)
                }
                Event::Mouse(mouse_event) => input::handle_mouse(mouse_event),
                _ => input::Action::None,
            };
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = command_tx.try_send(cmd);
            }
        }

        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_loader_event(event);
        }

        // Let the worker make progress between frames.
        tokio::task::yield_now().await;
    }

    Ok(())
}

//! Terminal UI for skipper that lets users pick a skip and confirm it for checkout.

mod app;
mod card;
mod config;
mod input;
mod ui;

use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use skipper_core::{
    model::{Location, Skip},
    ports::{PendingCheckout, PortError},
    service::SkipService,
};
use skipper_provider_wewantwaste::{WeWantWasteSkipPort, build_client};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use crate::app::{App, FetchTicket};
use crate::config::Config;
use crate::input::Action;

/// A skip fetch running in the background while the UI keeps drawing.
struct PendingFetch {
    ticket: FetchTicket,
    handle: JoinHandle<Result<Vec<Skip>, PortError>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_path())?;
    tracing::info!(?config, "starting skipper");

    // HTTP + service setup
    let client = build_client(config.timeout())?;
    let skip_port = Arc::new(WeWantWasteSkipPort::with_base_url(
        client,
        config.base_url.as_str(),
    ));
    let service = Arc::new(SkipService::new(skip_port, Arc::new(PendingCheckout)));

    // App state
    let app = App::new(config.location());

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "skipper exited with an error");
    }
    res
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    service: Arc<SkipService>,
) -> Result<()> {
    let mut pending = app
        .mount()
        .map(|ticket| spawn_fetch(&service, app.location.clone(), ticket));

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if let Some(fetch) = pending.take_if(|fetch| fetch.handle.is_finished()) {
            let result = fetch.handle.await.unwrap_or_else(|err| {
                Err(PortError::Request(format!("skip fetch did not complete: {err}")))
            });
            app.finish_loading(fetch.ticket, result);
            continue;
        }

        // Poll for input (non-blocking, small timeout to keep the spinner moving)
        let mut action = Action::None;
        if event::poll(StdDuration::from_millis(100))? {
            let size = terminal.size()?;
            let screen = Rect::new(0, 0, size.width, size.height);

            action = match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key_event(key, &mut app, screen)
                }
                CEvent::Mouse(mouse) => input::handle_mouse_event(mouse, &mut app, screen),
                _ => Action::None,
            };
        }
        app.on_tick();

        match action {
            Action::Quit => break,
            Action::None => {}
            Action::Reload => {
                if let Some(stale) = pending.take() {
                    stale.handle.abort();
                }
                let ticket = app.reload();
                pending = Some(spawn_fetch(&service, app.location.clone(), ticket));
            }
            Action::Checkout(skip) => {
                let result = service.checkout(&skip).await;
                app.finish_checkout(&skip, result);
            }
        }
    }

    // Anything still in flight belongs to a view that no longer exists.
    app.unmount();
    if let Some(fetch) = pending.take() {
        fetch.handle.abort();
    }

    Ok(())
}

fn spawn_fetch(service: &Arc<SkipService>, location: Location, ticket: FetchTicket) -> PendingFetch {
    let service = Arc::clone(service);
    let handle = tokio::spawn(async move { service.skips_by_location(&location).await });
    PendingFetch { ticket, handle }
}

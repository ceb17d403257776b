//! Terminal UI for Strictly Ultimate

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use strictly_ultimate::{
    ChannelView, ClockConfig, ControllerHandle, GameConfig, ViewEvent, spawn_controller,
};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{error, info, instrument, warn};

use app::{App, Request};

/// Run the TUI client
pub async fn run_tui(config: GameConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let clock = ClockConfig::default();
    let (view, mut view_rx) = ChannelView::channel();
    let (handle, controller) = spawn_controller(view, clock);
    let mut app = App::new(config, *clock.turn_ticks());

    let res = run_game(&mut terminal, &mut app, &handle, &mut view_rx, clock).await;

    if handle.shutdown().is_err() {
        warn!("Controller already stopped");
    }
    if let Err(e) = controller.await {
        error!(error = %e, "Controller task failed");
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Draw, apply controller notifications, forward key presses.
#[instrument(skip_all)]
async fn run_game<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handle: &ControllerHandle,
    view_rx: &mut mpsc::UnboundedReceiver<ViewEvent>,
    clock: ClockConfig,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    info!("Starting game loop");

    loop {
        while let Ok(event) = view_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app, clock.turn_seconds()))?;

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            let sent = match app.handle_key(key.code) {
                Some(Request::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                Some(Request::Start) => handle.request_start(),
                Some(Request::Move { board, cell }) => handle.request_move(board, cell),
                Some(Request::Restart) => handle.request_restart(),
                None => Ok(()),
            };
            sent?;
        }

        tokio::task::yield_now().await;
    }
}

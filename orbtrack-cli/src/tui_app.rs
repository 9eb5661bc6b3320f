//! Interactive and headless run loops for the `track` command.
//!
//! - `run_tui()` draws the map, info and crew panels and turns key and mouse
//!   input into session commands
//! - `run_headless()` prints one status line per position update
//!
//! Both loops are synchronous; the session, poller and crew fetch run as
//! tokio tasks started by the command.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use orbtrack::session::SessionHandle;
use orbtrack::sink::SharedScene;
use orbtrack::source::{iss_crew, CrewSource};
use orbtrack::status::SharedTrackingStatus;

use crate::error::CliError;
use crate::ui::input::{action_for_key, DragTracker, UiAction};
use crate::ui::map::Viewport;
use crate::ui::widgets::CrewState;
use crate::ui::{self, DashboardView};

/// How long to wait for input before redrawing.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Headless status polling period.
const HEADLESS_POLL: Duration = Duration::from_millis(100);

/// Allowed zoom levels for `+`/`-`.
#[derive(Debug, Clone, Copy)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

/// Handles to everything the run loops read from or command.
pub struct TrackingServices {
    pub session: SessionHandle,
    pub scene: SharedScene,
    pub status: SharedTrackingStatus,
    pub crew: watch::Receiver<CrewState>,
    pub zoom: ZoomRange,
}

/// Fetch the ISS crew once in the background.
pub fn spawn_crew_fetch(
    source: Arc<dyn CrewSource>,
    cancellation: CancellationToken,
) -> watch::Receiver<CrewState> {
    let (tx, rx) = watch::channel(CrewState::Loading);

    tokio::spawn(async move {
        let result = tokio::select! {
            _ = cancellation.cancelled() => return,
            result = source.fetch_crew() => result,
        };

        let state = match result {
            Ok(people) => {
                let crew = iss_crew(people);
                tracing::info!(count = crew.len(), "Crew roster loaded");
                CrewState::Loaded(crew)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load crew roster");
                CrewState::Failed(e.to_string())
            }
        };
        let _ = tx.send(state);
    });

    rx
}

/// Run the interactive map until the user quits.
pub fn run_tui(services: &TrackingServices) -> Result<(), CliError> {
    let mut terminal = ratatui::try_init()?;

    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(CliError::Io)
        .and_then(|_| event_loop(&mut terminal, services));

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, services: &TrackingServices) -> Result<(), CliError> {
    let mut map_area = Rect::default();
    let mut drag = DragTracker::default();

    loop {
        let scene = services.scene.snapshot();
        let status = services.status.snapshot();
        let crew = services.crew.borrow().clone();

        terminal.draw(|frame| {
            map_area = ui::render(
                frame,
                &DashboardView {
                    scene: &scene,
                    status: &status,
                    crew: &crew,
                },
            );
        })?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => action_for_key(key),
            Event::Mouse(mouse) => drag.on_mouse(mouse, map_area),
            _ => None,
        };

        match action {
            Some(UiAction::Quit) => {
                tracing::info!("Quit requested");
                return Ok(());
            }
            Some(UiAction::Pan { dx, dy }) => {
                let (dlat, dlon) = Viewport::for_scene(&scene).offset_for(dx, dy);
                services.session.drag(dlat, dlon)?;
            }
            Some(UiAction::Refollow) => services.session.request_follow()?,
            Some(UiAction::ZoomIn) => services.scene.set_zoom(
                scene.zoom.saturating_add(1),
                services.zoom.min,
                services.zoom.max,
            ),
            Some(UiAction::ZoomOut) => services.scene.set_zoom(
                scene.zoom.saturating_sub(1),
                services.zoom.min,
                services.zoom.max,
            ),
            None => {}
        }
    }
}

/// Print a status line whenever a fetch completes, until `shutdown` is set.
pub fn run_headless(services: &TrackingServices, shutdown: &AtomicBool) -> Result<(), CliError> {
    let mut last_printed: Option<(Option<u64>, u64)> = None;

    while !shutdown.load(Ordering::SeqCst) {
        if services.session.is_closed() {
            return Err(CliError::Session(orbtrack::session::SessionClosed));
        }

        let status = services.status.snapshot();
        let key = (
            status.latest.as_ref().map(|record| record.timestamp),
            status.fetch_failures,
        );
        if !status.is_loading() && last_printed != Some(key) {
            println!("{}", ui::utils::format_status_line(&status));
            last_printed = Some(key);
        }

        std::thread::sleep(HEADLESS_POLL);
    }

    ui::utils::print_session_summary(&services.status.snapshot());
    Ok(())
}

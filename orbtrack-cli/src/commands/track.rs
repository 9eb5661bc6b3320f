//! `track` command: wire the tracking engine to the terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use orbtrack::config::{ConfigKey, MAX_ZOOM, MIN_ZOOM};
use orbtrack::session::spawn_session;
use orbtrack::sink::SharedScene;
use orbtrack::source::{
    build_client, spawn_position_poller, OpenNotifyCrewSource, PositionSource, WhereTheIssSource,
};
use orbtrack::status::SharedTrackingStatus;
use orbtrack::telemetry::{spawn_position_logger, DEFAULT_LOG_INTERVAL};

use super::common::apply_override;
use crate::error::CliError;
use crate::runner::{build_runtime, CliRunner};
use crate::tui_app::{self, spawn_crew_fetch, TrackingServices, ZoomRange};

/// Arguments for the track command.
pub struct TrackArgs {
    pub headless: bool,
    pub poll_interval_ms: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub trail_capacity: Option<usize>,
    pub zoom: Option<u8>,
    pub position_url: Option<String>,
    pub verbose: bool,
}

pub fn run(args: TrackArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new(args.verbose)?;

    let config = runner.config_mut();
    apply_override(config, ConfigKey::PollIntervalMs, args.poll_interval_ms)?;
    apply_override(config, ConfigKey::TickIntervalMs, args.tick_interval_ms)?;
    apply_override(config, ConfigKey::TrailCapacity, args.trail_capacity)?;
    apply_override(config, ConfigKey::Zoom, args.zoom)?;
    apply_override(config, ConfigKey::PositionUrl, args.position_url)?;
    config.validate()?;

    runner.log_startup("track");
    let config = runner.config();

    let headless = args.headless || !atty::is(atty::Stream::Stdout);
    if headless && !args.headless {
        println!("Not a terminal, using headless mode.");
    }

    let runtime = build_runtime()?;
    let enter = runtime.enter();
    let cancellation = CancellationToken::new();

    let client = build_client(config.request_timeout())?;
    let scene = SharedScene::new(config.view.zoom);
    let status = SharedTrackingStatus::new();

    let (session, session_task) = spawn_session(
        config.session_config(),
        Box::new(scene.clone()),
        Box::new(scene.clone()),
        status.clone(),
        cancellation.child_token(),
    );

    let source: Arc<dyn PositionSource> = Arc::new(WhereTheIssSource::new(
        client.clone(),
        &config.tracking.position_url,
    ));
    let poller_task = spawn_position_poller(
        source,
        session.clone(),
        status.clone(),
        config.poll_interval(),
        cancellation.child_token(),
    );

    let logger_task = tracing::enabled!(tracing::Level::DEBUG).then(|| {
        spawn_position_logger(
            scene.clone(),
            status.clone(),
            cancellation.child_token(),
            DEFAULT_LOG_INTERVAL,
        )
    });

    let crew = spawn_crew_fetch(
        Arc::new(OpenNotifyCrewSource::new(client, &config.tracking.crew_url)),
        cancellation.child_token(),
    );

    let services = TrackingServices {
        session,
        scene,
        status,
        crew,
        zoom: ZoomRange {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        },
    };

    let result = if headless {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown_clone.store(true, Ordering::SeqCst);
        })
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

        println!("Orbtrack v{} (headless)", orbtrack::VERSION);
        println!("Press Ctrl+C to stop.");
        println!();
        tui_app::run_headless(&services, &shutdown)
    } else {
        tui_app::run_tui(&services)
    };

    tracing::info!("Shutting down");
    cancellation.cancel();
    drop(services);
    drop(enter);

    runtime.block_on(async {
        let _ = session_task.await;
        let _ = poller_task.await;
        if let Some(task) = logger_task {
            let _ = task.await;
        }
    });

    result
}

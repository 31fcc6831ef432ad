//! Countdown Daemon - a resumable countdown timer served over HTTP
//!
//! This is the main entry point for the countdown-daemon application.

use std::sync::Arc;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::{info, warn};

use countdown_daemon::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_program_available, CommandEffects, IntervalWakeSource},
    storage::FileStore,
    tasks::tick_driver_task,
    timer::{observer_channel, TimerContext},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_daemon={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-daemon server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, state_file={}, tick={}ms",
          config.host, config.port, config.state_file.display(), config.tick_ms);

    // Effect programs are optional; a missing one only costs that effect
    for program in [&config.notify_command, &config.alarm_command].into_iter().flatten() {
        if let Err(e) = check_program_available(program).await {
            warn!("{}", e);
        }
    }

    let (wake, wake_rx) = IntervalWakeSource::new(Handle::current(), config.tick_period());
    let (effects, badge_rx) = CommandEffects::new(config.effects());
    let ctx = TimerContext {
        store: Arc::new(FileStore::new(&config.state_file)),
        wake: Arc::new(wake),
        effects: Arc::new(effects),
        observers: observer_channel(),
    };

    // Recover the persisted countdown; re-arms the wake source if it was running
    let state = Arc::new(AppState::restore(ctx, badge_rx, config.port, config.host.clone()));

    // Start the tick driver background task
    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_driver_task(driver_state, wake_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /state       - Current timer state");
    info!("  POST /start       - Start the countdown (optional duration body)");
    info!("  POST /stop        - Pause the countdown");
    info!("  POST /reset       - Restore the default duration");
    info!("  POST /time        - Set a new duration while stopped");
    info!("  POST /alarm       - Enable or disable the alarm sound");
    info!("  POST /alarm/test  - Play the alarm sound");
    info!("  GET  /badge       - Current badge");
    info!("  POST /badge/clear - Clear the badge");
    info!("  POST /command     - Run a command in message form");
    info!("  GET  /events      - Observer event stream");
    info!("  GET  /status      - Timer and server status");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

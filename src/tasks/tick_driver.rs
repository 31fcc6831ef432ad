//! Tick driver background task

use std::sync::Arc;
use tokio::{sync::mpsc, task};
use tracing::{debug, error, info, warn};

use crate::{
    services::{WakeEvent, TIMER_SCHEDULE},
    state::AppState,
    timer::Outcome,
};

/// Background task that turns wake-source firings into timer ticks.
///
/// Each tick persists the state, so it runs on the blocking pool. The
/// driver waits for one tick to finish before taking the next firing.
pub async fn tick_driver_task(state: Arc<AppState>, mut wake_rx: mpsc::UnboundedReceiver<WakeEvent>) {
    info!("Starting tick driver task");

    while let Some(event) = wake_rx.recv().await {
        if event.schedule != TIMER_SCHEDULE {
            warn!("Ignoring firing of unknown schedule {}", event.schedule);
            continue;
        }

        let tick_state = Arc::clone(&state);
        match task::spawn_blocking(move || tick_state.on_wake(&event)).await {
            Ok(Outcome::Finished) => info!("Countdown reached zero"),
            Ok(Outcome::Ignored) => debug!("Firing ignored (stopped or stale)"),
            Ok(_) => {}
            Err(e) => error!("Tick task failed: {}", e),
        }
    }

    info!("Wake source closed, tick driver exiting");
}

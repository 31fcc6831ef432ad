//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::{sync::broadcast::error::RecvError, task};
use tracing::{error, info, warn};

use crate::{
    services::Badge,
    state::{AppState, TimerSnapshot},
    timer::ObserverMessage,
    utils::time::Hms,
};
use super::{
    commands::{execute, Command, CommandReply},
    responses::{AlarmSettingRequest, HealthResponse, StatusResponse},
};

type CommandResult = Result<Json<CommandReply>, (StatusCode, String)>;

/// Run a command on the blocking pool; commands persist the state before
/// they return
async fn run(state: Arc<AppState>, command: Command) -> CommandResult {
    task::spawn_blocking(move || execute(&state, command))
        .await
        .map(Json)
        .map_err(|e| {
            error!("Command task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Command failed: {}", e))
        })
}

/// Handle GET /state - Return the current timer snapshot
pub async fn get_state_handler(State(state): State<Arc<AppState>>) -> Json<TimerSnapshot> {
    Json(state.get_timer_state())
}

/// Handle POST /start - Start the countdown, optionally from a new duration
///
/// An empty body resumes from the current remaining time.
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> CommandResult {
    let time = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let time: Hms = serde_json::from_slice(&body).map_err(|e| {
            warn!("Rejected start body: {}", e);
            (StatusCode::BAD_REQUEST, format!("Invalid duration: {}", e))
        })?;
        Some(time)
    };

    info!("Start endpoint called");
    run(state, Command::Start { time }).await
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    info!("Stop endpoint called");
    run(state, Command::Stop).await
}

/// Handle POST /reset - Stop and restore the default duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    info!("Reset endpoint called");
    run(state, Command::Reset).await
}

/// Handle POST /time - Set a new duration while stopped
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(time): Json<Hms>,
) -> CommandResult {
    run(state, Command::SetTime { time }).await
}

/// Handle POST /alarm - Enable or disable the alarm sound
pub async fn toggle_alarm_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AlarmSettingRequest>,
) -> CommandResult {
    run(state, Command::ToggleAlarm { enabled: request.enabled }).await
}

/// Handle POST /alarm/test - Play the alarm without finishing the timer
pub async fn test_alarm_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run(state, Command::TestAlarm).await
}

/// Handle POST /badge/clear - Clear the badge surface
pub async fn clear_badge_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run(state, Command::ClearBadge).await
}

/// Handle GET /badge - Return what the badge currently shows
pub async fn badge_handler(State(state): State<Arc<AppState>>) -> Json<Badge> {
    Json(state.get_badge())
}

/// Handle POST /command - Run a command in tagged message form
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(command): Json<Command>,
) -> CommandResult {
    run(state, command).await
}

/// Handle GET /events - Stream observer messages as server-sent events
///
/// The stream opens with a `stateUpdate` carrying the current snapshot so
/// a freshly attached UI does not have to poll first.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let initial = ObserverMessage::StateUpdate {
        state: state.get_timer_state(),
    };
    info!("Observer attached");

    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(message) => return Some((message, rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Observer lagging, skipped {} messages", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = stream::iter([initial])
        .chain(updates)
        .filter_map(|message| async move {
            match Event::default().event(message.kind()).json_data(&message) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    warn!("Failed to encode observer message: {}", e);
                    None
                }
            }
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return timer, badge and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        state: state.get_timer_state(),
        badge: state.get_badge(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

//! Startup recovery of the persisted countdown
//!
//! The stored record is taken at face value: a countdown that was running
//! resumes from its last persisted remaining time, with no adjustment for
//! wall-clock time spent while the process was gone. The wake source is the
//! only clock the timer trusts, so each restart may cost up to one tick.

use tracing::{info, warn};

use crate::{services::TIMER_SCHEDULE, state::TimerState};
use super::engine::{TimerContext, TimerEngine};

/// Load the persisted state and bring the wake schedule in line with it.
///
/// - nothing stored: the built-in default is created and saved right away
/// - unreadable record: logged, then treated like nothing stored
/// - running: the schedule is armed again
/// - stopped: the schedule is cleared
pub fn restore(ctx: TimerContext) -> TimerEngine {
    let state = match ctx.store.load() {
        Ok(Some(state)) => {
            info!(
                "Restored {:?} timer with {} remaining from {}",
                state.status(),
                state.display_time(),
                ctx.store.name()
            );
            state
        }
        Ok(None) => {
            info!("No persisted timer state, starting from default");
            save_baseline(&ctx)
        }
        Err(e) => {
            warn!("Failed to load persisted timer state, starting from default: {}", e);
            save_baseline(&ctx)
        }
    };

    if state.is_running() {
        ctx.wake.arm(TIMER_SCHEDULE);
    } else {
        ctx.wake.disarm(TIMER_SCHEDULE);
    }

    TimerEngine::new(state, ctx)
}

fn save_baseline(ctx: &TimerContext) -> TimerState {
    let state = TimerState::new();
    if let Err(e) = ctx.store.save(&state) {
        warn!("Failed to persist default timer state: {}", e);
    }
    state
}

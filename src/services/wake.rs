//! Wake source: named periodic schedules that drive the timer's ticks
//!
//! A schedule is identified only by its name. Arming an armed schedule does
//! nothing, disarming an unarmed one does nothing, so callers never need to
//! know the current arm state before acting.
//!
//! Every firing carries the generation of the arming that produced it.
//! Firings still queued when their schedule is disarmed or re-armed are
//! stale and must not be applied; see [`WakeSource::is_current`].

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
    time::Duration,
};

use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

/// The one schedule the countdown uses
pub const TIMER_SCHEDULE: &str = "timer_tick";

/// A single firing of a named schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeEvent {
    pub schedule: String,
    /// Which arming of the schedule produced this firing
    pub generation: u64,
}

/// Coarse periodic scheduler the timer arms while running
pub trait WakeSource: Send + Sync {
    /// Create the schedule if it does not exist yet
    fn arm(&self, name: &str);

    /// Clear the schedule if it exists
    fn disarm(&self, name: &str);

    fn is_armed(&self, name: &str) -> bool;

    /// Whether a delivered firing belongs to the schedule as currently armed
    fn is_current(&self, event: &WakeEvent) -> bool {
        self.is_armed(&event.schedule)
    }
}

#[derive(Debug)]
struct Armed {
    generation: u64,
    task: JoinHandle<()>,
}

/// Wake source backed by one tokio interval task per armed schedule.
///
/// Firings are delivered on the channel returned from [`IntervalWakeSource::new`].
/// The first firing arrives one full period after arming.
#[derive(Debug)]
pub struct IntervalWakeSource {
    period: Duration,
    handle: Handle,
    tx: mpsc::UnboundedSender<WakeEvent>,
    generations: AtomicU64,
    schedules: Mutex<HashMap<String, Armed>>,
}

impl IntervalWakeSource {
    pub fn new(handle: Handle, period: Duration) -> (Self, mpsc::UnboundedReceiver<WakeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            period,
            handle,
            tx,
            generations: AtomicU64::new(0),
            schedules: Mutex::new(HashMap::new()),
        };
        (source, rx)
    }

    fn schedules(&self) -> MutexGuard<'_, HashMap<String, Armed>> {
        // The map stays consistent even if a holder panicked
        self.schedules.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WakeSource for IntervalWakeSource {
    fn arm(&self, name: &str) {
        let mut schedules = self.schedules();
        if schedules.get(name).is_some_and(|armed| !armed.task.is_finished()) {
            debug!("Schedule {} already armed", name);
            return;
        }

        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let tx = self.tx.clone();
        let period = self.period;
        let schedule = name.to_string();
        let task = self.handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let event = WakeEvent {
                    schedule: schedule.clone(),
                    generation,
                };
                if tx.send(event).is_err() {
                    debug!("Wake receiver dropped, ending schedule {}", schedule);
                    break;
                }
            }
        });

        info!("Armed schedule {} every {:?} (generation {})", name, period, generation);
        schedules.insert(name.to_string(), Armed { generation, task });
    }

    fn disarm(&self, name: &str) {
        if let Some(armed) = self.schedules().remove(name) {
            armed.task.abort();
            info!("Cleared schedule {}", name);
        }
    }

    fn is_armed(&self, name: &str) -> bool {
        self.schedules()
            .get(name)
            .is_some_and(|armed| !armed.task.is_finished())
    }

    fn is_current(&self, event: &WakeEvent) -> bool {
        self.schedules()
            .get(&event.schedule)
            .is_some_and(|armed| armed.generation == event.generation && !armed.task.is_finished())
    }
}

impl Drop for IntervalWakeSource {
    fn drop(&mut self) {
        for (_, armed) in self.schedules().drain() {
            armed.task.abort();
        }
    }
}

//! Side effects requested by the timer: badge, desktop notification, alarm sound
//!
//! Every request is one-way. The timer only learns whether the request could
//! be dispatched; what happens afterwards (a notification daemon being slow,
//! a sound player exiting with an error) is logged here and never reaches
//! the timer state.

use std::{path::PathBuf, process::Stdio};

use serde::{Deserialize, Serialize};
use tokio::{process::Command, runtime::Handle, sync::watch};
use tracing::{debug, info, warn};

use crate::{
    error::{EffectError, EffectResult},
    utils::time::{badge_text, Hms},
};

/// What the badge surface currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    /// RGBA background colour
    pub color: [u8; 4],
}

impl Badge {
    /// Empty, transparent badge
    pub fn cleared() -> Self {
        Self {
            text: String::new(),
            color: [255, 255, 255, 0],
        }
    }

    /// "M:SS" countdown on a dark background
    pub fn countdown(remaining: &Hms) -> Self {
        Self {
            text: badge_text(remaining),
            color: [51, 51, 51, 255],
        }
    }

    /// Red alert shown once the countdown has finished
    pub fn alert() -> Self {
        Self {
            text: " ! ".to_string(),
            color: [255, 0, 0, 255],
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Badge {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Sink for the timer's fire-and-forget side effects
pub trait Effects: Send + Sync {
    fn set_badge(&self, badge: Badge) -> EffectResult;

    fn notify(&self, title: &str, message: &str) -> EffectResult;

    fn play_alarm(&self) -> EffectResult;
}

/// External programs used for notifications and sound
#[derive(Debug, Clone, Default)]
pub struct EffectsConfig {
    /// Program called as `<program> <title> <message>`, e.g. `notify-send`
    pub notify_command: Option<String>,
    /// Program called as `<program> [sound]`, e.g. `paplay`
    pub alarm_command: Option<String>,
    pub alarm_sound: Option<PathBuf>,
}

/// Publishes the badge on a watch channel and launches external programs
/// for notifications and the alarm
#[derive(Debug)]
pub struct CommandEffects {
    config: EffectsConfig,
    badge_tx: watch::Sender<Badge>,
}

impl CommandEffects {
    /// Create the effects sink together with a receiver for the badge surface
    pub fn new(config: EffectsConfig) -> (Self, watch::Receiver<Badge>) {
        let (badge_tx, badge_rx) = watch::channel(Badge::cleared());
        (Self { config, badge_tx }, badge_rx)
    }

    /// Start `program` without waiting for it; its exit status is logged
    /// from a detached task
    fn launch(&self, program: &str, args: &[String]) -> EffectResult {
        let handle = Handle::try_current()
            .map_err(|_| EffectError::Unavailable("no async runtime to launch programs on".into()))?;
        let _guard = handle.enter();

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EffectError::Launch {
                program: program.to_string(),
                source,
            })?;

        let program = program.to_string();
        handle.spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("{} finished", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

impl Effects for CommandEffects {
    fn set_badge(&self, badge: Badge) -> EffectResult {
        debug!("Badge set to {:?}", badge.text);
        self.badge_tx.send_replace(badge);
        Ok(())
    }

    fn notify(&self, title: &str, message: &str) -> EffectResult {
        info!("Notification: {} - {}", title, message);
        match &self.config.notify_command {
            Some(program) => self.launch(program, &[title.to_string(), message.to_string()]),
            None => Ok(()),
        }
    }

    fn play_alarm(&self) -> EffectResult {
        info!("Alarm sound requested");
        match &self.config.alarm_command {
            Some(program) => {
                let args: Vec<String> = self
                    .config
                    .alarm_sound
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect();
                self.launch(program, &args)
            }
            None => Ok(()),
        }
    }
}

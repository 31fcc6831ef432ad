//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::services::EffectsConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown-daemon")]
#[command(about = "A resumable countdown timer daemon that survives process restarts")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the timer state is persisted to
    #[arg(short, long, default_value = "countdown-state.json")]
    pub state_file: PathBuf,

    /// Wake period in milliseconds; every firing counts down one second
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Program used for desktop notifications, called as `<program> <title> <message>`
    #[arg(long)]
    pub notify_command: Option<String>,

    /// Program used to play the alarm, called as `<program> [alarm-sound]`
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Sound file handed to the alarm program
    #[arg(long)]
    pub alarm_sound: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn effects(&self) -> EffectsConfig {
        EffectsConfig {
            notify_command: self.notify_command.clone(),
            alarm_command: self.alarm_command.clone(),
            alarm_sound: self.alarm_sound.clone(),
        }
    }
}

//! Configuration for the timer front end

use std::time::Duration;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

use crate::machine::{Durations, TimerError};

/// Prefix of the environment variables read by [`TimerConfig::from_env`]
pub const ENV_PREFIX: &str = "POMODORO_TIMER";

/// Timer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// Base URL of the session registry
    pub api_url: String,
    /// Initial work duration in minutes
    pub work_minutes: u32,
    /// Initial break duration in minutes
    pub break_minutes: u32,
    /// Polling interval in milliseconds
    pub tick_millis: u64,
}

impl TimerConfig {
    /// Create a new TimerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `POMODORO_TIMER_API_URL`: registry base URL (default: "http://127.0.0.1:3001")
    /// - `POMODORO_TIMER_WORK_MINUTES`: work duration, 1-60 (default: 1)
    /// - `POMODORO_TIMER_BREAK_MINUTES`: break duration, 1-15 (default: 1)
    /// - `POMODORO_TIMER_TICK_MILLIS`: polling interval (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(None)
    }

    /// Same as [`TimerConfig::from_env`] but reads from `vars` instead of the
    /// process environment when given
    pub fn from_vars(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .set_default("api_url", "http://127.0.0.1:3001")?
            .set_default("work_minutes", 1)?
            .set_default("break_minutes", 1)?
            .set_default("tick_millis", 10)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        if config.tick_millis == 0 {
            return Err(ConfigError::Message(
                "tick_millis must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Phase durations, checked against the allowed ranges
    pub fn durations(&self) -> Result<Durations, TimerError> {
        Durations::new(self.work_minutes, self.break_minutes)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

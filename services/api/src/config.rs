//! Configuration for the session registry service

use std::net::SocketAddr;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

/// Prefix of the environment variables read by [`ApiConfig::from_env`]
pub const ENV_PREFIX: &str = "POMODORO_API";

/// Address the service listens on unless overridden
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Socket address to bind the HTTP listener to
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `POMODORO_API_BIND_ADDR`: listen address (default: "0.0.0.0:3001")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(None)
    }

    /// Same as [`ApiConfig::from_env`] but reads from `vars` instead of the
    /// process environment when given
    pub fn from_vars(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()
    }
}

//! Tool configuration parsed from environment variables.
//!
//! Settings are read from variables prefixed with `GHERKIN_PICKLES_` and
//! may then be overridden from the command line.

use std::env;
use std::str::FromStr;

use gherkin_pickles::events::StreamConfig;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKIN_PICKLES_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so stderr stays quiet unless something is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Parse and compile progress.
    Debug,
    /// Per-run summaries.
    Info,
    /// Documents that failed to parse or compile.
    #[default]
    Warn,
    /// Failures that stop the tool.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for one run of the tool.
///
/// # Environment Variables
///
/// - `GHERKIN_PICKLES_LOG_LEVEL`: Sets the log level (trace, debug, info,
///   warn, error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for stderr diagnostics.
    pub log_level: LogLevel,
    /// Which events each source produces. Everything is printed unless
    /// switched off.
    pub stream: StreamConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            stream: StreamConfig::all(),
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_env_with(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    ///
    /// # Examples
    /// ```
    /// use gherkin_pickles_cli::config::{CliConfig, LogLevel};
    ///
    /// let config = CliConfig::from_env_with(|_| Some("debug".to_owned())).unwrap();
    /// assert_eq!(config.log_level, LogLevel::Debug);
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        Ok(Self {
            log_level,
            ..Self::default()
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command line values take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, stream: Option<StreamConfig>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(stream) = stream {
            self.stream = stream;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

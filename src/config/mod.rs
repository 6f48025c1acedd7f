//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults.
//! `Config::from_env` validates the values it parses; the extractor and the
//! fetcher are built from the resulting config.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::extractor::{FieldKeywords, TableExtractor};
use crate::fetcher::FetchSettings;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_TABLE_MARKER: &str = "TABLE_MARKER";
pub const ENV_VALUE_KEYWORDS: &str = "VALUE_KEYWORDS";
pub const ENV_ACTOR_KEYWORDS: &str = "ACTOR_KEYWORDS";
pub const ENV_DATE_KEYWORDS: &str = "DATE_KEYWORDS";
pub const ENV_LOCATION_KEYWORDS: &str = "LOCATION_KEYWORDS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TABLE_MARKER: &str = "wikitable";
const DEFAULT_VALUE_KEYWORDS: &str = "mark";
const DEFAULT_ACTOR_KEYWORDS: &str = "athlete";
const DEFAULT_DATE_KEYWORDS: &str = "date";
const DEFAULT_LOCATION_KEYWORDS: &str = "venue";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    table_marker: String,
    keywords: FieldKeywords,
    fetch_timeout: Duration,
    max_body_bytes: u64,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let table_marker =
            env::var(ENV_TABLE_MARKER).unwrap_or_else(|_| DEFAULT_TABLE_MARKER.to_string());
        let table_marker = table_marker.trim().to_string();
        if table_marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: ENV_TABLE_MARKER,
                reason: "must not be empty".to_string(),
            });
        }

        let keywords = FieldKeywords::new(
            keyword_list(ENV_VALUE_KEYWORDS, DEFAULT_VALUE_KEYWORDS)?,
            keyword_list(ENV_ACTOR_KEYWORDS, DEFAULT_ACTOR_KEYWORDS)?,
            keyword_list(ENV_DATE_KEYWORDS, DEFAULT_DATE_KEYWORDS)?,
            keyword_list(ENV_LOCATION_KEYWORDS, DEFAULT_LOCATION_KEYWORDS)?,
        );

        let fetch_timeout = Duration::from_secs(parse_var(
            ENV_FETCH_TIMEOUT_SECS,
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?);
        let max_body_bytes = parse_var(ENV_MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?;
        let log_format = parse_var(ENV_LOG_FORMAT, LogFormat::Text)?;

        Ok(Self {
            bind_addr,
            table_marker,
            keywords,
            fetch_timeout,
            max_body_bytes,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// CSS class carried by candidate tables.
    pub fn table_marker(&self) -> &str {
        &self.table_marker
    }

    pub fn keywords(&self) -> &FieldKeywords {
        &self.keywords
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Replaces the table marker, e.g. from a CLI flag.
    pub fn with_table_marker(mut self, marker: impl Into<String>) -> Self {
        self.table_marker = marker.into();
        self
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.fetch_timeout,
            max_body_bytes: self.max_body_bytes,
            ..FetchSettings::default()
        }
    }

    /// Compiles the table marker and keywords into an extractor.
    pub fn table_extractor(&self) -> Result<TableExtractor, ConfigError> {
        TableExtractor::new(&self.table_marker, self.keywords.clone()).map_err(|error| {
            ConfigError::InvalidValue {
                field: ENV_TABLE_MARKER,
                reason: error.to_string(),
            }
        })
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            table_marker: DEFAULT_TABLE_MARKER.to_string(),
            keywords: FieldKeywords::default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::Text,
        }
    }
}

fn keyword_list(key: &'static str, default: &str) -> Result<Vec<String>, ConfigError> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: key,
            reason: "needs at least one keyword".to_string(),
        });
    }
    Ok(keywords)
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|error: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: error.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

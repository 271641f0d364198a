/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * (a `.env` file is read by the binary first).
 *
 * # Variables
 *
 * | Variable                   | Default                         |
 * |----------------------------|---------------------------------|
 * | `DATABASE_URL`             | `sqlite://sitebuilder.db?mode=rwc` |
 * | `HOST`                     | `0.0.0.0`                       |
 * | `PORT`                     | `3000`                          |
 * | `DATABASE_MAX_CONNECTIONS` | `5`                             |
 * | `JWT_SECRET`               | development secret (warned)     |
 * | `JWT_EXPIRES_IN`           | `7d`                            |
 * | `BCRYPT_COST`              | bcrypt's default                |
 * | `TX_RETRY_ATTEMPTS`        | `3`                             |
 * | `TX_RETRY_BASE_MS`         | `25`                            |
 *
 * # Error Handling
 *
 * A variable that is set but cannot be parsed fails startup with a
 * `ConfigError` naming the variable.
 */

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::backend::db::RetryPolicy;

const DEFAULT_DATABASE_URL: &str = "sqlite://sitebuilder.db?mode=rwc";
const DEFAULT_JWT_SECRET: &str = "sitebuilder-development-secret";

/// Invalid configuration value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} has an invalid value '{value}': {reason}")]
    Invalid {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            variable,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Everything the server needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub jwt_ttl: Duration,
    pub bcrypt_cost: u32,
    pub retry: RetryPolicy,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set. Using the development secret; do not run like this in production.");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let jwt_ttl = match lookup("JWT_EXPIRES_IN") {
            Some(raw) => parse_duration(&raw).map_err(|reason| ConfigError::invalid("JWT_EXPIRES_IN", &raw, reason))?,
            None => Duration::from_secs(7 * 24 * 60 * 60),
        };

        let bcrypt_cost = parsed(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                &bcrypt_cost.to_string(),
                "must be between 4 and 31",
            ));
        }

        let max_connections: u32 = parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "0", "must be at least 1"));
        }

        let retry_attempts: u32 = parsed(&lookup, "TX_RETRY_ATTEMPTS", 3)?;
        let retry_base_ms: u64 = parsed(&lookup, "TX_RETRY_BASE_MS", 25)?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 3000)?,
            max_connections,
            jwt_secret,
            jwt_ttl,
            bcrypt_cost,
            retry: RetryPolicy::new(retry_attempts, Duration::from_millis(retry_base_ms)),
        })
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<F, T>(lookup: &F, variable: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(variable) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(variable, &raw, e.to_string())),
        None => Ok(default),
    }
}

/// Parse `<n>` (seconds) or `<n>s`, `<n>m`, `<n>h`, `<n>d`
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], c),
        Some(_) => (raw, 's'),
        None => return Err("empty duration".to_string()),
    };

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("expected a number followed by s, m, h or d, got '{}'", raw))?;

    let seconds = match unit {
        's' => amount,
        'm' => amount * 60,
        'h' => amount * 60 * 60,
        'd' => amount * 24 * 60 * 60,
        other => return Err(format!("unknown unit '{}'", other)),
    };

    if seconds == 0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(Duration::from_secs(seconds))
}

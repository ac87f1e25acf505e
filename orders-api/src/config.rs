//! Configuration module for environment variable parsing.
//!
//! All settings come from the process environment. Only the queue connection
//! string is mandatory, and only for components that publish.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Environment variable holding the AMQP URL of the queue transport.
pub const QUEUE_CONNECTION_STRING: &str = "QUEUE_CONNECTION_STRING";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for environment variable `{name}`")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Queue transport endpoint (AMQP URL). `None` when unset or blank.
    pub queue_connection_string: Option<String>,

    /// IP address for the web server to bind
    pub bind_address: IpAddr,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            queue_connection_string: None,
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            queue_connection_string: parse_optional(QUEUE_CONNECTION_STRING),
            bind_address: parse_or("BIND_ADDRESS", defaults.bind_address)?,
            port: parse_or("PORT", defaults.port)?,
        })
    }
}

/// Read a string variable, treating blank values as absent.
fn parse_optional(name: &'static str) -> Option<String> {
    let raw = env::var(name).ok()?;
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        warn!(env_var = name, "Blank value, treating as unset");
        return None;
    }

    Some(trimmed.to_string())
}

/// Parse a variable into `T`, falling back to `default` when unset.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

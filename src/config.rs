//! Server configuration parsed from environment variables.
//!
//! Recognised variables (all optional):
//! - `PORT`: listen port, default 3000
//! - `SITE_DIR`: built client assets, default `client/dist`
//! - `COOKIE_SECURE`: mark the session cookie `Secure`, default false
//! - `DEMO_AUTO_PROVISION`: let unknown emails log in, default false
//! - `SESSION_TTL_HOURS`: session cookie lifetime, default 168

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_DIR: &str = "client/dist";
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub site_dir: PathBuf,
    pub cookie_secure: bool,
    pub demo_auto_provision: bool,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            cookie_secure: false,
            demo_auto_provision: false,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = parse_or("PORT", lookup("PORT"), defaults.port)?;
        let site_dir = lookup("SITE_DIR").map_or(defaults.site_dir, PathBuf::from);
        let cookie_secure = bool_or("COOKIE_SECURE", lookup("COOKIE_SECURE"), defaults.cookie_secure)?;
        let demo_auto_provision =
            bool_or("DEMO_AUTO_PROVISION", lookup("DEMO_AUTO_PROVISION"), defaults.demo_auto_provision)?;
        let ttl_hours: u64 = parse_or("SESSION_TTL_HOURS", lookup("SESSION_TTL_HOURS"), DEFAULT_SESSION_TTL_HOURS)?;

        Ok(Self {
            port,
            site_dir,
            cookie_secure,
            demo_auto_provision,
            session_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
        })
    }
}

/// Parse a boolean flag value (`1/true/yes/on`, `0/false/no/off`).
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn bool_or(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { key, value }),
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

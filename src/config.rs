// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the startup configuration value.
//! Everything is read once at process start.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ALLOWED_ISSUERS` | Whitespace-separated issuer hosts (`host` or `host:port`) | empty, nothing trusted |
//! | `KEY_SELECTION` | Key-set entry selection: `first` or `kid` | `first` |
//! | `AUTHORIZER_DEADLINE_SECS` | Wall-clock limit per authorization | `10` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::auth::{AllowedIssuers, KeySelection};

/// Environment variable holding the issuer allow-list.
///
/// An absent or empty value means no issuer is trusted and every request
/// is rejected.
pub const ALLOWED_ISSUERS_ENV: &str = "ALLOWED_ISSUERS";

/// Environment variable selecting how a key is picked from the key set.
pub const KEY_SELECTION_ENV: &str = "KEY_SELECTION";

/// Environment variable for the per-request deadline, in seconds.
pub const DEADLINE_SECS_ENV: &str = "AUTHORIZER_DEADLINE_SECS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_DEADLINE_SECS: u64 = 10;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Startup configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'json' or 'pretty')")),
        }
    }
}

/// Configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct AuthorizerConfig {
    pub allowed_issuers: AllowedIssuers,
    pub key_selection: KeySelection,
    pub deadline: Duration,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl AuthorizerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_issuers = lookup(ALLOWED_ISSUERS_ENV)
            .map(|list| AllowedIssuers::from_whitespace_list(&list))
            .unwrap_or_default();

        let key_selection = match lookup(KEY_SELECTION_ENV) {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::invalid(KEY_SELECTION_ENV, e))?,
            None => KeySelection::default(),
        };

        let deadline_secs = match lookup(DEADLINE_SECS_ENV) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::invalid(
                        DEADLINE_SECS_ENV,
                        format!("'{value}' is not a positive number of seconds"),
                    ))
                }
            },
            None => DEFAULT_DEADLINE_SECS,
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip: IpAddr = host
            .parse()
            .map_err(|e| ConfigError::invalid(HOST_ENV, format!("'{host}': {e}")))?;

        let port = match lookup(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(PORT_ENV, format!("'{value}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_ENV, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            allowed_issuers,
            key_selection,
            deadline: Duration::from_secs(deadline_secs),
            bind_addr: SocketAddr::new(ip, port),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AuthorizerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthorizerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_fail_closed() {
        let config = config_from(&[]).unwrap();
        assert!(config.allowed_issuers.is_empty());
        assert_eq!(config.key_selection, KeySelection::First);
        assert_eq!(config.deadline, Duration::from_secs(DEFAULT_DEADLINE_SECS));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            (ALLOWED_ISSUERS_ENV, "issuer.example  auth.example:8443"),
            (KEY_SELECTION_ENV, "kid"),
            (DEADLINE_SECS_ENV, "3"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();

        assert_eq!(config.allowed_issuers.len(), 2);
        assert!(config.allowed_issuers.contains("auth.example:8443"));
        assert_eq!(config.key_selection, KeySelection::MatchKid);
        assert_eq!(config.deadline, Duration::from_secs(3));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_allow_list_trusts_nobody() {
        let config = config_from(&[(ALLOWED_ISSUERS_ENV, " \t ")]).unwrap();
        assert!(config.allowed_issuers.is_empty());
    }

    #[test]
    fn rejects_invalid_values() {
        for (name, value) in [
            (KEY_SELECTION_ENV, "newest"),
            (DEADLINE_SECS_ENV, "0"),
            (DEADLINE_SECS_ENV, "soon"),
            (HOST_ENV, "not-an-ip"),
            (PORT_ENV, "70000"),
            (LOG_FORMAT_ENV, "xml"),
        ] {
            match config_from(&[(name, value)]) {
                Err(ConfigError::Invalid { name: got, .. }) => assert_eq!(got, name),
                Ok(_) => panic!("{name}={value} should be rejected"),
            }
        }
    }
}

//! Process configuration, read once at startup.
//!
//! The configuration is built from environment variables and handed to the
//! router through [`crate::AppState`].

use std::fmt;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use axum_extra::extract::cookie::Key;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;
/// Minimum `SECRET_KEY` length in bytes accepted for cookie signing.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("invalid HOST {value:?}: {source}")]
    InvalidHost {
        value: String,
        source: AddrParseError,
    },
    #[error(
        "SECRET_KEY is too weak: minimum {min} bytes required, got {actual}",
        min = MIN_SECRET_LEN
    )]
    WeakSecret { actual: usize },
}

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
    key: Key,
    ephemeral_key: bool,
}

impl Config {
    /// Reads `HOST`, `PORT`, `DEBUG` (or `FLASK_DEBUG`) and `SECRET_KEY` from
    /// the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// A missing `SECRET_KEY` yields a random key that lives as long as the
    /// process; flash cookies then do not survive a restart.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidHost { value, source })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        // FLASK_DEBUG is the legacy name; DEBUG wins when both are set.
        let debug = lookup("DEBUG")
            .or_else(|| lookup("FLASK_DEBUG"))
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        let (key, ephemeral_key) = match lookup("SECRET_KEY") {
            Some(secret) => {
                let key = Key::try_from(secret.as_bytes()).map_err(|_| {
                    ConfigError::WeakSecret {
                        actual: secret.len(),
                    }
                })?;
                (key, false)
            }
            None => (Key::generate(), true),
        };

        Ok(Self {
            host,
            port,
            debug,
            key,
            ephemeral_key,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Key used to sign flash cookies.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// True when no `SECRET_KEY` was configured and a random one was generated.
    pub fn has_ephemeral_key(&self) -> bool {
        self.ephemeral_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("key", &"<redacted>")
            .field("ephemeral_key", &self.ephemeral_key)
            .finish()
    }
}

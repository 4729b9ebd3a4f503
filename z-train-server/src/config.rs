//! Server configuration read from the environment.
//!
//! Every setting has a default, so the server starts with no environment at
//! all. Empty values count as unset. Values that are present but malformed
//! are reported rather than silently replaced with the default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::digitraffic::DigitrafficConfig;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default directory for the dashboard's stylesheet and script.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// An environment variable held a value we could not use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (`PORT`).
    pub port: u16,

    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: IpAddr,

    /// Upstream API settings (`DIGITRAFFIC_BASE_URL`, `DIGITRAFFIC_USER`,
    /// `UPSTREAM_TIMEOUT_SECS`).
    pub digitraffic: DigitrafficConfig,

    /// TTL of the optional train cache (`CACHE_TTL_SECS`); `None` disables it.
    pub cache_ttl: Option<Duration>,

    /// Directory served under `/static` (`STATIC_DIR`).
    pub static_dir: PathBuf,

    /// Serve trains from this file instead of the live API (`MOCK_TRAINS_FILE`).
    pub mock_trains_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            digitraffic: DigitrafficConfig::default(),
            cache_ttl: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            mock_trains_file: None,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", &addr)?;
        }

        if let Some(user) = get("DIGITRAFFIC_USER") {
            config.digitraffic.client_id = user;
        }
        if let Some(url) = get("DIGITRAFFIC_BASE_URL") {
            config.digitraffic = config.digitraffic.with_base_url(url);
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let timeout = positive_secs("UPSTREAM_TIMEOUT_SECS", &secs)?;
            config.digitraffic = config.digitraffic.with_timeout(timeout);
        }

        if let Some(secs) = get("CACHE_TTL_SECS") {
            config.cache_ttl = Some(positive_secs("CACHE_TTL_SECS", &secs)?);
        }

        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config.mock_trains_file = get("MOCK_TRAINS_FILE").map(PathBuf::from);

        Ok(config)
    }

    /// The address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn positive_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match parse::<u64>(key, value)? {
        0 => Err(ConfigError {
            key,
            value: value.to_string(),
            reason: "must be at least 1 second".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

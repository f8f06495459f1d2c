//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `USERBASE_ADDR` | `127.0.0.1:8000` | listen address |
//! | `USERBASE_LOG` (then `RUST_LOG`) | `info` | `EnvFilter` directive |
//! | `USERBASE_SHUTDOWN_GRACE_SECS` | `30` | drain time after a shutdown signal |

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::server::DEFAULT_GRACE_PERIOD;

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8000));
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub log_filter: String,
    pub grace_period: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = match lookup("USERBASE_ADDR") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| Error::Config {
                key: "USERBASE_ADDR",
                message: format!("`{raw}`: {e}"),
            })?,
            None => DEFAULT_ADDR,
        };

        let log_filter = lookup("USERBASE_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        let grace_period = match lookup("USERBASE_SHUTDOWN_GRACE_SECS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| Error::Config {
                key: "USERBASE_SHUTDOWN_GRACE_SECS",
                message: format!("`{raw}`: {e}"),
            })?,
            None => DEFAULT_GRACE_PERIOD,
        };

        Ok(Self { addr, log_filter, grace_period })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

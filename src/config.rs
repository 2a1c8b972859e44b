//! API server configuration from environment variables.
//!
//! - `BIND_ADDR`: listen address (default 0.0.0.0)
//! - `PORT`: listen port (default 3000)
//! - `MAX_BATCH_SIZE`: samples accepted per batch request (default 500)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or unparseable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr),
            port: parse_or(&lookup, "PORT", defaults.port),
            max_batch_size: parse_or(&lookup, "MAX_BATCH_SIZE", defaults.max_batch_size),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 10;

/// App shell listener (`PORTAL_BIND_ADDR`, default `127.0.0.1:8080`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellConfig {
    pub bind_addr: SocketAddr,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8080));
        Self {
            bind_addr: lookup("PORTAL_BIND_ADDR")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default_addr),
        }
    }
}

/// Delay before a pending post-login redirect fires
/// (`PORTAL_REDIRECT_DELAY_MS`, default 10). Zero defers to the next
/// scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedirectConfig {
    pub delay: Duration,
}

impl RedirectConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            delay: Duration::from_millis(
                lookup("PORTAL_REDIRECT_DELAY_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
            ),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
        }
    }
}

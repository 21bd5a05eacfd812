use std::env;
use std::path::PathBuf;

pub const DEFAULT_SESSION_PATH: &str = "storage/session.json";

/// Location of the session profile file (`PORTAL_SESSION_PATH`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub session_path: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            session_path: lookup("PORTAL_SESSION_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH)),
        }
    }
}

//! Session store: the single source of truth for "is anyone signed in".
//!
//! Sessions are kept as three string entries, mirroring browser storage:
//! [`ACCESS_TOKEN_KEY`], [`REFRESH_TOKEN_KEY`] and [`USER_KEY`] (identity
//! JSON). A session is only visible when all three decode; anything else
//! reads as absent.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

use campusdesk_models::{Identity, Session};

use crate::error::StoreError;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

type Entries = BTreeMap<String, String>;

/// Narrow storage interface consulted by the route gate and written by the
/// login and logout flows.
pub trait SessionStore: Send + Sync {
    /// Writes all three entries or none of them.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Never fails: missing or malformed data reads as `None`.
    fn load(&self) -> Option<Session>;

    fn clear(&self) -> Result<(), StoreError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn encode(session: &Session, entries: &mut Entries) -> Result<(), StoreError> {
    let user = serde_json::to_string(&session.identity)?;
    entries.insert(ACCESS_TOKEN_KEY.to_string(), session.access_token.clone());
    entries.insert(REFRESH_TOKEN_KEY.to_string(), session.refresh_token.clone());
    entries.insert(USER_KEY.to_string(), user);
    Ok(())
}

fn decode(entries: &Entries) -> Option<Session> {
    let non_empty = |key: &str| entries.get(key).filter(|v| !v.is_empty()).cloned();

    let access_token = non_empty(ACCESS_TOKEN_KEY)?;
    let refresh_token = non_empty(REFRESH_TOKEN_KEY)?;
    let identity: Identity = match serde_json::from_str(&non_empty(USER_KEY)?) {
        Ok(identity) => identity,
        Err(e) => {
            debug!(error = %e, "Stored identity is malformed");
            return None;
        }
    };

    Some(Session::new(access_token, refresh_token, identity))
}

fn remove(entries: &mut Entries) {
    for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
        entries.remove(key);
    }
}

/// In-process store with the same entry layout as [`FileSessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<Entries>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw entries, e.g. to simulate a half-written or corrupt profile.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut entries = lock(&self.entries);
        let mut staged = entries.clone();
        encode(session, &mut staged)?;
        *entries = staged;
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        decode(&lock(&self.entries))
    }

    fn clear(&self) -> Result<(), StoreError> {
        remove(&mut lock(&self.entries));
        Ok(())
    }
}

/// Profile file holding a flat JSON object of string entries.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the profile, so other processes reading the file see either the old
/// or the new contents. Entries other than the three session keys are kept.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Existing entries for a read-modify-write. A corrupt profile is
    /// replaced rather than blocking login forever.
    fn entries_for_update(&self) -> Result<Entries, StoreError> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(StoreError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session profile");
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    #[instrument(skip(self, session), fields(path = %self.path.display(), role = %session.identity.role))]
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.entries_for_update()?;
        encode(session, &mut entries)?;
        self.write_entries(&entries)?;
        debug!("Session saved");
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        match self.read_entries() {
            Ok(entries) => decode(&entries),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Session profile unreadable");
                None
            }
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock);
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.entries_for_update()?;
        remove(&mut entries);
        self.write_entries(&entries)?;
        debug!("Session cleared");
        Ok(())
    }
}

//! The authenticated identity and the session persisted after login.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::roles::Role;

/// Who is signed in. The role is the only field used for routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Tokens plus identity issued by a successful login exchange.
///
/// `Debug` output redacts both tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub identity: Identity,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        identity: Identity,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            identity,
        }
    }

    /// Value for an `Authorization` header on API requests made with this session.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("identity", &self.identity)
            .finish()
    }
}

//! Route gate: admits a protected route only while a session is stored.

use std::sync::Arc;

use campusdesk_models::Session;

use crate::store::SessionStore;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Admit(Session),
    Redirect(&'static str),
}

/// Presence check over the session store. No role filtering happens here:
/// any signed-in user may open any protected route.
#[derive(Clone)]
pub struct RouteGate {
    store: Arc<dyn SessionStore>,
}

impl RouteGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn is_authorized(&self) -> bool {
        self.store.load().is_some()
    }

    pub fn check(&self) -> GateDecision {
        match self.store.load() {
            Some(session) => GateDecision::Admit(session),
            None => GateDecision::Redirect(LOGIN_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use campusdesk_models::{Identity, Role};

    fn session() -> Session {
        Session::new(
            "t1",
            "t2",
            Identity {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                role: Role::Faculty,
            },
        )
    }

    #[test]
    fn test_empty_store_redirects_to_login() {
        let gate = RouteGate::new(Arc::new(MemorySessionStore::new()));

        assert!(!gate.is_authorized());
        assert_eq!(gate.check(), GateDecision::Redirect("/login"));
    }

    #[test]
    fn test_stored_session_is_admitted() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session()).unwrap();
        let gate = RouteGate::new(store);

        assert!(gate.is_authorized());
        assert_eq!(gate.check(), GateDecision::Admit(session()));
    }

    #[test]
    fn test_partial_session_is_not_admitted() {
        let store = MemorySessionStore::with_entries([
            (ACCESS_TOKEN_KEY, "t1"),
            (REFRESH_TOKEN_KEY, "t2"),
        ]);
        let gate = RouteGate::new(Arc::new(store));

        assert!(!gate.is_authorized());
    }

    #[test]
    fn test_gate_follows_store_after_clear() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session()).unwrap();
        let gate = RouteGate::new(store.clone());
        assert!(gate.is_authorized());

        store.clear().unwrap();
        assert_eq!(gate.check(), GateDecision::Redirect(LOGIN_PATH));
    }
}

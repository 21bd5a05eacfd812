//! Login view controller: one login page's worth of state.
//!
//! Owns the loading flag and the [`RoleRouter`] for a single page lifetime.
//! Dropping the view tears the page down and cancels any pending redirect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use campusdesk_models::{Credentials, Identity, LoginForm, describe_validation_errors};
use campusdesk_observability::{track_login_failure, track_login_success};

use crate::error::LoginError;
use crate::exchange::SessionExchange;
use crate::router::{Navigator, RedirectState, RoleRouter};
use crate::store::SessionStore;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Outcome of [`LoginView::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Another submission was still in flight; nothing happened.
    Ignored,
    Completed(Result<Identity, LoginError>),
}

impl Submission {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Submission::Ignored => None,
            Submission::Completed(Ok(identity)) => {
                Some(Notification::success(format!("Welcome, {}!", identity.name)))
            }
            Submission::Completed(Err(e)) => Some(Notification::error(e.to_string())),
        }
    }
}

/// Holds the loading flag up until dropped, including on cancellation.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct LoginView<T, N> {
    exchange: Arc<SessionExchange<T>>,
    store: Arc<dyn SessionStore>,
    router: RoleRouter<N>,
    loading: AtomicBool,
}

impl<T: Transport, N: Navigator> LoginView<T, N> {
    pub fn new(
        exchange: Arc<SessionExchange<T>>,
        store: Arc<dyn SessionStore>,
        navigator: N,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            exchange,
            store,
            router: RoleRouter::new(navigator, redirect_delay),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn redirect_state(&self) -> RedirectState {
        self.router.state()
    }

    /// Runs one login attempt.
    ///
    /// On success the session is stored before the redirect is armed, and any
    /// redirect still pending from an earlier login is replaced. Every
    /// failure is returned as data; the store is left as it was.
    pub async fn submit(&self, form: LoginForm) -> Submission {
        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            warn!("Login already in progress, ignoring submit");
            return Submission::Ignored;
        };

        let outcome = self.attempt(form).await;
        match &outcome {
            Ok(identity) => {
                info!(role = %identity.role, email = %identity.email, "Login succeeded");
                track_login_success(identity.role.as_str());
            }
            Err(e) => {
                warn!(kind = e.kind(), detail = e.detail(), "Login failed");
                track_login_failure(e.kind());
            }
        }
        Submission::Completed(outcome)
    }

    async fn attempt(&self, form: LoginForm) -> Result<Identity, LoginError> {
        let credentials = Credentials::try_from(form)
            .map_err(|e| LoginError::Validation(describe_validation_errors(&e)))?;

        let session = self.exchange.login(&credentials).await?;

        self.store
            .save(&session)
            .map_err(|e| LoginError::Storage(e.to_string()))?;

        // The newest session decides where the user lands.
        self.router.cancel();
        if !self.router.arm(session.identity.role) {
            warn!(role = %session.identity.role, "Post-login redirect was not scheduled");
        }
        Ok(session.identity)
    }
}

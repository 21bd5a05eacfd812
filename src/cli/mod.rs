//! Command handlers behind `campusdesk-cli`.
//!
//! The CLI shares the shell's session profile, so signing in here signs the
//! browser shell in too.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::sync::mpsc;
use tracing::{debug, info};

use campusdesk_auth::{
    LoginView, SessionExchange, SessionStore, StoreError, Submission, Transport,
    landing_path_for,
};
use campusdesk_models::{Identity, LoginForm, Session};
use campusdesk_observability::track_logout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub landing_path: String,
}

/// Signs in and stores the session, waiting for the post-login redirect.
///
/// Login failures are returned as [`LoginError`](campusdesk_auth::LoginError) inside the `anyhow` error.
pub async fn login<T: Transport>(
    exchange: Arc<SessionExchange<T>>,
    store: Arc<dyn SessionStore>,
    form: LoginForm,
    redirect_delay: Duration,
) -> anyhow::Result<LoginOutcome> {
    let (navigator, mut navigation) = mpsc::unbounded_channel();
    let view = LoginView::new(exchange, store, navigator, redirect_delay);

    let identity = match view.submit(form).await {
        Submission::Completed(outcome) => outcome?,
        Submission::Ignored => bail!("A login is already in progress"),
    };

    let landing_path = navigation
        .recv()
        .await
        .unwrap_or_else(|| landing_path_for(identity.role).to_string());

    Ok(LoginOutcome {
        identity,
        landing_path,
    })
}

/// Clears the stored session. Returns whether one was present.
pub fn logout(store: &dyn SessionStore) -> Result<bool, StoreError> {
    let was_signed_in = store.load().is_some();
    store.clear()?;
    if was_signed_in {
        track_logout();
        info!("Signed out");
    }
    Ok(was_signed_in)
}

pub fn whoami(store: &dyn SessionStore) -> Option<Identity> {
    store.load().map(|session| session.identity)
}

/// Exchanges the stored refresh token for new tokens and stores them.
pub async fn refresh<T: Transport>(
    exchange: &SessionExchange<T>,
    store: &dyn SessionStore,
) -> anyhow::Result<Session> {
    let Some(current) = store.load() else {
        bail!("Not logged in");
    };

    let session = exchange.refresh(&current).await.map_err(|e| {
        debug!(kind = e.kind(), detail = e.detail(), "Refresh failed");
        anyhow::anyhow!(e.to_string())
    })?;
    store
        .save(&session)
        .context("Could not save the refreshed session")?;

    info!(email = %session.identity.email, "Session refreshed");
    Ok(session)
}

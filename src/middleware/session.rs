use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use campusdesk_auth::{GateDecision, LOGIN_PATH};
use campusdesk_models::Session;

use crate::state::AppState;

/// Admits the request only while a session is stored.
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/admin", get(admin_dashboard))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_session));
/// ```
pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match state.gate.check() {
        GateDecision::Admit(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        GateDecision::Redirect(path) => {
            debug!(uri = %req.uri(), "No stored session, redirecting to login");
            Redirect::to(path).into_response()
        }
    }
}

/// The session admitted by [`require_session`].
///
/// Outside a gated route it rejects with the same redirect to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

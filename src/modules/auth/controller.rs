use std::sync::Arc;
use std::time::Duration;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use campusdesk_auth::{LOGIN_PATH, LoginError, LoginView, Submission, landing_path_for};
use campusdesk_core::AppError;
use campusdesk_models::{LoginForm, Role};
use campusdesk_observability::track_logout;

use crate::state::AppState;

/// Extra time allowed for the deferred redirect to arrive after a
/// successful login before falling back to the role's landing path.
const NAVIGATION_GRACE: Duration = Duration::from_secs(1);

pub async fn login_page() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
<head><title>Sign in | Campusdesk</title></head>
<body>
  <h1>Sign in</h1>
  <form method="post" action="/login">
    <label>Role
      <select name="role">
        <option value="">Select a role</option>
        <option value="Admin">Admin</option>
        <option value="Faculty">Faculty</option>
        <option value="Student">Student</option>
      </select>
    </label>
    <label>Email <input type="email" name="email"></label>
    <label>Password <input type="password" name="password"></label>
    <button type="submit">Sign in</button>
  </form>
</body>
</html>"#,
    )
}

/// Runs one login attempt through a request-scoped [`LoginView`].
///
/// The view lives exactly as long as this handler. If the client goes away
/// before the redirect fires, the handler future is dropped and the pending
/// navigation is cancelled with it.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (navigator, mut navigation) = mpsc::unbounded_channel();
    let view = LoginView::new(
        Arc::clone(&state.exchange),
        Arc::clone(&state.store),
        navigator,
        state.redirect_config.delay,
    );

    let identity = match view.submit(form).await {
        Submission::Ignored => {
            return Err(AppError::conflict(anyhow::anyhow!(
                "A login is already in progress"
            )));
        }
        Submission::Completed(outcome) => outcome.map_err(login_error)?,
    };

    let wait = state.redirect_config.delay + NAVIGATION_GRACE;
    let target = await_navigation(&mut navigation, wait, identity.role).await;

    info!(%target, "Welcome, {}!", identity.name);
    Ok(Redirect::to(&target).into_response())
}

/// Waits for the deferred redirect, falling back to the role's landing path
/// if nothing arrives within `wait`.
async fn await_navigation(
    navigation: &mut mpsc::UnboundedReceiver<String>,
    wait: Duration,
    role: Role,
) -> String {
    match tokio::time::timeout(wait, navigation.recv()).await {
        Ok(Some(path)) => path,
        _ => {
            let fallback = landing_path_for(role);
            warn!(%role, fallback, "Post-login redirect did not arrive, using landing path");
            fallback.to_string()
        }
    }
}

fn login_error(error: LoginError) -> AppError {
    let message = anyhow::anyhow!(error.to_string());
    match error {
        LoginError::Validation(_) => AppError::unprocessable(message),
        LoginError::InvalidCredentials(_) => AppError::unauthorized(message),
        LoginError::Unreachable(_) | LoginError::MalformedResponse(_) => {
            AppError::bad_gateway(message)
        }
        LoginError::Storage(_) => AppError::internal(message),
    }
}

#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.store.clear()?;
    track_logout();
    info!("Signed out");
    Ok(Redirect::to(LOGIN_PATH))
}

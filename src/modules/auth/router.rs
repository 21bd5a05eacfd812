use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login, login_page, logout};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

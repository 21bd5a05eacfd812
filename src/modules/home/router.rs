use axum::{Router, routing::get};

use super::controller::{health, home};
use crate::state::AppState;

pub fn init_home_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

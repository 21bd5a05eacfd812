use axum::http::{HeaderValue, header};
use axum::{Router, middleware};
use tower_http::set_header::SetResponseHeaderLayer;

use campusdesk_observability::{logging_middleware, metrics_middleware};

use crate::middleware::session::require_session;
use crate::modules::auth::router::init_auth_router;
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::home::router::init_home_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(init_home_router())
        .merge(init_auth_router())
        .nest(
            "/dashboard",
            init_dashboard_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campusdesk::router::init_router;
use campusdesk::state::AppState;
use campusdesk_auth::{HttpTransport, SessionExchange, SessionStore};
use campusdesk_config::{ApiConfig, RedirectConfig};
use campusdesk_models::{Identity, Role, Session};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const REFRESH_ENDPOINT: &str = "/api/auth/refresh";

pub fn identity(role: Role) -> Identity {
    Identity {
        name: "A".to_string(),
        email: "a@b.com".to_string(),
        role,
    }
}

pub fn session(role: Role) -> Session {
    Session::new("t1", "t2", identity(role))
}

pub fn login_success_body(role: &str) -> Value {
    json!({
        "accessToken": "t1",
        "refreshToken": "t2",
        "user": {"name": "A", "email": "a@b.com", "role": role}
    })
}

/// Base URL the exchange should use for a mock auth API.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn exchange(base_url: &str) -> SessionExchange<HttpTransport> {
    let config = ApiConfig::new(base_url);
    let transport = HttpTransport::new(config.timeout).unwrap();
    SessionExchange::new(transport, config)
}

pub async fn mock_login(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(LOGIN_ENDPOINT))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub fn setup_test_app(base_url: &str, store: Arc<dyn SessionStore>) -> Router {
    let state = AppState::new(exchange(base_url), store, RedirectConfig::default());
    init_router(state)
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

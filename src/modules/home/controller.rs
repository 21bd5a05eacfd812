use axum::Json;
use axum::response::Html;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn home() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
<head><title>Campusdesk</title></head>
<body>
  <h1>Campusdesk</h1>
  <p>School portal for administrators, faculty and students.</p>
  <a href="/login">Sign in</a>
</body>
</html>"#,
    )
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

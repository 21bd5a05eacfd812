use axum::{Router, routing::get};

use super::controller::{admin_dashboard, faculty_dashboard, student_dashboard};
use crate::state::AppState;

/// Dashboard routes, mounted under `/dashboard` behind `require_session`.
pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/faculty", get(faculty_dashboard))
        .route("/student", get(student_dashboard))
}

//! # Campusdesk
//!
//! The app shell of the Campusdesk school portal: a login page, the gated
//! role dashboards and a command-line client sharing the same session.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── campusdesk-core/           # AppError, serde helpers
//! ├── campusdesk-config/         # Env-driven config structs
//! ├── campusdesk-models/         # Role, Identity, Session, LoginForm
//! ├── campusdesk-auth/           # Exchange, store, role router, gate, login view
//! └── campusdesk-observability/  # Tracing, request logging, metrics
//! src/
//! ├── cli/          # CLI command handlers
//! ├── middleware/   # Route gate middleware and session extractor
//! └── modules/      # home, auth (login/logout), dashboard
//! ```
//!
//! ## Routes
//!
//! | Route | Access | Description |
//! |-------|--------|-------------|
//! | `GET /` | public | Home page |
//! | `GET /login` | public | Login form |
//! | `POST /login` | public | Submit credentials, `303` to the role's dashboard |
//! | `POST /logout` | public | Clear the session, `303` to `/login` |
//! | `GET /dashboard/{admin,faculty,student}` | signed in | Dashboards |
//! | `GET /health` | public | Liveness probe |
//! | `GET /metrics` | public | Prometheus metrics when observability is enabled |
//!
//! ## Environment Variables
//!
//! ```bash
//! PORTAL_API_URL=http://localhost:3000/api
//! PORTAL_LOGIN_TIMEOUT_SECS=10
//! PORTAL_SESSION_PATH=storage/session.json
//! PORTAL_BIND_ADDR=127.0.0.1:8080
//! PORTAL_REDIRECT_DELAY_MS=10
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command handlers for `campusdesk-cli`
//! - [`middleware`]: Route gate middleware
//! - [`modules`]: Feature modules (home, auth, dashboard)
//! - [`router`]: Main application router
//! - [`state`]: Shared application state

pub mod cli;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

// Re-export workspace crates for convenience
pub use campusdesk_auth;
pub use campusdesk_config;
pub use campusdesk_core;
pub use campusdesk_models;

//! # Campusdesk Auth
//!
//! The authentication and session-gating core of the Campusdesk portal.
//!
//! This crate provides:
//!
//! - [`exchange`]: Trades validated credentials for a [`Session`](campusdesk_models::Session)
//! - [`transport`]: The HTTP seam the exchange talks through, with a `reqwest` implementation
//! - [`store`]: Where the session lives between page loads and restarts
//! - [`router`]: Role to landing path mapping and the deferred post-login redirect
//! - [`gate`]: Presence check guarding protected routes
//! - [`view`]: The login page controller tying the pieces together
//! - [`error`]: Login and storage error types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use campusdesk_auth::{FileSessionStore, HttpTransport, LoginView, SessionExchange};
//! use campusdesk_config::ApiConfig;
//!
//! let config = ApiConfig::from_env();
//! let exchange = Arc::new(SessionExchange::new(HttpTransport::new(config.timeout)?, config));
//! let store = Arc::new(FileSessionStore::new("storage/session.json"));
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let view = LoginView::new(exchange, store, tx, Duration::from_millis(10));
//! let outcome = view.submit(form).await;
//! if let Some(path) = rx.recv().await {
//!     println!("Navigate to {path}");
//! }
//! ```

pub mod error;
pub mod exchange;
pub mod gate;
pub mod router;
pub mod store;
pub mod transport;
pub mod view;

// Re-export commonly used types at crate root
pub use error::{LoginError, StoreError};
pub use exchange::SessionExchange;
pub use gate::{GateDecision, LOGIN_PATH, RouteGate};
pub use router::{
    HOME_PATH, Navigator, RedirectState, RoleRouter, landing_path, landing_path_for,
};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use view::{LoginView, Notification, NotificationKind, Submission};

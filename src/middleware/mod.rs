//! Middleware and extractors for protected routes.
//!
//! - [`session`]: The route gate as axum middleware, plus the
//!   [`CurrentSession`](session::CurrentSession) extractor
//!
//! # Flow
//!
//! 1. `require_session` asks the [`RouteGate`](campusdesk_auth::RouteGate)
//!    whether a session is stored
//! 2. No session: `303 See Other` to `/login`, the handler never runs
//! 3. Session present: it is placed in request extensions and the handler
//!    reads it through `CurrentSession`

pub mod session;

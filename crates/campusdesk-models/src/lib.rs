//! # Campusdesk Models
//!
//! Data structures carried by the authentication core.
//!
//! # Modules
//!
//! - [`roles`]: The closed set of portal roles
//! - [`session`]: The authenticated identity and the persisted session
//! - [`auth`]: The login form, validated credentials and login endpoint wire DTOs
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_models::{Credentials, LoginForm, Role};
//!
//! let form = LoginForm {
//!     role: "Student".to_string(),
//!     email: "a@b.com".to_string(),
//!     password: "x".to_string(),
//! };
//! let credentials = Credentials::try_from(form)?;
//! assert_eq!(credentials.role, Role::Student);
//! ```

pub mod auth;
pub mod roles;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    Credentials, ErrorBody, LoginForm, LoginResponseBody, RefreshResponseBody, UserPayload,
    describe_validation_errors,
};
pub use roles::{Role, UnknownRole};
pub use session::{Identity, Session};

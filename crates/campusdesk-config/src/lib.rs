//! # Campusdesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`api`]: Authentication API location and request timeout
//! - [`storage`]: Where the session profile lives on disk
//! - [`shell`]: App shell bind address and redirect timing
//!
//! Every struct has a `from_env()` constructor plus a `from_lookup()` variant
//! that reads through a closure, so defaults can be exercised without
//! touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{ApiConfig, StorageConfig};
//!
//! let api = ApiConfig::from_env();
//! println!("Logging in against {}", api.login_url());
//! ```

pub mod api;
pub mod shell;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use shell::{RedirectConfig, ShellConfig};
pub use storage::StorageConfig;

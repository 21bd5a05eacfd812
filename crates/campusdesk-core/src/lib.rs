//! # Campusdesk Core
//!
//! Core types shared by the Campusdesk shell and its supporting crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::errors::AppError;
//!
//! let error = AppError::unauthorized(anyhow::anyhow!("Invalid credentials"));
//! ```

pub mod errors;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;

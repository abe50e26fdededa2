//! Shared types for the league services
//!
//! Domain models of the season discipline engine, the unified error system
//! and small utilities used across crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

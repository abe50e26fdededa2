//! Data models
//!
//! Shared between league-server and its API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod card;
pub mod card_summary;
pub mod fixture;
pub mod suspension;

// Re-exports
pub use card::*;
pub use card_summary::*;
pub use fixture::*;
pub use suspension::*;

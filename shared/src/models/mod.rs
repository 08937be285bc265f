//! Data models
//!
//! Rows, joined read views, request payloads and single-field update
//! enums for the three entities. DB row types use
//! `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (BIGSERIAL).

pub mod department;
pub mod employee;
pub mod location;

// Re-exports
pub use department::*;
pub use employee::*;
pub use location::*;

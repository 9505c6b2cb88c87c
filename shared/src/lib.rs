//! Types and logic shared across the yard dashboard: wire DTOs for the
//! drivers API, the record lifecycle rules, timestamp handling, and the
//! history export projection.
//!
//! Everything here is framework-free so it tests natively; the frontend
//! crate wraps it in components and HTTP calls.

pub mod export;
pub mod models;
pub mod records;
pub mod time;

pub use models::*;
pub use records::*;

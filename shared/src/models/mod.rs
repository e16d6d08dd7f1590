//! Data models
//!
//! Internal record shapes shared between the client crate and consumers.

pub mod ticket;

// Re-exports
pub use ticket::*;

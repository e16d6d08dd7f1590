//! Shared types for the CRM client workspace
//!
//! Common types used across crates: the internal ticket model, the
//! external platform's record and envelope shapes, and the token
//! endpoint DTOs.

pub mod client;
pub mod crm;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use crm::envelope::{DeleteResponse, ObjectData, ObjectResponse, QueryResponse, RecordId};
pub use crm::record::{CreateCaseRequest, CrmTicket, FieldValue};
pub use models::ticket::Ticket;

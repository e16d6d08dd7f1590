//! CRM Client - typed access to the hosted CRM platform
//!
//! Query (XOQL) and CRUD calls against the platform's REST data API,
//! with an explicit session lifecycle and a demo-data fallback for
//! anonymous or failed reads.

pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod tickets;

pub use config::{AuthConfig, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use gateway::{CrmGateway, HttpCrmGateway};
pub use session::{Session, SessionManager, SessionStorage};
pub use tickets::{FailurePolicy, Operation, TicketIdStore, TicketService, demo_tickets};

// Re-export shared types for convenience
pub use shared::crm::{
    CreateCaseRequest, CrmTicket, DeleteResponse, FieldValue, ObjectData, ObjectResponse,
    QueryResponse, RecordId,
};
pub use shared::models::ticket::Ticket;

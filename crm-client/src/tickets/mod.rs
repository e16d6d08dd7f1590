//! Ticket access facade
//!
//! Composes the gateway and the field codec. The failure policy is one
//! table: reads degrade to the demo data set, writes surface every
//! error named after the operation that failed.

mod mock;
mod tracker;

pub use mock::demo_tickets;
pub use tracker::TicketIdStore;

use shared::crm::{CreateCaseRequest, CrmTicket};
use shared::models::ticket::Ticket;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::CrmGateway;

/// The five most recent service cases, newest first.
const RECENT_CASES_XOQL: &str = "SELECT id, name, caseType, caseStatus, caseDescription, contactName, contactPhoneNum, remark FROM serviceCase ORDER BY createdAt DESC LIMIT 5";

/// Facade operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// What happens when the platform call behind an operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Swallow the error and serve demo data (read path).
    Degrade,
    /// Surface the error to the caller (write path).
    Propagate,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::List => "list tickets",
            Operation::Get => "fetch ticket",
            Operation::Create => "create ticket",
            Operation::Update => "update ticket",
            Operation::Delete => "delete ticket",
        }
    }

    /// The failure-policy table: reads degrade, writes propagate.
    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            Operation::List | Operation::Get => FailurePolicy::Degrade,
            Operation::Create | Operation::Update | Operation::Delete => FailurePolicy::Propagate,
        }
    }
}

/// Ticket facade over a gateway implementation.
///
/// Owns the authoritative ticket list for the current view; anonymous
/// gateways are served the demo set without any network traffic.
pub struct TicketService<G> {
    gateway: G,
    entity: String,
    create_entity_type: Option<String>,
    tracker: Option<TicketIdStore>,
}

impl<G: CrmGateway> TicketService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            entity: crate::gateway::entity::SERVICE_CASE.to_string(),
            create_entity_type: None,
            tracker: None,
        }
    }

    /// Build a facade carrying the config's entity settings.
    pub fn from_config(gateway: G, config: &ClientConfig) -> Self {
        Self {
            gateway,
            entity: config.case_entity.clone(),
            create_entity_type: config.create_entity_type.clone(),
            tracker: None,
        }
    }

    /// Record server-assigned ids of tickets created through the API.
    pub fn with_id_tracker(mut self, tracker: TicketIdStore) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Apply the failure-policy table to an operation outcome.
    fn settle<T>(
        &self,
        op: Operation,
        result: ClientResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> ClientResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => match op.failure_policy() {
                FailurePolicy::Degrade => {
                    tracing::warn!(op = op.name(), error = %err, "degrading to demo data");
                    Ok(fallback())
                }
                FailurePolicy::Propagate => Err(ClientError::Operation {
                    op: op.name(),
                    source: Box::new(err),
                }),
            },
        }
    }

    /// Fetch the current ticket list.
    pub async fn list(&self) -> ClientResult<Vec<Ticket>> {
        if !self.gateway.is_authenticated() {
            tracing::debug!("no session, serving demo tickets");
            return Ok(demo_tickets());
        }
        let result = self.list_remote().await;
        self.settle(Operation::List, result, demo_tickets)
    }

    async fn list_remote(&self) -> ClientResult<Vec<Ticket>> {
        let records = self.gateway.query(RECENT_CASES_XOQL).await?;
        Ok(records.into_iter().map(Ticket::from).collect())
    }

    /// Read a single ticket by id.
    pub async fn get(&self, id: &str) -> ClientResult<Option<Ticket>> {
        if !self.gateway.is_authenticated() {
            return Ok(demo_lookup(id));
        }
        let result = self.get_remote(id).await;
        self.settle(Operation::Get, result, || demo_lookup(id))
    }

    async fn get_remote(&self, id: &str) -> ClientResult<Option<Ticket>> {
        let response = self.gateway.get(&self.entity, id).await?;
        Ok(response.record::<CrmTicket>()?.map(Ticket::from))
    }

    /// Create a ticket. Anonymous sessions echo the input unchanged; an
    /// authenticated create returns the input with the server-assigned
    /// id.
    pub async fn create(&self, ticket: Ticket) -> ClientResult<Ticket> {
        if !self.gateway.is_authenticated() {
            tracing::debug!("no session, create is local only");
            return Ok(ticket);
        }
        let result = self.create_remote(&ticket).await;
        self.settle(Operation::Create, result, || ticket)
    }

    async fn create_remote(&self, ticket: &Ticket) -> ClientResult<Ticket> {
        let mut request = CreateCaseRequest::from_ticket(ticket);
        request.entity_type = self.create_entity_type.clone();
        let response = self
            .gateway
            .create(&self.entity, serde_json::to_value(&request)?)
            .await?;
        let id = response.id();
        if !response.is_success() {
            return Err(ClientError::InvalidResponse(
                response
                    .message
                    .unwrap_or_else(|| "API did not report success".into()),
            ));
        }
        let id = id.ok_or_else(|| {
            ClientError::InvalidResponse("create response carries no record id".into())
        })?;
        let mut created = ticket.clone();
        created.id = id;
        if let Some(tracker) = &self.tracker {
            if let Err(err) = tracker.record(&created.id) {
                tracing::warn!(error = %err, "failed to record created ticket id");
            }
        }
        Ok(created)
    }

    /// Update a ticket. Anonymous sessions echo the input unchanged.
    pub async fn update(&self, ticket: Ticket) -> ClientResult<Ticket> {
        if !self.gateway.is_authenticated() {
            tracing::debug!("no session, update is local only");
            return Ok(ticket);
        }
        let result = self.update_remote(&ticket).await.map(|_| ticket.clone());
        self.settle(Operation::Update, result, || ticket)
    }

    async fn update_remote(&self, ticket: &Ticket) -> ClientResult<()> {
        let request = CreateCaseRequest::from_ticket(ticket);
        let response = self
            .gateway
            .update(&self.entity, &ticket.id, serde_json::to_value(&request)?)
            .await?;
        if !response.is_success() {
            return Err(ClientError::InvalidResponse(
                response
                    .message
                    .unwrap_or_else(|| "API did not report success".into()),
            ));
        }
        Ok(())
    }

    /// Delete a ticket. Anonymous sessions report local-only success.
    pub async fn delete(&self, id: &str) -> ClientResult<bool> {
        if !self.gateway.is_authenticated() {
            tracing::debug!("no session, delete is local only");
            return Ok(true);
        }
        let result = self.delete_remote(id).await;
        self.settle(Operation::Delete, result, || true)
    }

    async fn delete_remote(&self, id: &str) -> ClientResult<bool> {
        let response = self.gateway.delete(&self.entity, id).await?;
        if response.is_deleted() {
            Ok(true)
        } else {
            Err(ClientError::InvalidResponse(
                response
                    .msg
                    .unwrap_or_else(|| "API did not report success".into()),
            ))
        }
    }
}

fn demo_lookup(id: &str) -> Option<Ticket> {
    demo_tickets().into_iter().find(|ticket| ticket.id == id)
}

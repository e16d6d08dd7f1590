//! CRM gateway - authenticated REST calls against the platform data API
//!
//! Every call is single-shot: no retry, no backoff. Failures surface to
//! the caller with the taxonomy in [`ClientError`]; the per-request
//! timeout aborts the in-flight request.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::crm::{CrmTicket, DeleteResponse, ObjectResponse, QueryResponse};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Entity type identifiers on the platform.
pub mod entity {
    pub const SERVICE_CASE: &str = "serviceCase";
    pub const ACCOUNT: &str = "account";
    pub const CONTACT: &str = "contact";
    pub const LEAD: &str = "lead";
    pub const OPPORTUNITY: &str = "opportunity";
    pub const TICKET: &str = "ticket";
}

/// Path prefix of the platform's REST data API.
const DATA_API_PREFIX: &str = "/crm-api/rest/data/v2.0";

/// Gateway seam for the platform's data API.
///
/// The HTTP implementation talks to the remote platform; tests
/// substitute scripted fakes.
#[async_trait]
pub trait CrmGateway: Send + Sync {
    /// True iff the gateway carries a session token.
    fn is_authenticated(&self) -> bool;

    /// Run an XOQL query and return the unwrapped records.
    async fn query(&self, xoql: &str) -> ClientResult<Vec<CrmTicket>>;

    /// Read a single record by id.
    async fn get(&self, entity_type: &str, id: &str) -> ClientResult<ObjectResponse>;

    /// Create a record; the body is sent as `{"data": ...}`.
    async fn create(&self, entity_type: &str, data: Value) -> ClientResult<ObjectResponse>;

    /// Patch a record by id; the body is sent as `{"data": ...}`.
    async fn update(&self, entity_type: &str, id: &str, data: Value)
    -> ClientResult<ObjectResponse>;

    /// Delete a record by id.
    async fn delete(&self, entity_type: &str, id: &str) -> ClientResult<DeleteResponse>;
}

/// HTTP gateway backed by reqwest.
///
/// Built for an explicit session (`None` = anonymous); every operation
/// fails with [`ClientError::Auth`] before any I/O when no token is
/// present.
#[derive(Debug, Clone)]
pub struct HttpCrmGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout_ms: u64,
    enable_logging: bool,
}

impl HttpCrmGateway {
    pub fn new(config: &ClientConfig, session: Option<&Session>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: session.map(|session| session.token.clone()),
            timeout_ms: config.timeout_ms,
            enable_logging: config.enable_logging,
        })
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, DATA_API_PREFIX, path)
    }

    fn bearer(&self) -> ClientResult<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
            .ok_or_else(|| ClientError::Auth("no active session".into()))
    }

    fn transport(&self, err: reqwest::Error) -> ClientError {
        ClientError::transport(err, self.timeout_ms)
    }

    async fn handle<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if self.enable_logging {
            tracing::debug!(status = %status, "CRM response");
        }
        let body = response.text().await.map_err(|err| self.transport(err))?;
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Auth(body));
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(Into::into)
    }
}

#[async_trait]
impl CrmGateway for HttpCrmGateway {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn query(&self, xoql: &str) -> ClientResult<Vec<CrmTicket>> {
        let auth = self.bearer()?;
        let url = self.data_url("/query/xoql");
        if self.enable_logging {
            tracing::debug!(method = "POST", url = %url, body = xoql, "sending CRM request");
        }
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .form(&[("xoql", xoql)])
            .send()
            .await
            .map_err(|err| self.transport(err))?;
        let envelope: QueryResponse<CrmTicket> = self.handle(response).await?;
        let records = envelope.records();
        if self.enable_logging && !records.is_empty() {
            tracing::debug!(count = records.len(), "query returned records");
        }
        Ok(records)
    }

    async fn get(&self, entity_type: &str, id: &str) -> ClientResult<ObjectResponse> {
        let auth = self.bearer()?;
        let url = self.data_url(&format!("/xobjects/{}/{}", entity_type, id));
        if self.enable_logging {
            tracing::debug!(method = "GET", url = %url, "sending CRM request");
        }
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|err| self.transport(err))?;
        self.handle(response).await
    }

    async fn create(&self, entity_type: &str, data: Value) -> ClientResult<ObjectResponse> {
        let auth = self.bearer()?;
        let url = self.data_url(&format!("/xobjects/{}", entity_type));
        let body = serde_json::json!({ "data": data });
        if self.enable_logging {
            tracing::debug!(method = "POST", url = %url, body = %body, "sending CRM request");
        }
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.transport(err))?;
        self.handle(response).await
    }

    async fn update(
        &self,
        entity_type: &str,
        id: &str,
        data: Value,
    ) -> ClientResult<ObjectResponse> {
        let auth = self.bearer()?;
        let url = self.data_url(&format!("/xobjects/{}/{}", entity_type, id));
        let body = serde_json::json!({ "data": data });
        if self.enable_logging {
            tracing::debug!(method = "PATCH", url = %url, body = %body, "sending CRM request");
        }
        let response = self
            .client
            .patch(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.transport(err))?;
        self.handle(response).await
    }

    async fn delete(&self, entity_type: &str, id: &str) -> ClientResult<DeleteResponse> {
        let auth = self.bearer()?;
        let url = self.data_url(&format!("/xobjects/{}/{}", entity_type, id));
        if self.enable_logging {
            tracing::debug!(method = "DELETE", url = %url, "sending CRM request");
        }
        let response = self
            .client
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|err| self.transport(err))?;
        self.handle(response).await
    }
}

//! Response envelopes for the platform's data API
//!
//! The query endpoint answers with several envelope variants for the
//! same logical result (`{data: {records: [...]}}`, `{data: [...]}`,
//! `{records: [...]}`). [`QueryResponse::records`] is the single
//! matcher over all of them; anything unrecognized decodes to the
//! empty list rather than failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope for XOQL query responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<QueryData<T>>,
    #[serde(default)]
    pub records: Option<Vec<T>>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// The `data` member of a query envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QueryData<T> {
    /// `{"data": [...]}`
    List(Vec<T>),
    /// `{"data": {"records": [...], "totalCount": n}}`
    Page(QueryPage<T>),
    /// Any other shape; treated as an empty result.
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct QueryPage<T> {
    #[serde(default)]
    pub records: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> QueryResponse<T> {
    /// Unwrap the records, whichever envelope variant carried them.
    ///
    /// Precedence: `data.records`, then a bare `data` array, then the
    /// top-level `records`. A `data` member of any other shape means an
    /// empty result, matching the platform's observed behavior.
    pub fn records(self) -> Vec<T> {
        match self.data {
            Some(QueryData::List(records)) => records,
            Some(QueryData::Page(page)) => page.records,
            Some(QueryData::Other(_)) => Vec::new(),
            None => self.records.unwrap_or_default(),
        }
    }
}

/// Record id as delivered by the platform (string or number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    pub fn as_string(&self) -> String {
        match self {
            RecordId::Text(id) => id.clone(),
            RecordId::Number(id) => id.to_string(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            RecordId::Text(id) => Value::String(id.clone()),
            RecordId::Number(id) => Value::Number((*id).into()),
        }
    }
}

/// Envelope for xobjects create/update/read responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ObjectData>,
}

/// Payload of an xobjects response: the record id plus whatever other
/// fields the platform echoes back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectData {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ObjectResponse {
    /// Success unless the platform explicitly says otherwise.
    pub fn is_success(&self) -> bool {
        self.success != Some(false)
    }

    /// Server-assigned record id, coerced to a string.
    pub fn id(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|data| data.id.as_ref())
            .map(RecordId::as_string)
    }

    /// Decode the payload into a record type.
    pub fn record<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        let Some(data) = &self.data else {
            return Ok(None);
        };
        let mut map = data.extra.clone();
        if let Some(id) = &data.id {
            map.insert("id".to_string(), id.to_value());
        }
        serde_json::from_value(Value::Object(map)).map(Some)
    }
}

/// Envelope for xobjects delete responses, which use a `{code, msg}`
/// shape unlike the other object endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<ObjectData>,
}

impl DeleteResponse {
    /// The platform signals delete success with code "200".
    pub fn is_deleted(&self) -> bool {
        self.code.as_deref() == Some("200")
    }
}

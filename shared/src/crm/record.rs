//! Platform record shape and the field codec
//!
//! The platform delivers scalar fields either bare or wrapped in a
//! single-element list, and enumerated fields as a list of one display
//! label. [`FieldValue`] tolerates every observed variant; the
//! [`From`] conversions map between the wire shape and [`Ticket`].
//! Decoding never fails: unrecognized labels and malformed shapes
//! collapse to best-effort strings.

use serde::{Deserialize, Serialize};

use crate::models::ticket::{Ticket, status_table, type_table};

/// A field as delivered by the platform: a bare string, a list of
/// strings, a bare number, or absent/null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Many(Vec<String>),
    Number(f64),
    #[default]
    Missing,
}

impl FieldValue {
    /// First element when a list, the value itself otherwise.
    /// Empty lists and missing values decode to the empty string.
    pub fn first(&self) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Many(values) => values.first().cloned().unwrap_or_default(),
            FieldValue::Number(value) => format!("{}", value),
            FieldValue::Missing => String::new(),
        }
    }
}

/// Service case record as delivered by the query endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrmTicket {
    pub id: FieldValue,
    pub name: FieldValue,
    pub case_type: FieldValue,
    pub case_status: FieldValue,
    pub case_description: FieldValue,
    pub contact_name: FieldValue,
    pub contact_phone_num: FieldValue,
    pub remark: FieldValue,
}

impl From<CrmTicket> for Ticket {
    fn from(crm: CrmTicket) -> Self {
        let raw_type = crm.case_type.first();
        let raw_status = crm.case_status.first();
        Self {
            id: crm.id.first(),
            title: crm.name.first(),
            // Labels map back to codes; anything unmapped passes through.
            type_code: type_table()
                .code(&raw_type)
                .map(str::to_owned)
                .unwrap_or(raw_type),
            status_code: status_table()
                .code(&raw_status)
                .map(str::to_owned)
                .unwrap_or(raw_status),
            description: crm.case_description.first(),
            contact: crm.contact_name.first(),
            phone: crm.contact_phone_num.first(),
            remarks: crm.remark.first(),
        }
    }
}

impl From<&Ticket> for CrmTicket {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: FieldValue::Text(ticket.id.clone()),
            name: FieldValue::Text(ticket.title.clone()),
            // The enumerated fields are the only ones the platform
            // expects list-wrapped.
            case_type: FieldValue::Many(vec![ticket.type_code.clone()]),
            case_status: FieldValue::Many(vec![ticket.status_code.clone()]),
            case_description: FieldValue::Text(ticket.description.clone()),
            contact_name: FieldValue::Text(ticket.contact.clone()),
            contact_phone_num: FieldValue::Text(ticket.phone.clone()),
            remark: FieldValue::Text(ticket.remarks.clone()),
        }
    }
}

/// Flattened write shape for create/update bodies.
///
/// Codes stay plain strings here; only the query side array-wraps them.
/// `entity_type` is the tenant-specific discriminator some deployments
/// require on create calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub name: String,
    pub case_description: String,
    pub contact_name: String,
    pub contact_phone_num: String,
    pub remark: String,
    pub case_type: String,
    pub case_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl CreateCaseRequest {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            name: ticket.title.clone(),
            case_description: ticket.description.clone(),
            contact_name: ticket.contact.clone(),
            contact_phone_num: ticket.phone.clone(),
            remark: ticket.remarks.clone(),
            case_type: ticket.type_code.clone(),
            case_status: ticket.status_code.clone(),
            entity_type: None,
        }
    }
}

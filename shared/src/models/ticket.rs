//! Ticket model (工单)

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Ticket type codes and their display labels.
pub const TICKET_TYPES: [(&str, &str); 3] = [("1", "咨询"), ("3", "维修"), ("5", "投诉")];

/// Ticket status codes and their display labels.
pub const TICKET_STATUSES: [(&str, &str); 3] = [("1", "待分配"), ("3", "处理中"), ("5", "已完成")];

/// Bidirectional code/label table, built once. O(1) lookups in both
/// directions. Extending a table is a data change, not a code change.
#[derive(Debug)]
pub struct CodeTable {
    by_code: HashMap<&'static str, &'static str>,
    by_label: HashMap<&'static str, &'static str>,
}

impl CodeTable {
    fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            by_code: pairs.iter().copied().collect(),
            by_label: pairs.iter().map(|&(code, label)| (label, code)).collect(),
        }
    }

    /// Display label for a code, if the code is known.
    pub fn label(&self, code: &str) -> Option<&'static str> {
        self.by_code.get(code).copied()
    }

    /// Code for a display label, if the label is known.
    pub fn code(&self, label: &str) -> Option<&'static str> {
        self.by_label.get(label).copied()
    }

    /// All known codes.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_code.keys().copied()
    }
}

/// Ticket type table (咨询/维修/投诉).
pub fn type_table() -> &'static CodeTable {
    static TABLE: OnceLock<CodeTable> = OnceLock::new();
    TABLE.get_or_init(|| CodeTable::new(&TICKET_TYPES))
}

/// Ticket status table (待分配/处理中/已完成).
pub fn status_table() -> &'static CodeTable {
    static TABLE: OnceLock<CodeTable> = OnceLock::new();
    TABLE.get_or_init(|| CodeTable::new(&TICKET_STATUSES))
}

/// Internal ticket record.
///
/// `type_code` and `status_code` hold the platform's short codes
/// ("1"/"3"/"5"). Decoding is lenient: a code outside the tables is
/// carried verbatim instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub type_code: String,
    pub status_code: String,
    pub description: String,
    pub contact: String,
    pub phone: String,
    pub remarks: String,
}

impl Ticket {
    /// Display label for the ticket type; unknown codes are shown as-is.
    pub fn type_label(&self) -> &str {
        type_table().label(&self.type_code).unwrap_or(&self.type_code)
    }

    /// Display label for the ticket status; unknown codes are shown as-is.
    pub fn status_label(&self) -> &str {
        status_table()
            .label(&self.status_code)
            .unwrap_or(&self.status_code)
    }
}

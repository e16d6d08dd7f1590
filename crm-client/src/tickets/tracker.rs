// crm-client/src/tickets/tracker.rs
// 已创建工单 ID 记录

use std::fs;
use std::path::{Path, PathBuf};

/// Records ids of tickets created through the platform API, so real
/// records can be told apart from demo data later.
///
/// Stored as a JSON string array; ids are deduplicated on insert.
#[derive(Debug, Clone)]
pub struct TicketIdStore {
    path: PathBuf,
}

impl TicketIdStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into().join("ticket_ids.json");
        Self { path }
    }

    /// 记录工单 ID
    pub fn record(&self, id: &str) -> std::io::Result<()> {
        let mut ids = self.all();
        if ids.iter().any(|existing| existing == id) {
            return Ok(());
        }
        ids.push(id.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&ids)?;
        fs::write(&self.path, json)
    }

    /// 已记录的工单 ID 列表
    pub fn all(&self) -> Vec<String> {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_default()
    }

    /// 清除记录
    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn records_and_deduplicates() {
        let dir = TempDir::new().unwrap();
        let store = TicketIdStore::new(dir.path());
        assert!(store.all().is_empty());

        store.record("99").unwrap();
        store.record("100").unwrap();
        store.record("99").unwrap();
        assert_eq!(store.all(), vec!["99".to_string(), "100".to_string()]);

        store.clear().unwrap();
        assert!(store.all().is_empty());
    }
}

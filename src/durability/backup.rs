//! Backup document format.
//!
//! The same shape is produced for internal snapshots and consumed by the
//! external import/export collaborator:
//!
//! ```text
//! { "version": 1, "exportedAt": "<RFC 3339>", "data": { "books": [..], "nodes": [..], "settings": [..] } }
//! ```
//!
//! A document captured from a consistent store always passes [`BackupDocument::validate`],
//! so snapshot round trips never fail the import check.

use crate::constants::BACKUP_FORMAT_VERSION;
use crate::error::{CoreError, CoreResult};
use crate::storage::Store;
use crate::types::{Book, Node, Setting, Timestamp};
use chrono::{SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: String,
    pub data: BackupData,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    pub books: Vec<Book>,
    pub nodes: Vec<Node>,
    pub settings: Vec<Setting>,
}

impl BackupDocument {
    pub fn new(data: BackupData, exported_at: Timestamp) -> Self {
        Self {
            version: BACKUP_FORMAT_VERSION,
            exported_at: format_timestamp(exported_at),
            data,
        }
    }

    /// Copy every book, node and setting out of the store.
    pub fn capture(store: &dyn Store, now: Timestamp) -> CoreResult<Self> {
        let data = BackupData {
            books: store.books()?,
            nodes: store.all_nodes()?,
            settings: store.settings()?,
        };
        Ok(Self::new(data, now))
    }

    /// Parse and validate a backup. Nothing is written anywhere on failure.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidBackup(format!("not JSON: {e}")))?;

        match value.get("version").and_then(|v| v.as_u64()) {
            Some(v) if v == u64::from(BACKUP_FORMAT_VERSION) => {}
            Some(v) => return Err(CoreError::InvalidBackup(format!("unsupported version {v}"))),
            None => return Err(CoreError::InvalidBackup("missing version".into())),
        }
        if !value.get("data").is_some_and(|d| d.is_object()) {
            return Err(CoreError::InvalidBackup("missing data".into()));
        }

        let doc: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::InvalidBackup(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check version, id uniqueness and that every node's book is present.
    pub fn validate(&self) -> CoreResult<()> {
        if self.version != BACKUP_FORMAT_VERSION {
            return Err(CoreError::InvalidBackup(format!(
                "unsupported version {}",
                self.version
            )));
        }

        let mut book_ids = HashSet::with_capacity(self.data.books.len());
        for book in &self.data.books {
            if !book_ids.insert(&book.id) {
                return Err(CoreError::InvalidBackup(format!("duplicate book {}", book.id)));
            }
        }

        let mut node_ids = HashSet::with_capacity(self.data.nodes.len());
        for node in &self.data.nodes {
            if !node_ids.insert(&node.id) {
                return Err(CoreError::InvalidBackup(format!("duplicate node {}", node.id)));
            }
            if !book_ids.contains(&node.book_id) {
                return Err(CoreError::InvalidBackup(format!(
                    "node {} references missing book {}",
                    node.id, node.book_id
                )));
            }
        }
        Ok(())
    }
}

/// Format epoch milliseconds as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(ms: Timestamp) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => Utc
            .timestamp_millis_opt(0)
            .single()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
    }
}

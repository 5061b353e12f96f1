//! Backup export and import, snapshot restore, nudge dismissal.

use super::Ideashelf;
use crate::durability::settings::{self, TrackedSettings};
use crate::durability::{BackupDocument, ChangeReport};
use crate::error::CoreResult;
use crate::render::RenderSurface;
use crate::storage::Store;
use tracing::{info, warn};

impl<S: Store, R: RenderSurface> Ideashelf<S, R> {
    /// Serialize every book, node and setting as a backup document and record
    /// the external backup time.
    pub fn export_backup(&mut self) -> CoreResult<String> {
        let now = self.now();
        let document = BackupDocument::capture(&self.system.store, now)?;
        let json = document.to_json_pretty()?;
        self.durability
            .nudge
            .record_external_backup(&mut self.system.store, now)?;
        info!(
            books = document.data.books.len(),
            nodes = document.data.nodes.len(),
            "Exported backup"
        );
        Ok(json)
    }

    /// Replace all data with a backup document's contents.
    ///
    /// The document is validated before anything is written; a rejected
    /// document leaves the store and the view untouched. The change counter
    /// keeps the larger of its current and imported values.
    pub fn import_backup(&mut self, json: &str) -> CoreResult<ChangeReport> {
        let document = BackupDocument::from_json(json).inspect_err(|e| {
            warn!("Rejected backup: {}", e);
        })?;
        self.import_document(document)
    }

    pub fn import_document(&mut self, document: BackupDocument) -> CoreResult<ChangeReport> {
        document.validate()?;
        let mut data = document.data;
        let (books, nodes) = (data.books.len(), data.nodes.len());

        let current = TrackedSettings::load(&self.system.store)?.change_count;
        settings::raise_change_count(&mut data.settings, current);
        self.system
            .store
            .replace_all(data.books, data.nodes, data.settings)?;
        self.leave_canvas();
        info!(books, nodes, "Imported backup");
        self.mark_changed()
    }

    /// Import the newest internal snapshot.
    pub fn restore_latest_snapshot(&mut self) -> CoreResult<ChangeReport> {
        let document = self.durability.snapshots.latest_backup(&self.system.store)?;
        info!(exported_at = %document.exported_at, "Restoring latest snapshot");
        self.import_document(document)
    }

    /// Hide the backup reminder for the dismissal window.
    pub fn dismiss_nudge(&mut self) -> CoreResult<bool> {
        let now = self.now();
        Ok(self
            .durability
            .nudge
            .dismiss(&mut self.system.store, now)?)
    }
}

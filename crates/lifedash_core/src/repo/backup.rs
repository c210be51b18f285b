//! JSON backup export and import for the dashboard store.
//!
//! # Responsibility
//! - Serialize the full store (items + capture history) into one versioned
//!   JSON document.
//! - Restore a backup either by replacing the store or by merging into it.
//!
//! # Invariants
//! - Imports require the exact supported backup version.
//! - Import runs inside one transaction; a failed import changes nothing.
//! - Merge keeps existing rows; backup items with an already-known uuid are
//!   skipped, and history is not merged (its ids are storage-local).

use crate::repo::history_repo::{HistoryRecord, HistoryRepository};
use crate::repo::item_repo::{
    ItemListQuery, ItemRecord, ItemRepository, RepoError, RepoResult, SqliteItemRepository,
};
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// Backup document version written by this build.
pub const BACKUP_VERSION: u32 = 1;

/// How an import treats data already in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Drop everything, then load the backup.
    Replace,
    /// Keep existing rows; insert backup items with unknown uuids.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMeta {
    pub version: u32,
    /// Epoch milliseconds of the export.
    pub exported_at: i64,
}

/// Versioned full-store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBackup {
    pub meta: BackupMeta,
    pub items: Vec<ItemRecord>,
    pub history: Vec<HistoryRecord>,
}

impl DashboardBackup {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<DashboardBackup, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Counts of rows an import actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub items_imported: u32,
    pub history_imported: u32,
}

impl SqliteItemRepository<'_> {
    /// Exports every item and history row into a versioned snapshot.
    pub fn export_backup(&self) -> RepoResult<DashboardBackup> {
        Ok(DashboardBackup {
            meta: BackupMeta {
                version: BACKUP_VERSION,
                exported_at: Utc::now().timestamp_millis(),
            },
            items: self.list_items(&ItemListQuery::default())?,
            history: self.list_history(None)?,
        })
    }

    /// Restores a snapshot, preserving original uuids and timestamps.
    pub fn import_backup(
        &self,
        backup: &DashboardBackup,
        mode: ImportMode,
    ) -> RepoResult<ImportSummary> {
        if backup.meta.version != BACKUP_VERSION {
            return Err(RepoError::InvalidData(format!(
                "unsupported backup version {} (supported: {BACKUP_VERSION})",
                backup.meta.version
            )));
        }

        let tx = self.conn.unchecked_transaction()?;

        if mode == ImportMode::Replace {
            tx.execute("DELETE FROM items;", [])?;
            tx.execute("DELETE FROM dump_history;", [])?;
        }

        let insert_sql = match mode {
            ImportMode::Replace => {
                "INSERT INTO items (uuid, category, payload, source, raw_input, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);"
            }
            ImportMode::Merge => {
                "INSERT OR IGNORE INTO items (uuid, category, payload, source, raw_input, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);"
            }
        };

        let mut summary = ImportSummary::default();
        for record in &backup.items {
            let changed = tx.execute(
                insert_sql,
                params![
                    record.uuid.to_string(),
                    record.category().as_str(),
                    serde_json::to_string(&record.payload)?,
                    record.source.as_str(),
                    record.raw_input.as_deref(),
                    record.created_at,
                    record.updated_at,
                ],
            )?;
            summary.items_imported += changed as u32;
        }

        if mode == ImportMode::Replace {
            for record in &backup.history {
                tx.execute(
                    "INSERT INTO dump_history (raw_input, category, confidence, created_at)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        record.raw_input,
                        record.category.as_str(),
                        record.confidence.as_str(),
                        record.created_at,
                    ],
                )?;
                summary.history_imported += 1;
            }
        }

        tx.commit()?;
        Ok(summary)
    }
}

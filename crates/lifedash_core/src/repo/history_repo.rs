//! Dump-box capture history.
//!
//! # Responsibility
//! - Append one history row per saved dump-box capture.
//! - List recent captures for review screens.
//!
//! # Invariants
//! - History rows are append-only; nothing updates them.
//! - List order is `created_at DESC, id DESC`.

use crate::classify::engine::Confidence;
use crate::model::item::Category;
use crate::repo::item_repo::{RepoError, RepoResult, SqliteItemRepository};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

/// One recorded dump-box capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub raw_input: String,
    pub category: Category,
    pub confidence: Confidence,
    /// Epoch milliseconds, assigned by storage at insert.
    pub created_at: i64,
}

/// Repository interface for the capture history.
pub trait HistoryRepository {
    /// Appends one history row; returns its id.
    fn append_history(
        &self,
        raw_input: &str,
        category: Category,
        confidence: Confidence,
    ) -> RepoResult<i64>;
    /// Lists recent captures, newest first. `None` lists everything.
    fn list_history(&self, limit: Option<u32>) -> RepoResult<Vec<HistoryRecord>>;
}

impl HistoryRepository for SqliteItemRepository<'_> {
    fn append_history(
        &self,
        raw_input: &str,
        category: Category,
        confidence: Confidence,
    ) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO dump_history (raw_input, category, confidence)
             VALUES (?1, ?2, ?3);",
            params![raw_input, category.as_str(), confidence.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_history(&self, limit: Option<u32>) -> RepoResult<Vec<HistoryRecord>> {
        let mut sql = String::from(
            "SELECT id, raw_input, category, confidence, created_at
             FROM dump_history
             ORDER BY created_at DESC, id DESC",
        );
        if limit.is_some() {
            sql.push_str(" LIMIT ?1");
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match limit {
            Some(limit) => stmt.query([i64::from(limit)])?,
            None => stmt.query([])?,
        };

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_history_row(row)?);
        }

        Ok(records)
    }
}

fn parse_history_row(row: &Row<'_>) -> RepoResult<HistoryRecord> {
    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in dump_history.category"
        ))
    })?;

    let confidence_text: String = row.get("confidence")?;
    let confidence = Confidence::parse(&confidence_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid confidence `{confidence_text}` in dump_history.confidence"
        ))
    })?;

    Ok(HistoryRecord {
        id: row.get("id")?,
        raw_input: row.get("raw_input")?,
        category,
        confidence,
        created_at: row.get("created_at")?,
    })
}

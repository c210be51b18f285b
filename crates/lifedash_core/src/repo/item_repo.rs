//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over categorized items, keyed by category.
//! - Serialize item payloads into a self-describing JSON column.
//!
//! # Invariants
//! - The `category` column always agrees with the payload's own category.
//! - List order is `created_at DESC, uuid ASC`.
//! - Deletion is a hard delete; the store keeps no tombstones.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::item::{
    Category, Item, ItemId, ItemPayload, ItemSource, ItemValidationError,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    category,
    payload,
    source,
    raw_input,
    created_at,
    updated_at
FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item and history persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    /// Payload JSON could not be serialized or deserialized.
    Payload(serde_json::Error),
    NotFound(ItemId),
    InvalidData(String),
    /// Connection was not opened through [`crate::db::open_db`].
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "invalid item payload: {err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Query options for listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    pub category: Option<Category>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read model for one persisted item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub uuid: ItemId,
    pub source: ItemSource,
    pub raw_input: Option<String>,
    pub payload: ItemPayload,
    /// Epoch milliseconds, assigned by storage at insert.
    pub created_at: i64,
    /// Epoch milliseconds of the last update, if any.
    pub updated_at: Option<i64>,
}

impl ItemRecord {
    pub fn category(&self) -> Category {
        self.payload.category()
    }
}

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<ItemRecord>>;
    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<ItemRecord>>;
    /// Replaces the payload of an existing item and bumps `updated_at`.
    fn update_item_payload(&self, id: ItemId, payload: &ItemPayload) -> RepoResult<()>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
}

/// SQLite-backed item repository.
#[derive(Debug)]
pub struct SqliteItemRepository<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO items (uuid, category, payload, source, raw_input)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.uuid.to_string(),
                item.category().as_str(),
                serde_json::to_string(&item.payload)?,
                item.source.as_str(),
                item.raw_input.as_deref(),
            ],
        )?;

        Ok(item.uuid)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<ItemRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<ItemRecord>> {
        let mut sql = format!("{ITEM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn update_item_payload(&self, id: ItemId, payload: &ItemPayload) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE items
             SET
                category = ?1,
                payload = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![
                payload.category().as_str(),
                serde_json::to_string(payload)?,
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ItemRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in items.uuid"))
    })?;

    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid category `{category_text}` in items.category"))
    })?;

    let payload_json: String = row.get("payload")?;
    let payload: ItemPayload = serde_json::from_str(&payload_json)?;
    if payload.category() != category {
        return Err(RepoError::InvalidData(format!(
            "payload category `{}` does not match items.category `{category_text}`",
            payload.category()
        )));
    }

    let source_text: String = row.get("source")?;
    let source = ItemSource::parse(&source_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid source `{source_text}` in items.source"))
    })?;

    Ok(ItemRecord {
        uuid,
        source,
        raw_input: row.get("raw_input")?,
        payload,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

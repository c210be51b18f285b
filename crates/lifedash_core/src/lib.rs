//! Core domain logic for the Lifedash dump box.
//! This crate is the single source of truth for classification behavior.

pub mod classify;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use classify::engine::{categorize, score_text, Classification, Confidence, ScoreVector};
pub use classify::extract::{
    extract_fields, extract_fields_on, BookFields, ExtractedFields, FinanceFields, HealthFields,
    NoteFields, TaskFields,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{
    BookItem, BookStatus, Category, FinanceItem, FinanceKind, HealthItem, HealthKind, Item, ItemId,
    ItemPayload, ItemSource, ItemValidationError, NoteItem, TaskItem, TaskKind, TaskPriority,
    TaskStatus,
};
pub use repo::backup::{DashboardBackup, ImportMode, ImportSummary, BACKUP_VERSION};
pub use repo::history_repo::{HistoryRecord, HistoryRepository};
pub use repo::item_repo::{
    ItemListQuery, ItemRecord, ItemRepository, RepoError, RepoResult, SqliteItemRepository,
};
pub use service::dump_service::{materialize_item, CapturedDump, DumpService, DumpServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

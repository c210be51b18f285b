//! Dump-box use-case service.
//!
//! # Responsibility
//! - Classify free text for live preview and manual category override.
//! - Materialize classified text into a fully shaped item and persist it
//!   together with a capture-history row.
//!
//! # Invariants
//! - Override never patches a previous result; it derives a fresh one from
//!   the original text.
//! - Materialization is total: every category yields a complete payload,
//!   missing extractions fall back to category defaults.
//! - Saved items keep the trimmed raw input and `source = dumpbox`.

use crate::classify::engine::{categorize, Classification};
use crate::classify::extract::{extract_fields, ExtractedFields};
use crate::model::item::{
    BookItem, Category, FinanceItem, HealthItem, Item, ItemId, ItemPayload, NoteItem, TaskItem,
    TaskKind,
};
use crate::repo::history_repo::HistoryRepository;
use crate::repo::item_repo::{ItemRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TITLE_MAX_CHARS: usize = 100;
const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_FINANCE_BUCKET: &str = "other";
const DEFAULT_HEALTH_ACTIVITY: &str = "other";
const WEIGHT_UNIT: &str = "kg";

/// Service error for dump-box capture.
#[derive(Debug)]
pub enum DumpServiceError {
    /// Input was empty or whitespace-only; there is nothing to classify.
    EmptyInput,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for DumpServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "nothing to classify: input is empty"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DumpServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::EmptyInput => None,
        }
    }
}

impl From<RepoError> for DumpServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of one persisted capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedDump {
    pub item_id: ItemId,
    pub classification: Classification,
}

/// Dump-box facade over a repository implementation.
pub struct DumpService<R> {
    repo: R,
}

impl<R: ItemRepository + HistoryRepository> DumpService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Classifies text for the live preview; `None` for blank input.
    ///
    /// Debouncing rapid re-invocations is the caller's concern.
    pub fn preview(&self, text: &str) -> Option<Classification> {
        categorize(text)
    }

    /// Re-derives a classification with a user-chosen category.
    ///
    /// Scores and confidence describe the model's original opinion; fields
    /// are re-extracted for the chosen category from the original text.
    pub fn reclassify(&self, text: &str, category: Category) -> Option<Classification> {
        categorize(text).map(|result| Classification {
            category,
            extracted: extract_fields(text, category),
            ..result
        })
    }

    /// Classifies and persists one dump-box entry.
    pub fn capture(&self, text: &str) -> Result<CapturedDump, DumpServiceError> {
        let result = categorize(text).ok_or(DumpServiceError::EmptyInput)?;
        self.persist(text, result)
    }

    /// Persists one dump-box entry under a user-chosen category.
    pub fn capture_as(
        &self,
        text: &str,
        category: Category,
    ) -> Result<CapturedDump, DumpServiceError> {
        let result = self
            .reclassify(text, category)
            .ok_or(DumpServiceError::EmptyInput)?;
        self.persist(text, result)
    }

    fn persist(
        &self,
        text: &str,
        classification: Classification,
    ) -> Result<CapturedDump, DumpServiceError> {
        let raw = text.trim();
        let item = materialize_item(raw, &classification);
        let item_id = self.repo.create_item(&item)?;
        self.repo
            .append_history(raw, classification.category, classification.confidence)?;

        info!(
            "event=dump_capture module=dumpbox status=ok category={} confidence={} item_id={item_id}",
            classification.category, classification.confidence
        );

        Ok(CapturedDump {
            item_id,
            classification,
        })
    }
}

/// Maps a classification onto a fully shaped dump-box item.
///
/// Fields the extractor left absent are filled with category defaults, so
/// the result never has missing required fields.
pub fn materialize_item(raw_text: &str, classification: &Classification) -> Item {
    let payload = match &classification.extracted {
        ExtractedFields::Tasks(fields) => {
            let (title, description) = split_task_title(raw_text);
            ItemPayload::Task(TaskItem {
                kind: TaskKind::Task,
                title,
                description,
                status: fields.status,
                priority: fields.priority,
                due_date: None,
                tags: Vec::new(),
                frequency: None,
                completions: Vec::new(),
            })
        }
        ExtractedFields::Finances(fields) => ItemPayload::Finance(FinanceItem {
            kind: fields.kind,
            amount: fields.amount.unwrap_or(0.0),
            currency: DEFAULT_CURRENCY.to_string(),
            bucket: DEFAULT_FINANCE_BUCKET.to_string(),
            description: raw_text.to_string(),
            date: fields.date,
            recurring: false,
        }),
        ExtractedFields::Health(fields) => ItemPayload::Health(HealthItem {
            kind: fields.kind,
            activity: DEFAULT_HEALTH_ACTIVITY.to_string(),
            duration: fields.duration,
            distance: fields.distance,
            value: fields.value,
            // Unit is only meaningful next to a weight value.
            unit: fields.value.map(|_| WEIGHT_UNIT.to_string()),
            hours: fields.hours,
            quality: None,
            notes: raw_text.to_string(),
            date: fields.date,
        }),
        ExtractedFields::Notes(fields) => ItemPayload::Note(NoteItem {
            title: first_line_title(raw_text),
            body: raw_text.to_string(),
            tags: fields.tags.clone(),
            pinned: fields.pinned,
        }),
        ExtractedFields::Books(fields) => ItemPayload::Book(BookItem {
            title: first_line_title(raw_text),
            autor: Vec::new(),
            estado: fields.estado,
            tipo: fields.tipo.clone(),
            calificacion: String::new(),
            tags: Vec::new(),
        }),
    };

    Item::from_dumpbox(payload, raw_text)
}

// Long inputs keep the first 100 chars as title and move the full text into
// the description.
fn split_task_title(raw: &str) -> (String, String) {
    if raw.chars().count() > TITLE_MAX_CHARS {
        (
            raw.chars().take(TITLE_MAX_CHARS).collect(),
            raw.to_string(),
        )
    } else {
        (raw.to_string(), String::new())
    }
}

// First line only, capped at 100 chars.
fn first_line_title(raw: &str) -> String {
    raw.lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(TITLE_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{first_line_title, split_task_title, TITLE_MAX_CHARS};

    #[test]
    fn short_task_text_is_title_only() {
        let (title, description) = split_task_title("call the dentist");
        assert_eq!(title, "call the dentist");
        assert!(description.is_empty());
    }

    #[test]
    fn long_task_text_overflows_into_description() {
        let raw = "x".repeat(TITLE_MAX_CHARS + 20);
        let (title, description) = split_task_title(&raw);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(description, raw);
    }

    #[test]
    fn title_stops_at_first_line_break() {
        assert_eq!(first_line_title("Dune\nby Frank Herbert"), "Dune");
    }
}

//! Item domain model.
//!
//! # Responsibility
//! - Define the category vocabulary shared by classification and storage.
//! - Define per-category payload shapes produced by dump-box materialization
//!   and by manual entry forms.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another item.
//! - Dump-box items carry the original raw input; manual items do not.
//! - Payload category and the surrounding storage category always agree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted item.
pub type ItemId = Uuid;

/// The five life domains free text is classified into.
///
/// `ALL` is in declared priority order; classification tie-breaks and
/// score iteration both rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tasks,
    Finances,
    Health,
    Notes,
    Books,
}

impl Category {
    /// All categories in declared priority order.
    pub const ALL: [Category; 5] = [
        Category::Tasks,
        Category::Finances,
        Category::Health,
        Category::Notes,
        Category::Books,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tasks => "tasks",
            Category::Finances => "finances",
            Category::Health => "health",
            Category::Notes => "notes",
            Category::Books => "books",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        match value {
            "tasks" => Some(Category::Tasks),
            "finances" => Some(Category::Finances),
            "health" => Some(Category::Health),
            "notes" => Some(Category::Notes),
            "books" => Some(Category::Books),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an item entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    /// Captured through the free-text dump box.
    Dumpbox,
    /// Entered through a per-category form.
    Manual,
}

impl ItemSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemSource::Dumpbox => "dumpbox",
            ItemSource::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Option<ItemSource> {
        match value {
            "dumpbox" => Some(ItemSource::Dumpbox),
            "manual" => Some(ItemSource::Manual),
            _ => None,
        }
    }
}

/// Task vs recurring habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Task,
    Habit,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    Expense,
    Income,
}

/// Kind of health entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthKind {
    Workout,
    Weight,
    Sleep,
    Meal,
    Metric,
}

/// Reading state of a book entry.
///
/// Display labels are kept in Spanish to match the stored vocabulary of the
/// books module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Leyendo,
    #[serde(rename = "Por leer")]
    PorLeer,
    #[serde(rename = "Leído")]
    Leido,
    Wishlist,
}

impl BookStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Leyendo => "Leyendo",
            BookStatus::PorLeer => "Por leer",
            BookStatus::Leido => "Leído",
            BookStatus::Wishlist => "Wishlist",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actionable task or habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub kind: TaskKind,
    pub title: String,
    /// Overflow text when the title was truncated, empty otherwise.
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// Habit cadence (`daily`, `weekly`, ...). `None` for one-off tasks.
    pub frequency: Option<String>,
    /// Completion dates for habit tracking.
    pub completions: Vec<NaiveDate>,
}

/// Single money movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceItem {
    pub kind: FinanceKind,
    pub amount: f64,
    pub currency: String,
    /// Spending bucket (`rent`, `food`, ... or `other`).
    pub bucket: String,
    pub description: String,
    pub date: NaiveDate,
    pub recurring: bool,
}

/// Workout, weight, sleep or generic health metric entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthItem {
    pub kind: HealthKind,
    pub activity: String,
    /// Minutes.
    pub duration: Option<i64>,
    /// Kilometers or miles as typed; no unit conversion.
    pub distance: Option<f64>,
    pub value: Option<f64>,
    /// Set to `kg` only when a weight value is present.
    pub unit: Option<String>,
    /// Hours of sleep.
    pub hours: Option<f64>,
    pub quality: Option<String>,
    pub notes: String,
    pub date: NaiveDate,
}

/// Free-form note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteItem {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub pinned: bool,
}

/// Book on one of the reading shelves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookItem {
    pub title: String,
    pub autor: Vec<String>,
    pub estado: BookStatus,
    pub tipo: String,
    pub calificacion: String,
    pub tags: Vec<String>,
}

/// Category-shaped item payload.
///
/// Serialized with an inline `category` tag so a stored payload is
/// self-describing independent of the surrounding storage row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum ItemPayload {
    #[serde(rename = "tasks")]
    Task(TaskItem),
    #[serde(rename = "finances")]
    Finance(FinanceItem),
    #[serde(rename = "health")]
    Health(HealthItem),
    #[serde(rename = "notes")]
    Note(NoteItem),
    #[serde(rename = "books")]
    Book(BookItem),
}

impl ItemPayload {
    pub fn category(&self) -> Category {
        match self {
            ItemPayload::Task(_) => Category::Tasks,
            ItemPayload::Finance(_) => Category::Finances,
            ItemPayload::Health(_) => Category::Health,
            ItemPayload::Note(_) => Category::Notes,
            ItemPayload::Book(_) => Category::Books,
        }
    }
}

/// Validation error for item write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Dump-box items must keep their original raw input.
    MissingRawInput,
    /// Manual items must not carry dump-box raw input.
    UnexpectedRawInput,
    /// Finance amounts must be finite numbers.
    NonFiniteAmount,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRawInput => write!(f, "dumpbox item is missing raw input"),
            Self::UnexpectedRawInput => write!(f, "manual item must not carry raw input"),
            Self::NonFiniteAmount => write!(f, "finance amount must be finite"),
        }
    }
}

impl Error for ItemValidationError {}

/// Canonical write model for a persisted item.
///
/// Creation and update timestamps are owned by storage and surface only on
/// read models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub uuid: ItemId,
    pub source: ItemSource,
    /// Original dump-box text. `None` for manual items.
    pub raw_input: Option<String>,
    pub payload: ItemPayload,
}

impl Item {
    /// Creates an item captured through the dump box.
    pub fn from_dumpbox(payload: ItemPayload, raw_input: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            source: ItemSource::Dumpbox,
            raw_input: Some(raw_input.into()),
            payload,
        }
    }

    /// Creates a manually entered item.
    pub fn manual(payload: ItemPayload) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            source: ItemSource::Manual,
            raw_input: None,
            payload,
        }
    }

    pub fn category(&self) -> Category {
        self.payload.category()
    }

    /// Checks item-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        match (self.source, self.raw_input.as_deref()) {
            (ItemSource::Dumpbox, None) => return Err(ItemValidationError::MissingRawInput),
            (ItemSource::Manual, Some(_)) => return Err(ItemValidationError::UnexpectedRawInput),
            _ => {}
        }

        if let ItemPayload::Finance(finance) = &self.payload {
            if !finance.amount.is_finite() {
                return Err(ItemValidationError::NonFiniteAmount);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codec_roundtrips() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("groceries"), None);
    }

    #[test]
    fn payload_serializes_with_category_tag() {
        let payload = ItemPayload::Note(NoteItem {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: Vec::new(),
            pinned: false,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "notes");
    }

    #[test]
    fn dumpbox_item_requires_raw_input() {
        let payload = ItemPayload::Note(NoteItem {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: Vec::new(),
            pinned: false,
        });
        let mut item = Item::from_dumpbox(payload, "b");
        assert!(item.validate().is_ok());

        item.raw_input = None;
        assert_eq!(item.validate(), Err(ItemValidationError::MissingRawInput));
    }
}

//! Per-category structured field extraction.
//!
//! # Responsibility
//! - Pull amounts, distances, durations, statuses and due hints out of raw
//!   dump-box text for the selected category.
//! - Keep extraction a pure function of `(text, category, date)`; category
//!   overrides simply re-run it.
//!
//! # Invariants
//! - A field set never carries a field outside its category's schema.
//! - Unparseable numeric captures leave the field absent, never zero.
//! - Amount candidates are tried in order; the first matching pattern wins.

use crate::model::item::{BookStatus, Category, FinanceKind, HealthKind, TaskPriority, TaskStatus};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default `tipo` for captured books.
pub const BOOK_DEFAULT_TIPO: &str = "Otro";

static AMOUNT_BEFORE_CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+[.,]?[0-9]*)\s*(?:EUR|USD|€|\$|euros?|dollars?)")
        .expect("valid amount regex")
});
static CURRENCY_BEFORE_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:€|\$)\s*([0-9]+[.,]?[0-9]*)").expect("valid currency-first regex")
});
static SPEND_VERB_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:spent|paid|earned|cost|gastado|pagado)\s+([0-9]+[.,]?[0-9]*)")
        .expect("valid verb-amount regex")
});
static EXPENSE_VERBS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)spent|paid|cost|bought|gastado|pagado|compré").expect("valid expense regex")
});
static INCOME_VERBS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)earned|received|salary|income|ganado|recibido|salario|ingreso")
        .expect("valid income regex")
});
static DISTANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+[.,]?[0-9]*)\s*(?:km|mi)").expect("valid distance regex"));
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(?:min(?:utes?)?|minutos?)").expect("valid duration regex")
});
static WEIGHT_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+[.,]?[0-9]*)\s*(?:kg|lbs?)").expect("valid weight regex"));
static SLEEP_HOURS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+[.,]?[0-9]*)\s*(?:hours?|horas?)\s*(?:of\s*)?(?:sleep|sueño|dormir)")
        .expect("valid sleep regex")
});
static WEIGHT_WORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)weight|peso|kg|lbs").expect("valid weight-words regex"));
static WORKOUT_WORDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ran|run|gym|workout|swim|bike|exercise|corr|ejercicio|gimnasio")
        .expect("valid workout-words regex")
});
static DUE_HINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:by|before|due|until|para el|antes del?)\s+([0-9A-Za-z_]+)")
        .expect("valid due-hint regex")
});
static BOOK_READING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)reading|leyendo").expect("valid reading regex"));
static BOOK_FINISHED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)finished|terminé|leí|read\b").expect("valid finished regex"));
static BOOK_WANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)want to read|por leer|to read").expect("valid want-to-read regex"));

/// Fields pre-filled for a captured task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFields {
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Verbatim word following a due marker (`by friday` -> `friday`).
    /// No date parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_hint: Option<String>,
}

/// Fields pre-filled for a captured money movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceFields {
    pub kind: FinanceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub date: NaiveDate,
}

/// Fields pre-filled for a captured health entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthFields {
    pub kind: HealthKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    pub date: NaiveDate,
}

/// Fields pre-filled for a captured note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteFields {
    pub pinned: bool,
    pub tags: Vec<String>,
}

/// Fields pre-filled for a captured book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFields {
    pub estado: BookStatus,
    pub tipo: String,
}

/// Category-shaped extraction result.
///
/// The variant is the category, so fields outside the winning category's
/// schema are unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ExtractedFields {
    Tasks(TaskFields),
    Finances(FinanceFields),
    Health(HealthFields),
    Notes(NoteFields),
    Books(BookFields),
}

impl ExtractedFields {
    pub fn category(&self) -> Category {
        match self {
            ExtractedFields::Tasks(_) => Category::Tasks,
            ExtractedFields::Finances(_) => Category::Finances,
            ExtractedFields::Health(_) => Category::Health,
            ExtractedFields::Notes(_) => Category::Notes,
            ExtractedFields::Books(_) => Category::Books,
        }
    }
}

/// Extracts structured fields for `category`, dating entries with the local
/// calendar date.
pub fn extract_fields(text: &str, category: Category) -> ExtractedFields {
    extract_fields_on(text, category, Local::now().date_naive())
}

/// Date-parameterized extraction; `today` is stamped into dated field sets.
///
/// Case-insensitive value patterns run over the original text; verb-class
/// checks run over the lowercased text.
pub fn extract_fields_on(text: &str, category: Category, today: NaiveDate) -> ExtractedFields {
    let lowered = text.to_lowercase();
    match category {
        Category::Tasks => ExtractedFields::Tasks(extract_task_fields(text)),
        Category::Finances => {
            ExtractedFields::Finances(extract_finance_fields(text, &lowered, today))
        }
        Category::Health => ExtractedFields::Health(extract_health_fields(text, &lowered, today)),
        Category::Notes => ExtractedFields::Notes(NoteFields::default()),
        Category::Books => ExtractedFields::Books(extract_book_fields(&lowered)),
    }
}

fn extract_finance_fields(text: &str, lowered: &str, today: NaiveDate) -> FinanceFields {
    // First matching candidate wins, even before the capture is parsed.
    let amount = AMOUNT_BEFORE_CURRENCY_RE
        .captures(text)
        .or_else(|| CURRENCY_BEFORE_AMOUNT_RE.captures(text))
        .or_else(|| SPEND_VERB_AMOUNT_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_decimal(m.as_str()));

    let kind = if EXPENSE_VERBS_RE.is_match(lowered) {
        FinanceKind::Expense
    } else if INCOME_VERBS_RE.is_match(lowered) {
        FinanceKind::Income
    } else {
        FinanceKind::Expense
    };

    FinanceFields {
        kind,
        amount,
        date: today,
    }
}

fn extract_health_fields(text: &str, lowered: &str, today: NaiveDate) -> HealthFields {
    let distance = capture_decimal(&DISTANCE_RE, text);
    let duration = DURATION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok());
    let value = capture_decimal(&WEIGHT_VALUE_RE, text);
    let hours = capture_decimal(&SLEEP_HOURS_RE, text);

    let kind = if hours.is_some() {
        HealthKind::Sleep
    } else if value.is_some() && WEIGHT_WORDS_RE.is_match(lowered) {
        HealthKind::Weight
    } else if distance.is_some() || duration.is_some() || WORKOUT_WORDS_RE.is_match(lowered) {
        HealthKind::Workout
    } else {
        HealthKind::Metric
    };

    HealthFields {
        kind,
        distance,
        duration,
        value,
        hours,
        date: today,
    }
}

fn extract_task_fields(text: &str) -> TaskFields {
    let due_hint = DUE_HINT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    TaskFields {
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        due_hint,
    }
}

fn extract_book_fields(lowered: &str) -> BookFields {
    let estado = if BOOK_READING_RE.is_match(lowered) {
        BookStatus::Leyendo
    } else if BOOK_FINISHED_RE.is_match(lowered) {
        BookStatus::Leido
    } else if BOOK_WANT_RE.is_match(lowered) {
        BookStatus::PorLeer
    } else {
        BookStatus::Wishlist
    };

    BookFields {
        estado,
        tipo: BOOK_DEFAULT_TIPO.to_string(),
    }
}

fn capture_decimal(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_decimal(m.as_str()))
}

// Decimal comma normalizes to a dot before parsing; anything unparseable or
// non-finite is treated as absent.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

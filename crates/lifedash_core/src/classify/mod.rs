//! Free-text categorization engine for the dump box.
//!
//! # Responsibility
//! - Score raw text against the bilingual lexicon and pick a category.
//! - Extract category-shaped structured fields from the same text.
//!
//! # Invariants
//! - `categorize` and `extract_fields` are pure over their inputs plus the
//!   read-only lexicon; repeated calls yield identical results.
//! - A non-blank input always classifies into one of the five categories.

pub mod engine;
pub mod extract;
pub mod lexicon;

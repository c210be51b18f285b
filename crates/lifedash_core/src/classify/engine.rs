//! Multi-signal scoring and category selection.
//!
//! # Responsibility
//! - Score raw text per category from keywords, patterns and structural
//!   heuristics.
//! - Select the winning category and derive a confidence label from the
//!   score gap.
//!
//! # Invariants
//! - Score vectors carry exactly one non-negative entry per category.
//! - An all-zero vector classifies as `notes` with confidence `none`.
//! - Ties break on the declared category order (`Category::ALL`).

use crate::classify::extract::{extract_fields, ExtractedFields};
use crate::classify::lexicon::{self, MODERATE_WEIGHT, PATTERN_WEIGHT, STRONG_WEIGHT};
use crate::model::item::Category;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const SHORT_IMPERATIVE_MAX_WORDS: usize = 8;
const SHORT_IMPERATIVE_BONUS: u32 = 1;
const LONG_TEXT_MIN_WORDS: usize = 20;
const LONG_TEXT_BONUS: u32 = 2;
const HIGH_CONFIDENCE_GAP: u32 = 3;

/// Qualitative certainty of a category decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Confidence> {
        match value {
            "none" => Some(Confidence::None),
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category additive scores for one classification call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub tasks: u32,
    pub finances: u32,
    pub health: u32,
    pub notes: u32,
    pub books: u32,
}

impl ScoreVector {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Tasks => self.tasks,
            Category::Finances => self.finances,
            Category::Health => self.health,
            Category::Notes => self.notes,
            Category::Books => self.books,
        }
    }

    fn add(&mut self, category: Category, points: u32) {
        let slot = match category {
            Category::Tasks => &mut self.tasks,
            Category::Finances => &mut self.finances,
            Category::Health => &mut self.health,
            Category::Notes => &mut self.notes,
            Category::Books => &mut self.books,
        };
        *slot += points;
    }

    /// Categories with their scores, sorted descending.
    ///
    /// The sort is stable over `Category::ALL` order, so equal scores keep
    /// the declared category priority.
    pub fn ranked(&self) -> [(Category, u32); 5] {
        let mut entries = Category::ALL.map(|category| (category, self.get(category)));
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Outcome of classifying one free-text input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: Confidence,
    pub scores: ScoreVector,
    pub extracted: ExtractedFields,
}

/// Classifies raw dump-box text.
///
/// Returns `None` for empty or whitespace-only input. Otherwise the result
/// always names one of the five categories; with no signal at all the text
/// falls back to `notes` with confidence `none`.
pub fn categorize(text: &str) -> Option<Classification> {
    if text.trim().is_empty() {
        return None;
    }

    let scores = score_text(text);
    let ranked = scores.ranked();
    let (best_category, best_score) = ranked[0];
    let (_, second_score) = ranked[1];

    let confidence = if best_score == 0 {
        Confidence::None
    } else if best_score - second_score >= HIGH_CONFIDENCE_GAP {
        Confidence::High
    } else if best_score > second_score {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let category = if best_score == 0 {
        Category::Notes
    } else {
        best_category
    };

    Some(Classification {
        category,
        confidence,
        scores,
        extracted: extract_fields(text, category),
    })
}

/// Scores text against every category.
///
/// Each keyword contributes its tier weight once when present as a substring
/// of the lowercased text; each matching pattern adds its weight; structural
/// heuristics nudge short imperative phrases toward tasks and long free-form
/// text toward notes.
pub fn score_text(text: &str) -> ScoreVector {
    let lowered = text.to_lowercase();
    let lowered = lowered.trim();
    let mut scores = ScoreVector::default();

    for category in Category::ALL {
        let keywords = lexicon::keywords(category);
        for word in keywords.strong {
            if lowered.contains(word) {
                scores.add(category, STRONG_WEIGHT);
            }
        }
        for word in keywords.moderate {
            if lowered.contains(word) {
                scores.add(category, MODERATE_WEIGHT);
            }
        }
        for pattern in lexicon::patterns(category) {
            if pattern.is_match(lowered) {
                scores.add(category, PATTERN_WEIGHT);
            }
        }
    }

    let word_count = lowered.split_whitespace().count();
    if word_count <= SHORT_IMPERATIVE_MAX_WORDS && starts_with_latin_letter(lowered) {
        scores.add(Category::Tasks, SHORT_IMPERATIVE_BONUS);
    }
    if word_count > LONG_TEXT_MIN_WORDS {
        scores.add(Category::Notes, LONG_TEXT_BONUS);
    }

    scores
}

// Exactly `a-z` plus the accented Latin vowels; `ñ` and non-Latin letters
// never trigger the tasks bonus.
fn starts_with_latin_letter(lowered: &str) -> bool {
    matches!(
        lowered.chars().next(),
        Some(first) if first.is_ascii_lowercase() || matches!(first, 'á' | 'é' | 'í' | 'ó' | 'ú')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_breaks_ties_on_declared_order() {
        let scores = ScoreVector {
            tasks: 2,
            finances: 2,
            health: 0,
            notes: 2,
            books: 0,
        };
        let ranked = scores.ranked();
        assert_eq!(ranked[0].0, Category::Tasks);
        assert_eq!(ranked[1].0, Category::Finances);
        assert_eq!(ranked[2].0, Category::Notes);
    }

    #[test]
    fn short_imperative_bonus_requires_letter_start() {
        let lettered = score_text("call the dentist");
        assert!(lettered.tasks >= 1);

        let numbered = score_text("42 things");
        assert_eq!(numbered.tasks, 0);
    }

    #[test]
    fn accented_start_counts_as_letter() {
        assert!(starts_with_latin_letter("échale un vistazo"));
        assert!(!starts_with_latin_letter("ñoqui para cenar"));
        assert!(!starts_with_latin_letter("日記"));
    }

    #[test]
    fn confidence_labels_roundtrip() {
        for confidence in [
            Confidence::None,
            Confidence::Low,
            Confidence::Medium,
            Confidence::High,
        ] {
            assert_eq!(Confidence::parse(confidence.as_str()), Some(confidence));
        }
    }
}

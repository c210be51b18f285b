//! Static scoring vocabulary.
//!
//! # Responsibility
//! - Hold the per-category strong/moderate keyword sets and scoring regexes.
//! - Keep English and Spanish entries side by side; both are always tested.
//!
//! # Invariants
//! - Keywords are lowercase and matched as plain substrings of lowercased
//!   input.
//! - Scoring regexes are tested against the lowercased input. The two book
//!   patterns with uppercase classes are case-sensitive and kept as-is.

use crate::model::item::Category;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword tier weights and the pattern weight used by the scorer.
pub const STRONG_WEIGHT: u32 = 3;
pub const MODERATE_WEIGHT: u32 = 1;
pub const PATTERN_WEIGHT: u32 = 4;

/// Strong/moderate keyword tiers for one category.
pub struct KeywordSet {
    pub strong: &'static [&'static str],
    pub moderate: &'static [&'static str],
}

const TASKS_KEYWORDS: KeywordSet = KeywordSet {
    strong: &[
        "todo", "task", "remind", "reminder", "deadline", "due", "habit", "daily", "weekly",
        "checklist", "to-do", "to do",
    ],
    moderate: &[
        "buy",
        "call",
        "email",
        "send",
        "finish",
        "complete",
        "schedule",
        "appointment",
        "meeting",
        "pick up",
        "pickup",
        "do",
        "make",
        "fix",
        "clean",
        "organize",
        "book",
        "cancel",
        "renew",
        "return",
        "submit",
        "prepare",
        "plan",
        // Spanish
        "comprar",
        "llamar",
        "enviar",
        "terminar",
        "completar",
        "cita",
        "reunion",
        "recoger",
        "hacer",
        "limpiar",
        "organizar",
        "reservar",
        "cancelar",
        "renovar",
        "devolver",
        "tarea",
        "recordar",
        "recordatorio",
    ],
};

const FINANCES_KEYWORDS: KeywordSet = KeywordSet {
    strong: &[
        "paid",
        "spent",
        "earned",
        "cost",
        "price",
        "budget",
        "invoice",
        "salary",
        "rent",
        "subscription",
        "expense",
        "income",
        "receipt",
        "refund",
        // Spanish
        "pagado",
        "gastado",
        "ganado",
        "costo",
        "precio",
        "presupuesto",
        "factura",
        "salario",
        "alquiler",
        "suscripcion",
        "gasto",
        "ingreso",
        "recibo",
        "reembolso",
    ],
    moderate: &[
        "euro",
        "euros",
        "dollar",
        "dollars",
        "money",
        "cheap",
        "expensive",
        "bill",
        "payment",
        "transfer",
        "bank",
        "save",
        "saving",
        "credit",
        "debit",
        "tax",
        "tip",
        "fee",
        // Spanish
        "dinero",
        "barato",
        "caro",
        "cuenta",
        "pago",
        "transferencia",
        "banco",
        "ahorrar",
        "ahorro",
        "credito",
        "debito",
        "impuesto",
    ],
};

const HEALTH_KEYWORDS: KeywordSet = KeywordSet {
    strong: &[
        "workout",
        "exercise",
        "ran",
        "gym",
        "weight",
        "sleep",
        "calories",
        "diet",
        "yoga",
        "run",
        "swim",
        "bike",
        "cycling",
        "reps",
        "sets",
        "protein",
        "cardio",
        "training",
        // Spanish
        "ejercicio",
        "corri",
        "gimnasio",
        "peso",
        "dormir",
        "calorias",
        "dieta",
        "correr",
        "nadar",
        "bicicleta",
        "entrenamiento",
        "repeticiones",
        "series",
    ],
    moderate: &[
        "walked",
        "walk",
        "steps",
        "tired",
        "energy",
        "headache",
        "medicine",
        "doctor",
        "water",
        "meal",
        "ate",
        "breakfast",
        "lunch",
        "dinner",
        "slept",
        "hours of sleep",
        "kg",
        "lbs",
        "pushups",
        "squats",
        "plank",
        "stretch",
        "rest",
        // Spanish
        "caminar",
        "camine",
        "pasos",
        "cansado",
        "energia",
        "dolor",
        "medicina",
        "medico",
        "agua",
        "comida",
        "desayuno",
        "almuerzo",
        "cena",
        "dormi",
    ],
};

const NOTES_KEYWORDS: KeywordSet = KeywordSet {
    strong: &[
        "idea",
        "thought",
        "note",
        "concept",
        "inspiration",
        "brainstorm",
        "journal",
        "reflection",
        // Spanish ("idea" repeats on purpose; each entry scores on its own)
        "idea",
        "pensamiento",
        "nota",
        "concepto",
        "inspiracion",
        "reflexion",
        "diario",
    ],
    moderate: &[
        "maybe",
        "what if",
        "interesting",
        "read about",
        "look into",
        "research",
        "think about",
        "wonder",
        "remember",
        "curious",
        "link",
        "article",
        // Spanish
        "quizas",
        "interesante",
        "investigar",
        "pensar",
        "curioso",
        "articulo",
    ],
};

const BOOKS_KEYWORDS: KeywordSet = KeywordSet {
    strong: &[
        "book", "reading", "read", "author", "novel", "libro", "leyendo", "leer", "autor",
        "novela", "kindle", "audible", "ebook",
    ],
    moderate: &[
        "chapter",
        "page",
        "pages",
        "genre",
        "fiction",
        "non-fiction",
        "nonfiction",
        "biography",
        "memoir",
        "recommended",
        "recommendation",
        "library",
        "bookshelf",
        // Spanish
        "capítulo",
        "página",
        "páginas",
        "género",
        "ficción",
        "biografía",
        "biblioteca",
        "estantería",
        "recomendación",
        "espiritual",
        "autoayuda",
    ],
};

static FINANCES_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)[0-9]+[.,][0-9]{2}\s*(?:EUR|USD|€|\$)",
        r"(?i)(?:€|\$)\s*[0-9]+[.,]?[0-9]*",
        r"(?i)(?:spent|paid|earned|cost|gastado|pagado|ganado)\s+[0-9]+",
        r"(?i)[0-9]+\s*(?:euros?|dollars?|bucks)",
    ])
});

static HEALTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)[0-9]+\s*(?:km|mi|miles?|reps?|sets?|min(?:utes?)?|kg|lbs?|cal)",
        r"(?i)(?:ran|walked|cycled|swam|corri|camine)\s+[0-9]+",
        r"(?i)[0-9]+\s*hours?\s*(?:of\s*)?sleep",
        r"(?i)[0-9]+\s*horas?\s*(?:de\s*)?(?:sueño|dormir)",
        r"(?i)(?:push.?ups?|pull.?ups?|squats?|planks?|sentadillas)\s*:?\s*[0-9]+",
    ])
});

static TASKS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)^(?:buy|call|email|send|fix|clean|finish|do|get|pick up|comprar|llamar|enviar|hacer|limpiar|terminar)\s",
        r"(?i)(?:by|before|due|until|para el|antes del?)\s+[0-9A-Za-z_]+",
        r"(?i)(?:need to|have to|must|should|tengo que|debo|necesito)\s",
    ])
});

static BOOKS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        "(?:reading|read|finished|started|leyendo|leí|terminé|empecé)\\s+[\"'\u{201d}\u{2019}]?[A-Z]",
        r"(?i)(?:book|libro|novel|novela)\s+(?:by|de|por)\s",
        r"(?:by|de)\s+[A-Z][a-z]+\s+[A-Z]",
    ])
});

static NOTES_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(Vec::new);

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(source).expect("valid lexicon pattern"))
        .collect()
}

/// Keyword tiers for one category.
pub fn keywords(category: Category) -> &'static KeywordSet {
    match category {
        Category::Tasks => &TASKS_KEYWORDS,
        Category::Finances => &FINANCES_KEYWORDS,
        Category::Health => &HEALTH_KEYWORDS,
        Category::Notes => &NOTES_KEYWORDS,
        Category::Books => &BOOKS_KEYWORDS,
    }
}

/// Ordered scoring patterns for one category.
pub fn patterns(category: Category) -> &'static [Regex] {
    match category {
        Category::Tasks => &TASKS_PATTERNS,
        Category::Finances => &FINANCES_PATTERNS,
        Category::Health => &HEALTH_PATTERNS,
        Category::Notes => &NOTES_PATTERNS,
        Category::Books => &BOOKS_PATTERNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_keyword_set() {
        for category in Category::ALL {
            let set = keywords(category);
            assert!(!set.strong.is_empty());
            assert!(!set.moderate.is_empty());
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for category in Category::ALL {
            let set = keywords(category);
            for word in set.strong.iter().chain(set.moderate) {
                assert_eq!(*word, word.to_lowercase(), "keyword `{word}` not lowercase");
            }
        }
    }

    #[test]
    fn patterns_compile_for_every_category() {
        for category in Category::ALL {
            // Forces the Lazy cells; a bad pattern would panic here.
            let _ = patterns(category);
        }
        assert!(patterns(Category::Notes).is_empty());
    }

    #[test]
    fn currency_pattern_matches_lowered_text() {
        let hit = patterns(Category::Finances)
            .iter()
            .any(|re| re.is_match("spent 45.50 eur on groceries"));
        assert!(hit);
    }

    #[test]
    fn case_sensitive_book_patterns_never_match_lowered_text() {
        let lowered = "reading the brothers karamazov by dostoevsky";
        assert!(!BOOKS_PATTERNS[0].is_match(lowered));
        assert!(!BOOKS_PATTERNS[2].is_match(lowered));
    }
}

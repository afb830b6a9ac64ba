//! Fixed reference tables for triage scoring.
//!
//! The weight table maps a lowercased symptom label to its weight. Weights fall into bands:
//! critical (85-100), high (60-84), medium (25-59), low (10-24) and routine (5-9).

use std::{collections::HashMap, sync::OnceLock};

/// Weight used for any symptom that is not in the table.
pub const UNKNOWN_SYMPTOM_WEIGHT: u32 = 20;

/// Weight at or above which a symptom is reported as critical.
pub const CRITICAL_SYMPTOM_WEIGHT: u32 = 85;

/// Weight at or above which a symptom is reported as high priority.
pub const HIGH_SYMPTOM_WEIGHT: u32 = 60;

/// Symptom weights, keyed by lowercased label.
pub const SYMPTOM_WEIGHTS: &[(&str, u32)] = &[
    // Critical.
    ("chest pain", 95),
    ("difficulty breathing", 90),
    ("severe bleeding", 95),
    ("unconscious", 100),
    ("stroke symptoms", 95),
    ("severe head injury", 90),
    ("heart attack", 100),
    ("anaphylaxis", 95),
    // High.
    ("severe pain", 75),
    ("high fever", 70),
    ("vomiting blood", 85),
    ("severe abdominal pain", 75),
    ("broken bone", 65),
    ("deep cut", 70),
    // Medium.
    ("moderate pain", 50),
    ("fever", 45),
    ("nausea", 30),
    ("headache", 35),
    ("cough", 25),
    ("minor cut", 20),
    // Low.
    ("cold symptoms", 15),
    ("minor ache", 10),
    ("rash", 20),
    ("sore throat", 15),
    // Routine.
    ("checkup", 5),
    ("prescription refill", 5),
    ("vaccination", 10),
];

/// Phrases in the free-text description that each add to the score.
pub const URGENT_KEYWORDS: &[&str] = &["severe", "can't breathe", "unconscious", "bleeding heavily"];

/// The symptom checklist offered at intake.
///
/// Some of these (e.g. `Dizziness`) are not in the weight table and score as unknown.
pub const COMMON_SYMPTOMS: &[&str] = &[
    "Chest pain",
    "Difficulty breathing",
    "Severe bleeding",
    "Severe pain",
    "High fever",
    "Nausea",
    "Headache",
    "Cough",
    "Dizziness",
    "Abdominal pain",
    "Broken bone",
    "Deep cut",
    "Vomiting",
    "Cold symptoms",
    "Sore throat",
    "Rash",
    "Minor ache",
];

// Statics.

static SYMPTOM_WEIGHT_TABLE: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

/// Get the symptom weight lookup table.
fn get_symptom_weight_table() -> &'static HashMap<&'static str, u32> {
    SYMPTOM_WEIGHT_TABLE.get_or_init(|| SYMPTOM_WEIGHTS.iter().copied().collect())
}

/// Look up a symptom's weight, case-insensitively, if it is in the table.
pub fn lookup_weight(symptom: &str) -> Option<u32> {
    get_symptom_weight_table().get(symptom.to_lowercase().as_str()).copied()
}

/// A symptom's weight, falling back to [`UNKNOWN_SYMPTOM_WEIGHT`].
pub fn symptom_weight(symptom: &str) -> u32 {
    lookup_weight(symptom).unwrap_or(UNKNOWN_SYMPTOM_WEIGHT)
}

/// Age brackets used to scale the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Infant,
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBracket {
    /// Place an age on the bracket ladder.
    ///
    /// The ladder only checks upper bounds, so a negative age lands in `Infant`.
    pub fn from_age(age: i32) -> Self {
        if age <= 2 {
            AgeBracket::Infant
        } else if age <= 12 {
            AgeBracket::Child
        } else if age <= 17 {
            AgeBracket::Teen
        } else if age <= 64 {
            AgeBracket::Adult
        } else {
            AgeBracket::Senior
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            AgeBracket::Infant => 1.3,
            AgeBracket::Child => 1.2,
            AgeBracket::Teen | AgeBracket::Adult => 1.0,
            AgeBracket::Senior => 1.2,
        }
    }
}

// Tests.

//! Rule-based triage scoring.
//!
//! This module defines the `GenericTriageScorer` trait that the queue consults at intake, along
//! with the default implementation: a fixed symptom weight table, age factor, vital-sign
//! adjustments and urgent keyword matching. There is no model behind it; the same inputs always
//! produce the same result.

use std::{ops::Deref, sync::Arc};

use tracing::trace;

use crate::base::{
    symptoms::{AgeBracket, CRITICAL_SYMPTOM_WEIGHT, HIGH_SYMPTOM_WEIGHT, URGENT_KEYWORDS, symptom_weight},
    types::{PriorityLevel, TriageRequest, TriageResult, VitalSigns},
};

/// Temperature (°F) above which a fever adds to the score.
const FEVER_THRESHOLD: f64 = 103.0;
/// Heart rate (bpm) above which the rate is abnormal.
const TACHYCARDIA_THRESHOLD: i32 = 120;
/// Heart rate (bpm) below which the rate is abnormal.
const BRADYCARDIA_THRESHOLD: i32 = 50;
/// Oxygen saturation (%) below which saturation is low.
const HYPOXIA_THRESHOLD: f64 = 90.0;

const FEVER_POINTS: u32 = 25;
const HEART_RATE_POINTS: u32 = 20;
const OXYGEN_POINTS: u32 = 30;
const KEYWORD_POINTS: u32 = 20;

const MAX_SCORE: f64 = 100.0;

// Traits.

/// Generic triage scorer trait that scorers must implement.
///
/// Implementations must be pure: no state may carry over between calls.
pub trait GenericTriageScorer: Send + Sync + 'static {
    /// Assess one patient.
    fn assess(&self, request: &TriageRequest) -> TriageResult;
}

// Structs.

/// Triage scorer for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TriageScorer {
    inner: Arc<dyn GenericTriageScorer>,
}

impl Deref for TriageScorer {
    type Target = dyn GenericTriageScorer;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TriageScorer {
    /// Wrap any scorer implementation.
    pub fn new(inner: Arc<dyn GenericTriageScorer>) -> Self {
        Self { inner }
    }

    /// The fixed-table scorer.
    pub fn rules() -> Self {
        Self::new(Arc::new(RuleBasedScorer))
    }
}

impl From<RuleBasedScorer> for TriageScorer {
    fn from(scorer: RuleBasedScorer) -> Self {
        Self { inner: Arc::new(scorer) }
    }
}

// Specific implementations.

/// Scorer backed by the fixed weight and keyword tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedScorer;

impl GenericTriageScorer for RuleBasedScorer {
    fn assess(&self, request: &TriageRequest) -> TriageResult {
        score(&request.symptoms, request.age, &request.description, request.vitals.as_ref())
    }
}

/// Score a patient from symptoms, age, free-text description and optional vitals.
///
/// Total and deterministic. Callers are expected to have dropped malformed numbers (e.g. NaN)
/// from `vitals` already; the age is taken as given, so a negative age scores as an infant.
pub fn score<S: AsRef<str>>(symptoms: &[S], age: i32, description: &str, vitals: Option<&VitalSigns>) -> TriageResult {
    let mut reasoning = Vec::new();

    // Symptom weights.

    let mut points: u32 = 0;

    for symptom in symptoms {
        let symptom = symptom.as_ref();
        let weight = symptom_weight(symptom);
        points = points.saturating_add(weight);

        if weight >= CRITICAL_SYMPTOM_WEIGHT {
            reasoning.push(format!("Critical symptom detected: {symptom}"));
        } else if weight >= HIGH_SYMPTOM_WEIGHT {
            reasoning.push(format!("High priority symptom: {symptom}"));
        }
    }

    // Age factor.

    let age_factor = AgeBracket::from_age(age).factor();

    if age_factor > 1.0 {
        reasoning.push(format!("Age factor applied ({age} years old)"));
    }

    // Vital signs.

    if let Some(vitals) = vitals {
        points = points.saturating_add(score_vitals(vitals, &mut reasoning));
    }

    // Description keywords.

    let description = description.to_lowercase();

    for keyword in URGENT_KEYWORDS {
        if description.contains(keyword) {
            points = points.saturating_add(KEYWORD_POINTS);
            reasoning.push(format!("Urgent keyword detected: {keyword}"));
        }
    }

    // Final score and tier.

    let priority_score = final_score(points, age_factor);
    let priority_level = PriorityLevel::from_score(priority_score);

    reasoning.push(priority_level.reasoning().to_string());

    trace!(points, age_factor, priority_score, %priority_level, "Scored patient");

    TriageResult {
        priority_score,
        priority_level,
        estimated_wait_time: priority_level.wait_minutes(),
        reasoning,
    }
}

/// Scale the accumulated points by the age factor, clamp to 100 and round.
fn final_score(points: u32, age_factor: f64) -> u8 {
    (f64::from(points) * age_factor).min(MAX_SCORE).round() as u8
}

/// Additive points from abnormal vitals; only recorded vitals are checked.
fn score_vitals(vitals: &VitalSigns, reasoning: &mut Vec<String>) -> u32 {
    let mut points = 0;

    if vitals.temperature.is_some_and(|t| t > FEVER_THRESHOLD) {
        points += FEVER_POINTS;
        reasoning.push("High fever detected in vital signs".to_string());
    }

    if vitals.heart_rate.is_some_and(|hr| hr > TACHYCARDIA_THRESHOLD || hr < BRADYCARDIA_THRESHOLD) {
        points += HEART_RATE_POINTS;
        reasoning.push("Abnormal heart rate detected".to_string());
    }

    if vitals.oxygen_saturation.is_some_and(|o2| o2 < HYPOXIA_THRESHOLD) {
        points += OXYGEN_POINTS;
        reasoning.push("Low oxygen saturation detected".to_string());
    }

    points
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::symptoms::SYMPTOM_WEIGHTS;

    const NO_SYMPTOMS: &[&str] = &[];

    fn oxygen(saturation: f64) -> VitalSigns {
        VitalSigns {
            oxygen_saturation: Some(saturation),
            ..Default::default()
        }
    }

    #[test]
    fn test_chest_pain_adult_is_critical() {
        let result = score(&["Chest pain"], 30, "", None);

        assert_eq!(result.priority_score, 95);
        assert_eq!(result.priority_level, PriorityLevel::Critical);
        assert_eq!(result.estimated_wait_time, 0);
        assert_eq!(result.reasoning, vec!["Critical symptom detected: Chest pain", "IMMEDIATE ATTENTION REQUIRED"]);
    }

    #[test]
    fn test_cold_symptoms_senior_is_low() {
        let result = score(&["Cold symptoms"], 70, "", None);

        assert_eq!(result.priority_score, 18);
        assert_eq!(result.priority_level, PriorityLevel::Low);
        assert_eq!(result.estimated_wait_time, 120);
        assert_eq!(result.reasoning, vec!["Age factor applied (70 years old)", "Low priority - target 2 hour wait"]);
    }

    #[test]
    fn test_headache_with_low_oxygen_is_high() {
        let result = score(&["Headache"], 40, "", Some(&oxygen(85.0)));

        assert_eq!(result.priority_score, 65);
        assert_eq!(result.priority_level, PriorityLevel::High);
        assert_eq!(result.estimated_wait_time, 15);
        assert_eq!(result.reasoning, vec!["Low oxygen saturation detected", "High priority - see within 15 minutes"]);
    }

    #[test]
    fn test_keywords_only_child_is_medium() {
        let result = score(NO_SYMPTOMS, 5, "severe pain and bleeding heavily", None);

        assert_eq!(result.priority_score, 48);
        assert_eq!(result.priority_level, PriorityLevel::Medium);
        assert_eq!(result.estimated_wait_time, 60);
        assert_eq!(
            result.reasoning,
            vec![
                "Age factor applied (5 years old)",
                "Urgent keyword detected: severe",
                "Urgent keyword detected: bleeding heavily",
                "Medium priority - target 1 hour wait",
            ]
        );
    }

    #[test]
    fn test_empty_input_is_stable() {
        let result = score(NO_SYMPTOMS, 30, "", None);

        assert_eq!(result.priority_score, 0);
        assert_eq!(result.priority_level, PriorityLevel::Stable);
        assert_eq!(result.estimated_wait_time, 180);
        assert_eq!(result.reasoning, vec!["Stable condition - routine care"]);
    }

    #[test]
    fn test_unknown_symptom_weighs_twenty() {
        let result = score(&["Dizziness"], 30, "", None);

        assert_eq!(result.priority_score, 20);
        assert_eq!(result.priority_level, PriorityLevel::Low);
    }

    #[test]
    fn test_duplicate_and_case_variant_symptoms_both_count() {
        let result = score(&["Headache", "HEADACHE"], 30, "", None);

        assert_eq!(result.priority_score, 70);
        assert_eq!(result.priority_level, PriorityLevel::High);
    }

    #[test]
    fn test_high_symptom_reasoning() {
        let result = score(&["Broken bone"], 30, "", None);

        assert_eq!(result.reasoning[0], "High priority symptom: Broken bone");
        assert_eq!(result.priority_level, PriorityLevel::High);
    }

    #[test]
    fn test_score_clamped_to_one_hundred() {
        let result = score(&["Unconscious", "Heart attack", "Chest pain"], 80, "severe, can't breathe, unconscious, bleeding heavily", None);

        assert_eq!(result.priority_score, 100);
        assert_eq!(result.priority_level, PriorityLevel::Critical);
    }

    #[test]
    fn test_vitals_stack_in_order() {
        let vitals = VitalSigns {
            temperature: Some(104.0),
            blood_pressure: Some("190/120".to_string()),
            heart_rate: Some(45),
            oxygen_saturation: Some(88.0),
        };

        let result = score(NO_SYMPTOMS, 30, "", Some(&vitals));

        assert_eq!(result.priority_score, 75);
        assert_eq!(
            result.reasoning,
            vec![
                "High fever detected in vital signs",
                "Abnormal heart rate detected",
                "Low oxygen saturation detected",
                "High priority - see within 15 minutes",
            ]
        );
    }

    #[test]
    fn test_vital_boundaries_do_not_trigger() {
        let vitals = VitalSigns {
            temperature: Some(103.0),
            heart_rate: Some(120),
            oxygen_saturation: Some(90.0),
            ..Default::default()
        };

        assert_eq!(score(NO_SYMPTOMS, 30, "", Some(&vitals)).priority_score, 0);

        let slow = VitalSigns {
            heart_rate: Some(50),
            ..Default::default()
        };

        assert_eq!(score(NO_SYMPTOMS, 30, "", Some(&slow)).priority_score, 0);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let result = score(NO_SYMPTOMS, 30, "Patient is UNCONSCIOUS", None);

        assert_eq!(result.priority_score, 20);
        assert_eq!(result.reasoning[0], "Urgent keyword detected: unconscious");
    }

    #[test]
    fn test_age_factor_applies_to_additions() {
        // (35 + 25) * 1.3 = 78
        let vitals = VitalSigns {
            temperature: Some(104.5),
            ..Default::default()
        };

        let result = score(&["Headache"], 1, "", Some(&vitals));

        assert_eq!(result.priority_score, 78);
        assert_eq!(result.priority_level, PriorityLevel::High);
    }

    #[test]
    fn test_rounded_score_decides_tier() {
        // 65 * 1.3 = 84.5, which rounds to 85.
        let result = score(&["Broken bone"], 1, "", None);

        assert_eq!(result.priority_score, 85);
        assert_eq!(result.priority_level, PriorityLevel::Critical);
    }

    #[test]
    fn test_negative_age_scores_as_infant() {
        let result = score(&["Headache"], -1, "", None);

        // 35 * 1.3 = 45.5, rounds to 46.
        assert_eq!(result.priority_score, 46);
        assert_eq!(result.reasoning[0], "Age factor applied (-1 years old)");
    }

    #[test]
    fn test_critical_iff_weighted_sum_reaches_threshold() {
        let critical: Vec<&str> = SYMPTOM_WEIGHTS.iter().filter(|(_, w)| *w >= CRITICAL_SYMPTOM_WEIGHT).map(|(s, _)| *s).collect();

        for first in &critical {
            for (second, _) in SYMPTOM_WEIGHTS {
                let symptoms = [*first, *second];
                let sum: u32 = symptoms.iter().map(|s| symptom_weight(s)).sum();
                let result = score(&symptoms, 30, "", None);

                assert_eq!(result.priority_level == PriorityLevel::Critical, sum >= 85, "{symptoms:?}");
            }
        }
    }

    #[test]
    fn test_score_always_in_range_and_tier_consistent() {
        let ages = [-5, 0, 2, 3, 12, 13, 17, 18, 64, 65, 120];
        let descriptions = ["", "severe", "severe can't breathe unconscious bleeding heavily"];

        for (symptom, _) in SYMPTOM_WEIGHTS {
            for age in ages {
                for description in descriptions {
                    let symptoms = [*symptom, *symptom, "unlisted"];
                    let result = score(&symptoms, age, description, Some(&oxygen(70.0)));

                    assert!(result.priority_score <= 100);
                    assert_eq!(result.priority_level, PriorityLevel::from_score(result.priority_score));
                    assert_eq!(result.estimated_wait_time, result.priority_level.wait_minutes());
                }
            }
        }
    }

    #[test]
    fn test_saturated_points_clamp_to_one_hundred() {
        assert_eq!(u32::MAX.saturating_add(KEYWORD_POINTS), u32::MAX);
        assert_eq!(final_score(u32::MAX, 1.3), 100);
        assert_eq!(final_score(u32::MAX, 1.0), 100);
        assert_eq!(final_score(0, 1.3), 0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let vitals = VitalSigns {
            temperature: Some(101.2),
            heart_rate: Some(130),
            ..Default::default()
        };

        let first = score(&["Fever", "Cough"], 8, "severe cough", Some(&vitals));
        let second = score(&["Fever", "Cough"], 8, "severe cough", Some(&vitals));

        assert_eq!(first, second);
    }

    #[test]
    fn test_rule_based_scorer_matches_free_function() {
        let scorer = TriageScorer::rules();
        let request = TriageRequest {
            symptoms: vec!["Headache".to_string()],
            age: 40,
            description: String::new(),
            vitals: Some(oxygen(85.0)),
        };

        assert_eq!(scorer.assess(&request), score(&["Headache"], 40, "", Some(&oxygen(85.0))));
    }
}

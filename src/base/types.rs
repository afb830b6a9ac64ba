//! Common result aliases and the domain types shared across mediflow.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, PickFirst, serde_as};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

// Triage.

/// The five priority tiers, ordered by descending urgency.
///
/// The derived ordering puts `Critical` first, which is the order the queue displays patients in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
    Stable,
}

impl PriorityLevel {
    /// All tiers, most urgent first.
    pub const ALL: [PriorityLevel; 5] = [PriorityLevel::Critical, PriorityLevel::High, PriorityLevel::Medium, PriorityLevel::Low, PriorityLevel::Stable];

    /// Classify a final (already rounded and clamped) priority score.
    ///
    /// Each threshold is an inclusive lower bound, checked from the most urgent tier down.
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => PriorityLevel::Critical,
            65..=84 => PriorityLevel::High,
            35..=64 => PriorityLevel::Medium,
            15..=34 => PriorityLevel::Low,
            _ => PriorityLevel::Stable,
        }
    }

    /// Estimated wait, in minutes, for a patient in this tier.
    pub fn wait_minutes(self) -> u32 {
        match self {
            PriorityLevel::Critical => 0,
            PriorityLevel::High => 15,
            PriorityLevel::Medium => 60,
            PriorityLevel::Low => 120,
            PriorityLevel::Stable => 180,
        }
    }

    /// Position in the queue display, starting at 1 for `Critical`.
    pub fn order(self) -> u8 {
        self as u8 + 1
    }

    /// The reasoning line appended once the tier is decided.
    pub fn reasoning(self) -> &'static str {
        match self {
            PriorityLevel::Critical => "IMMEDIATE ATTENTION REQUIRED",
            PriorityLevel::High => "High priority - see within 15 minutes",
            PriorityLevel::Medium => "Medium priority - target 1 hour wait",
            PriorityLevel::Low => "Low priority - target 2 hour wait",
            PriorityLevel::Stable => "Stable condition - routine care",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
            PriorityLevel::Stable => "stable",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional vital signs taken at intake.
///
/// Every field may be absent. Blood pressure is carried for display and never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Body temperature in °F.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Free-form blood pressure reading, e.g. `120/80`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    /// Heart rate in beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i32>,
    /// Oxygen saturation in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
}

impl VitalSigns {
    /// Whether no vital has been recorded at all.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.blood_pressure.is_none() && self.heart_rate.is_none() && self.oxygen_saturation.is_none()
    }
}

/// Everything the scorer looks at for one patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriageRequest {
    pub symptoms: Vec<String>,
    pub age: i32,
    pub description: String,
    pub vitals: Option<VitalSigns>,
}

/// The outcome of scoring one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    /// Integer score in `0..=100`.
    pub priority_score: u8,
    pub priority_level: PriorityLevel,
    /// Minutes; fully determined by `priority_level`.
    pub estimated_wait_time: u32,
    /// Rules that fired, in evaluation order.
    pub reasoning: Vec<String>,
}

// Queue.

/// Where a patient is in the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    #[default]
    Waiting,
    InProgress,
    Completed,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Waiting => "waiting",
            PatientStatus::InProgress => "in-progress",
            PatientStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient admitted to the queue.
///
/// The triage result is computed once at intake and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub symptoms: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<VitalSigns>,
    pub admitted_at: DateTime<Utc>,
    pub triage: TriageResult,
    pub status: PatientStatus,
}

/// Raw values as they come off an intake form.
///
/// Numbers may be given either as numbers or as numeric strings. A blank string is the same as
/// leaving the field out.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
}

/// One entry of a recorded queue session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    Intake(IntakeForm),
    Status { patient_id: u64, status: PatientStatus },
}

/// Count and share of patients in one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelShare {
    pub level: PriorityLevel,
    pub count: usize,
    /// Rounded percentage of all patients.
    pub percent: u32,
}

/// Dashboard numbers for the whole queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub total_patients: usize,
    pub active_patients: usize,
    pub critical_waiting: usize,
    pub in_treatment: usize,
    /// Mean estimated wait over active patients, rounded.
    pub average_wait_minutes: u32,
    pub distribution: Vec<LevelShare>,
}

// Tests.

use anyhow::anyhow;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::{
    base::types::{IntakeForm, Patient, PatientStatus, PriorityLevel, Res, TriageRequest, VitalSigns},
    service::{queue::PatientQueue, scorer::TriageScorer},
};

const MISSING_INFORMATION: &str = "Please provide patient name, age, and at least one symptom.";

/// Admit a patient from an intake form.
///
/// The form is validated, the vitals are cleaned up, the scorer runs once, and the new patient
/// joins the queue as `waiting`. Returns the new patient's id.
#[instrument(skip_all, fields(name = %form.name))]
pub fn handle_intake(form: IntakeForm, scorer: &TriageScorer, queue: &mut PatientQueue) -> Res<u64> {
    let name = form.name.trim();

    if name.is_empty() || form.symptoms.is_empty() {
        return Err(anyhow!(MISSING_INFORMATION));
    }

    let age = form.age.ok_or_else(|| anyhow!(MISSING_INFORMATION))?;
    let age = u32::try_from(age).map_err(|_| anyhow!("Age must be a non-negative whole number, got {age}."))?;
    let scored_age = i32::try_from(age).map_err(|_| anyhow!("Age {age} is out of range."))?;

    let vitals = normalize_vitals(&form);

    let request = TriageRequest {
        symptoms: form.symptoms,
        age: scored_age,
        description: form.description,
        vitals,
    };

    let triage = scorer.assess(&request);

    debug!("Triage reasoning: {:?}", triage.reasoning);

    let patient = Patient {
        id: queue.next_id(),
        name: name.to_string(),
        age,
        symptoms: request.symptoms,
        description: request.description,
        vitals: request.vitals,
        admitted_at: Utc::now(),
        triage,
        status: PatientStatus::Waiting,
    };

    let level = patient.triage.priority_level;
    let score = patient.triage.priority_score;
    let id = queue.push(patient);

    if level == PriorityLevel::Critical {
        warn!("Patient {id} assigned CRITICAL priority (Score: {score})");
    } else {
        info!("Patient {id} assigned {} priority (Score: {score})", level.as_str().to_uppercase());
    }

    Ok(id)
}

/// Build the vitals the scorer will see.
///
/// A reading that is zero, NaN or infinite counts as not taken; any other reading, negative ones
/// included, is kept for the scorer to judge. Heart rate is truncated to whole beats. Returns
/// `None` when nothing usable was recorded.
pub fn normalize_vitals(form: &IntakeForm) -> Option<VitalSigns> {
    let vitals = VitalSigns {
        temperature: usable_reading(form.temperature),
        blood_pressure: form.blood_pressure.as_ref().map(|bp| bp.trim().to_string()).filter(|bp| !bp.is_empty()),
        heart_rate: usable_reading(form.heart_rate).map(|hr| hr.trunc() as i32),
        oxygen_saturation: usable_reading(form.oxygen_saturation),
    };

    if vitals.is_empty() { None } else { Some(vitals) }
}

fn usable_reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

// Tests.

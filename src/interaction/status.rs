use crate::{base::types::PatientStatus, prelude::*, service::queue::PatientQueue};

/// Move a patient along `waiting -> in-progress -> completed`.
///
/// Setting the current status again is a no-op. The stored triage result is never touched.
#[instrument(skip(queue))]
pub fn handle_status_change(queue: &mut PatientQueue, patient_id: u64, status: PatientStatus) -> Void {
    let patient = queue.get_mut(patient_id).ok_or_else(|| anyhow!("No patient with id {patient_id}."))?;

    if patient.status == status {
        return Ok(());
    }

    let allowed = matches!(
        (patient.status, status),
        (PatientStatus::Waiting, PatientStatus::InProgress) | (PatientStatus::InProgress, PatientStatus::Completed)
    );

    if !allowed {
        return Err(anyhow!("Patient {patient_id} cannot move from {} to {status}.", patient.status));
    }

    info!("Patient {patient_id} is now {status}");
    patient.status = status;

    Ok(())
}

// Tests.

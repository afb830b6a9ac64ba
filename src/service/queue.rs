//! In-memory patient queue.
//!
//! The queue lives for one session: it starts empty, grows on intake and is mutated in place on
//! status changes. Nothing is persisted.

use crate::base::types::{LevelShare, Patient, PatientStatus, PriorityLevel, QueueStats};

/// Patients in admission order, plus the next id to hand out.
#[derive(Debug, Clone)]
pub struct PatientQueue {
    patients: Vec<Patient>,
    next_id: u64,
}

impl Default for PatientQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { patients: Vec::new(), next_id: 1 }
    }

    /// The id the next admitted patient will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Append a patient and return its id.
    ///
    /// The patient's id is replaced with the next id in admission order.
    pub fn push(&mut self, mut patient: Patient) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        patient.id = id;
        self.patients.push(patient);

        id
    }

    pub fn get(&self, id: u64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// All patients in admission order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All patients, most urgent tier first; earlier admissions first within a tier.
    pub fn sorted(&self) -> Vec<&Patient> {
        let mut sorted: Vec<&Patient> = self.patients.iter().collect();
        sorted.sort_by_key(|p| (p.triage.priority_level, p.admitted_at));
        sorted
    }

    /// Patients in one status, in queue order.
    pub fn by_status(&self, status: PatientStatus) -> Vec<&Patient> {
        self.sorted().into_iter().filter(|p| p.status == status).collect()
    }

    /// Critical patients not yet being seen.
    pub fn critical_waiting(&self) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.triage.priority_level == PriorityLevel::Critical && p.status == PatientStatus::Waiting)
            .collect()
    }

    /// The last `count` admissions, newest first.
    pub fn recent(&self, count: usize) -> Vec<&Patient> {
        self.patients.iter().rev().take(count).collect()
    }

    /// Dashboard numbers for the current state of the queue.
    pub fn stats(&self) -> QueueStats {
        let total_patients = self.patients.len();
        let active: Vec<&Patient> = self.patients.iter().filter(|p| p.status != PatientStatus::Completed).collect();

        let average_wait_minutes = if active.is_empty() {
            0
        } else {
            let total_wait: u32 = active.iter().map(|p| p.triage.estimated_wait_time).sum();
            (f64::from(total_wait) / active.len() as f64).round() as u32
        };

        let distribution = PriorityLevel::ALL
            .iter()
            .map(|&level| {
                let count = self.patients.iter().filter(|p| p.triage.priority_level == level).count();
                let percent = if total_patients == 0 { 0 } else { (count as f64 * 100.0 / total_patients as f64).round() as u32 };

                LevelShare { level, count, percent }
            })
            .collect();

        QueueStats {
            total_patients,
            active_patients: active.len(),
            critical_waiting: self.critical_waiting().len(),
            in_treatment: self.patients.iter().filter(|p| p.status == PatientStatus::InProgress).count(),
            average_wait_minutes,
            distribution,
        }
    }
}

// Tests.

//! Runtime services and shared state for mediflow.

use std::path::Path;

use anyhow::Context;

use crate::{
    base::types::{QueueEvent, TriageRequest, TriageResult},
    interaction::{intake::handle_intake, status::handle_status_change},
    prelude::*,
    service::{queue::PatientQueue, scorer::TriageScorer},
};

/// Runtime context for one session.
///
/// This struct holds the configuration, the scorer, and the session's patient queue.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The scorer consulted at intake.
    pub scorer: TriageScorer,
    /// The session's patients.
    pub queue: PatientQueue,
}

impl Runtime {
    /// Create a new runtime instance with the rule-based scorer.
    pub fn new(config: Config) -> Self {
        Self::with_scorer(config, TriageScorer::rules())
    }

    /// Create a new runtime instance around a specific scorer.
    pub fn with_scorer(config: Config, scorer: TriageScorer) -> Self {
        Self {
            config,
            scorer,
            queue: PatientQueue::new(),
        }
    }

    /// Score a single patient without admitting them.
    pub fn assess(&self, request: &TriageRequest) -> TriageResult {
        self.scorer.assess(request)
    }

    /// Read a recorded session (a JSON array of queue events).
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_session(path: &Path) -> Res<Vec<QueueEvent>> {
        let data = std::fs::read_to_string(path).with_context(|| format!("Could not read session file {}", path.display()))?;
        let events: Vec<QueueEvent> = serde_json::from_str(&data).with_context(|| format!("Could not parse session file {}", path.display()))?;

        info!("Loaded {} queue events", events.len());

        Ok(events)
    }

    /// Apply queue events in order, stopping at the first one that fails.
    #[instrument(skip_all)]
    pub fn replay(&mut self, events: Vec<QueueEvent>) -> Void {
        for (index, event) in events.into_iter().enumerate() {
            match event {
                QueueEvent::Intake(form) => {
                    handle_intake(form, &self.scorer, &mut self.queue).with_context(|| format!("Intake event {index} failed"))?;
                }
                QueueEvent::Status { patient_id, status } => {
                    handle_status_change(&mut self.queue, patient_id, status).with_context(|| format!("Status event {index} failed"))?;
                }
            }
        }

        info!("Queue holds {} patients", self.queue.len());

        Ok(())
    }

    /// The session's patient queue.
    pub fn queue(&self) -> &PatientQueue {
        &self.queue
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::types::{PatientStatus, PriorityLevel};

    const SESSION: &str = r#"[
        { "type": "intake", "name": "Ada", "age": 30, "symptoms": ["Chest pain"] },
        { "type": "intake", "name": "Bo", "age": "70", "symptoms": ["Cold symptoms"], "blood_pressure": "" },
        { "type": "status", "patient_id": 1, "status": "in-progress" }
    ]"#;

    #[test]
    fn test_replay_session() {
        let path = std::env::temp_dir().join(format!("mediflow-session-{}.json", std::process::id()));
        std::fs::write(&path, SESSION).unwrap();

        let events = Runtime::load_session(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut runtime = Runtime::new(Config::default());
        runtime.replay(events).unwrap();

        let queue = runtime.queue();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(1).unwrap().status, PatientStatus::InProgress);
        assert_eq!(queue.get(2).unwrap().triage.priority_score, 18);
        assert_eq!(queue.get(2).unwrap().triage.priority_level, PriorityLevel::Low);
    }

    #[test]
    fn test_load_session_reports_path() {
        let err = Runtime::load_session(Path::new("/definitely/not/here.json")).unwrap_err();

        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_replay_stops_at_failing_event() {
        let events: Vec<QueueEvent> = serde_json::from_str(
            r#"[
                { "type": "intake", "name": "Ada", "age": 30, "symptoms": ["Cough"] },
                { "type": "status", "patient_id": 7, "status": "in-progress" },
                { "type": "intake", "name": "Bo", "age": 30, "symptoms": ["Cough"] }
            ]"#,
        )
        .unwrap();

        let mut runtime = Runtime::new(Config::default());
        let err = runtime.replay(events).unwrap_err();

        assert!(err.to_string().contains("Status event 1 failed"));
        assert_eq!(runtime.queue().len(), 1);
    }

    #[test]
    fn test_replay_treats_blank_fields_as_missing() {
        let events: Vec<QueueEvent> = serde_json::from_str(
            r#"[
                { "type": "intake", "name": "Ada", "age": "30", "symptoms": ["Cough"], "temperature": "", "heart_rate": "", "oxygen_saturation": "" },
                { "type": "intake", "name": "Bo", "age": "", "symptoms": ["Cough"] }
            ]"#,
        )
        .unwrap();

        let mut runtime = Runtime::new(Config::default());
        let err = runtime.replay(events).unwrap_err();

        assert!(err.to_string().contains("Intake event 1 failed"));
        assert!(format!("{err:#}").contains("Please provide patient name, age, and at least one symptom."));

        let ada = runtime.queue().get(1).unwrap();
        assert_eq!(ada.vitals, None);
        assert_eq!(ada.triage.priority_score, 25);
    }
}

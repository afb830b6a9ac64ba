//! Text and JSON reports for triage results and the queue dashboard.

use std::fmt::Write;

use serde::Serialize;

use crate::{
    base::{
        config::{Config, OutputFormat},
        symptoms::{COMMON_SYMPTOMS, lookup_weight},
        types::{Patient, PatientStatus, QueueStats, Res, TriageResult},
    },
    service::queue::PatientQueue,
};

/// Everything the dashboard shows, in serializable form.
#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub stats: QueueStats,
    pub waiting: Vec<&'a Patient>,
    pub in_progress: Vec<&'a Patient>,
    pub completed: Vec<&'a Patient>,
    pub recent: Vec<&'a Patient>,
}

impl<'a> DashboardReport<'a> {
    pub fn new(queue: &'a PatientQueue, recent: usize) -> Self {
        Self {
            stats: queue.stats(),
            waiting: queue.by_status(PatientStatus::Waiting),
            in_progress: queue.by_status(PatientStatus::InProgress),
            completed: queue.by_status(PatientStatus::Completed),
            recent: queue.recent(recent),
        }
    }
}

/// Render a single triage result.
pub fn render_triage(result: &TriageResult, format: OutputFormat) -> Res<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    let mut out = String::new();

    writeln!(out, "Priority: {} (Score: {})", result.priority_level.as_str().to_uppercase(), result.priority_score)?;
    writeln!(out, "Estimated wait: {}", format_wait(result.estimated_wait_time))?;
    writeln!(out, "Reasoning:")?;

    for line in &result.reasoning {
        writeln!(out, "  - {line}")?;
    }

    Ok(out)
}

/// Render the queue dashboard.
pub fn render_dashboard(queue: &PatientQueue, config: &Config) -> Res<String> {
    let report = DashboardReport::new(queue, config.recent_decisions);

    if config.output_format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let stats = &report.stats;
    let mut out = String::new();

    if config.critical_alerts && stats.critical_waiting > 0 {
        let plural = if stats.critical_waiting == 1 { "" } else { "s" };
        writeln!(out, "!! {} CRITICAL patient{plural} waiting - IMMEDIATE ATTENTION REQUIRED", stats.critical_waiting)?;
        writeln!(out)?;
    }

    writeln!(out, "Total patients: {} ({} active)", stats.total_patients, stats.active_patients)?;
    writeln!(out, "Critical cases: {}", stats.critical_waiting)?;
    writeln!(out, "In treatment:   {}", stats.in_treatment)?;
    writeln!(out, "Avg wait time:  {} min", stats.average_wait_minutes)?;
    writeln!(out)?;

    writeln!(out, "Priority distribution:")?;
    for share in &stats.distribution {
        writeln!(out, "  {:<8} {:>3} ({}%)", share.level.as_str(), share.count, share.percent)?;
    }

    write_section(&mut out, "Waiting", &report.waiting)?;
    write_section(&mut out, "In progress", &report.in_progress)?;
    write_section(&mut out, "Completed", &report.completed)?;

    if !report.recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent triage decisions:")?;

        for patient in &report.recent {
            writeln!(out, "  {} - {} [{}] Score: {}", patient.name, summarize_symptoms(&patient.symptoms), patient.triage.priority_level, patient.triage.priority_score)?;
        }
    }

    Ok(out)
}

/// Render the intake symptom checklist with each symptom's table weight.
pub fn render_symptoms(format: OutputFormat) -> Res<String> {
    #[derive(Serialize)]
    struct SymptomEntry {
        symptom: &'static str,
        weight: Option<u32>,
    }

    let entries: Vec<SymptomEntry> = COMMON_SYMPTOMS.iter().map(|&symptom| SymptomEntry { symptom, weight: lookup_weight(symptom) }).collect();

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    let mut out = String::new();

    for entry in entries {
        match entry.weight {
            Some(weight) => writeln!(out, "{:<22} {weight:>3}", entry.symptom)?,
            None => writeln!(out, "{:<22}   - (unlisted)", entry.symptom)?,
        }
    }

    Ok(out)
}

fn write_section(out: &mut String, title: &str, patients: &[&Patient]) -> Res<()> {
    writeln!(out)?;
    writeln!(out, "{title} ({}):", patients.len())?;

    if patients.is_empty() {
        writeln!(out, "  (none)")?;
    }

    for patient in patients {
        writeln!(
            out,
            "  #{:<3} {:<20} {:<8} score {:>3}  wait {:<8} age {:>3}  {}",
            patient.id,
            patient.name,
            patient.triage.priority_level.as_str().to_uppercase(),
            patient.triage.priority_score,
            format_wait(patient.triage.estimated_wait_time),
            patient.age,
            patient.symptoms.join(", ")
        )?;
    }

    Ok(())
}

/// Format a wait in minutes the way the queue cards do.
pub fn format_wait(minutes: u32) -> String {
    match minutes {
        0 => "Immediate".to_string(),
        m if m < 60 => format!("{m}m"),
        m if m % 60 == 0 => format!("{}h", m / 60),
        m => format!("{}h {}m", m / 60, m % 60),
    }
}

/// First two symptoms, with an ellipsis when there are more.
fn summarize_symptoms(symptoms: &[String]) -> String {
    let mut summary = symptoms.iter().take(2).map(String::as_str).collect::<Vec<_>>().join(", ");

    if symptoms.len() > 2 {
        summary.push_str("...");
    }

    summary
}

// Tests.

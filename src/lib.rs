//! Library root for `mediflow`.
//!
//! Mediflow keeps a priority-ordered patient queue for a clinic front desk:
//! - Admit patients from intake forms (symptoms, age, notes, optional vitals)
//! - Score urgency with a fixed, rule-based triage table
//! - Order the queue by priority tier and arrival, and track each visit's status
//! - Report queue statistics and recent triage decisions
//!
//! The scorer sits behind the `GenericTriageScorer` trait so it can be swapped or mocked; the
//! default implementation is a pure function of its inputs.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use std::path::Path;

use base::{config::Config, types::Void};
use tracing::info;

/// Public entry for replaying a recorded session.
///
/// Loads the queue events from `session`, applies them to a fresh queue, and prints the
/// dashboard in the configured format.
pub fn start(config: Config, session: &Path) -> Void {
    info!("Starting mediflow ...");

    // Initialize the runtime.
    let mut runtime = runtime::Runtime::new(config);

    // Replay the session.
    let events = runtime::Runtime::load_session(session)?;
    runtime.replay(events)?;

    let report = interaction::report::render_dashboard(runtime.queue(), &runtime.config)?;
    print!("{report}");

    Ok(())
}

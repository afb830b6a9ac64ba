//! Services that back patient intake.
//!
//! This module contains:
//! - The triage scorer (trait plus the rule-based implementation)
//! - The in-memory patient queue
//!
//! The scorer is reached through a trait object so other implementations (or mocks) can be
//! swapped in.

pub mod queue;
pub mod scorer;

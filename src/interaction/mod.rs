//! Queue events and their handlers.
//!
//! This module provides the handlers that act on the patient queue:
//! - Admitting patients from intake forms
//! - Moving patients through their visit
//! - Rendering results and the dashboard

pub mod intake;
pub mod report;
pub mod status;

//! Core components, types, and utilities for mediflow.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed symptom, keyword and age tables used for scoring.
//! - Domain types and result handling.

pub mod config;
pub mod symptoms;
pub mod types;

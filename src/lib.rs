//! # Thyverse
//!
//! Single-patient health tracking dashboard for the terminal.
//!
//! This crate provides:
//! - A patient record (profile, medications, vitals, thyroid panel) held in memory
//! - Derived indicators: BMI, BMR, BMI category, blood-pressure category,
//!   thyroid-value status
//! - Terminal UI for viewing and editing the record
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and pure metric functions
//! - `ports`: Trait definitions at the core boundary (record store)
//! - `adapters`: Concrete implementations (in-memory store, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Gender, Medication, PatientRecord, PatientUpdate, ThyroidPanel, VitalReading};

/// Result type for Thyverse operations
pub type Result<T> = std::result::Result<T, ThyverseError>;

/// Main error type for Thyverse
#[derive(Debug, thiserror::Error)]
pub enum ThyverseError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Domain layer: patient record types and derived clinical indicators.
//!
//! Pure Rust types with no I/O. All types are serializable.

pub mod metrics;
mod patient;
mod redact;

pub use metrics::{BmiCategory, BpCategory, ThyroidAnalyte, ThyroidStatus};
pub use patient::{Gender, Medication, PatientRecord, PatientUpdate, ThyroidPanel, VitalReading};
pub use redact::Redacted;

//! Record store port: the patient record and its mutations.
//!
//! This trait abstracts where the record lives from the use cases. Mutators
//! take `&mut self`, so a reader can never observe a half-applied update.

use crate::domain::{Medication, PatientRecord, PatientUpdate, ThyroidPanel, VitalReading};

/// Holder of the single patient record and the display theme flag.
///
/// No operation fails: there is no validation and nothing to go wrong.
pub trait RecordStore {
    /// Current record snapshot.
    fn patient(&self) -> &PatientRecord;

    /// Whether the dark theme is selected.
    fn is_dark_mode(&self) -> bool;

    /// Merge the supplied profile fields; unspecified fields keep their value.
    fn update_patient(&mut self, update: PatientUpdate);

    /// Append a medication. Duplicate ids are not detected.
    fn add_medication(&mut self, medication: Medication);

    /// Remove every medication whose id equals `id`. No-op if absent.
    fn remove_medication(&mut self, id: &str);

    /// Append a vital reading. History is never capped.
    fn add_vitals(&mut self, reading: VitalReading);

    /// Replace the thyroid panel wholesale.
    fn update_thyroid_panel(&mut self, panel: ThyroidPanel);

    /// Flip the dark-mode flag.
    fn toggle_theme(&mut self);
}

//! In-memory adapter: implementation of `RecordStore`.
//!
//! Holds the record for the lifetime of the process. Nothing is persisted;
//! a restart goes back to the seed record.

use chrono::Utc;

use crate::domain::{Medication, PatientRecord, PatientUpdate, ThyroidPanel, VitalReading};
use crate::ports::RecordStore;

/// Owned, single-threaded record store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    patient: PatientRecord,
    dark_mode: bool,
}

impl MemoryStore {
    /// Store holding the seed record, light theme.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_record(PatientRecord::seed(Utc::now()))
    }

    /// Store holding an arbitrary record (for testing).
    #[must_use]
    pub fn with_record(patient: PatientRecord) -> Self {
        Self {
            patient,
            dark_mode: false,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl RecordStore for MemoryStore {
    fn patient(&self) -> &PatientRecord {
        &self.patient
    }

    fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    fn update_patient(&mut self, update: PatientUpdate) {
        update.apply_to(&mut self.patient);
    }

    fn add_medication(&mut self, medication: Medication) {
        self.patient.medications.push(medication);
    }

    fn remove_medication(&mut self, id: &str) {
        self.patient.medications.retain(|m| m.id != id);
    }

    fn add_vitals(&mut self, reading: VitalReading) {
        self.patient.vitals.push(reading);
    }

    fn update_thyroid_panel(&mut self, panel: ThyroidPanel) {
        self.patient.thyroid_panel = panel;
    }

    fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reading(offset_min: i64, systolic: u32) -> VitalReading {
        VitalReading {
            date: Utc::now() + Duration::minutes(offset_min),
            systolic,
            diastolic: 80,
            pulse: 70,
        }
    }

    #[test]
    fn test_medication_round_trip() {
        let mut store = MemoryStore::seeded();
        let before = store.patient().medications.clone();

        let med = Medication::new("42", "Liothyronine", "5mcg", "2 weeks");
        store.add_medication(med.clone());
        assert_eq!(store.patient().medications.len(), before.len() + 1);
        assert_eq!(store.patient().medications.last(), Some(&med));

        store.remove_medication(&med.id);
        assert_eq!(store.patient().medications, before);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = MemoryStore::seeded();
        let before = store.patient().clone();

        store.remove_medication("does-not-exist");
        assert_eq!(store.patient(), &before);
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut store = MemoryStore::seeded();
        store.add_medication(Medication::new("7", "A", "1", "1"));
        store.add_medication(Medication::new("7", "B", "2", "2"));

        store.remove_medication("7");
        assert!(store.patient().medications.iter().all(|m| m.id != "7"));
        assert_eq!(store.patient().medications.len(), 1);
    }

    #[test]
    fn test_vitals_append_only() {
        let mut store = MemoryStore::seeded();
        let initial = store.patient().vitals.len();

        let added: Vec<VitalReading> = (0..5).map(|i| reading(i, 110 + i as u32)).collect();
        for r in &added {
            store.add_vitals(r.clone());
        }

        let vitals = &store.patient().vitals;
        assert_eq!(vitals.len(), initial + added.len());
        assert_eq!(&vitals[initial..], added.as_slice());
    }

    #[test]
    fn test_thyroid_panel_replaced_wholesale() {
        let mut store = MemoryStore::seeded();
        let panel = ThyroidPanel {
            tsh: 6.1,
            t3: 2.0,
            t4: 0.7,
            date: Utc::now() + Duration::days(1),
        };

        store.update_thyroid_panel(panel.clone());
        assert_eq!(store.patient().thyroid_panel, panel);
    }

    #[test]
    fn test_empty_update_leaves_record_unchanged() {
        let mut store = MemoryStore::seeded();
        let before = store.patient().clone();

        store.update_patient(PatientUpdate::default());
        assert_eq!(store.patient(), &before);
    }

    #[test]
    fn test_toggle_theme() {
        let mut store = MemoryStore::seeded();
        assert!(!store.is_dark_mode());
        store.toggle_theme();
        assert!(store.is_dark_mode());
        store.toggle_theme();
        assert!(!store.is_dark_mode());
    }
}

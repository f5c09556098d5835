//! Tracker service: the use cases behind every screen.
//!
//! This service coordinates:
//! - Record mutations (with logging)
//! - Timestamping of new vitals and lab results
//! - Medication id generation
//! - View summaries built from the record and the metric functions

use chrono::{DateTime, Utc};

use crate::domain::{
    metrics, BmiCategory, BpCategory, Gender, Medication, PatientRecord, PatientUpdate,
    Redacted, ThyroidAnalyte, ThyroidPanel, ThyroidStatus, VitalReading,
};
use crate::ports::RecordStore;

/// Number of medications listed on the dashboard.
const RECENT_MEDICATIONS: usize = 3;

/// BMI, its category and BMR for one set of body measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMetrics {
    pub bmi: f64,
    pub category: BmiCategory,
    pub bmr: f64,
}

impl BodyMetrics {
    #[must_use]
    pub fn compute(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> Self {
        let bmi = metrics::bmi(weight_kg, height_cm);
        Self {
            bmi,
            category: BmiCategory::from_bmi(bmi),
            bmr: metrics::bmr(weight_kg, height_cm, age_years, gender),
        }
    }
}

/// One analyte of the thyroid panel with its band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThyroidReading {
    pub analyte: ThyroidAnalyte,
    pub value: f64,
    pub status: ThyroidStatus,
}

impl ThyroidReading {
    #[must_use]
    pub fn new(analyte: ThyroidAnalyte, value: f64) -> Self {
        Self {
            analyte,
            value,
            status: analyte.status(value),
        }
    }
}

/// Everything the dashboard shows, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub active_medications: usize,
    pub bmi: f64,
    /// `(systolic, diastolic, category)` of the latest reading.
    pub latest_bp: Option<(u32, u32, BpCategory)>,
    pub latest_tsh: f64,
    pub recent_medications: Vec<Medication>,
}

/// Service wrapping a record store.
pub struct TrackerService<S>
where
    S: RecordStore,
{
    store: S,
}

impl<S> TrackerService<S>
where
    S: RecordStore,
{
    /// Create a new tracker service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn patient(&self) -> &PatientRecord {
        self.store.patient()
    }

    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.store.is_dark_mode()
    }

    // === Mutations ===

    pub fn update_patient(&mut self, update: PatientUpdate) {
        if update.is_empty() {
            tracing::debug!("Ignoring empty profile update");
            return;
        }
        tracing::info!(
            name = ?update.name.as_deref().map(Redacted::new),
            age = update.age.is_some(),
            gender = update.gender.is_some(),
            weight = update.weight.is_some(),
            height = update.height.is_some(),
            "Updating patient profile"
        );
        self.store.update_patient(update);
    }

    pub fn add_medication(&mut self, medication: Medication) {
        tracing::info!(id = %medication.id, "Adding medication");
        self.store.add_medication(medication);
    }

    pub fn remove_medication(&mut self, id: &str) {
        let before = self.store.patient().medications.len();
        self.store.remove_medication(id);
        let removed = before - self.store.patient().medications.len();
        tracing::info!(id, removed, "Removed medication");
    }

    pub fn add_vitals(&mut self, reading: VitalReading) {
        tracing::info!(
            systolic = reading.systolic,
            diastolic = reading.diastolic,
            pulse = reading.pulse,
            "Recording vitals"
        );
        self.store.add_vitals(reading);
    }

    pub fn update_thyroid_panel(&mut self, panel: ThyroidPanel) {
        tracing::info!(date = %panel.date, "Replacing thyroid panel");
        self.store.update_thyroid_panel(panel);
    }

    pub fn toggle_theme(&mut self) {
        self.store.toggle_theme();
        tracing::debug!(dark = self.store.is_dark_mode(), "Theme toggled");
    }

    // === Stamped mutations ===

    /// Add a medication with a freshly generated id. Returns the id.
    pub fn prescribe(&mut self, name: &str, dose: &str, duration: &str) -> String {
        self.prescribe_at(name, dose, duration, Utc::now())
    }

    pub fn prescribe_at(
        &mut self,
        name: &str,
        dose: &str,
        duration: &str,
        now: DateTime<Utc>,
    ) -> String {
        let id = self.next_medication_id(now);
        self.add_medication(Medication::new(id.clone(), name, dose, duration));
        id
    }

    pub fn record_vitals(&mut self, systolic: u32, diastolic: u32, pulse: u32) {
        self.record_vitals_at(systolic, diastolic, pulse, Utc::now());
    }

    pub fn record_vitals_at(&mut self, systolic: u32, diastolic: u32, pulse: u32, now: DateTime<Utc>) {
        self.add_vitals(VitalReading {
            date: now,
            systolic,
            diastolic,
            pulse,
        });
    }

    pub fn save_thyroid_panel(&mut self, tsh: f64, t3: f64, t4: f64) {
        self.save_thyroid_panel_at(tsh, t3, t4, Utc::now());
    }

    pub fn save_thyroid_panel_at(&mut self, tsh: f64, t3: f64, t4: f64, now: DateTime<Utc>) {
        self.update_thyroid_panel(ThyroidPanel {
            tsh,
            t3,
            t4,
            date: now,
        });
    }

    /// Epoch milliseconds, bumped past any id already in the list.
    fn next_medication_id(&self, now: DateTime<Utc>) -> String {
        let medications = &self.store.patient().medications;
        let mut candidate = now.timestamp_millis();
        while medications.iter().any(|m| m.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    // === Derived views ===

    #[must_use]
    pub fn latest_vitals(&self) -> Option<&VitalReading> {
        self.store.patient().latest_vitals()
    }

    #[must_use]
    pub fn latest_bp_category(&self) -> Option<BpCategory> {
        self.latest_vitals()
            .map(|v| BpCategory::classify(v.systolic, v.diastolic))
    }

    /// Metrics for draft measurements, using the stored age.
    #[must_use]
    pub fn body_metrics(&self, weight_kg: f64, height_cm: f64, gender: Gender) -> BodyMetrics {
        BodyMetrics::compute(weight_kg, height_cm, self.store.patient().age, gender)
    }

    /// Metrics for the stored measurements.
    #[must_use]
    pub fn current_body_metrics(&self) -> BodyMetrics {
        let p = self.store.patient();
        BodyMetrics::compute(p.weight, p.height, p.age, p.gender)
    }

    #[must_use]
    pub fn thyroid_statuses(&self) -> [ThyroidReading; 3] {
        let panel = &self.store.patient().thyroid_panel;
        [
            ThyroidReading::new(ThyroidAnalyte::Tsh, panel.tsh),
            ThyroidReading::new(ThyroidAnalyte::T3, panel.t3),
            ThyroidReading::new(ThyroidAnalyte::T4, panel.t4),
        ]
    }

    #[must_use]
    pub fn summary(&self) -> DashboardSummary {
        let p = self.store.patient();
        DashboardSummary {
            active_medications: p.medications.len(),
            bmi: metrics::bmi(p.weight, p.height),
            latest_bp: p.latest_vitals().map(|v| {
                (
                    v.systolic,
                    v.diastolic,
                    BpCategory::classify(v.systolic, v.diastolic),
                )
            }),
            latest_tsh: p.thyroid_panel.tsh,
            recent_medications: p
                .medications
                .iter()
                .take(RECENT_MEDICATIONS)
                .cloned()
                .collect(),
        }
    }
}

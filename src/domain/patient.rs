//! Patient record types.
//!
//! One record per process. Timestamps are UTC and serialize as RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The other value, for two-state form toggles.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

/// A prescribed medication. `id` is the deletion key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dose: String,
    pub duration: String,
}

impl Medication {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        dose: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dose: dose.into(),
            duration: duration.into(),
        }
    }
}

/// A blood pressure and pulse measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalReading {
    pub date: DateTime<Utc>,

    /// mmHg
    pub systolic: u32,

    /// mmHg
    pub diastolic: u32,

    /// Beats per minute
    pub pulse: u32,
}

/// Latest thyroid lab result. There is only ever one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThyroidPanel {
    /// mIU/L
    pub tsh: f64,

    /// pmol/L
    pub t3: f64,

    /// ng/dL
    pub t4: f64,

    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,

    /// Years. Signed so that any parsed integer can be stored.
    pub age: i32,

    pub gender: Gender,

    /// Kilograms
    pub weight: f64,

    /// Centimetres
    pub height: f64,

    pub medications: Vec<Medication>,

    /// Oldest first.
    pub vitals: Vec<VitalReading>,

    pub thyroid_panel: ThyroidPanel,
}

impl PatientRecord {
    /// The record every session starts from.
    #[must_use]
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            name: "John Doe".to_string(),
            age: 35,
            gender: Gender::Male,
            weight: 75.0,
            height: 175.0,
            medications: vec![Medication::new("1", "Levothyroxine", "50mcg", "1 month")],
            vitals: vec![VitalReading {
                date: now,
                systolic: 120,
                diastolic: 80,
                pulse: 72,
            }],
            thyroid_panel: ThyroidPanel {
                tsh: 2.5,
                t3: 3.1,
                t4: 1.2,
                date: now,
            },
        }
    }

    /// Most recent vital reading, if any have been recorded.
    #[must_use]
    pub fn latest_vitals(&self) -> Option<&VitalReading> {
        self.vitals.last()
    }
}

/// Partial profile update. Only `Some` fields overwrite the record.
///
/// Sub-sequences and the thyroid panel are deliberately absent: those have
/// their own operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl PatientUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    #[must_use]
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.weight.is_none()
            && self.height.is_none()
    }

    /// Merge the supplied fields into `record`.
    pub fn apply_to(self, record: &mut PatientRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(weight) = self.weight {
            record.weight = weight;
        }
        if let Some(height) = self.height {
            record.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values() {
        let now = Utc::now();
        let record = PatientRecord::seed(now);

        assert_eq!(record.name, "John Doe");
        assert_eq!(record.age, 35);
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.medications.len(), 1);
        assert_eq!(record.medications[0].id, "1");
        assert_eq!(record.vitals.len(), 1);
        assert_eq!(record.thyroid_panel.tsh, 2.5);
        assert_eq!(record.thyroid_panel.date, now);
    }

    #[test]
    fn test_partial_update_merges() {
        let mut record = PatientRecord::seed(Utc::now());
        let before = record.clone();

        PatientUpdate::default().weight(80.5).age(36).apply_to(&mut record);

        assert_eq!(record.weight, 80.5);
        assert_eq!(record.age, 36);
        assert_eq!(record.name, before.name);
        assert_eq!(record.height, before.height);
        assert_eq!(record.medications, before.medications);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut record = PatientRecord::seed(Utc::now());
        let before = record.clone();

        let update = PatientUpdate::default();
        assert!(update.is_empty());
        update.apply_to(&mut record);

        assert_eq!(record, before);
    }

    #[test]
    fn test_update_accepts_implausible_values() {
        let mut record = PatientRecord::seed(Utc::now());
        PatientUpdate::default()
            .weight(-3.0)
            .age(-1)
            .apply_to(&mut record);

        assert_eq!(record.weight, -3.0);
        assert_eq!(record.age, -1);
    }

    #[test]
    fn test_latest_vitals_empty() {
        let mut record = PatientRecord::seed(Utc::now());
        record.vitals.clear();
        assert!(record.latest_vitals().is_none());
    }

    #[test]
    fn test_gender_parse_and_wire_name() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("m".parse::<Gender>(), Ok(Gender::Male));
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(Gender::Male.flipped(), Gender::Female);
    }

    #[test]
    fn test_record_serializes_dates_as_strings() {
        let record = PatientRecord::seed(Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["vitals"][0]["date"].is_string());
        assert_eq!(json["thyroid_panel"]["t4"], 1.2);
    }
}

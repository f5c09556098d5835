//! Derived clinical indicators.
//!
//! Everything here is a pure function of its inputs. There is no bounds
//! checking: a zero height gives an infinite BMI and negative inputs give
//! negative results, which are shown as-is.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::Gender;

/// Body Mass Index: `weight / (height in metres)^2`.
#[must_use]
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal Metabolic Rate in kcal/day (revised Harris-Benedict coefficients).
#[must_use]
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// BMI band. Intervals are half-open with an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

/// Blood-pressure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpCategory {
    Normal,
    Elevated,
    Stage1Hypertension,
    Stage2Hypertension,
}

impl BpCategory {
    /// Classify a reading. Branches are tested in order; the Stage 1 test is
    /// `systolic < 140 || diastolic < 90`, so a low systolic with a very high
    /// diastolic still lands in Stage 1.
    #[must_use]
    pub fn classify(systolic: u32, diastolic: u32) -> Self {
        if systolic < 120 && diastolic < 80 {
            Self::Normal
        } else if systolic < 130 && diastolic < 80 {
            Self::Elevated
        } else if systolic < 140 || diastolic < 90 {
            Self::Stage1Hypertension
        } else {
            Self::Stage2Hypertension
        }
    }
}

impl std::fmt::Display for BpCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Elevated => write!(f, "Elevated"),
            Self::Stage1Hypertension => write!(f, "Stage 1 Hypertension"),
            Self::Stage2Hypertension => write!(f, "Stage 2 Hypertension"),
        }
    }
}

/// Analytes tracked on the thyroid panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThyroidAnalyte {
    Tsh,
    T3,
    T4,
}

impl ThyroidAnalyte {
    pub const ALL: [Self; 3] = [Self::Tsh, Self::T3, Self::T4];

    /// Reference interval, both ends inclusive.
    #[must_use]
    pub fn reference_range(&self) -> RangeInclusive<f64> {
        match self {
            Self::Tsh => 0.4..=4.0,
            Self::T3 => 2.3..=4.2,
            Self::T4 => 0.8..=1.8,
        }
    }

    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Tsh => "mIU/L",
            Self::T3 => "pmol/L",
            Self::T4 => "ng/dL",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tsh => "TSH",
            Self::T3 => "T3",
            Self::T4 => "T4",
        }
    }

    /// Band a measured value against the reference interval.
    #[must_use]
    pub fn status(&self, value: f64) -> ThyroidStatus {
        let range = self.reference_range();
        if value < *range.start() {
            ThyroidStatus::Low
        } else if value > *range.end() {
            ThyroidStatus::High
        } else {
            ThyroidStatus::Normal
        }
    }
}

impl std::fmt::Display for ThyroidAnalyte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThyroidStatus {
    Low,
    Normal,
    High,
}

impl std::fmt::Display for ThyroidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Normal => write!(f, "Normal"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Text for the BMI explanation panel.
pub const BMI_EXPLAINER: &[&str] = &[
    "Body Mass Index relates weight to height: weight (kg) / height (m)^2.",
    "Below 18.5: Underweight. 18.5 to 24.9: Normal.",
    "25 to 29.9: Overweight. 30 and above: Obese.",
    "BMI ignores muscle mass and body composition.",
];

/// Text for the BMR explanation panel.
pub const BMR_EXPLAINER: &[&str] = &[
    "Basal Metabolic Rate estimates the calories burned at complete rest.",
    "Men:   88.362 + 13.397 W + 4.799 H - 5.677 A",
    "Women: 447.593 + 9.247 W + 3.098 H - 4.330 A",
    "W = weight (kg), H = height (cm), A = age (years).",
];

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    #[test]
    fn test_bmi() {
        assert!((bmi(70.0, 175.0) - 22.857).abs() < EPS);
        assert!((bmi(75.0, 175.0) - 24.4898).abs() < EPS);
    }

    #[test]
    fn test_bmi_zero_height_is_infinite() {
        assert!(bmi(70.0, 0.0).is_infinite());
    }

    #[test]
    fn test_bmr_by_gender() {
        assert!((bmr(70.0, 175.0, 30, Gender::Male) - 1695.667).abs() < EPS);
        assert!((bmr(60.0, 165.0, 30, Gender::Female) - 1383.683).abs() < EPS);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bp_category() {
        assert_eq!(BpCategory::classify(119, 79), BpCategory::Normal);
        assert_eq!(BpCategory::classify(125, 79), BpCategory::Elevated);
        assert_eq!(BpCategory::classify(135, 85), BpCategory::Stage1Hypertension);
        assert_eq!(BpCategory::classify(145, 95), BpCategory::Stage2Hypertension);
    }

    #[test]
    fn test_bp_category_or_branch_is_literal() {
        // Diastolic 110 would be Stage 2 under independent thresholds.
        assert_eq!(BpCategory::classify(115, 110), BpCategory::Stage1Hypertension);
        // Systolic 160 with diastolic below 90 stays Stage 1 as well.
        assert_eq!(BpCategory::classify(160, 85), BpCategory::Stage1Hypertension);
        assert_eq!(BpCategory::classify(120, 80), BpCategory::Stage1Hypertension);
    }

    #[test]
    fn test_bp_category_labels() {
        assert_eq!(BpCategory::Stage1Hypertension.to_string(), "Stage 1 Hypertension");
        assert_eq!(BpCategory::Stage2Hypertension.to_string(), "Stage 2 Hypertension");
    }

    #[test]
    fn test_thyroid_status_bands() {
        assert_eq!(ThyroidAnalyte::Tsh.status(0.39), ThyroidStatus::Low);
        assert_eq!(ThyroidAnalyte::Tsh.status(0.4), ThyroidStatus::Normal);
        assert_eq!(ThyroidAnalyte::Tsh.status(4.0), ThyroidStatus::Normal);
        assert_eq!(ThyroidAnalyte::Tsh.status(4.01), ThyroidStatus::High);
        assert_eq!(ThyroidAnalyte::T3.status(2.2), ThyroidStatus::Low);
        assert_eq!(ThyroidAnalyte::T3.status(4.3), ThyroidStatus::High);
        assert_eq!(ThyroidAnalyte::T4.status(1.2), ThyroidStatus::Normal);
        assert_eq!(ThyroidAnalyte::T4.status(1.9), ThyroidStatus::High);
    }
}

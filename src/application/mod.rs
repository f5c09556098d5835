//! Application layer: Use cases and services.
//!
//! This module orchestrates the record store with the metric functions to
//! implement what the views need.

mod tracker;

pub use tracker::{BodyMetrics, DashboardSummary, ThyroidReading, TrackerService};

//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Dashboard with the record at a glance
//! - Body measurements with BMI/BMR
//! - Medications, vitals and the thyroid panel
//! - Profile settings and theme

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::Theme;

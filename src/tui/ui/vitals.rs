//! Vitals: add a reading, latest blood pressure and the history chart.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::domain::{BpCategory, VitalReading};
use crate::tui::styles::Theme;
use crate::Result;

use super::form::{render_fields, render_footer, FieldKind, Form, FormField};
use super::titled_block;

const SYSTOLIC: usize = 0;
const DIASTOLIC: usize = 1;
const PULSE: usize = 2;

/// Chart label format, e.g. "Mar 14".
const DATE_LABEL: &str = "%b %-d";

pub struct VitalsState {
    pub form: Form,
}

impl Default for VitalsState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Systolic (mmHg)", "120", FieldKind::Integer),
                FormField::new("Diastolic (mmHg)", "80", FieldKind::Integer),
                FormField::new("Pulse (bpm)", "72", FieldKind::Integer),
            ]),
        }
    }
}

impl VitalsState {
    /// `(systolic, diastolic, pulse)`; all three are required.
    pub fn new_reading(&self) -> Result<(u32, u32, u32)> {
        Ok((
            self.form.parse(SYSTOLIC)?,
            self.form.parse(DIASTOLIC)?,
            self.form.parse(PULSE)?,
        ))
    }
}

pub fn render_vitals(
    f: &mut Frame,
    area: Rect,
    state: &VitalsState,
    vitals: &[VitalReading],
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .margin(1)
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(columns[0]);

    let form_block = titled_block("Add New Vitals", theme);
    let form_inner = form_block.inner(left[0]);
    f.render_widget(form_block, left[0]);
    render_fields(f, form_inner, &state.form, true, theme);

    render_latest_bp(f, left[1], vitals.last(), theme);
    render_history(f, columns[1], vitals, theme);

    render_footer(
        f,
        chunks[1],
        &state.form,
        &[("↑↓", "Navigate"), ("Enter", "Add Reading"), ("Esc", "Dashboard")],
        theme,
    );
}

fn render_latest_bp(f: &mut Frame, area: Rect, latest: Option<&VitalReading>, theme: &Theme) {
    let lines = match latest {
        Some(v) => {
            let category = BpCategory::classify(v.systolic, v.diastolic);
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{}/{} mmHg", v.systolic, v.diastolic),
                    theme.figure(),
                )),
                Line::from(Span::styled(category.to_string(), theme.bp_category(category))),
                Line::from(Span::styled(format!("Pulse {} bpm", v.pulse), theme.text_secondary())),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled("No readings yet", theme.text_muted())),
        ],
    };

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block("Latest Blood Pressure", theme)),
        area,
    );
}

fn render_history(f: &mut Frame, area: Rect, vitals: &[VitalReading], theme: &Theme) {
    let block = titled_block("Vitals History", theme);

    if vitals.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No readings yet", theme.text_muted())).block(block),
            area,
        );
        return;
    }

    let systolic = series(vitals, |v| v.systolic);
    let diastolic = series(vitals, |v| v.diastolic);
    let pulse = series(vitals, |v| v.pulse);

    let (y_min, y_max) = y_bounds(vitals);
    // A single point still needs a non-empty x range.
    let x_max = (vitals.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Systolic")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.text().fg(theme.chart[0]))
            .data(&systolic),
        Dataset::default()
            .name("Diastolic")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.text().fg(theme.chart[1]))
            .data(&diastolic),
        Dataset::default()
            .name("Pulse")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.text().fg(theme.chart[2]))
            .data(&pulse),
    ];

    let first = vitals[0].date.format(DATE_LABEL).to_string();
    let last = vitals[vitals.len() - 1].date.format(DATE_LABEL).to_string();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.text_muted())
                .bounds([0.0, x_max])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(theme.text_muted())
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.0}"), format!("{y_max:.0}")]),
        );

    f.render_widget(chart, area);
}

/// `(index, value)` points, one per reading.
fn series(vitals: &[VitalReading], value: impl Fn(&VitalReading) -> u32) -> Vec<(f64, f64)> {
    vitals
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, f64::from(value(v))))
        .collect()
}

/// Y range covering every series, padded by 10 on each side.
fn y_bounds(vitals: &[VitalReading]) -> (f64, f64) {
    let values = vitals
        .iter()
        .flat_map(|v| [v.systolic, v.diastolic, v.pulse]);
    let min = values.clone().min().unwrap_or(0);
    let max = values.max().unwrap_or(0);
    (f64::from(min.saturating_sub(10)), f64::from(max.saturating_add(10)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::testing::{buffer_text, draw};
    use chrono::{TimeZone, Utc};

    fn reading(day: u32, systolic: u32, diastolic: u32, pulse: u32) -> VitalReading {
        VitalReading {
            date: Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap(),
            systolic,
            diastolic,
            pulse,
        }
    }

    #[test]
    fn test_new_reading_parses() {
        let mut state = VitalsState::default();
        state.form.set_value(SYSTOLIC, "128");
        state.form.set_value(DIASTOLIC, "82");
        assert!(state.new_reading().is_err());

        state.form.set_value(PULSE, "66");
        assert_eq!(state.new_reading().unwrap(), (128, 82, 66));
    }

    #[test]
    fn test_y_bounds() {
        let vitals = vec![reading(1, 120, 80, 72), reading(2, 145, 95, 60)];
        assert_eq!(y_bounds(&vitals), (50.0, 155.0));
    }

    #[test]
    fn test_render_history_and_category() {
        let state = VitalsState::default();
        let vitals = vec![reading(1, 120, 80, 72), reading(14, 145, 95, 60)];
        let theme = Theme::dark();

        let text = buffer_text(&draw(140, 30, |f| {
            let area = f.area();
            render_vitals(f, area, &state, &vitals, &theme)
        }));
        assert!(text.contains("145/95 mmHg"));
        assert!(text.contains("Stage 2 Hypertension"));
        assert!(text.contains("Mar 1"));
        assert!(text.contains("Mar 14"));
    }

    #[test]
    fn test_render_empty_history() {
        let state = VitalsState::default();
        let theme = Theme::light();
        let text = buffer_text(&draw(120, 30, |f| {
            let area = f.area();
            render_vitals(f, area, &state, &[], &theme)
        }));
        assert!(text.contains("No readings yet"));
    }
}

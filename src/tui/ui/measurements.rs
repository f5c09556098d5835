//! Body measurements: weight, height and gender with live BMI/BMR.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::application::BodyMetrics;
use crate::domain::metrics::{BMI_EXPLAINER, BMR_EXPLAINER};
use crate::domain::{Gender, PatientRecord, PatientUpdate};
use crate::tui::styles::Theme;
use crate::Result;

use super::form::{render_fields, render_footer, FieldKind, Form, FormField};
use super::titled_block;

const WEIGHT: usize = 0;
const HEIGHT: usize = 1;
const GENDER: usize = 2;

pub struct MeasurementsState {
    pub form: Form,
    pub show_info: bool,
}

impl MeasurementsState {
    /// Form pre-filled with the stored measurements.
    #[must_use]
    pub fn from_patient(patient: &PatientRecord) -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Weight (kg)", "e.g., 75", FieldKind::Decimal)
                    .with_value(patient.weight.to_string()),
                FormField::new("Height (cm)", "e.g., 175", FieldKind::Decimal)
                    .with_value(patient.height.to_string()),
                FormField::new("Gender", "m / f", FieldKind::Gender)
                    .with_value(patient.gender.to_string()),
            ]),
            show_info: false,
        }
    }

    /// Parsed draft values.
    pub fn draft(&self) -> Result<(f64, f64, Gender)> {
        Ok((
            self.form.parse(WEIGHT)?,
            self.form.parse(HEIGHT)?,
            self.form.gender(GENDER)?,
        ))
    }

    pub fn to_update(&self) -> Result<PatientUpdate> {
        let (weight, height, gender) = self.draft()?;
        Ok(PatientUpdate::default()
            .weight(weight)
            .height(height)
            .gender(gender))
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }
}

/// Render the measurements view. `preview` is `None` while the draft does
/// not parse.
pub fn render_measurements(
    f: &mut Frame,
    area: Rect,
    state: &MeasurementsState,
    preview: Option<BodyMetrics>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .margin(1)
        .split(chunks[0]);

    let form_block = titled_block("Body Measurements", theme);
    let form_inner = form_block.inner(columns[0]);
    f.render_widget(form_block, columns[0]);
    render_fields(f, form_inner, &state.form, true, theme);

    if state.show_info {
        render_info(f, columns[1], theme);
    } else {
        render_calculators(f, columns[1], preview, theme);
    }

    render_footer(
        f,
        chunks[1],
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("Space", "Gender"),
            ("Enter", "Save Measurements"),
            ("?", "About BMI/BMR"),
            ("Esc", "Dashboard"),
        ],
        theme,
    );
}

fn render_calculators(f: &mut Frame, area: Rect, preview: Option<BodyMetrics>, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let (bmi_lines, bmr_lines) = match preview {
        Some(m) => (
            vec![
                Line::from(""),
                Line::from(Span::styled(format!("{:.1}", m.bmi), theme.figure())),
                Line::from(Span::styled(m.category.to_string(), theme.bmi_category(m.category))),
            ],
            vec![
                Line::from(""),
                Line::from(Span::styled(format!("{:.0}", m.bmr), theme.figure())),
                Line::from(Span::styled("calories/day", theme.text_secondary())),
            ],
        ),
        None => {
            let pending = vec![
                Line::from(""),
                Line::from(Span::styled("--", theme.text_muted())),
                Line::from(Span::styled("enter valid numbers", theme.text_muted())),
            ];
            (pending.clone(), pending)
        }
    };

    f.render_widget(
        Paragraph::new(bmi_lines)
            .alignment(Alignment::Center)
            .block(titled_block("BMI Calculator", theme)),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(bmr_lines)
            .alignment(Alignment::Center)
            .block(titled_block("BMR Calculator", theme)),
        rows[1],
    );
}

fn render_info(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled("Body Mass Index (BMI)", theme.subtitle()))];
    lines.extend(BMI_EXPLAINER.iter().map(|l| Line::from(Span::styled(*l, theme.text()))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Basal Metabolic Rate (BMR)", theme.subtitle())));
    lines.extend(BMR_EXPLAINER.iter().map(|l| Line::from(Span::styled(*l, theme.text()))));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled_block("About", theme)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::testing::{buffer_text, draw};
    use chrono::Utc;

    #[test]
    fn test_prefill_and_update() {
        let patient = PatientRecord::seed(Utc::now());
        let mut state = MeasurementsState::from_patient(&patient);
        assert_eq!(state.form.value(WEIGHT), "75");
        assert_eq!(state.form.value(GENDER), "male");

        state.form.set_value(WEIGHT, "68.5");
        let update = state.to_update().unwrap();
        assert_eq!(update.weight, Some(68.5));
        assert_eq!(update.height, Some(175.0));
        assert_eq!(update.gender, Some(Gender::Male));
        assert!(update.name.is_none());
        assert!(update.age.is_none());
    }

    #[test]
    fn test_invalid_draft() {
        let patient = PatientRecord::seed(Utc::now());
        let mut state = MeasurementsState::from_patient(&patient);
        state.form.set_value(HEIGHT, "");
        assert!(state.draft().is_err());
    }

    #[test]
    fn test_render_preview_and_info() {
        let patient = PatientRecord::seed(Utc::now());
        let mut state = MeasurementsState::from_patient(&patient);
        let metrics = BodyMetrics::compute(70.0, 175.0, 30, Gender::Male);
        let theme = Theme::light();

        let text = buffer_text(&draw(120, 30, |f| {
            let area = f.area();
            render_measurements(f, area, &state, Some(metrics), &theme)
        }));
        assert!(text.contains("22.9"));
        assert!(text.contains("Normal"));
        assert!(text.contains("1696"));

        state.toggle_info();
        let text = buffer_text(&draw(120, 30, |f| {
            let area = f.area();
            render_measurements(f, area, &state, None, &theme)
        }));
        assert!(text.contains("Basal Metabolic Rate (BMR)"));
    }
}

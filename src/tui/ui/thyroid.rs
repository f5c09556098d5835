//! Thyroid panel: edit the latest lab values and see their bands.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::application::ThyroidReading;
use crate::domain::{ThyroidAnalyte, ThyroidPanel};
use crate::tui::styles::Theme;
use crate::Result;

use super::form::{render_fields, render_footer, FieldKind, Form, FormField};
use super::titled_block;

const TSH: usize = 0;
const T3: usize = 1;
const T4: usize = 2;

pub struct ThyroidState {
    pub form: Form,
}

impl ThyroidState {
    /// Form pre-filled with the stored panel.
    #[must_use]
    pub fn from_panel(panel: &ThyroidPanel) -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("TSH (mIU/L)", "0.4 - 4.0", FieldKind::Decimal)
                    .with_value(panel.tsh.to_string()),
                FormField::new("T3 (pmol/L)", "2.3 - 4.2", FieldKind::Decimal)
                    .with_value(panel.t3.to_string()),
                FormField::new("T4 (ng/dL)", "0.8 - 1.8", FieldKind::Decimal)
                    .with_value(panel.t4.to_string()),
            ]),
        }
    }

    /// `(tsh, t3, t4)` from the form.
    pub fn values(&self) -> Result<(f64, f64, f64)> {
        Ok((
            self.form.parse(TSH)?,
            self.form.parse(T3)?,
            self.form.parse(T4)?,
        ))
    }

    /// Bands for whatever in the draft currently parses.
    #[must_use]
    pub fn draft_readings(&self) -> Vec<ThyroidReading> {
        [(ThyroidAnalyte::Tsh, TSH), (ThyroidAnalyte::T3, T3), (ThyroidAnalyte::T4, T4)]
            .into_iter()
            .filter_map(|(analyte, idx)| {
                self.form
                    .parse::<f64>(idx)
                    .ok()
                    .map(|value| ThyroidReading::new(analyte, value))
            })
            .collect()
    }
}

/// Render the thyroid view. `stored` comes from the record, not the form.
pub fn render_thyroid(
    f: &mut Frame,
    area: Rect,
    state: &ThyroidState,
    stored: &[ThyroidReading],
    panel: &ThyroidPanel,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(columns[0]);

    let form_block = titled_block("Update Thyroid Panel", theme);
    let form_inner = form_block.inner(left[0]);
    f.render_widget(form_block, left[0]);
    render_fields(f, form_inner, &state.form, true, theme);

    let draft_lines: Vec<Line> = state
        .draft_readings()
        .iter()
        .map(|r| reading_line(r, theme))
        .collect();
    f.render_widget(
        Paragraph::new(draft_lines).block(titled_block("Draft Status", theme)),
        left[1],
    );

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(stored.iter().map(|r| reading_line(r, theme)));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Last updated: ", theme.text_secondary()),
        Span::styled(panel.date.format("%b %-d, %Y %H:%M UTC").to_string(), theme.text()),
    ]));
    lines.push(Line::from(""));
    for analyte in ThyroidAnalyte::ALL {
        let range = analyte.reference_range();
        lines.push(Line::from(Span::styled(
            format!(
                "  {} reference: {} - {} {}",
                analyte,
                range.start(),
                range.end(),
                analyte.unit()
            ),
            theme.text_muted(),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(titled_block("Current Results", theme)),
        columns[1],
    );

    render_footer(
        f,
        chunks[1],
        &state.form,
        &[("↑↓", "Navigate"), ("Enter", "Save Results"), ("Esc", "Dashboard")],
        theme,
    );
}

fn reading_line(reading: &ThyroidReading, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<4}", reading.analyte.label()), theme.text_secondary()),
        Span::styled(
            format!("{} {}  ", reading.value, reading.analyte.unit()),
            theme.text(),
        ),
        Span::styled(reading.status.to_string(), theme.thyroid_status(reading.status)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientRecord, ThyroidStatus};
    use crate::tui::ui::testing::{buffer_text, draw};
    use chrono::{TimeZone, Utc};

    fn panel() -> ThyroidPanel {
        PatientRecord::seed(Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()).thyroid_panel
    }

    #[test]
    fn test_prefill_and_values() {
        let mut state = ThyroidState::from_panel(&panel());
        assert_eq!(state.values().unwrap(), (2.5, 3.1, 1.2));

        state.form.set_value(TSH, "abc");
        assert!(state.values().is_err());
    }

    #[test]
    fn test_draft_readings_skip_unparsed() {
        let mut state = ThyroidState::from_panel(&panel());
        state.form.set_value(TSH, "");
        state.form.set_value(T3, "5.0");

        let readings = state.draft_readings();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].analyte, ThyroidAnalyte::T3);
        assert_eq!(readings[0].status, ThyroidStatus::High);
    }

    #[test]
    fn test_render_current_results() {
        let panel = panel();
        let state = ThyroidState::from_panel(&panel);
        let stored = [
            ThyroidReading::new(ThyroidAnalyte::Tsh, 0.2),
            ThyroidReading::new(ThyroidAnalyte::T3, 3.1),
            ThyroidReading::new(ThyroidAnalyte::T4, 1.2),
        ];
        let theme = Theme::dark();

        let text = buffer_text(&draw(130, 32, |f| {
            let area = f.area();
            render_thyroid(f, area, &state, &stored, &panel, &theme)
        }));
        assert!(text.contains("Current Results"));
        assert!(text.contains("0.2 mIU/L"));
        assert!(text.contains("Low"));
        assert!(text.contains("Mar 14, 2024"));
    }
}

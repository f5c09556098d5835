//! Settings: profile fields and appearance.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{PatientRecord, PatientUpdate};
use crate::tui::styles::Theme;
use crate::Result;

use super::form::{key_hints, render_fields, render_footer, FieldKind, Form, FormField};
use super::titled_block;

const NAME: usize = 0;
const AGE: usize = 1;
const GENDER: usize = 2;

pub struct SettingsState {
    pub form: Form,
}

impl SettingsState {
    #[must_use]
    pub fn from_patient(patient: &PatientRecord) -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Full Name", "e.g., John Doe", FieldKind::Text)
                    .with_value(patient.name.clone()),
                FormField::new("Age", "years", FieldKind::Integer)
                    .with_value(patient.age.to_string()),
                FormField::new("Gender", "m / f", FieldKind::Gender)
                    .with_value(patient.gender.to_string()),
            ]),
        }
    }

    /// Name, age and gender as a partial update. The name is taken as typed,
    /// empty included.
    pub fn to_update(&self) -> Result<PatientUpdate> {
        Ok(PatientUpdate::default()
            .name(self.form.value(NAME))
            .age(self.form.parse(AGE)?)
            .gender(self.form.gender(GENDER)?))
    }
}

pub fn render_settings(f: &mut Frame, area: Rect, state: &SettingsState, dark_mode: bool, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[0]);

    let form_block = titled_block("Profile Settings", theme);
    let form_inner = form_block.inner(columns[0]);
    f.render_widget(form_block, columns[0]);
    render_fields(f, form_inner, &state.form, true, theme);

    let mode = if dark_mode { "Dark" } else { "Light" };
    let appearance = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Theme: ", theme.text_secondary()),
            Span::styled(mode, theme.figure()),
        ]),
        Line::from(""),
        key_hints(&[("Ctrl+T", "Toggle dark mode")], theme),
    ];
    f.render_widget(
        Paragraph::new(appearance).block(titled_block("Appearance", theme)),
        columns[1],
    );

    render_footer(
        f,
        chunks[1],
        &state.form,
        &[
            ("↑↓", "Navigate"),
            ("Space", "Gender"),
            ("Enter", "Save Changes"),
            ("Esc", "Dashboard"),
        ],
        theme,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::tui::ui::testing::{buffer_text, draw};
    use chrono::Utc;

    #[test]
    fn test_to_update() {
        let patient = PatientRecord::seed(Utc::now());
        let mut state = SettingsState::from_patient(&patient);
        state.form.set_value(NAME, "Jane Roe");
        state.form.set_value(AGE, "41");
        state.form.set_value(GENDER, "female");

        let update = state.to_update().unwrap();
        assert_eq!(update.name.as_deref(), Some("Jane Roe"));
        assert_eq!(update.age, Some(41));
        assert_eq!(update.gender, Some(Gender::Female));
        assert!(update.weight.is_none());
        assert!(update.height.is_none());
    }

    #[test]
    fn test_bad_age() {
        let patient = PatientRecord::seed(Utc::now());
        let mut state = SettingsState::from_patient(&patient);
        state.form.set_value(AGE, "3-5");
        assert!(state.to_update().is_err());
    }

    #[test]
    fn test_render_theme_label() {
        let patient = PatientRecord::seed(Utc::now());
        let state = SettingsState::from_patient(&patient);
        let theme = Theme::dark();
        let text = buffer_text(&draw(120, 20, |f| {
            let area = f.area();
            render_settings(f, area, &state, true, &theme)
        }));
        assert!(text.contains("Profile Settings"));
        assert!(text.contains("Dark"));
        assert!(text.contains("John Doe"));
    }
}

//! Medication list with an add form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::Medication;
use crate::tui::styles::Theme;
use crate::Result;

use super::form::{render_fields, render_footer, FieldKind, Form, FormField};
use super::titled_block;

const NAME: usize = 0;
const DOSE: usize = 1;
const DURATION: usize = 2;

/// Validated add-form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedication {
    pub name: String,
    pub dose: String,
    pub duration: String,
}

pub struct MedicationsState {
    pub form: Form,
    /// Cursor into the medication list.
    pub selected: usize,
}

impl Default for MedicationsState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Medication Name", "e.g., Levothyroxine", FieldKind::Text),
                FormField::new("Dose", "e.g., 50mcg", FieldKind::Text),
                FormField::new("Duration", "e.g., 3 months", FieldKind::Text),
            ]),
            selected: 0,
        }
    }
}

impl MedicationsState {
    /// All three fields are required.
    pub fn new_medication(&self) -> Result<NewMedication> {
        Ok(NewMedication {
            name: self.form.required_text(NAME)?,
            dose: self.form.required_text(DOSE)?,
            duration: self.form.required_text(DURATION)?,
        })
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Id of the highlighted medication.
    #[must_use]
    pub fn selected_id<'a>(&self, medications: &'a [Medication]) -> Option<&'a str> {
        medications.get(self.selected).map(|m| m.id.as_str())
    }
}

pub fn render_medications(
    f: &mut Frame,
    area: Rect,
    state: &MedicationsState,
    medications: &[Medication],
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .margin(1)
        .split(chunks[0]);

    let form_block = titled_block("Add New Medication", theme);
    let form_inner = form_block.inner(columns[0]);
    f.render_widget(form_block, columns[0]);
    render_fields(f, form_inner, &state.form, true, theme);

    render_list(f, columns[1], state, medications, theme);

    render_footer(
        f,
        chunks[1],
        &state.form,
        &[
            ("↑↓", "Fields"),
            ("PgUp/PgDn", "Select"),
            ("Enter", "Add"),
            ("Ctrl+X", "Remove"),
            ("Esc", "Dashboard"),
        ],
        theme,
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    state: &MedicationsState,
    medications: &[Medication],
    theme: &Theme,
) {
    let block = titled_block("Current Medications", theme);

    if medications.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No medications recorded.",
            theme.text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = medications
        .iter()
        .map(|m| {
            ListItem::new(vec![
                Line::from(Span::styled(m.name.as_str(), theme.title())),
                Line::from(vec![
                    Span::styled("  Dose: ", theme.text_secondary()),
                    Span::styled(m.dose.as_str(), theme.text()),
                    Span::styled("  Duration: ", theme.text_secondary()),
                    Span::styled(m.duration.as_str(), theme.text()),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

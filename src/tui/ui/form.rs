//! Text-entry forms shared by the editing screens.
//!
//! Parsing is the only validation: numbers must parse, required text must
//! be non-empty. Range checks are intentionally absent.

use std::str::FromStr;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Gender;
use crate::tui::styles::Theme;
use crate::{Result, ThyverseError};

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    /// Two-state male/female choice.
    Gender,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    #[must_use]
    pub fn new(label: &'static str, hint: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Integer => c.is_ascii_digit() || c == '-',
            FieldKind::Decimal => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Gender => false,
        }
    }
}

/// Form state: fields, cursor and the last message.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
    pub notice: Option<String>,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            error_message: None,
            notice: None,
        }
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field. Gender fields take `m`/`f`
    /// and flip on space.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if field.kind == FieldKind::Gender {
            match c.to_ascii_lowercase() {
                'm' => field.value = Gender::Male.to_string(),
                'f' => field.value = Gender::Female.to_string(),
                ' ' => {
                    self.toggle_choice();
                    return;
                }
                _ => return,
            }
        } else if field.accepts(c) {
            field.value.push(c);
        } else {
            return;
        }
        self.error_message = None;
        self.notice = None;
    }

    /// Flip the current field if it is a gender choice.
    pub fn toggle_choice(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if field.kind != FieldKind::Gender {
            return;
        }
        let flipped = field
            .value
            .parse::<Gender>()
            .map(Gender::flipped)
            .unwrap_or(Gender::Male);
        field.value = flipped.to_string();
        self.error_message = None;
        self.notice = None;
    }

    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if field.kind != FieldKind::Gender {
            field.value.pop();
        }
    }

    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if field.kind != FieldKind::Gender {
            field.value.clear();
        }
    }

    /// Empty every non-choice field and go back to the first.
    pub fn clear_values(&mut self) {
        for field in self.fields.iter_mut() {
            if field.kind != FieldKind::Gender {
                field.value.clear();
            }
        }
        self.selected_field = 0;
    }

    #[must_use]
    pub fn value(&self, idx: usize) -> &str {
        self.fields[idx].value.trim()
    }

    pub fn set_value(&mut self, idx: usize, value: impl Into<String>) {
        self.fields[idx].value = value.into();
    }

    /// Parse a numeric field.
    pub fn parse<T: FromStr>(&self, idx: usize) -> Result<T> {
        let field = &self.fields[idx];
        let raw = field.value.trim();
        if raw.is_empty() {
            return Err(ThyverseError::Validation(format!("{}: Required", field.label)));
        }
        raw.parse()
            .map_err(|_| ThyverseError::Validation(format!("{}: Invalid number", field.label)))
    }

    pub fn gender(&self, idx: usize) -> Result<Gender> {
        let field = &self.fields[idx];
        field
            .value
            .parse()
            .map_err(|e: String| ThyverseError::Validation(format!("{}: {e}", field.label)))
    }

    /// Non-empty trimmed text.
    pub fn required_text(&self, idx: usize) -> Result<String> {
        let field = &self.fields[idx];
        let raw = field.value.trim();
        if raw.is_empty() {
            Err(ThyverseError::Validation(format!("{}: Required", field.label)))
        } else {
            Ok(raw.to_string())
        }
    }

    pub fn set_error(&mut self, error: &ThyverseError) {
        tracing::warn!("Form input rejected: {}", error);
        self.error_message = Some(error.to_string());
        self.notice = None;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.error_message = None;
    }
}

/// Render fields stacked vertically inside `area`.
pub fn render_fields(f: &mut Frame, area: Rect, form: &Form, focused: bool, theme: &Theme) {
    let field_height = 3;
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_selected = focused && i == form.selected_field;
        let border_style = if is_selected {
            theme.border_focused()
        } else {
            theme.border()
        };
        let title_style = if is_selected {
            theme.focused()
        } else {
            theme.text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, theme.text_muted())
        } else if field.kind == FieldKind::Gender {
            Span::styled(format!("‹ {} ›", field.value), theme.text())
        } else {
            Span::styled(field.value.as_str(), theme.text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected && field.kind != FieldKind::Gender {
                Span::styled("▌", theme.cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

/// Error, notice or key hints, in that order of precedence.
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    form: &Form,
    hints: &[(&str, &str)],
    theme: &Theme,
) {
    let content = if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled("! ", theme.danger()),
            Span::styled(err.clone(), theme.danger()),
        ])
    } else if let Some(notice) = &form.notice {
        Line::from(vec![
            Span::styled("✓ ", theme.success()),
            Span::styled(notice.clone(), theme.success()),
        ])
    } else {
        key_hints(hints, theme)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border()),
    );

    f.render_widget(footer, area);
}

/// `[Key] Description` pairs on one line.
#[must_use]
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), theme.key_hint()),
                Span::styled(format!("{desc} "), theme.key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> Form {
        Form::new(vec![
            FormField::new("Name", "e.g., Levothyroxine", FieldKind::Text),
            FormField::new("Weight", "kg", FieldKind::Decimal),
            FormField::new("Age", "years", FieldKind::Integer),
            FormField::new("Gender", "male/female", FieldKind::Gender).with_value("male"),
        ])
    }

    #[test]
    fn test_navigation_wraps() {
        let mut form = sample_form();
        form.prev_field();
        assert_eq!(form.selected_field, 3);
        form.next_field();
        assert_eq!(form.selected_field, 0);
    }

    #[test]
    fn test_numeric_fields_filter_input() {
        let mut form = sample_form();
        form.selected_field = 1;
        for c in "7a2.5x".chars() {
            form.input_char(c);
        }
        assert_eq!(form.value(1), "72.5");
        assert_eq!(form.parse::<f64>(1).unwrap(), 72.5);

        form.selected_field = 2;
        for c in "3.5".chars() {
            form.input_char(c);
        }
        assert_eq!(form.value(2), "35");
    }

    #[test]
    fn test_parse_errors() {
        let mut form = sample_form();
        let err = form.parse::<f64>(1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Weight: Required");

        form.set_value(1, "--1");
        let err = form.parse::<f64>(1).unwrap_err();
        assert!(matches!(err, ThyverseError::Validation(_)));
        assert!(err.to_string().contains("Invalid number"));
    }

    #[test]
    fn test_negative_numbers_parse() {
        let mut form = sample_form();
        form.set_value(2, "-4");
        assert_eq!(form.parse::<i32>(2).unwrap(), -4);
        assert!(form.parse::<u32>(2).is_err());
    }

    #[test]
    fn test_required_text() {
        let mut form = sample_form();
        assert!(form.required_text(0).is_err());
        form.set_value(0, "  Levothyroxine ");
        assert_eq!(form.required_text(0).unwrap(), "Levothyroxine");
    }

    #[test]
    fn test_gender_field() {
        let mut form = sample_form();
        form.selected_field = 3;
        form.input_char('f');
        assert_eq!(form.gender(3).unwrap(), Gender::Female);
        form.input_char(' ');
        assert_eq!(form.gender(3).unwrap(), Gender::Male);
        form.delete_char();
        assert_eq!(form.value(3), "male");
    }

    #[test]
    fn test_clear_values_keeps_choice() {
        let mut form = sample_form();
        form.set_value(0, "x");
        form.selected_field = 2;
        form.clear_values();
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(3), "male");
        assert_eq!(form.selected_field, 0);
    }
}

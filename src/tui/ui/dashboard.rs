//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::application::DashboardSummary;
use crate::domain::PatientRecord;
use crate::tui::styles::Theme;

use super::titled_block;

/// Render the main dashboard view.
pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    patient: &PatientRecord,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Min(0),    // Details
        ])
        .margin(1)
        .split(area);

    render_stat_cards(f, chunks[0], summary, theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    render_patient_info(f, columns[0], patient, theme);
    render_recent_medications(f, columns[1], summary, theme);
    render_quick_actions(f, columns[2], theme);
}

fn render_stat_cards(f: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let bp = match summary.latest_bp {
        Some((systolic, diastolic, _)) => format!("{systolic}/{diastolic}"),
        None => "--".to_string(),
    };

    let stats = [
        ("Active Medications", summary.active_medications.to_string()),
        ("Latest BMI", format!("{:.1}", summary.bmi)),
        ("Latest BP", bp),
        ("Latest TSH", format!("{} mIU/L", summary.latest_tsh)),
    ];

    for (i, (title, value)) in stats.into_iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(value, theme.figure())),
        ])
        .alignment(Alignment::Center)
        .block(titled_block(title, theme));
        f.render_widget(card, cards[i]);
    }
}

fn render_patient_info(f: &mut Frame, area: Rect, patient: &PatientRecord, theme: &Theme) {
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label}: "), theme.text_secondary()),
            Span::styled(value, theme.text()),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("Name", patient.name.clone()),
        row("Age", patient.age.to_string()),
        row("Gender", patient.gender.to_string()),
        row("Height", format!("{} cm", patient.height)),
        row("Weight", format!("{} kg", patient.weight)),
    ];

    let p = Paragraph::new(lines).block(titled_block("Patient Information", theme));
    f.render_widget(p, area);
}

fn render_recent_medications(
    f: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    theme: &Theme,
) {
    let block = titled_block("Recent Medications", theme);

    if summary.recent_medications.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No medications. Press [M] to add one.",
            theme.text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines = vec![Line::from("")];
    for med in &summary.recent_medications {
        lines.push(Line::from(vec![
            Span::styled("  ● ", theme.focused()),
            Span::styled(med.name.clone(), theme.title()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {} · {}", med.dose, med.duration),
            theme.text_secondary(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quick_actions(f: &mut Frame, area: Rect, theme: &Theme) {
    let action = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  [{key}] "), theme.key_hint()),
            Span::styled(desc, theme.key_desc()),
        ])
    };

    let actions = vec![
        Line::from(""),
        action("B", "Body Measurements"),
        action("M", "Medications"),
        action("V", "Vitals"),
        action("T", "Thyroid Panel"),
        action("S", "Settings"),
        action("Q", "Quit"),
    ];

    f.render_widget(
        Paragraph::new(actions).block(titled_block("Quick Actions", theme)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::application::TrackerService;
    use crate::tui::ui::testing::{buffer_text, draw};

    #[test]
    fn test_dashboard_renders_seed() {
        let service = TrackerService::new(MemoryStore::seeded());
        let summary = service.summary();
        let theme = Theme::dark();

        let buffer = draw(140, 30, |f| {
            let area = f.area();
            render_dashboard(f, area, &summary, service.patient(), &theme)
        });
        let text = buffer_text(&buffer);

        assert!(text.contains("Active Medications"));
        assert!(text.contains("24.5"));
        assert!(text.contains("120/80"));
        assert!(text.contains("2.5 mIU/L"));
        assert!(text.contains("John Doe"));
        assert!(text.contains("Levothyroxine"));
    }

    #[test]
    fn test_dashboard_without_vitals() {
        let mut record = PatientRecord::seed(chrono::Utc::now());
        record.vitals.clear();
        let service = TrackerService::new(MemoryStore::with_record(record));
        let summary = service.summary();

        let buffer = draw(140, 30, |f| {
            let area = f.area();
            render_dashboard(f, area, &summary, service.patient(), &Theme::light())
        });
        assert!(buffer_text(&buffer).contains("--"));
    }
}

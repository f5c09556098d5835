//! UI module: View components for the TUI.

pub mod dashboard;
pub mod form;
pub mod measurements;
pub mod medications;
pub mod settings;
pub mod thyroid;
pub mod vitals;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::{Theme, APP_NAME};

/// Header bar with the app name and one tab per screen.
pub fn render_tabs(f: &mut Frame, area: Rect, titles: &[&str], active: usize, theme: &Theme) {
    let mut spans = vec![
        Span::styled(format!(" {APP_NAME} "), theme.title()),
        Span::styled("│ ", theme.text_muted()),
    ];

    for (i, title) in titles.iter().enumerate() {
        let style = if i == active {
            theme.tab_active()
        } else {
            theme.text_secondary()
        };
        spans.push(Span::styled(format!(" F{} {} ", i + 1, title), style));
        spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border()),
    );

    f.render_widget(header, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![Line::from(vec![
        Span::styled(
            "For personal tracking only. Indicators are simple formulas and do not replace professional medical advice.  ",
            theme.text_muted(),
        ),
        Span::styled("[Ctrl+T] ", theme.key_hint()),
        Span::styled("Theme ", theme.key_desc()),
        Span::styled("[Ctrl+Q] ", theme.key_hint()),
        Span::styled("Quit", theme.key_desc()),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Plain bordered block with a styled title.
#[must_use]
pub fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {title} "), theme.subtitle()))
        .borders(Borders::ALL)
        .border_style(theme.border())
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    /// Draw into an off-screen buffer and return it.
    pub fn draw<F>(width: u16, height: u16, render: F) -> Buffer
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(render).unwrap();
        terminal.backend().buffer().clone()
    }

    /// All cell symbols concatenated, row by row.
    pub fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame, Terminal,
};

use crate::adapters::MemoryStore;
use crate::application::TrackerService;

use super::styles::Theme;
use super::ui::{
    dashboard::render_dashboard,
    form::Form,
    measurements::{render_measurements, MeasurementsState},
    medications::{render_medications, MedicationsState},
    render_disclaimer, render_tabs,
    settings::{render_settings, SettingsState},
    thyroid::{render_thyroid, ThyroidState},
    vitals::{render_vitals, VitalsState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Measurements,
    Medications,
    Vitals,
    Thyroid,
    Settings,
}

impl Screen {
    /// Tab order, matching `F1`-`F6`.
    pub const ALL: [Screen; 6] = [
        Screen::Dashboard,
        Screen::Measurements,
        Screen::Medications,
        Screen::Vitals,
        Screen::Thyroid,
        Screen::Settings,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Measurements => "Measurements",
            Screen::Medications => "Medications",
            Screen::Vitals => "Vitals",
            Screen::Thyroid => "Thyroid Panel",
            Screen::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Tracker over the in-memory record
    tracker: TrackerService<MemoryStore>,

    measurements: MeasurementsState,
    medications: MedicationsState,
    vitals: VitalsState,
    thyroid: ThyroidState,
    settings: SettingsState,
}

impl App {
    /// Create an application over a freshly seeded record.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dependencies(TrackerService::new(MemoryStore::seeded()))
    }

    /// Create an application around an existing tracker.
    #[must_use]
    pub fn with_dependencies(tracker: TrackerService<MemoryStore>) -> Self {
        let patient = tracker.patient();
        let measurements = MeasurementsState::from_patient(patient);
        let settings = SettingsState::from_patient(patient);
        let thyroid = ThyroidState::from_panel(&patient.thyroid_panel);

        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            tracker,
            measurements,
            medications: MedicationsState::default(),
            vitals: VitalsState::default(),
            thyroid,
            settings,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let theme = Theme::for_mode(self.tracker.is_dark_mode());
        let area = f.area();
        f.render_widget(Block::default().style(theme.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let titles = Screen::ALL.map(Screen::title);
        render_tabs(f, chunks[0], &titles, self.screen.index(), &theme);

        let content = chunks[1];
        let patient = self.tracker.patient();
        match self.screen {
            Screen::Dashboard => {
                render_dashboard(f, content, &self.tracker.summary(), patient, &theme);
            }
            Screen::Measurements => {
                let preview = self
                    .measurements
                    .draft()
                    .ok()
                    .map(|(weight, height, gender)| self.tracker.body_metrics(weight, height, gender));
                render_measurements(f, content, &self.measurements, preview, &theme);
            }
            Screen::Medications => {
                render_medications(f, content, &self.medications, &patient.medications, &theme);
            }
            Screen::Vitals => render_vitals(f, content, &self.vitals, &patient.vitals, &theme),
            Screen::Thyroid => render_thyroid(
                f,
                content,
                &self.thyroid,
                &self.tracker.thyroid_statuses(),
                &patient.thyroid_panel,
                &theme,
            ),
            Screen::Settings => {
                render_settings(f, content, &self.settings, self.tracker.is_dark_mode(), &theme);
            }
        }

        render_disclaimer(f, chunks[2], &theme);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Char('t') | KeyCode::Char('T') => self.tracker.toggle_theme(),
                KeyCode::Char('x') | KeyCode::Char('X') if self.screen == Screen::Medications => {
                    self.remove_selected_medication();
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::F(n @ 1..=6) => {
                self.go_to(Screen::ALL[usize::from(n) - 1]);
                return;
            }
            KeyCode::Esc => {
                self.go_to(Screen::Dashboard);
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Measurements => {
                if key == KeyCode::Char('?') {
                    self.measurements.toggle_info();
                } else if key == KeyCode::Enter {
                    self.submit_measurements();
                } else {
                    edit_form(&mut self.measurements.form, key);
                }
            }
            Screen::Medications => match key {
                KeyCode::PageDown => {
                    let len = self.tracker.patient().medications.len();
                    self.medications.select_next(len);
                }
                KeyCode::PageUp => {
                    let len = self.tracker.patient().medications.len();
                    self.medications.select_prev(len);
                }
                KeyCode::Enter => self.submit_medication(),
                _ => edit_form(&mut self.medications.form, key),
            },
            Screen::Vitals => {
                if key == KeyCode::Enter {
                    self.submit_vitals();
                } else {
                    edit_form(&mut self.vitals.form, key);
                }
            }
            Screen::Thyroid => {
                if key == KeyCode::Enter {
                    self.submit_thyroid();
                } else {
                    edit_form(&mut self.thyroid.form, key);
                }
            }
            Screen::Settings => {
                if key == KeyCode::Enter {
                    self.submit_settings();
                } else {
                    edit_form(&mut self.settings.form, key);
                }
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        let KeyCode::Char(c) = key else {
            return;
        };
        match c.to_ascii_lowercase() {
            'b' => self.go_to(Screen::Measurements),
            'm' => self.go_to(Screen::Medications),
            'v' => self.go_to(Screen::Vitals),
            't' => self.go_to(Screen::Thyroid),
            's' => self.go_to(Screen::Settings),
            'q' => self.should_quit = true,
            _ => {}
        }
    }

    /// Switch screens, refreshing forms that mirror stored values.
    fn go_to(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        tracing::debug!("Switching to {:?}", screen);

        let patient = self.tracker.patient();
        match screen {
            Screen::Measurements => self.measurements = MeasurementsState::from_patient(patient),
            Screen::Thyroid => self.thyroid = ThyroidState::from_panel(&patient.thyroid_panel),
            Screen::Settings => self.settings = SettingsState::from_patient(patient),
            Screen::Medications => self.medications.clamp_selection(patient.medications.len()),
            Screen::Dashboard | Screen::Vitals => {}
        }
        self.screen = screen;
    }

    fn submit_measurements(&mut self) {
        match self.measurements.to_update() {
            Ok(update) => {
                self.tracker.update_patient(update);
                self.measurements.form.set_notice("Measurements saved");
            }
            Err(e) => self.measurements.form.set_error(&e),
        }
    }

    fn submit_medication(&mut self) {
        match self.medications.new_medication() {
            Ok(med) => {
                self.tracker.prescribe(&med.name, &med.dose, &med.duration);
                self.medications.form.clear_values();
                self.medications
                    .form
                    .set_notice(format!("{} added", med.name));
            }
            Err(e) => self.medications.form.set_error(&e),
        }
    }

    fn remove_selected_medication(&mut self) {
        let medications = &self.tracker.patient().medications;
        let Some(id) = self.medications.selected_id(medications).map(str::to_owned) else {
            return;
        };
        self.tracker.remove_medication(&id);

        let len = self.tracker.patient().medications.len();
        self.medications.clamp_selection(len);
        self.medications.form.set_notice("Medication removed");
    }

    fn submit_vitals(&mut self) {
        match self.vitals.new_reading() {
            Ok((systolic, diastolic, pulse)) => {
                self.tracker.record_vitals(systolic, diastolic, pulse);
                self.vitals.form.clear_values();
                self.vitals.form.set_notice("Reading added");
            }
            Err(e) => self.vitals.form.set_error(&e),
        }
    }

    fn submit_thyroid(&mut self) {
        match self.thyroid.values() {
            Ok((tsh, t3, t4)) => {
                self.tracker.save_thyroid_panel(tsh, t3, t4);
                self.thyroid.form.set_notice("Thyroid panel saved");
            }
            Err(e) => self.thyroid.form.set_error(&e),
        }
    }

    fn submit_settings(&mut self) {
        match self.settings.to_update() {
            Ok(update) => {
                self.tracker.update_patient(update);
                self.settings.form.set_notice("Profile saved");
            }
            Err(e) => self.settings.form.set_error(&e),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared field editing for every form screen.
fn edit_form(form: &mut Form, key: KeyCode) {
    match key {
        KeyCode::Up => form.prev_field(),
        KeyCode::Down | KeyCode::Tab => form.next_field(),
        KeyCode::Left | KeyCode::Right => form.toggle_choice(),
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Delete => form.clear_field(),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
}

//! Color palettes and preset styles.
//!
//! Two palettes share one set of style helpers. The dark palette is a slate
//! and teal scheme; the light one inverts the surfaces and deepens the accents
//! so they keep their contrast on a pale background.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{BmiCategory, BpCategory, ThyroidStatus};

/// Active color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub chart: [Color; 3],
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(13, 148, 136),        // #0D9488
            primary_light: Color::Rgb(45, 212, 191),  // #2DD4BF
            primary_dark: Color::Rgb(15, 118, 110),   // #0F766E
            border: Color::Rgb(148, 163, 184),        // #94A3B8
            success: Color::Rgb(16, 185, 129),        // #10B981
            warning: Color::Rgb(251, 191, 36),        // #FBBF24
            danger: Color::Rgb(244, 63, 94),          // #F43F5E
            info: Color::Rgb(59, 130, 246),           // #3B82F6
            background: Color::Rgb(15, 23, 42),       // #0F172A
            text_primary: Color::Rgb(248, 250, 252),  // #F8FAFC
            text_secondary: Color::Rgb(148, 163, 184), // #94A3B8
            text_muted: Color::Rgb(100, 116, 139),    // #64748B
            chart: [
                Color::Rgb(129, 140, 248), // systolic, #818CF8
                Color::Rgb(52, 211, 153),  // diastolic, #34D399
                Color::Rgb(251, 191, 36),  // pulse, #FBBF24
            ],
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(15, 118, 110),        // #0F766E
            primary_light: Color::Rgb(13, 148, 136),  // #0D9488
            primary_dark: Color::Rgb(17, 94, 89),     // #115E59
            border: Color::Rgb(100, 116, 139),        // #64748B
            success: Color::Rgb(4, 120, 87),          // #047857
            warning: Color::Rgb(180, 83, 9),          // #B45309
            danger: Color::Rgb(190, 18, 60),          // #BE123C
            info: Color::Rgb(29, 78, 216),            // #1D4ED8
            background: Color::Rgb(248, 250, 252),    // #F8FAFC
            text_primary: Color::Rgb(15, 23, 42),     // #0F172A
            text_secondary: Color::Rgb(51, 65, 85),   // #334155
            text_muted: Color::Rgb(100, 116, 139),    // #64748B
            chart: [
                Color::Rgb(79, 70, 229), // #4F46E5
                Color::Rgb(5, 150, 105), // #059669
                Color::Rgb(217, 119, 6), // #D97706
            ],
        }
    }

    #[must_use]
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    // === Preset Styles ===

    /// Base style painted over the whole frame.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    #[must_use]
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    #[must_use]
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    #[must_use]
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn danger(&self) -> Style {
        Style::default().fg(self.danger)
    }

    #[must_use]
    pub fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Large figures on stat cards.
    #[must_use]
    pub fn figure(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor(&self) -> Style {
        Style::default().fg(self.primary_light)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Active tab in the navigation bar.
    #[must_use]
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.primary_dark)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    // === Indicator Styles ===

    #[must_use]
    pub fn bmi_category(&self, category: BmiCategory) -> Style {
        match category {
            BmiCategory::Normal => self.success(),
            BmiCategory::Underweight | BmiCategory::Overweight => self.warning(),
            BmiCategory::Obese => self.danger(),
        }
    }

    #[must_use]
    pub fn bp_category(&self, category: BpCategory) -> Style {
        match category {
            BpCategory::Normal => self.success(),
            BpCategory::Elevated => self.warning(),
            BpCategory::Stage1Hypertension | BpCategory::Stage2Hypertension => self.danger(),
        }
    }

    /// Low is blue, High is red, Normal is green.
    #[must_use]
    pub fn thyroid_status(&self, status: ThyroidStatus) -> Style {
        match status {
            ThyroidStatus::Low => self.info(),
            ThyroidStatus::Normal => self.success(),
            ThyroidStatus::High => self.danger(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Application name shown in the header.
pub const APP_NAME: &str = "Thyverse";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(true), Theme::dark());
        assert_eq!(Theme::for_mode(false), Theme::light());
        assert_ne!(Theme::dark().background, Theme::light().background);
    }

    #[test]
    fn test_thyroid_status_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.thyroid_status(ThyroidStatus::Low).fg, Some(theme.info));
        assert_eq!(theme.thyroid_status(ThyroidStatus::High).fg, Some(theme.danger));
        assert_eq!(theme.thyroid_status(ThyroidStatus::Normal).fg, Some(theme.success));
    }
}

//! Theme and colors.

use common::{Color, Severity};
use serde::{Deserialize, Serialize};

/// Built-in theme selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// UI theme.
#[derive(Clone, Debug)]
pub struct UiTheme {
    pub name: String,
    pub is_dark: bool,
    pub colors: ThemeColors,
}

/// Theme colors.
#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub background: Color,
    pub panel: Color,
    pub foreground: Color,
    pub heading: Color,
    /// Timestamps, placeholders, hints.
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub log: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub run_button: Color,
    pub clear_button: Color,
    pub button_text: Color,
}

impl UiTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            is_dark: true,
            colors: ThemeColors {
                background: Color::GRAY_900,
                panel: Color::GRAY_800,
                foreground: Color::GRAY_100,
                heading: Color::GRAY_200,
                muted: Color::GRAY_500,
                accent: Color::CYAN_400,
                border: Color::GRAY_700,
                border_focused: Color::CYAN_400,
                log: Color::GRAY_300,
                error: Color::RED_400,
                warning: Color::YELLOW_400,
                info: Color::BLUE_400,
                run_button: Color::GREEN_600,
                clear_button: Color::RED_600,
                button_text: Color::WHITE,
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            is_dark: false,
            colors: ThemeColors {
                background: Color::rgb(255, 255, 255),
                panel: Color::GRAY_100,
                foreground: Color::GRAY_900,
                heading: Color::GRAY_800,
                muted: Color::GRAY_500,
                accent: Color::rgb(8, 145, 178),
                border: Color::GRAY_300,
                border_focused: Color::rgb(8, 145, 178),
                log: Color::GRAY_700,
                error: Color::RED_600,
                warning: Color::YELLOW_400.adjust_lightness(-0.2),
                info: Color::BLUE_400.adjust_lightness(-0.25),
                run_button: Color::GREEN_600,
                clear_button: Color::RED_600,
                button_text: Color::WHITE,
            },
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Replace the console color of one severity.
    pub fn set_severity_color(&mut self, severity: Severity, color: Color) {
        let slot = match severity {
            Severity::Error => &mut self.colors.error,
            Severity::Warn => &mut self.colors.warning,
            Severity::Info => &mut self.colors.info,
            Severity::Log => &mut self.colors.log,
        };
        *slot = color;
    }

    /// Text color for a console line.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Error => self.colors.error,
            Severity::Warn => self.colors.warning,
            Severity::Info => self.colors.info,
            Severity::Log => self.colors.log,
        }
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        let theme = UiTheme::dark();
        assert_eq!(theme.severity_color(Severity::Error), Color::RED_400);
        assert_eq!(theme.severity_color(Severity::Warn), Color::YELLOW_400);
        assert_eq!(theme.severity_color(Severity::Info), Color::BLUE_400);
        assert_eq!(theme.severity_color(Severity::Log), theme.colors.log);
    }

    #[test]
    fn test_severity_colors_are_distinct() {
        for theme in [UiTheme::dark(), UiTheme::light()] {
            let mut colors: Vec<Color> =
                Severity::ALL.iter().map(|s| theme.severity_color(*s)).collect();
            colors.dedup();
            assert_eq!(colors.len(), 4, "{}", theme.name);
        }
    }

    #[test]
    fn test_set_severity_color() {
        let mut theme = UiTheme::light();
        let magenta = Color::rgb(255, 0, 255);
        theme.set_severity_color(Severity::Info, magenta);

        assert_eq!(theme.severity_color(Severity::Info), magenta);
        assert_eq!(theme.severity_color(Severity::Warn), UiTheme::light().colors.warning);
    }

    #[test]
    fn test_from_name() {
        assert!(UiTheme::from_name(ThemeName::Dark).is_dark);
        assert!(!UiTheme::from_name(ThemeName::Light).is_dark);
        assert_eq!(ThemeName::default(), ThemeName::Dark);
    }
}

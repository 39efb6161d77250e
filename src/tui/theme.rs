//! Dark/light palettes for the console.

use ratatui::style::Color;

use crate::domain::AppSettings;

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub pass: Color,
    pub fail: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn of(settings: AppSettings) -> Self {
        if settings.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            pass: Color::Green,
            fail: Color::Red,
            highlight_fg: Color::Black,
            highlight_bg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            pass: Color::Green,
            fail: Color::Red,
            highlight_fg: Color::White,
            highlight_bg: Color::Black,
        }
    }
}

/// Label for the theme toggle: names the mode the toggle switches *to*.
pub fn toggle_label(settings: AppSettings) -> &'static str {
    if settings.dark_mode { "Light Mode" } else { "Dark Mode" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert_eq!(toggle_label(AppSettings { dark_mode: true }), "Light Mode");
        assert_eq!(toggle_label(AppSettings { dark_mode: false }), "Dark Mode");
    }
}

//! Light/dark theme state and its presentation strings.

use crossterm::style::Color;

/// Visual mode of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours the renderer uses for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub marker: Color,
    pub major_marker: Color,
    pub numeral: Color,
    pub hour_hand: Color,
    pub minute_hand: Color,
    pub second_hand: Color,
    pub text: Color,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) {
        *self = match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    /// Style class applied to the page body.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    /// Icon shown on the toggle button: the mode the button switches *to*.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Toggle button label, icon included.
    pub fn toggle_label(self) -> String {
        let target = match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        };
        format!("{} {}", self.toggle_icon(), target)
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::White,
                marker: Color::DarkGrey,
                major_marker: Color::Black,
                numeral: Color::Black,
                hour_hand: Color::Black,
                minute_hand: Color::DarkBlue,
                second_hand: Color::Red,
                text: Color::Black,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                marker: Color::Grey,
                major_marker: Color::White,
                numeral: Color::White,
                hour_hand: Color::White,
                minute_hand: Color::Cyan,
                second_hand: Color::Yellow,
                text: Color::White,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores_mode() {
        for start in [Theme::Light, Theme::Dark] {
            let mut theme = start;
            theme.toggle();
            assert_ne!(theme, start);
            theme.toggle();
            assert_eq!(theme, start);
        }
    }

    #[test]
    fn test_labels_name_the_target_mode() {
        assert_eq!(Theme::Light.toggle_label(), "🌙 Dark Mode");
        assert_eq!(Theme::Dark.toggle_label(), "☀️ Light Mode");
        assert_eq!(Theme::Dark.css_class(), "dark-mode");
        assert_eq!(Theme::Light.css_class(), "light-mode");
    }

    #[test]
    fn test_from_dark_flag() {
        assert!(Theme::from_dark_flag(true).is_dark());
        assert!(!Theme::from_dark_flag(false).is_dark());
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }
}

//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

/// Theme selection, from config or auto-detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Theme {
    /// Parse a config value ("auto", "dark", "light"); anything else
    /// falls back to Auto.
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ => Theme::Auto,
        }
    }
}

/// Resolve a theme selection to a concrete palette. Auto probes the
/// terminal background luma; a terminal that doesn't answer gets dark.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Rating-based colors (low effort green, high effort red)
    pub rating_high: Color,
    pub rating_mid: Color,
    pub rating_low: Color,

    // Slider bar colors
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub fee_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            rating_high: Color::Red,
            rating_mid: Color::Yellow,
            rating_low: Color::Green,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            fee_color: Color::Green,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            rating_high: Color::Red,
            rating_mid: Color::Indexed(130),
            rating_low: Color::Indexed(28),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(245),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            fee_color: Color::Indexed(28),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
        }
    }

    /// Returns the color for a rating (traffic light pattern: higher
    /// rating means more engagement effort)
    pub fn rating_color(&self, rating: u8) -> Color {
        if rating >= 4 {
            self.rating_high
        } else if rating == 3 {
            self.rating_mid
        } else {
            self.rating_low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_config() {
        assert_eq!(Theme::from_config(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_config(Some("light")), Theme::Light);
        assert_eq!(Theme::from_config(Some("solarized")), Theme::Auto);
        assert_eq!(Theme::from_config(None), Theme::Auto);
    }

    #[test]
    fn test_rating_colors_follow_traffic_light() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.rating_color(1), theme.rating_low);
        assert_eq!(theme.rating_color(3), theme.rating_mid);
        assert_eq!(theme.rating_color(5), theme.rating_high);
    }
}

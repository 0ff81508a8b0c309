//! Colour constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Category, Theme};

// Category accents drive the calendar dots and the badge
// next to each task row.

/// Used for Work
pub const WORK_BLUE: Color = Color::Rgb(93, 173, 226);
/// Used for Personal
pub const PERSONAL_YELLOW: Color = Color::Rgb(247, 220, 111);
/// Used for Shopping
pub const SHOPPING_TEAL: Color = Color::Rgb(118, 215, 196);
/// Used for Health
pub const HEALTH_RED: Color = Color::Rgb(236, 112, 99);
/// Used for Event
pub const EVENT_PURPLE: Color = Color::Rgb(175, 122, 197);

/// Accent colour for a category badge or calendar dot.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Work => WORK_BLUE,
        Category::Personal => PERSONAL_YELLOW,
        Category::Shopping => SHOPPING_TEAL,
        Category::Health => HEALTH_RED,
        Category::Event => EVENT_PURPLE,
    }
}

/// Resolved colour set for one theme preference.
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub danger: Color,
    pub success: Color,
}

/// Palette for the current theme.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::Rgb(244, 246, 248),
            text: Color::Rgb(30, 30, 30),
            muted: Color::Rgb(110, 110, 110),
            accent: Color::Rgb(41, 128, 185),
            danger: Color::Rgb(192, 57, 43),
            success: Color::Rgb(39, 174, 96),
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(24, 26, 27),
            text: Color::Rgb(220, 220, 220),
            muted: Color::Rgb(130, 130, 130),
            accent: Color::Rgb(93, 173, 226),
            danger: Color::Rgb(231, 76, 60),
            success: Color::Rgb(46, 204, 113),
        },
    }
}

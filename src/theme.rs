//! Named color themes for the TUI.

use ratatui::style::Color;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Clone, Copy)]
pub struct Theme {
    /// The big countdown readout and active progress fill.
    pub timer_color: Color,
    /// Weekly-view bars below the daily goal.
    pub bar_color: Color,
    /// Weekly-view bars at or above the daily goal.
    pub goal_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            timer_color: Color::Rgb(136, 192, 255),
            bar_color: Color::Rgb(100, 200, 255),
            goal_color: Color::Rgb(0, 255, 100),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 100, 255),
        },
        "dracula" => Theme {
            timer_color: Color::Rgb(189, 147, 249),
            bar_color: Color::Rgb(200, 100, 255),
            goal_color: Color::Rgb(0, 255, 0),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 0, 255),
        },
        "gruvbox" => Theme {
            timer_color: Color::Rgb(254, 128, 25),
            bar_color: Color::Rgb(255, 200, 100),
            goal_color: Color::Rgb(255, 255, 0),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(255, 150, 0),
        },
        "solarized" => Theme {
            timer_color: Color::Rgb(42, 161, 152),
            bar_color: Color::Rgb(100, 200, 255),
            goal_color: Color::Rgb(150, 255, 0),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 200, 0),
        },
        _ => Theme {
            timer_color: Color::Rgb(100, 181, 246),
            bar_color: Color::Rgb(0, 200, 255),
            goal_color: Color::Rgb(0, 255, 150),
            border_color: Color::Rgb(0, 200, 255),
            accent_color: Color::Rgb(255, 100, 0),
        },
    }
}

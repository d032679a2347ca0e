use ratatui::style::{Color, Modifier, Style};

use crate::models::PrayerStatus;

pub const BG: Color = Color::Rgb(12, 20, 16);
pub const SURFACE: Color = Color::Rgb(20, 32, 26);
pub const BORDER: Color = Color::Rgb(44, 70, 56);
pub const TEXT: Color = Color::Rgb(222, 232, 224);
pub const TEXT_DIM: Color = Color::Rgb(118, 140, 126);
pub const GOLD: Color = Color::Rgb(214, 178, 84);
pub const MINT: Color = Color::Rgb(110, 231, 183);
pub const GREEN: Color = Color::Rgb(86, 170, 110);
pub const AMBER: Color = Color::Rgb(212, 150, 64);
pub const RED: Color = Color::Rgb(196, 88, 72);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn mint() -> Style {
    Style::default().fg(MINT)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Icon and colour for a prayer's status.
pub fn status(status: Option<PrayerStatus>) -> (&'static str, Style) {
    match status {
        Some(PrayerStatus::Jamaat) => ("●", mint()),
        Some(PrayerStatus::Alone) => ("●", green()),
        Some(PrayerStatus::Missed) => ("✗", red()),
        None => ("○", dim()),
    }
}

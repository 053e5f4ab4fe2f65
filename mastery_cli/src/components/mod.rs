/// Component module exports
pub mod progress;
pub mod table;

pub use progress::{progress_bar, ProgressGauge};
pub use table::{create_row, TableRow, TableWidget};

use ratatui::style::{Color, Style};

/// Teal #2DD4BF, or plain white in high-contrast mode
pub fn accent_color(high_contrast: bool) -> Color {
    if high_contrast {
        Color::White
    } else {
        Color::Rgb(45, 212, 191)
    }
}

pub fn border_style(high_contrast: bool) -> Style {
    if high_contrast {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Color for a completion percentage
pub fn percent_color(percent: u8, high_contrast: bool) -> Color {
    if high_contrast {
        return Color::White;
    }
    match percent {
        100 => Color::Green,
        0 => Color::Gray,
        _ => Color::Rgb(251, 146, 60), // Orange
    }
}

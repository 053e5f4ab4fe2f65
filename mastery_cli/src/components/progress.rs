/// Progress gauge and inline text bars
use super::{accent_color, percent_color};
use mastery_core::progress::Progress;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Gauge, Widget},
};

/// Fixed-width text bar, e.g. `███░░░░░░░` for 30% at width 10
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

pub struct ProgressGauge<'a> {
    label: &'a str,
    progress: Progress,
    high_contrast: bool,
}

impl<'a> ProgressGauge<'a> {
    pub fn new(label: &'a str, progress: Progress) -> Self {
        Self {
            label,
            progress,
            high_contrast: false,
        }
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

impl<'a> Widget for ProgressGauge<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.progress.is_complete() {
            percent_color(100, self.high_contrast)
        } else {
            accent_color(self.high_contrast)
        };

        let text = format!(
            "{} {}% ({}/{})",
            self.label, self.progress.percent, self.progress.done, self.progress.total
        );

        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(u16::from(self.progress.percent))
            .label(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_widths() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(100, 10), "██████████");
        assert_eq!(progress_bar(30, 10), "███░░░░░░░");
        assert_eq!(progress_bar(67, 3), "██░");
        assert_eq!(progress_bar(100, 0), "");
    }

    #[test]
    fn test_gauge_shows_counts() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        ProgressGauge::new("Overall", Progress::new(2, 3)).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Overall 67% (2/3)"));
    }
}

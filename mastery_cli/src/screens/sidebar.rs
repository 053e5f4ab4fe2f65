/// Sidebar: overall progress, view toggles and the section list
use crate::components::{accent_color, border_style, percent_color, progress_bar, ProgressGauge};
use mastery_core::catalog::Catalog;
use mastery_core::progress;
use mastery_core::types::AppState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const SIDEBAR_WIDTH: u16 = 34;
pub const COMPACT_SIDEBAR_WIDTH: u16 = 24;

pub struct Sidebar<'a> {
    state: &'a AppState,
    catalog: &'a Catalog,
    active_section: usize,
    focused: bool,
    high_contrast: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a AppState, catalog: &'a Catalog, active_section: usize) -> Self {
        Self {
            state,
            catalog,
            active_section,
            focused: false,
            high_contrast: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }

    pub fn width(compact: bool) -> u16 {
        if compact {
            COMPACT_SIDEBAR_WIDTH
        } else {
            SIDEBAR_WIDTH
        }
    }
}

impl<'a> Widget for Sidebar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let border = if self.focused {
            Style::default().fg(accent)
        } else {
            border_style(self.high_contrast)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                " Python Mastery OS ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Core Python → AI Python → Deploy",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .render(chunks[0], buf);

        let overall = progress::overall_progress(self.state, self.catalog);
        ProgressGauge::new("Overall", overall)
            .high_contrast(self.high_contrast)
            .render(chunks[1], buf);

        self.render_toggles(chunks[2], buf);
        self.render_sections(chunks[3], buf);
    }
}

impl<'a> Sidebar<'a> {
    fn render_toggles(&self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().add_modifier(Modifier::DIM);
        let switch = |on: bool| if on { "[on] " } else { "[off]" };
        let lines = vec![
            Line::from(Span::styled("View", dim)),
            Line::from(vec![
                Span::raw(switch(self.state.ui.compact_sidebar)),
                Span::raw(" Compact [c]"),
            ]),
            Line::from(vec![
                Span::raw(switch(self.state.ui.show_only_incomplete)),
                Span::raw(" Incomplete [i]"),
            ]),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    fn render_sections(&self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let compact = self.state.ui.compact_sidebar;

        let mut lines: Vec<Line> = self
            .catalog
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let p = progress::section_progress(self.state, self.catalog, &section.id);
                let active = i == self.active_section;
                let marker = if active { "▶ " } else { "  " };
                let title_style = if active {
                    Style::default().fg(accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                let mut spans = vec![
                    Span::styled(marker, title_style),
                    Span::styled(format!("{:<14}", truncate(&section.title, 14)), title_style),
                ];
                if !compact {
                    spans.push(Span::styled(
                        format!(" {}", progress_bar(p.percent, 6)),
                        Style::default().fg(percent_color(p.percent, self.high_contrast)),
                    ));
                }
                spans.push(Span::styled(
                    format!(" {:>3}%", p.percent),
                    Style::default().fg(percent_color(p.percent, self.high_contrast)),
                ));
                Line::from(spans)
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[R] Reset Progress",
            Style::default().add_modifier(Modifier::DIM),
        )));

        Paragraph::new(lines).render(area, buf);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

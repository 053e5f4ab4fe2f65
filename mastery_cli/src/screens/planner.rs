/// Weekly planner panel: plan fields, auto-generate and export preview
use super::dashboard::render_section_header;
use crate::components::{accent_color, border_style, create_row, TableWidget};
use mastery_core::catalog::Catalog;
use mastery_core::planner::{self, PlannerField};
use mastery_core::progress;
use mastery_core::types::{AppState, Section};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerRow {
    Week,
    Field(PlannerField),
}

impl PlannerRow {
    pub fn all() -> Vec<PlannerRow> {
        std::iter::once(PlannerRow::Week)
            .chain(PlannerField::ALL.iter().copied().map(PlannerRow::Field))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlannerRow::Week => "Week #",
            PlannerRow::Field(field) => field.label(),
        }
    }

    pub fn value(&self, state: &AppState) -> String {
        match self {
            PlannerRow::Week => state.weekly_planner.week_number.to_string(),
            PlannerRow::Field(field) => field.get(&state.weekly_planner).to_string(),
        }
    }
}

pub struct PlannerScreen<'a> {
    state: &'a AppState,
    catalog: &'a Catalog,
    section: &'a Section,
    selected: Option<usize>,
    show_export: bool,
    high_contrast: bool,
}

impl<'a> PlannerScreen<'a> {
    pub fn new(state: &'a AppState, catalog: &'a Catalog, section: &'a Section) -> Self {
        Self {
            state,
            catalog,
            section,
            selected: None,
            show_export: false,
            high_contrast: false,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn show_export(mut self, enabled: bool) -> Self {
        self.show_export = enabled;
        self
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

impl<'a> Widget for PlannerScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let progress = progress::section_progress(self.state, self.catalog, &self.section.id);
        render_section_header(self.section, progress, self.high_contrast, chunks[0], buf);

        if self.show_export {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
            self.render_fields(body[0], buf);
            self.render_export(body[1], buf);
        } else {
            self.render_fields(chunks[1], buf);
        }

        self.render_actions(chunks[2], buf);
    }
}

impl<'a> PlannerScreen<'a> {
    fn render_fields(&self, area: Rect, buf: &mut Buffer) {
        let rows = PlannerRow::all()
            .iter()
            .map(|row| {
                let value = row.value(self.state);
                let color = if value.is_empty() {
                    Color::DarkGray
                } else {
                    Color::White
                };
                let shown = if value.is_empty() {
                    "(empty)".to_string()
                } else {
                    value
                };
                create_row(vec![row.label().to_string(), shown], color)
            })
            .collect();

        let table = TableWidget::new(" Weekly Planner ", vec!["Field", "Value"], vec![16, 60])
            .rows(rows)
            .selected(self.selected)
            .high_contrast(self.high_contrast);
        Widget::render(table, area, buf);
    }

    fn render_export(&self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.high_contrast))
            .title(Span::styled(
                " Export (Markdown) ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let export = planner::render_export(&self.state.weekly_planner);
        let lines: Vec<Line> = export.lines().map(Line::from).collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }

    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.high_contrast));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let hint = Style::default().add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled("[Enter] Edit  ", hint),
            Span::styled("[g] Auto-generate  ", hint),
            Span::styled("[+/-] Week  ", hint),
            Span::styled("[e] Export  ", hint),
            Span::styled("[y] Copy", hint),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

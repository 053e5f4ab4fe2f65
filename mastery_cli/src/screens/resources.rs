/// Resources panel: curated links with per-link URL overrides
use super::dashboard::render_section_header;
use crate::components::{accent_color, border_style, create_row, TableWidget};
use mastery_core::catalog::{self, Catalog};
use mastery_core::progress;
use mastery_core::types::{AppState, LinkStatus, Section};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ResourcesScreen<'a> {
    state: &'a AppState,
    catalog: &'a Catalog,
    section: &'a Section,
    selected: Option<usize>,
    high_contrast: bool,
}

impl<'a> ResourcesScreen<'a> {
    pub fn new(state: &'a AppState, catalog: &'a Catalog, section: &'a Section) -> Self {
        Self {
            state,
            catalog,
            section,
            selected: None,
            high_contrast: false,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

impl<'a> Widget for ResourcesScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(6),
            ])
            .split(area);

        let progress = progress::section_progress(self.state, self.catalog, &self.section.id);
        render_section_header(self.section, progress, self.high_contrast, chunks[0], buf);
        self.render_links(chunks[1], buf);
        self.render_link_detail(chunks[2], buf);
    }
}

impl<'a> ResourcesScreen<'a> {
    fn render_links(&self, area: Rect, buf: &mut Buffer) {
        let rows = self
            .catalog
            .links
            .iter()
            .map(|link| {
                let url = catalog::effective_url(link, self.state);
                let color = match (self.high_contrast, link.status) {
                    (true, _) => Color::White,
                    (false, LinkStatus::Official) => Color::Green,
                    (false, LinkStatus::Placeholder) => Color::Rgb(251, 146, 60),
                };
                create_row(
                    vec![
                        link.label.clone(),
                        link.status.label().to_string(),
                        url.to_string(),
                    ],
                    color,
                )
            })
            .collect();

        let table = TableWidget::new(" Resources ", vec!["Link", "Status", "URL"], vec![28, 12, 50])
            .rows(rows)
            .selected(self.selected)
            .high_contrast(self.high_contrast);
        Widget::render(table, area, buf);
    }

    fn render_link_detail(&self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.high_contrast))
            .title(Span::styled(
                " Link ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let link = self.selected.and_then(|i| self.catalog.links.get(i));
        let lines = match link {
            Some(link) => {
                let url = catalog::effective_url(link, self.state);
                let overridden = self.state.custom_links.contains_key(&link.id);
                let mut lines = vec![Line::from(vec![
                    Span::styled("URL: ", dim),
                    Span::raw(url),
                    Span::styled(if overridden { "  (custom)" } else { "" }, dim),
                ])];
                if let Some(note) = &link.note {
                    lines.push(Line::from(vec![
                        Span::styled("Note: ", dim),
                        Span::raw(note.as_str()),
                    ]));
                }
                let open_hint = if catalog::is_openable(url) {
                    "Ready to open"
                } else {
                    "Not openable: needs an http(s) URL"
                };
                lines.push(Line::from(Span::styled(
                    format!("[Enter] Edit URL  {}", open_hint),
                    dim,
                )));
                lines
            }
            None => vec![Line::from(Span::styled("Select a link to edit its URL", dim))],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Checklist screen: scoreboard and module cards of the active section
use crate::components::{accent_color, border_style, create_row, percent_color, TableWidget};
use mastery_core::catalog::Catalog;
use mastery_core::progress::{self, Progress};
use mastery_core::types::{AppState, ChecklistKey, ItemKind, Module, Section};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// One line of the checklist table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistRow {
    ScoreboardHeader,
    Scoreboard(ChecklistKey),
    Module(String),
    Item(ChecklistKey),
}

impl ChecklistRow {
    /// Key flipped when the row is activated
    pub fn toggle_key(&self) -> Option<&ChecklistKey> {
        match self {
            ChecklistRow::Scoreboard(key) | ChecklistRow::Item(key) => Some(key),
            _ => None,
        }
    }

    /// Module whose note the row edits
    pub fn module_id(&self) -> Option<&str> {
        match self {
            ChecklistRow::Module(id) => Some(id.as_str()),
            ChecklistRow::Item(key) => key.module_id(),
            _ => None,
        }
    }
}

/// Rows for a section: scoreboard first when the section carries it, then
/// each module header followed by its learn, build and done items. Modules
/// with nothing left to do are dropped when `showOnlyIncomplete` is set.
pub fn checklist_rows(state: &AppState, catalog: &Catalog, section: &Section) -> Vec<ChecklistRow> {
    let mut rows = Vec::new();

    if section.show_scoreboard && !catalog.scoreboard.is_empty() {
        rows.push(ChecklistRow::ScoreboardHeader);
        rows.extend(
            progress::scoreboard_keys(catalog)
                .into_iter()
                .map(ChecklistRow::Scoreboard),
        );
    }

    for module in &section.modules {
        if state.ui.show_only_incomplete && !progress::module_has_incomplete(state, module) {
            continue;
        }
        rows.push(ChecklistRow::Module(module.id.clone()));
        rows.extend(
            progress::module_keys(module)
                .into_iter()
                .map(ChecklistRow::Item),
        );
    }

    rows
}

pub struct ChecklistScreen<'a> {
    state: &'a AppState,
    catalog: &'a Catalog,
    section: &'a Section,
    rows: &'a [ChecklistRow],
    selected: Option<usize>,
    high_contrast: bool,
}

impl<'a> ChecklistScreen<'a> {
    pub fn new(
        state: &'a AppState,
        catalog: &'a Catalog,
        section: &'a Section,
        rows: &'a [ChecklistRow],
    ) -> Self {
        Self {
            state,
            catalog,
            section,
            rows,
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

    fn selected_module_id(&self) -> Option<&'a str> {
        let rows: &'a [ChecklistRow] = self.rows;
        self.selected
            .and_then(|i| rows.get(i))
            .and_then(|row| row.module_id())
    }
}

impl<'a> Widget for ChecklistScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(area);

        let progress = progress::section_progress(self.state, self.catalog, &self.section.id);
        render_section_header(self.section, progress, self.high_contrast, chunks[0], buf);
        self.render_checklist(chunks[1], buf);
        self.render_note(chunks[2], buf);
    }
}

impl<'a> ChecklistScreen<'a> {
    fn render_checklist(&self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let table_rows: Vec<_> = self
            .rows
            .iter()
            .map(|row| match row {
                ChecklistRow::ScoreboardHeader => {
                    let p = progress::scoreboard_progress(self.state, self.catalog);
                    create_row(
                        vec![
                            "Progress Scoreboard".to_string(),
                            format!("{}%", p.percent),
                            String::new(),
                        ],
                        accent,
                    )
                }
                ChecklistRow::Module(id) => match self.catalog.module(id) {
                    Some(module) => {
                        let p = progress::module_progress(self.state, module);
                        create_row(
                            vec![
                                module_heading(module),
                                format!("{}%", p.percent),
                                module.time_estimate.clone(),
                            ],
                            accent,
                        )
                    }
                    None => create_row(vec![id.clone()], Color::Gray),
                },
                ChecklistRow::Scoreboard(key) | ChecklistRow::Item(key) => {
                    let checked = self.state.is_checked(key);
                    let label = self.catalog.resolve(key).unwrap_or("?");
                    let text = match key {
                        ChecklistKey::Item { kind, .. } => {
                            format!("  {} {} {}", checkbox(checked), kind_tag(*kind), label)
                        }
                        ChecklistKey::Scoreboard { .. } => {
                            format!("  {} {}", checkbox(checked), label)
                        }
                    };
                    let color = if checked { Color::Green } else { Color::White };
                    create_row(
                        vec![text, String::new(), String::new()],
                        if self.high_contrast { Color::White } else { color },
                    )
                }
            })
            .collect();

        let title = if self.state.ui.show_only_incomplete {
            " Checklist (incomplete only) "
        } else {
            " Checklist "
        };

        let table = TableWidget::new(title, vec!["Item", "%", "Time"], vec![70, 5, 14])
            .rows(table_rows)
            .selected(self.selected)
            .high_contrast(self.high_contrast);
        Widget::render(table, area, buf);
    }

    fn render_note(&self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);
        let module = self
            .selected_module_id()
            .and_then(|id| self.catalog.module(id));

        let title = match module {
            Some(m) => format!(" Notes: {} ", m.title),
            None => " Notes ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.high_contrast))
            .title(Span::styled(
                title,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let lines = match module {
            Some(m) => {
                let note = self.state.note(&m.id);
                let mut lines = Vec::new();
                if let Some(hint) = &m.notes {
                    lines.push(Line::from(Span::styled(
                        hint.as_str(),
                        Style::default().add_modifier(Modifier::DIM),
                    )));
                }
                if note.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "[n] Add a note",
                        Style::default().add_modifier(Modifier::DIM),
                    )));
                } else {
                    lines.push(Line::from(note));
                }
                lines
            }
            None => vec![Line::from(Span::styled(
                "Select a module item to see its notes",
                Style::default().add_modifier(Modifier::DIM),
            ))],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Title, description and progress of a section
pub fn render_section_header(
    section: &Section,
    progress: Progress,
    high_contrast: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let accent = accent_color(high_contrast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(high_contrast));
    let inner = block.inner(area);
    Widget::render(block, area, buf);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                section.title.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Section progress {}%", progress.percent),
                Style::default().fg(percent_color(progress.percent, high_contrast)),
            ),
        ]),
        Line::from(Span::styled(
            section.description.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Module title followed by its subtitle, when it has one
pub fn module_heading(module: &Module) -> String {
    match module.subtitle.as_deref() {
        Some(subtitle) if !subtitle.is_empty() => format!("{} · {}", module.title, subtitle),
        _ => module.title.clone(),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn kind_tag(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Learn => "L",
        ItemKind::Build => "B",
        ItemKind::Done => "D",
    }
}

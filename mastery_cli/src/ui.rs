/// Top-level TUI event loop and input handler
use crate::clipboard;
use crate::components::{accent_color, border_style};
use crate::config::Config;
use crate::keymap::KeyMap;
use crate::screens::{
    checklist_rows, ChecklistRow, ChecklistScreen, PlannerRow, PlannerScreen, ResourcesScreen,
    Sidebar,
};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mastery_core::store::KeyValueStore;
use mastery_core::tracker::{Event as TrackerEvent, Tracker};
use mastery_core::types::{Panel, Section};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Help,
    ConfirmReset,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// What an inline edit writes back to on Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Note(String),
    Planner(PlannerRow),
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub target: EditTarget,
    pub buffer: String,
}

pub struct App<S: KeyValueStore> {
    pub tracker: Tracker<S>,
    pub screen: Screen,
    pub focus: Focus,
    pub section: usize,
    pub cursor: usize,
    pub edit: Option<EditState>,
    pub show_export: bool,
    pub high_contrast: bool,
    pub last_action: String,
    /// Export text waiting to be written to the terminal clipboard
    pub pending_copy: Option<String>,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>, high_contrast: bool) -> Self {
        Self {
            tracker,
            screen: Screen::Main,
            focus: Focus::Sidebar,
            section: 0,
            cursor: 0,
            edit: None,
            show_export: false,
            high_contrast,
            last_action: "Ready".to_string(),
            pending_copy: None,
            should_quit: false,
        }
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.tracker.catalog().sections.get(self.section)
    }

    pub fn select_section(&mut self, index: usize) {
        let count = self.tracker.catalog().sections.len();
        if count > 0 {
            self.section = index.min(count - 1);
            self.cursor = 0;
        }
    }

    pub fn checklist_rows(&self) -> Vec<ChecklistRow> {
        match self.current_section() {
            Some(section) => checklist_rows(self.tracker.state(), self.tracker.catalog(), section),
            None => Vec::new(),
        }
    }

    fn panel(&self) -> Option<Panel> {
        self.current_section().and_then(|s| s.panel)
    }

    /// Number of selectable rows in the content pane
    pub fn content_len(&self) -> usize {
        match self.panel() {
            Some(Panel::Planner) => PlannerRow::all().len(),
            Some(Panel::Resources) => self.tracker.catalog().links.len(),
            None => self.checklist_rows().len(),
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.content_len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn set_last_action(&mut self, action: impl Into<String>) {
        self.last_action = action.into();
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Editing => self.handle_edit_key(code),
            Screen::ConfirmReset => self.handle_confirm_key(code),
            Screen::Help => {
                // Any key closes help
                self.screen = Screen::Main;
            }
            Screen::Main => {
                if KeyMap::is_quit(code, modifiers) {
                    self.should_quit = true;
                } else if KeyMap::is_help(code) {
                    self.screen = Screen::Help;
                } else {
                    self.handle_main_key(code);
                }
            }
        }
    }

    fn handle_main_key(&mut self, code: KeyCode) {
        if KeyMap::is_switch_focus(code) {
            self.focus = match self.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            };
            self.clamp_cursor();
        } else if KeyMap::is_down(code) {
            self.move_down();
        } else if KeyMap::is_up(code) {
            self.move_up();
        } else if KeyMap::is_activate(code) {
            self.activate();
        } else if KeyMap::is_note(code) {
            self.start_note_edit();
        } else if KeyMap::is_generate(code) {
            self.tracker.dispatch(TrackerEvent::GeneratePlan);
            let focus = self.tracker.state().weekly_planner.focus.clone();
            self.set_last_action(format!("Generated plan: {}", focus));
        } else if KeyMap::is_next_week(code) {
            let week = self.tracker.state().weekly_planner.week_number;
            self.tracker
                .dispatch(TrackerEvent::SetWeekNumber(week.saturating_add(1)));
            self.set_last_action(format!("Week {}", week.saturating_add(1)));
        } else if KeyMap::is_prev_week(code) {
            let week = self.tracker.state().weekly_planner.week_number;
            self.tracker
                .dispatch(TrackerEvent::SetWeekNumber(week.saturating_sub(1)));
            let week = self.tracker.state().weekly_planner.week_number;
            self.set_last_action(format!("Week {}", week));
        } else if KeyMap::is_toggle_export(code) {
            self.show_export = !self.show_export;
        } else if KeyMap::is_copy(code) {
            self.pending_copy = Some(self.tracker.export_plan());
            self.set_last_action("Copied plan export");
        } else if KeyMap::is_toggle_compact(code) {
            let on = !self.tracker.state().ui.compact_sidebar;
            self.tracker.dispatch(TrackerEvent::SetCompactSidebar(on));
        } else if KeyMap::is_toggle_incomplete(code) {
            let on = !self.tracker.state().ui.show_only_incomplete;
            self.tracker.dispatch(TrackerEvent::SetShowOnlyIncomplete(on));
            self.clamp_cursor();
        } else if KeyMap::is_toggle_theme(code) {
            self.high_contrast = !self.high_contrast;
        } else if KeyMap::is_reset(code) {
            self.screen = Screen::ConfirmReset;
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Sidebar => self.select_section(self.section + 1),
            Focus::Content => {
                if self.cursor + 1 < self.content_len() {
                    self.cursor += 1;
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Sidebar => self.select_section(self.section.saturating_sub(1)),
            Focus::Content => self.cursor = self.cursor.saturating_sub(1),
        }
    }

    fn activate(&mut self) {
        if self.focus == Focus::Sidebar {
            self.focus = Focus::Content;
            self.cursor = 0;
            return;
        }

        match self.panel() {
            Some(Panel::Planner) => {
                if let Some(row) = PlannerRow::all().get(self.cursor).copied() {
                    let buffer = row.value(self.tracker.state());
                    self.begin_edit(EditTarget::Planner(row), buffer);
                }
            }
            Some(Panel::Resources) => {
                if let Some(link) = self.tracker.catalog().links.get(self.cursor) {
                    let id = link.id.clone();
                    let current = self
                        .tracker
                        .state()
                        .custom_links
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| link.url.clone());
                    self.begin_edit(EditTarget::Link(id), current);
                }
            }
            None => {
                let rows = self.checklist_rows();
                if let Some(key) = rows.get(self.cursor).and_then(|r| r.toggle_key()) {
                    self.tracker.toggle(key.clone());
                    let label = self.tracker.catalog().resolve(key).unwrap_or("?").to_string();
                    let verb = if self.tracker.state().is_checked(key) {
                        "Done"
                    } else {
                        "Undone"
                    };
                    self.set_last_action(format!("{}: {}", verb, label));
                    self.clamp_cursor();
                }
            }
        }
    }

    fn start_note_edit(&mut self) {
        if self.focus != Focus::Content || self.panel().is_some() {
            return;
        }
        let rows = self.checklist_rows();
        if let Some(module_id) = rows.get(self.cursor).and_then(|r| r.module_id()) {
            let note = self.tracker.state().note(module_id).to_string();
            self.begin_edit(EditTarget::Note(module_id.to_string()), note);
        }
    }

    fn begin_edit(&mut self, target: EditTarget, buffer: String) {
        self.edit = Some(EditState { target, buffer });
        self.screen = Screen::Editing;
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.edit = None;
                self.screen = Screen::Main;
                self.set_last_action("Edit cancelled");
            }
            KeyCode::Enter => {
                if let Some(edit) = self.edit.take() {
                    self.commit_edit(edit);
                }
                self.screen = Screen::Main;
            }
            KeyCode::Backspace => {
                if let Some(edit) = &mut self.edit {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = &mut self.edit {
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self, edit: EditState) {
        match edit.target {
            EditTarget::Note(module_id) => {
                self.tracker.set_note(&module_id, &edit.buffer);
                self.set_last_action("Note saved");
            }
            EditTarget::Link(link_id) => {
                self.tracker.set_link_override(&link_id, edit.buffer.trim());
                self.set_last_action("Link saved");
            }
            EditTarget::Planner(PlannerRow::Week) => match edit.buffer.trim().parse::<u32>() {
                Ok(week) => {
                    self.tracker.dispatch(TrackerEvent::SetWeekNumber(week));
                    let week = self.tracker.state().weekly_planner.week_number;
                    self.set_last_action(format!("Week {}", week));
                }
                Err(_) => self.set_last_action(format!("Not a week number: {}", edit.buffer)),
            },
            EditTarget::Planner(PlannerRow::Field(field)) => {
                self.tracker.set_planner_field(field, &edit.buffer);
                self.set_last_action(format!("{} updated", field.label()));
            }
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        if KeyMap::is_confirm(code) {
            self.tracker.reset();
            self.cursor = 0;
            self.screen = Screen::Main;
            self.set_last_action("Progress reset");
        } else if KeyMap::is_cancel(code) || KeyMap::is_quit(code, KeyModifiers::NONE) {
            self.screen = Screen::Main;
            self.set_last_action("Reset cancelled");
        }
    }

    fn edit_title(&self, edit: &EditState) -> String {
        match &edit.target {
            EditTarget::Note(id) => {
                let title = self
                    .tracker
                    .catalog()
                    .module(id)
                    .map(|m| m.title.as_str())
                    .unwrap_or(id.as_str());
                format!("Note: {}", title)
            }
            EditTarget::Planner(row) => format!("Edit {}", row.label()),
            EditTarget::Link(id) => {
                let label = self
                    .tracker
                    .catalog()
                    .link(id)
                    .map(|l| l.label.as_str())
                    .unwrap_or(id.as_str());
                format!("URL: {}", label)
            }
        }
    }
}

/// Renders the whole UI for one frame
pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let size = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let state = app.tracker.state();
    let catalog = app.tracker.catalog();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(Sidebar::width(state.ui.compact_sidebar)),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    f.render_widget(
        Sidebar::new(state, catalog, app.section)
            .focused(app.focus == Focus::Sidebar)
            .high_contrast(app.high_contrast),
        columns[0],
    );

    let cursor = (app.focus == Focus::Content).then_some(app.cursor);
    if let Some(section) = app.current_section() {
        match section.panel {
            Some(Panel::Planner) => f.render_widget(
                PlannerScreen::new(state, catalog, section)
                    .selected(cursor)
                    .show_export(app.show_export)
                    .high_contrast(app.high_contrast),
                columns[1],
            ),
            Some(Panel::Resources) => f.render_widget(
                ResourcesScreen::new(state, catalog, section)
                    .selected(cursor)
                    .high_contrast(app.high_contrast),
                columns[1],
            ),
            None => {
                let checklist = app.checklist_rows();
                f.render_widget(
                    ChecklistScreen::new(state, catalog, section, &checklist)
                        .selected(cursor)
                        .high_contrast(app.high_contrast),
                    columns[1],
                );
            }
        }
    }

    render_quick_actions_bar(f, rows[1], app);

    match app.screen {
        Screen::Main => {}
        Screen::Help => render_help(f, size, app.high_contrast),
        Screen::ConfirmReset => render_modal(
            f,
            size,
            "Reset Progress",
            "Reset all progress? This cannot be undone.\n\n[Enter/y] Confirm  [Esc/n] Cancel",
            app.high_contrast,
        ),
        Screen::Editing => {
            if let Some(edit) = &app.edit {
                let message = format!("{}█\n\n[Enter] Save  [Esc] Cancel", edit.buffer);
                render_modal(f, size, &app.edit_title(edit), &message, app.high_contrast);
            }
        }
    }
}

pub fn run_tui(config: &Config) -> Result<()> {
    let tracker = config.open_tracker()?;
    let mut app = App::new(tracker, config.high_contrast);

    let mut terminal = setup_terminal()?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Raw mode plus alternate screen. Raw mode is undone when the rest fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    with_rollback(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Runs `setup`; on error runs `rollback` before handing the error back
fn with_rollback<T>(setup: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        rollback();
    }
    result
}

fn run_loop<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()>
where
    B: Backend + Write,
    S: KeyValueStore,
{
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Some(text) = app.pending_copy.take() {
            if let Err(e) = clipboard::copy_to(terminal.backend_mut(), &text) {
                log::debug!("Clipboard write failed: {}", e);
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }
    Ok(())
}

fn render_help(f: &mut Frame, area: Rect, high_contrast: bool) {
    let accent = accent_color(high_contrast);

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(high_contrast))
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Python Mastery OS",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Learn → Build → Ship. Progress is saved after every change.",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];

    for (key, desc) in KeyMap::help_text() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn render_modal(f: &mut Frame, area: Rect, title: &str, message: &str, high_contrast: bool) {
    let accent = accent_color(high_contrast);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);

    let modal_area = horizontal[1];
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let text = Paragraph::new(message)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    f.render_widget(text, inner);
}

fn render_quick_actions_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.high_contrast);
    let hints: &[&str] = match app.current_section().and_then(|s| s.panel) {
        Some(Panel::Planner) => &["[Enter] Edit", "[g] Generate", "[e] Export", "[y] Copy"],
        Some(Panel::Resources) => &["[Enter] Edit URL"],
        None => &["[Space] Toggle", "[n] Note", "[i] Incomplete"],
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.last_action),
        Style::default().fg(accent),
    )];
    for hint in hints.iter().chain(["[Tab] Focus", "[?] Help", "[q] Quit"].iter()) {
        spans.push(Span::styled(
            format!(" {} ", hint),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_core::catalog;
    use mastery_core::planner::PlannerField;
    use mastery_core::store::MemoryStore;

    fn app() -> App<MemoryStore> {
        let tracker = Tracker::open(catalog::builtin().unwrap(), MemoryStore::new());
        App::new(tracker, false)
    }

    #[test]
    fn test_focus_switch_and_quit() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Sidebar);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Content);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_sidebar_navigation_clamps() {
        let mut app = app();
        let count = app.tracker.catalog().sections.len();
        for _ in 0..count + 3 {
            app.handle_key(KeyCode::Char('j'), KeyModifiers::NONE);
        }
        assert_eq!(app.section, count - 1);
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.section, count - 2);
    }

    #[test]
    fn test_edit_cancel_leaves_state() {
        let mut app = app();
        app.focus = Focus::Content;
        // home: scoreboard header, 8 scoreboard rows, then the first module
        app.cursor = 10;
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Editing);

        app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Main);
        assert!(app.tracker.state().custom_notes.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = app();
        app.focus = Focus::Content;
        app.cursor = 10;
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_planner_field_names_reach_tracker() {
        let mut app = app();
        app.commit_edit(EditState {
            target: EditTarget::Planner(PlannerRow::Field(PlannerField::DemoProof)),
            buffer: "2-min video".to_string(),
        });
        assert_eq!(app.tracker.state().weekly_planner.demo_proof, "2-min video");
    }

    #[test]
    fn test_setup_failure_rolls_back() {
        let mut rolled_back = false;
        let result: Result<()> = with_rollback(
            || Err(anyhow::anyhow!("no tty")),
            || rolled_back = true,
        );
        assert!(result.is_err());
        assert!(rolled_back);
    }

    #[test]
    fn test_setup_success_keeps_terminal() {
        let mut rolled_back = false;
        let result = with_rollback(|| Ok(7), || rolled_back = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!rolled_back);
    }
}

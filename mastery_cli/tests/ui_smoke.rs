/// Smoke tests for UI rendering and key handling using ratatui's TestBackend
use crossterm::event::{KeyCode, KeyModifiers};
use mastery_cli::screens::{ChecklistRow, PlannerRow};
use mastery_cli::ui::{self, App, EditTarget, Focus, Screen};
use mastery_core::catalog;
use mastery_core::store::{FileStore, MemoryStore, StateStore};
use mastery_core::tracker::Tracker;
use mastery_core::types::{ChecklistKey, ItemKind};
use ratatui::{backend::TestBackend, Terminal};

fn create_test_app() -> App<MemoryStore> {
    let tracker = Tracker::open(catalog::builtin().unwrap(), MemoryStore::new());
    App::new(tracker, false)
}

fn press(app: &mut App<MemoryStore>, code: KeyCode) {
    app.handle_key(code, KeyModifiers::NONE);
}

fn type_text(app: &mut App<MemoryStore>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn render(app: &App<MemoryStore>, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

fn section_index(app: &App<MemoryStore>, id: &str) -> usize {
    app.tracker
        .catalog()
        .sections
        .iter()
        .position(|s| s.id == id)
        .unwrap()
}

#[test]
fn test_dashboard_renders_without_panic() {
    let app = create_test_app();
    let buffer_str = render(&app, 80, 24);

    assert!(buffer_str.contains("Python Mastery OS"));
    assert!(buffer_str.contains("Overall"));
    assert!(buffer_str.contains("Dashboard"));
}

#[test]
fn test_home_shows_scoreboard() {
    let app = create_test_app();
    let buffer_str = render(&app, 140, 40);

    assert!(buffer_str.contains("Progress Scoreboard"));
    assert!(buffer_str.contains("Python Core Mastered"));
    assert!(buffer_str.contains("Rules (No BS)"));
}

#[test]
fn test_toggle_scoreboard_item_from_keyboard() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Focus::Content);

    // row 0 is the scoreboard header, row 1 the first scoreboard item
    press(&mut app, KeyCode::Char(' '));
    assert!(app.tracker.state().checked.is_empty());

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));
    let key = ChecklistKey::scoreboard("sb_py_core");
    assert!(app.tracker.state().is_checked(&key));

    press(&mut app, KeyCode::Enter);
    assert!(!app.tracker.state().is_checked(&key));
}

#[test]
fn test_toggle_persists_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = Tracker::open(catalog::builtin().unwrap(), FileStore::new(dir.path()));
    let mut app = App::new(tracker, false);

    app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
    app.handle_key(KeyCode::Down, KeyModifiers::NONE);
    app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);

    let saved = StateStore::new(FileStore::new(dir.path())).load();
    assert_eq!(saved.checked.get("scoreboard::sb_py_core"), Some(&true));
}

#[test]
fn test_sidebar_selects_sections() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.current_section().unwrap().id, "core");

    let buffer_str = render(&app, 140, 40);
    assert!(buffer_str.contains("Core Syntax + Thinking"));
    assert!(buffer_str.contains("Write clean Python without hesitation"));
    assert!(buffer_str.contains("Section progress 0%"));
}

#[test]
fn test_show_only_incomplete_hides_finished_module() {
    let mut app = create_test_app();
    app.select_section(section_index(&app, "core"));
    let module = app.tracker.catalog().module("py_basics").unwrap().clone();
    for kind in ItemKind::ALL {
        for item in module.items(kind) {
            app.tracker
                .toggle(ChecklistKey::item(&module.id, kind, &item.id));
        }
    }

    let header = ChecklistRow::Module("py_basics".to_string());
    assert!(app.checklist_rows().contains(&header));

    press(&mut app, KeyCode::Char('i'));
    assert!(app.tracker.state().ui.show_only_incomplete);
    assert!(!app.checklist_rows().contains(&header));

    let buffer_str = render(&app, 140, 40);
    assert!(buffer_str.contains("incomplete only"));
    assert!(!buffer_str.contains("Core Syntax + Thinking"));
}

#[test]
fn test_note_editing() {
    let mut app = create_test_app();
    app.select_section(section_index(&app, "data"));
    app.focus = Focus::Content;
    app.cursor = 1; // numpy::learn::n1

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::Editing);
    assert_eq!(
        app.edit.as_ref().map(|e| e.target.clone()),
        Some(EditTarget::Note("numpy".to_string()))
    );

    type_text(&mut app, "broadcast!");
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Main);
    assert_eq!(app.tracker.state().note("numpy"), "broadcast");

    let buffer_str = render(&app, 140, 40);
    assert!(buffer_str.contains("Notes: NumPy Mastery"));
    assert!(buffer_str.contains("broadcast"));
}

#[test]
fn test_planner_generate_and_copy() {
    let mut app = create_test_app();
    app.select_section(section_index(&app, "weekly"));

    press(&mut app, KeyCode::Char('+'));
    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.tracker.state().weekly_planner.week_number, 3);

    press(&mut app, KeyCode::Char('g'));
    let plan = &app.tracker.state().weekly_planner;
    assert_eq!(plan.focus, "Machine Learning");
    assert_eq!(plan.repo_name, "python-week-3-machine-learning");

    press(&mut app, KeyCode::Char('y'));
    let copied = app.pending_copy.clone().unwrap();
    assert!(copied.starts_with("## Week 3"));
    assert!(copied.contains("**Focus:** Machine Learning"));

    press(&mut app, KeyCode::Char('e'));
    let buffer_str = render(&app, 160, 45);
    assert!(buffer_str.contains("Weekly Planner"));
    assert!(buffer_str.contains("Export (Markdown)"));
    assert!(buffer_str.contains("python-week-3-machine-learning"));
}

#[test]
fn test_planner_week_never_below_one() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('-'));
    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.tracker.state().weekly_planner.week_number, 1);
}

#[test]
fn test_planner_inline_edit() {
    let mut app = create_test_app();
    app.select_section(section_index(&app, "weekly"));
    app.focus = Focus::Content;

    // Week row
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.edit.as_ref().map(|e| e.target.clone()),
        Some(EditTarget::Planner(PlannerRow::Week))
    );
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "12");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tracker.state().weekly_planner.week_number, 12);

    // Non-numeric week is refused
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "x");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tracker.state().weekly_planner.week_number, 12);
    assert!(app.last_action.contains("Not a week number"));

    // Focus row
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Async Python");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tracker.state().weekly_planner.focus, "Async Python");
}

#[test]
fn test_resources_link_override() {
    let mut app = create_test_app();
    app.select_section(section_index(&app, "resources"));
    app.focus = Focus::Content;

    let index = app
        .tracker
        .catalog()
        .links
        .iter()
        .position(|l| l.id == "link_uv")
        .unwrap();
    app.cursor = index;

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.edit.as_ref().unwrap().buffer, "[PLACEHOLDER]");
    for _ in 0.."[PLACEHOLDER]".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "https://docs.astral.sh/uv/");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.tracker.state().custom_links.get("link_uv").map(String::as_str),
        Some("https://docs.astral.sh/uv/")
    );

    let buffer_str = render(&app, 160, 45);
    assert!(buffer_str.contains("https://docs.astral.sh/uv/"));
    assert!(buffer_str.contains("(custom)"));
    assert!(buffer_str.contains("Ready to open"));
}

#[test]
fn test_reset_requires_confirmation() {
    let mut app = create_test_app();
    app.tracker.toggle(ChecklistKey::scoreboard("sb_ml"));

    press(&mut app, KeyCode::Char('R'));
    assert_eq!(app.screen, Screen::ConfirmReset);
    let buffer_str = render(&app, 100, 30);
    assert!(buffer_str.contains("Reset Progress"));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::Main);
    assert!(!app.tracker.state().checked.is_empty());

    press(&mut app, KeyCode::Char('R'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.screen, Screen::Main);
    assert!(app.tracker.state().checked.is_empty());
}

#[test]
fn test_help_overlay() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.screen, Screen::Help);

    let buffer_str = render(&app, 100, 30);
    assert!(buffer_str.contains("Help - Keybindings"));
    assert!(buffer_str.contains("Auto-generate weekly plan"));

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.screen, Screen::Main);
    assert!(!app.should_quit);
}

#[test]
fn test_compact_sidebar_and_high_contrast() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('c'));
    assert!(app.tracker.state().ui.compact_sidebar);

    press(&mut app, KeyCode::Char('t'));
    assert!(app.high_contrast);

    // still renders in both modes
    let buffer_str = render(&app, 80, 24);
    assert!(buffer_str.contains("Python Mastery OS"));
}

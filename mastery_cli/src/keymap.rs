/// Centralized keybindings and help text for the mastery TUI
use crossterm::event::{KeyCode, KeyModifiers};

pub struct KeyMap;

impl KeyMap {
    pub fn help_text() -> Vec<(&'static str, &'static str)> {
        vec![
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("Tab", "Switch sidebar / content"),
            ("Space/Enter", "Toggle item, or edit field"),
            ("n", "Edit note for module"),
            ("g", "Auto-generate weekly plan"),
            ("+/-", "Next / previous week"),
            ("e", "Show/hide plan export"),
            ("y", "Copy plan export"),
            ("c", "Compact sidebar"),
            ("i", "Show only incomplete"),
            ("t", "Toggle high-contrast"),
            ("R", "Reset all progress"),
            ("?", "Show help"),
            ("q/Esc", "Quit/Close"),
        ]
    }

    pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('q') | KeyCode::Esc)
            || (matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL))
    }

    pub fn is_help(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('?'))
    }

    pub fn is_down(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('j') | KeyCode::Down)
    }

    pub fn is_up(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('k') | KeyCode::Up)
    }

    pub fn is_switch_focus(code: KeyCode) -> bool {
        matches!(code, KeyCode::Tab | KeyCode::BackTab)
    }

    /// Enter or Space
    pub fn is_activate(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char(' '))
    }

    pub fn is_note(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('n'))
    }

    pub fn is_generate(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('g'))
    }

    pub fn is_next_week(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('+') | KeyCode::Char('='))
    }

    pub fn is_prev_week(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('-'))
    }

    pub fn is_toggle_export(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('e'))
    }

    pub fn is_copy(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('y'))
    }

    pub fn is_toggle_compact(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('c'))
    }

    pub fn is_toggle_incomplete(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('i'))
    }

    pub fn is_toggle_theme(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('t'))
    }

    pub fn is_reset(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('R'))
    }

    /// Check if key is confirm (Enter/y)
    pub fn is_confirm(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char('y'))
    }

    pub fn is_cancel(code: KeyCode) -> bool {
        matches!(code, KeyCode::Esc | KeyCode::Char('n'))
    }
}

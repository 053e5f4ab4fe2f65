use mastery_core::catalog::{self, Catalog};
use mastery_core::planner::{self, PlannerField};
use mastery_core::progress;
use mastery_core::store::{FileStore, StateStore, STORAGE_KEY};
use mastery_core::tracker::{Event, Tracker};
use mastery_core::types::{AppState, ChecklistKey, ItemKind, Panel};
use std::fs;

fn builtin() -> Catalog {
    let _ = env_logger::builder().is_test(true).try_init();
    catalog::builtin().expect("built-in curriculum must parse")
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let key = ChecklistKey::item("numpy", ItemKind::Learn, "n1");

    {
        let mut tracker = Tracker::open(builtin(), FileStore::new(dir.path()));
        tracker.toggle(key.clone());
        tracker.set_note("numpy", "vectorize everything");
        tracker.dispatch(Event::SetWeekNumber(2));
        tracker.dispatch(Event::GeneratePlan);
        tracker.dispatch(Event::SetCompactSidebar(true));
    }

    let tracker = Tracker::open(builtin(), FileStore::new(dir.path()));
    let state = tracker.state();
    assert!(state.is_checked(&key));
    assert_eq!(state.note("numpy"), "vectorize everything");
    assert_eq!(state.weekly_planner.week_number, 2);
    assert_eq!(state.weekly_planner.focus, "NumPy/Pandas");
    assert_eq!(state.weekly_planner.repo_name, "python-week-2-numpy-pandas");
    assert!(state.ui.compact_sidebar);
}

#[test]
fn test_blob_uses_documented_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = Tracker::open(builtin(), FileStore::new(dir.path()));
    tracker.toggle(ChecklistKey::scoreboard("sb_ml"));
    tracker.set_planner_field(PlannerField::BuildArtifact, "CLI tool");

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", STORAGE_KEY))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["checked"]["scoreboard::sb_ml"], true);
    assert_eq!(value["weeklyPlanner"]["buildArtifact"], "CLI tool");
    assert_eq!(value["weeklyPlanner"]["weekNumber"], 1);
    assert_eq!(value["ui"]["showOnlyIncomplete"], false);
    assert!(value["customNotes"].is_object());
    assert!(value["customLinks"].is_object());
}

#[test]
fn test_corrupt_file_starts_fresh_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{}.json", STORAGE_KEY));
    fs::write(&path, "{ half a blob").unwrap();

    let mut tracker = Tracker::open(builtin(), FileStore::new(dir.path()));
    assert_eq!(tracker.state(), &AppState::default());

    tracker.toggle(ChecklistKey::item("rules", ItemKind::Learn, "r1"));
    let reloaded = StateStore::new(FileStore::new(dir.path())).load();
    assert_eq!(reloaded.checked.len(), 1);
}

#[test]
fn test_builtin_shape() {
    let catalog = builtin();

    let home = catalog.section("home").unwrap();
    assert!(home.show_scoreboard);
    assert_eq!(catalog.section("weekly").unwrap().panel, Some(Panel::Planner));
    assert_eq!(catalog.section("resources").unwrap().panel, Some(Panel::Resources));

    assert_eq!(catalog.scoreboard.len(), 8);
    assert!(catalog
        .links
        .iter()
        .any(|l| l.url.starts_with("[PLACEHOLDER]")));
}

#[test]
fn test_every_builtin_key_resolves() {
    let catalog = builtin();
    for key in progress::compute_completion_keys(&catalog) {
        assert!(catalog.resolve(&key).is_some(), "unresolved key {}", key);
        let reparsed: ChecklistKey = key.to_string().parse().unwrap();
        assert_eq!(reparsed, key);
    }
}

#[test]
fn test_completing_a_section_leaves_others_untouched() {
    let catalog = builtin();
    let mut state = AppState::default();
    for key in progress::section_keys(&catalog, "core") {
        state.checked.insert(key.to_string(), true);
    }

    assert_eq!(progress::section_progress(&state, &catalog, "core").percent, 100);
    for section in &catalog.sections {
        if section.id != "core" {
            assert_eq!(
                progress::section_progress(&state, &catalog, &section.id).done,
                0,
                "section {} picked up core keys",
                section.id
            );
        }
    }
    assert_eq!(progress::scoreboard_progress(&state, &catalog).done, 0);

    let overall = progress::overall_progress(&state, &catalog);
    assert_eq!(overall.done, progress::section_keys(&catalog, "core").len());
    assert!(overall.percent > 0 && overall.percent < 100);
}

#[test]
fn test_full_cycle_of_presets() {
    let mut seen = Vec::new();
    for week in 1..=5 {
        seen.push(planner::suggest_plan(week).focus);
    }
    assert_eq!(
        seen,
        vec![
            "Python Core",
            "NumPy/Pandas",
            "Machine Learning",
            "Deep Learning (PyTorch)",
            "MLOps",
        ]
    );
    assert_eq!(planner::suggest_plan(6), planner::suggest_plan(1));
}

//! Application controller.
//!
//! `Tracker` owns the catalog, the one `AppState` value and the state store.
//! Views read through `state()` / `catalog()` and mutate only by dispatching
//! an `Event`; each dispatch replaces the snapshot and saves it before
//! returning.

use crate::catalog::Catalog;
use crate::planner::{self, PlannerField};
use crate::progress::{self, Progress};
use crate::store::{KeyValueStore, LoadOutcome, StateStore};
use crate::types::{AppState, ChecklistKey, Module};

/// Every mutation the view can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Toggle(ChecklistKey),
    SetNote { module_id: String, text: String },
    SetLinkOverride { link_id: String, url: String },
    SetPlannerField { field: PlannerField, value: String },
    SetWeekNumber(u32),
    GeneratePlan,
    SetCompactSidebar(bool),
    SetShowOnlyIncomplete(bool),
    Reset,
}

/// Next snapshot after `event`; `state` itself is left untouched
pub fn reduce(state: &AppState, event: &Event) -> AppState {
    let mut next = state.clone();
    match event {
        Event::Toggle(key) => {
            let checked = state.is_checked(key);
            next.checked.insert(key.to_string(), !checked);
        }
        Event::SetNote { module_id, text } => {
            next.custom_notes.insert(module_id.clone(), text.clone());
        }
        Event::SetLinkOverride { link_id, url } => {
            next.custom_links.insert(link_id.clone(), url.clone());
        }
        Event::SetPlannerField { field, value } => {
            field.set(&mut next.weekly_planner, value.clone());
        }
        Event::SetWeekNumber(week) => {
            next.weekly_planner.week_number = (*week).max(1);
        }
        Event::GeneratePlan => {
            let suggestion = planner::suggest_plan(state.weekly_planner.week_number);
            next.weekly_planner = planner::apply_suggestion(&state.weekly_planner, &suggestion);
        }
        Event::SetCompactSidebar(on) => next.ui.compact_sidebar = *on,
        Event::SetShowOnlyIncomplete(on) => next.ui.show_only_incomplete = *on,
        Event::Reset => next = AppState::default(),
    }
    next
}

pub struct Tracker<S: KeyValueStore> {
    catalog: Catalog,
    state: AppState,
    store: StateStore<S>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Starts from defaults, then adopts whatever the store holds
    pub fn open(catalog: Catalog, backend: S) -> Self {
        let store = StateStore::new(backend);
        let state = store.load();
        Self {
            catalog,
            state,
            store,
        }
    }

    /// Like `open`, also reporting whether saved state was found
    pub fn open_with_outcome(catalog: Catalog, backend: S) -> (Self, LoadOutcome) {
        let store = StateStore::new(backend);
        let outcome = store.load_outcome();
        let tracker = Self {
            catalog,
            state: outcome.clone().into_state(),
            store,
        };
        (tracker, outcome)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub fn dispatch(&mut self, event: Event) {
        log::debug!("Dispatching {:?}", event);
        self.state = reduce(&self.state, &event);
        self.store.save(&self.state);
    }

    pub fn toggle(&mut self, key: ChecklistKey) {
        self.dispatch(Event::Toggle(key));
    }

    pub fn set_note(&mut self, module_id: &str, text: &str) {
        self.dispatch(Event::SetNote {
            module_id: module_id.to_string(),
            text: text.to_string(),
        });
    }

    pub fn set_link_override(&mut self, link_id: &str, url: &str) {
        self.dispatch(Event::SetLinkOverride {
            link_id: link_id.to_string(),
            url: url.to_string(),
        });
    }

    pub fn set_planner_field(&mut self, field: PlannerField, value: &str) {
        self.dispatch(Event::SetPlannerField {
            field,
            value: value.to_string(),
        });
    }

    pub fn reset(&mut self) {
        self.dispatch(Event::Reset);
    }

    pub fn export_plan(&self) -> String {
        planner::render_export(&self.state.weekly_planner)
    }

    pub fn overall_progress(&self) -> Progress {
        progress::overall_progress(&self.state, &self.catalog)
    }

    pub fn section_progress(&self, section_id: &str) -> Progress {
        progress::section_progress(&self.state, &self.catalog, section_id)
    }

    pub fn module_progress(&self, module: &Module) -> Progress {
        progress::module_progress(&self.state, module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::from_yaml_str;
    use crate::store::{MemoryStore, StoreError, STORAGE_KEY};
    use crate::types::ItemKind;

    /// Counts writes and can be told to reject them
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
        reject: bool,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writes += 1;
            if self.reject {
                return Err(StoreError::Rejected(key.to_string()));
            }
            self.inner.set(key, value)
        }
    }

    fn catalog() -> Catalog {
        from_yaml_str(
            r#"
sections:
  - id: s
    title: S
    description: only section
    modules:
      - id: m
        title: M
        timeEstimate: "1 week"
        learn: [{ id: a, text: A }, { id: b, text: B }]
        build: [{ id: c, text: C }]
links:
  - { id: l, label: L, url: "[PLACEHOLDER]", status: placeholder }
"#,
        )
        .unwrap()
    }

    fn key(item: &str) -> ChecklistKey {
        ChecklistKey::item("m", ItemKind::Learn, item)
    }

    #[test]
    fn test_reduce_is_pure() {
        let state = AppState::default();
        let next = reduce(&state, &Event::Toggle(key("a")));
        assert!(next.is_checked(&key("a")));
        assert!(!state.is_checked(&key("a")));
    }

    #[test]
    fn test_double_toggle_restores_and_saves_twice() {
        let mut tracker = Tracker::open(catalog(), CountingStore::default());
        let before = tracker.state().is_checked(&key("a"));

        tracker.toggle(key("a"));
        assert_ne!(tracker.state().is_checked(&key("a")), before);
        tracker.toggle(key("a"));

        assert_eq!(tracker.state().is_checked(&key("a")), before);
        assert_eq!(tracker.store().backend().writes, 2);
    }

    #[test]
    fn test_every_event_saves_once() {
        let mut tracker = Tracker::open(catalog(), CountingStore::default());
        let events = vec![
            Event::Toggle(key("b")),
            Event::SetNote {
                module_id: "m".into(),
                text: "note".into(),
            },
            Event::SetLinkOverride {
                link_id: "l".into(),
                url: "https://example.org".into(),
            },
            Event::SetPlannerField {
                field: PlannerField::Focus,
                value: "Focus".into(),
            },
            Event::SetWeekNumber(3),
            Event::GeneratePlan,
            Event::SetCompactSidebar(true),
            Event::SetShowOnlyIncomplete(true),
            Event::Reset,
        ];
        let count = events.len();
        for event in events {
            tracker.dispatch(event);
        }
        assert_eq!(tracker.store().backend().writes, count);
    }

    #[test]
    fn test_saved_blob_reflects_latest_snapshot() {
        let mut tracker = Tracker::open(catalog(), MemoryStore::new());
        tracker.toggle(key("a"));
        tracker.set_note("m", "first pass done");

        let reopened = Tracker::open(catalog(), tracker.store().backend().clone());
        assert_eq!(reopened.state(), tracker.state());
        assert_eq!(reopened.state().note("m"), "first pass done");
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let backend = CountingStore {
            reject: true,
            ..Default::default()
        };
        let mut tracker = Tracker::open(catalog(), backend);

        tracker.toggle(key("a"));
        tracker.toggle(key("b"));

        assert!(tracker.state().is_checked(&key("a")));
        assert!(tracker.state().is_checked(&key("b")));
        assert_eq!(tracker.module_progress(&catalog().sections[0].modules[0]).percent, 67);
        assert_eq!(tracker.store().backend().writes, 2);
    }

    #[test]
    fn test_week_number_clamped() {
        let mut tracker = Tracker::open(catalog(), MemoryStore::new());
        tracker.dispatch(Event::SetWeekNumber(0));
        assert_eq!(tracker.state().weekly_planner.week_number, 1);
    }

    #[test]
    fn test_generate_plan_uses_current_week() {
        let mut tracker = Tracker::open(catalog(), MemoryStore::new());
        tracker.dispatch(Event::SetWeekNumber(3));
        tracker.dispatch(Event::GeneratePlan);

        let plan = &tracker.state().weekly_planner;
        assert_eq!(plan.week_number, 3);
        assert_eq!(plan.focus, "Machine Learning");
        assert_eq!(plan.repo_name, "python-week-3-machine-learning");
        assert!(tracker.export_plan().contains("## Week 3"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut tracker = Tracker::open(catalog(), MemoryStore::new());
        tracker.toggle(key("a"));
        tracker.set_link_override("l", "https://example.org");
        tracker.dispatch(Event::SetShowOnlyIncomplete(true));

        tracker.reset();
        assert_eq!(tracker.state(), &AppState::default());

        let reopened = Tracker::open(catalog(), tracker.store().backend().clone());
        assert_eq!(reopened.state(), &AppState::default());
    }

    #[test]
    fn test_open_with_outcome() {
        let (tracker, outcome) = Tracker::open_with_outcome(catalog(), MemoryStore::new());
        assert!(outcome.is_defaulted());
        assert_eq!(tracker.state(), &AppState::default());

        let blob = r#"{"checked": {"m::learn::a": true}}"#;
        let (tracker, outcome) =
            Tracker::open_with_outcome(catalog(), MemoryStore::with_entry(STORAGE_KEY, blob));
        assert!(!outcome.is_defaulted());
        assert_eq!(tracker.section_progress("s").done, 1);
        assert_eq!(tracker.overall_progress().total, 3);
    }
}

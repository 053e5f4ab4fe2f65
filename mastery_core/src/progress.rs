//! Progress Aggregation Module
//!
//! Pure derivations of completion percentages from the catalog and the
//! current `AppState`. Nothing here is cached or persisted; every query
//! recomputes from `checked`, so results cannot drift from it.
//!
//! Formula: percent = round_half_up(done / total × 100), 0 when total = 0

use crate::catalog::Catalog;
use crate::types::{AppState, ChecklistKey, ItemKind, Module};
use serde::{Deserialize, Serialize};

/// Completion counts over one set of checklist keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn new(done: usize, total: usize) -> Self {
        Self {
            done,
            total,
            percent: percentage(done, total),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done >= self.total
    }
}

/// Integer percentage in [0, 100], rounding halves up.
///
/// `percentage(1, 8)` is 13 (12.5 rounds up). `done` above `total` is
/// treated as `total`.
pub fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total) as u128;
    let total = total as u128;
    // floor(done * 100 / total + 1/2) without floating point
    ((done * 200 + total) / (total * 2)) as u8
}

/// Keys of one module: learn, then build, then done, in declaration order
pub fn module_keys(module: &Module) -> Vec<ChecklistKey> {
    ItemKind::ALL
        .iter()
        .flat_map(|&kind| {
            module
                .items(kind)
                .iter()
                .map(move |item| ChecklistKey::item(&module.id, kind, &item.id))
        })
        .collect()
}

/// Every module key of every section, followed by every scoreboard key
pub fn compute_completion_keys(catalog: &Catalog) -> Vec<ChecklistKey> {
    let mut keys: Vec<ChecklistKey> = catalog.modules().flat_map(module_keys).collect();
    keys.extend(scoreboard_keys(catalog));
    keys
}

/// Module keys of a single section; empty for an unknown section
pub fn section_keys(catalog: &Catalog, section_id: &str) -> Vec<ChecklistKey> {
    catalog
        .section(section_id)
        .map(|section| section.modules.iter().flat_map(module_keys).collect())
        .unwrap_or_default()
}

pub fn scoreboard_keys(catalog: &Catalog) -> Vec<ChecklistKey> {
    catalog
        .scoreboard
        .iter()
        .map(|sb| ChecklistKey::scoreboard(&sb.id))
        .collect()
}

pub fn count_done(state: &AppState, keys: &[ChecklistKey]) -> usize {
    keys.iter().filter(|key| state.is_checked(key)).count()
}

pub fn progress_of(state: &AppState, keys: &[ChecklistKey]) -> Progress {
    Progress::new(count_done(state, keys), keys.len())
}

pub fn module_progress(state: &AppState, module: &Module) -> Progress {
    progress_of(state, &module_keys(module))
}

pub fn section_progress(state: &AppState, catalog: &Catalog, section_id: &str) -> Progress {
    progress_of(state, &section_keys(catalog, section_id))
}

pub fn scoreboard_progress(state: &AppState, catalog: &Catalog) -> Progress {
    progress_of(state, &scoreboard_keys(catalog))
}

pub fn overall_progress(state: &AppState, catalog: &Catalog) -> Progress {
    progress_of(state, &compute_completion_keys(catalog))
}

/// True while any of the module's keys is unchecked
pub fn module_has_incomplete(state: &AppState, module: &Module) -> bool {
    module_keys(module).iter().any(|key| !state.is_checked(key))
}

/// Per-section breakdown used by status reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub id: String,
    pub title: String,
    pub progress: Progress,
    pub modules: Vec<ModuleReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    pub id: String,
    pub title: String,
    pub progress: Progress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub overall: Progress,
    pub scoreboard: Progress,
    pub sections: Vec<SectionReport>,
}

pub fn build_report(state: &AppState, catalog: &Catalog) -> ProgressReport {
    let sections = catalog
        .sections
        .iter()
        .map(|section| SectionReport {
            id: section.id.clone(),
            title: section.title.clone(),
            progress: section_progress(state, catalog, &section.id),
            modules: section
                .modules
                .iter()
                .map(|module| ModuleReport {
                    id: module.id.clone(),
                    title: module.title.clone(),
                    progress: module_progress(state, module),
                })
                .collect(),
        })
        .collect();

    ProgressReport {
        overall: overall_progress(state, catalog),
        scoreboard: scoreboard_progress(state, catalog),
        sections,
    }
}

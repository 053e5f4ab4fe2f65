// Core logic for the Python Mastery tracker: curriculum catalog, persisted
// progress state, progress aggregation and the weekly planner.

// Data model
pub mod types;
pub mod catalog;

// Persistence
pub mod store;

// Derived views and plan generation
pub mod progress;
pub mod planner;

// Controller
pub mod tracker;

pub use catalog::{Catalog, CatalogError};
pub use store::{FileStore, KeyValueStore, MemoryStore, StateStore, StoreError, STORAGE_KEY};
pub use tracker::{Event, Tracker};
pub use types::{AppState, ChecklistKey, ItemKind, WeeklyPlan};

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

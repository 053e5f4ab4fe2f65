/// Screen module exports
pub mod dashboard;
pub mod planner;
pub mod resources;
pub mod sidebar;

pub use dashboard::{checklist_rows, ChecklistRow, ChecklistScreen};
pub use planner::{PlannerRow, PlannerScreen};
pub use resources::ResourcesScreen;
pub use sidebar::Sidebar;

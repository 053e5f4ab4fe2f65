use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================
// CATALOG SCHEMA (static, read-only)
// ============================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub time_estimate: String,
    #[serde(default)]
    pub learn: Vec<ChecklistItem>,
    #[serde(default)]
    pub build: Vec<ChecklistItem>,
    #[serde(default)]
    pub done: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Module {
    /// Items of one checklist kind, in declaration order
    pub fn items(&self, kind: ItemKind) -> &[ChecklistItem] {
        match kind {
            ItemKind::Learn => &self.learn,
            ItemKind::Build => &self.build,
            ItemKind::Done => &self.done,
        }
    }
}

/// Dedicated panel a section shows in place of its module cards
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Planner,
    Resources,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<Panel>,
    #[serde(default)]
    pub show_scoreboard: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreboardItem {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Official,
    Placeholder,
}

impl LinkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Official => "Official",
            LinkStatus::Placeholder => "Placeholder",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkItem {
    pub id: String,
    pub label: String,
    pub url: String,
    pub status: LinkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================
// CHECKLIST KEYS
// ============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Learn,
    Build,
    Done,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Learn, ItemKind::Build, ItemKind::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Learn => "learn",
            ItemKind::Build => "build",
            ItemKind::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Learn => "Learn",
            ItemKind::Build => "Build",
            ItemKind::Done => "Done",
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Malformed checklist key: {0}")]
    Malformed(String),

    #[error("Unknown checklist kind '{kind}' in key {key}")]
    UnknownKind { key: String, kind: String },
}

/// Composite identifier joining a catalog item to its completion flag.
///
/// Renders as `<moduleId>::<kind>::<itemId>` or `scoreboard::<id>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChecklistKey {
    Item {
        module_id: String,
        kind: ItemKind,
        item_id: String,
    },
    Scoreboard {
        id: String,
    },
}

const SCOREBOARD_PREFIX: &str = "scoreboard";
const SEPARATOR: &str = "::";

impl ChecklistKey {
    pub fn item(module_id: &str, kind: ItemKind, item_id: &str) -> Self {
        ChecklistKey::Item {
            module_id: module_id.to_string(),
            kind,
            item_id: item_id.to_string(),
        }
    }

    pub fn scoreboard(id: &str) -> Self {
        ChecklistKey::Scoreboard { id: id.to_string() }
    }

    pub fn module_id(&self) -> Option<&str> {
        match self {
            ChecklistKey::Item { module_id, .. } => Some(module_id.as_str()),
            ChecklistKey::Scoreboard { .. } => None,
        }
    }
}

impl fmt::Display for ChecklistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistKey::Item {
                module_id,
                kind,
                item_id,
            } => write!(f, "{module_id}{SEPARATOR}{}{SEPARATOR}{item_id}", kind.as_str()),
            ChecklistKey::Scoreboard { id } => write!(f, "{SCOREBOARD_PREFIX}{SEPARATOR}{id}"),
        }
    }
}

impl FromStr for ChecklistKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, SEPARATOR).collect();
        match parts.as_slice() {
            [SCOREBOARD_PREFIX, id] if !id.is_empty() => Ok(ChecklistKey::scoreboard(id)),
            [module_id, kind, item_id] if !module_id.is_empty() && !item_id.is_empty() => {
                let kind = match *kind {
                    "learn" => ItemKind::Learn,
                    "build" => ItemKind::Build,
                    "done" => ItemKind::Done,
                    other => {
                        return Err(KeyParseError::UnknownKind {
                            key: s.to_string(),
                            kind: other.to_string(),
                        })
                    }
                };
                Ok(ChecklistKey::item(module_id, kind, item_id))
            }
            _ => Err(KeyParseError::Malformed(s.to_string())),
        }
    }
}

// ============================================================
// APPLICATION STATE (mutable, persisted as one blob)
// ============================================================

/// The single active weekly plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyPlan {
    pub week_number: u32,
    pub focus: String,
    pub learn1: String,
    pub learn2: String,
    pub learn3: String,
    pub build_artifact: String,
    pub repo_name: String,
    pub demo_proof: String,
    pub success_metrics: String,
    pub done1: String,
    pub done2: String,
    pub done3: String,
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self {
            week_number: 1,
            focus: String::new(),
            learn1: String::new(),
            learn2: String::new(),
            learn3: String::new(),
            build_artifact: String::new(),
            repo_name: String::new(),
            demo_proof: String::new(),
            success_metrics: String::new(),
            done1: String::new(),
            done2: String::new(),
            done3: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UiPrefs {
    pub compact_sidebar: bool,
    pub show_only_incomplete: bool,
}

/// Root of all mutable state. Every top-level field defaults on its own so a
/// partially written blob still loads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub checked: BTreeMap<String, bool>,
    pub custom_notes: BTreeMap<String, String>,
    pub custom_links: BTreeMap<String, String>,
    pub weekly_planner: WeeklyPlan,
    pub ui: UiPrefs,
}

impl AppState {
    /// Absent and explicit `false` both mean "not completed"
    pub fn is_checked(&self, key: &ChecklistKey) -> bool {
        self.checked.get(&key.to_string()).copied().unwrap_or(false)
    }

    pub fn note(&self, module_id: &str) -> &str {
        self.custom_notes
            .get(module_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}

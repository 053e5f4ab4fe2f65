//! Curriculum catalog: sections -> modules -> learn/build/done items,
//! plus the scoreboard and resource links.
//!
//! The catalog is plain immutable data. The built-in curriculum is embedded
//! YAML; a user curriculum of the same shape can be loaded from disk.

use crate::types::{AppState, ChecklistKey, LinkItem, Module, ScoreboardItem, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;

const BUILTIN_CURRICULUM: &str = include_str!("../data/curriculum.yaml");

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Reserved id '{0}' cannot be used for a module")]
    ReservedId(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Catalog {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub scoreboard: Vec<ScoreboardItem>,
    #[serde(default)]
    pub links: Vec<LinkItem>,
}

/// Parses and validates the embedded curriculum
pub fn builtin() -> Result<Catalog, CatalogError> {
    from_yaml_str(BUILTIN_CURRICULUM)
}

/// Loads a curriculum from a YAML file
pub fn load_catalog(path: &str) -> Result<Catalog, CatalogError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let catalog: Catalog = serde_yaml::from_reader(reader)?;
    catalog.validate()?;
    log::debug!(
        "Loaded catalog from {}: {} sections, {} modules",
        path,
        catalog.sections.len(),
        catalog.modules().count()
    );
    Ok(catalog)
}

pub fn from_yaml_str(yaml: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_yaml::from_str(yaml)?;
    catalog.validate()?;
    Ok(catalog)
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl Catalog {
    /// Enforces the identity rules checklist keys depend on: section and
    /// module ids are globally unique, item ids are unique within their list.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_unique("section", self.sections.iter().map(|s| s.id.as_str()))?;
        check_unique("module", self.modules().map(|m| m.id.as_str()))?;

        for module in self.modules() {
            if module.id == "scoreboard" {
                return Err(CatalogError::ReservedId(module.id.clone()));
            }
            check_unique("learn item", module.learn.iter().map(|i| i.id.as_str()))?;
            check_unique("build item", module.build.iter().map(|i| i.id.as_str()))?;
            check_unique("done item", module.done.iter().map(|i| i.id.as_str()))?;
        }

        check_unique("scoreboard", self.scoreboard.iter().map(|s| s.id.as_str()))?;
        check_unique("link", self.links.iter().map(|l| l.id.as_str()))?;
        Ok(())
    }

    /// Every module of every section, in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.sections.iter().flat_map(|s| s.modules.iter())
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules().find(|m| m.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&LinkItem> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Label of the catalog item a key names, if it names one
    pub fn resolve(&self, key: &ChecklistKey) -> Option<&str> {
        match key {
            ChecklistKey::Item {
                module_id,
                kind,
                item_id,
            } => self
                .module(module_id)?
                .items(*kind)
                .iter()
                .find(|item| &item.id == item_id)
                .map(|item| item.text.as_str()),
            ChecklistKey::Scoreboard { id } => self
                .scoreboard
                .iter()
                .find(|sb| &sb.id == id)
                .map(|sb| sb.label.as_str()),
        }
    }
}

/// Override URL when one is set, otherwise the catalog default
pub fn effective_url<'a>(link: &'a LinkItem, state: &'a AppState) -> &'a str {
    state
        .custom_links
        .get(&link.id)
        .map(String::as_str)
        .unwrap_or(link.url.as_str())
}

pub fn is_openable(url: &str) -> bool {
    url.starts_with("http")
}

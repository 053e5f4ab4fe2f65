//! Weekly Planner Module
//!
//! Maps a week number onto one of a fixed, ordered list of curated focus
//! presets, folds a suggestion into the active `WeeklyPlan`, and renders the
//! plan as a markdown checklist for export.
//!
//! RULES:
//! - Suggestions are deterministic and periodic in the preset count
//! - Applying a suggestion is pure (returns a new plan)
//! - Export never contains an empty checklist line

use crate::types::WeeklyPlan;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================
// PRESETS
// ============================================================

/// One curated `(focus, topics, artifact, metric)` tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanPreset {
    pub focus: &'static str,
    pub learn: [&'static str; 3],
    pub build_artifact: &'static str,
    pub success_metrics: &'static str,
}

pub const PRESETS: [PlanPreset; 5] = [
    PlanPreset {
        focus: "Python Core",
        learn: ["Comprehensions", "Functions + scope", "Error handling"],
        build_artifact: "CLI tool that converts logs → JSON",
        success_metrics: "Handles 3 log formats + outputs valid JSON",
    },
    PlanPreset {
        focus: "NumPy/Pandas",
        learn: ["Broadcasting", "Groupby", "Missing data"],
        build_artifact: "Data cleaner + EDA notebook",
        success_metrics: "8 plots + final cleaned CSV",
    },
    PlanPreset {
        focus: "Machine Learning",
        learn: ["Train/test split", "Precision/Recall", "Cross-validation"],
        build_artifact: "Sklearn classifier on real dataset",
        success_metrics: "F1 > baseline + confusion matrix",
    },
    PlanPreset {
        focus: "Deep Learning (PyTorch)",
        learn: ["Training loop", "Optimizers", "Checkpoints"],
        build_artifact: "FashionMNIST training + logs",
        success_metrics: ">85% accuracy + saved model",
    },
    PlanPreset {
        focus: "MLOps",
        learn: ["FastAPI", "Model loading", "Request schemas"],
        build_artifact: "Serve /predict endpoint",
        success_metrics: "Latency < 200ms locally",
    },
];

const DEMO_PROOF: &str = "Short demo video + README screenshots";
const DONE_CONDITIONS: [&str; 3] = [
    "Runs end-to-end without errors",
    "README contains install + usage steps",
    "Pushed to GitHub + demo recorded",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSuggestion {
    pub focus: String,
    pub learn: [String; 3],
    pub build_artifact: String,
    pub success_metrics: String,
}

impl From<&PlanPreset> for PlanSuggestion {
    fn from(preset: &PlanPreset) -> Self {
        Self {
            focus: preset.focus.to_string(),
            learn: preset.learn.map(str::to_string),
            build_artifact: preset.build_artifact.to_string(),
            success_metrics: preset.success_metrics.to_string(),
        }
    }
}

impl PlanSuggestion {
    pub fn apply_to(&self, plan: &WeeklyPlan) -> WeeklyPlan {
        apply_suggestion(plan, self)
    }
}

/// Preset for `week_number`, cycling through `PRESETS`.
///
/// Weeks start at 1; 0 is treated as week 1.
pub fn suggest_plan(week_number: u32) -> PlanSuggestion {
    let week = week_number.max(1) as usize;
    PlanSuggestion::from(&PRESETS[(week - 1) % PRESETS.len()])
}

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"));

/// Lowercases and collapses each run of non `[a-z0-9]` characters into one
/// hyphen. Edge hyphens are kept: "Deep Learning (PyTorch)" gives
/// "deep-learning-pytorch-".
pub fn slugify(text: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

pub fn repo_name(week_number: u32, focus: &str) -> String {
    format!("python-week-{}-{}", week_number, slugify(focus))
}

/// New plan with the suggestion's fields and fixed boilerplate filled in.
/// `week_number` is carried over from `plan`.
pub fn apply_suggestion(plan: &WeeklyPlan, suggestion: &PlanSuggestion) -> WeeklyPlan {
    let [learn1, learn2, learn3] = suggestion.learn.clone();
    let [done1, done2, done3] = DONE_CONDITIONS.map(str::to_string);

    WeeklyPlan {
        week_number: plan.week_number,
        focus: suggestion.focus.clone(),
        learn1,
        learn2,
        learn3,
        build_artifact: suggestion.build_artifact.clone(),
        repo_name: repo_name(plan.week_number, &suggestion.focus),
        demo_proof: DEMO_PROOF.to_string(),
        success_metrics: suggestion.success_metrics.clone(),
        done1,
        done2,
        done3,
    }
}

// ============================================================
// EXPORT
// ============================================================

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Markdown checklist for the plan; empty fields become placeholders
pub fn render_export(plan: &WeeklyPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Week {}\n", plan.week_number));
    out.push_str(&format!("**Focus:** {}\n\n", or_placeholder(&plan.focus, "Unset")));

    out.push_str("### Learn (max 3 topics)\n");
    out.push_str(&format!("- [ ] {}\n", or_placeholder(&plan.learn1, "Topic 1")));
    out.push_str(&format!("- [ ] {}\n", or_placeholder(&plan.learn2, "Topic 2")));
    out.push_str(&format!("- [ ] {}\n\n", or_placeholder(&plan.learn3, "Topic 3")));

    out.push_str("### Build (1 artifact)\n");
    out.push_str(&format!(
        "- [ ] Artifact: {}\n",
        or_placeholder(&plan.build_artifact, "Build artifact")
    ));
    out.push_str(&format!(
        "- [ ] Repo: {}\n",
        or_placeholder(&plan.repo_name, "repo-name")
    ));
    out.push_str(&format!(
        "- [ ] Proof: {}\n",
        or_placeholder(&plan.demo_proof, "demo proof")
    ));
    out.push_str(&format!(
        "- [ ] Success metrics: {}\n\n",
        or_placeholder(&plan.success_metrics, "metrics")
    ));

    out.push_str("### Done Definition\n");
    out.push_str(&format!("- [ ] {}\n", or_placeholder(&plan.done1, "Done condition 1")));
    out.push_str(&format!("- [ ] {}\n", or_placeholder(&plan.done2, "Done condition 2")));
    out.push_str(&format!("- [ ] {}\n", or_placeholder(&plan.done3, "Done condition 3")));
    out
}

// ============================================================
// FIELD EDITING
// ============================================================

/// Editable text fields of a `WeeklyPlan`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlannerField {
    Focus,
    Learn1,
    Learn2,
    Learn3,
    BuildArtifact,
    RepoName,
    DemoProof,
    SuccessMetrics,
    Done1,
    Done2,
    Done3,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown planner field '{0}'")]
pub struct PlannerFieldError(pub String);

impl PlannerField {
    pub const ALL: [PlannerField; 11] = [
        PlannerField::Focus,
        PlannerField::Learn1,
        PlannerField::Learn2,
        PlannerField::Learn3,
        PlannerField::BuildArtifact,
        PlannerField::RepoName,
        PlannerField::DemoProof,
        PlannerField::SuccessMetrics,
        PlannerField::Done1,
        PlannerField::Done2,
        PlannerField::Done3,
    ];

    /// Field name as stored in the state blob
    pub fn name(&self) -> &'static str {
        match self {
            PlannerField::Focus => "focus",
            PlannerField::Learn1 => "learn1",
            PlannerField::Learn2 => "learn2",
            PlannerField::Learn3 => "learn3",
            PlannerField::BuildArtifact => "buildArtifact",
            PlannerField::RepoName => "repoName",
            PlannerField::DemoProof => "demoProof",
            PlannerField::SuccessMetrics => "successMetrics",
            PlannerField::Done1 => "done1",
            PlannerField::Done2 => "done2",
            PlannerField::Done3 => "done3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlannerField::Focus => "Focus",
            PlannerField::Learn1 => "Learn 1",
            PlannerField::Learn2 => "Learn 2",
            PlannerField::Learn3 => "Learn 3",
            PlannerField::BuildArtifact => "Build Artifact",
            PlannerField::RepoName => "Repo Name",
            PlannerField::DemoProof => "Proof",
            PlannerField::SuccessMetrics => "Success Metrics",
            PlannerField::Done1 => "Done 1",
            PlannerField::Done2 => "Done 2",
            PlannerField::Done3 => "Done 3",
        }
    }

    pub fn get<'a>(&self, plan: &'a WeeklyPlan) -> &'a str {
        match self {
            PlannerField::Focus => &plan.focus,
            PlannerField::Learn1 => &plan.learn1,
            PlannerField::Learn2 => &plan.learn2,
            PlannerField::Learn3 => &plan.learn3,
            PlannerField::BuildArtifact => &plan.build_artifact,
            PlannerField::RepoName => &plan.repo_name,
            PlannerField::DemoProof => &plan.demo_proof,
            PlannerField::SuccessMetrics => &plan.success_metrics,
            PlannerField::Done1 => &plan.done1,
            PlannerField::Done2 => &plan.done2,
            PlannerField::Done3 => &plan.done3,
        }
    }

    pub fn set(&self, plan: &mut WeeklyPlan, value: String) {
        let slot = match self {
            PlannerField::Focus => &mut plan.focus,
            PlannerField::Learn1 => &mut plan.learn1,
            PlannerField::Learn2 => &mut plan.learn2,
            PlannerField::Learn3 => &mut plan.learn3,
            PlannerField::BuildArtifact => &mut plan.build_artifact,
            PlannerField::RepoName => &mut plan.repo_name,
            PlannerField::DemoProof => &mut plan.demo_proof,
            PlannerField::SuccessMetrics => &mut plan.success_metrics,
            PlannerField::Done1 => &mut plan.done1,
            PlannerField::Done2 => &mut plan.done2,
            PlannerField::Done3 => &mut plan.done3,
        };
        *slot = value;
    }
}

impl fmt::Display for PlannerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlannerField {
    type Err = PlannerFieldError;

    /// Accepts the blob name (`buildArtifact`) and kebab/snake spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        PlannerField::ALL
            .iter()
            .copied()
            .find(|field| field.name().to_lowercase() == normalized)
            .ok_or_else(|| PlannerFieldError(s.to_string()))
    }
}

/// Non-interactive subcommands. Each returns the text to print so the
/// binary stays a thin dispatcher.
use anyhow::{anyhow, bail, Context, Result};
use mastery_core::catalog;
use mastery_core::planner::{self, PlannerField};
use mastery_core::progress::{self, Progress};
use mastery_core::store::KeyValueStore;
use mastery_core::tracker::{Event, Tracker};
use mastery_core::types::ChecklistKey;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn progress_line(label: &str, p: Progress) -> String {
    format!("{:<32} {:>3}% ({}/{})", label, p.percent, p.done, p.total)
}

pub fn status<S: KeyValueStore>(
    tracker: &Tracker<S>,
    section_id: Option<&str>,
    json: bool,
) -> Result<String> {
    let state = tracker.state();
    let catalog = tracker.catalog();
    let mut report = progress::build_report(state, catalog);

    if let Some(id) = section_id {
        if catalog.section(id).is_none() {
            bail!("Unknown section '{}'", id);
        }
        report.sections.retain(|s| s.id == id);
    }

    if json {
        return serde_json::to_string_pretty(&report).context("Failed to encode status report");
    }

    let mut out = String::new();
    writeln!(out, "{}", progress_line("Overall", report.overall))?;
    writeln!(out, "{}", progress_line("Scoreboard", report.scoreboard))?;
    for section in &report.sections {
        writeln!(out)?;
        writeln!(out, "{}", progress_line(&section.title, section.progress))?;
        for module in &section.modules {
            writeln!(out, "  {}", progress_line(&module.title, module.progress))?;
        }
    }
    Ok(out)
}

/// Flips one key. Keys that do not name a catalog item are refused.
pub fn toggle<S: KeyValueStore>(tracker: &mut Tracker<S>, raw_key: &str) -> Result<String> {
    let key: ChecklistKey = raw_key.parse()?;
    let label = tracker
        .catalog()
        .resolve(&key)
        .ok_or_else(|| anyhow!("Key '{}' does not match any checklist item", raw_key))?
        .to_string();

    tracker.toggle(key.clone());
    let mark = if tracker.state().is_checked(&key) {
        "[x]"
    } else {
        "[ ]"
    };
    Ok(format!("{} {}", mark, label))
}

pub fn note<S: KeyValueStore>(tracker: &mut Tracker<S>, module_id: &str, text: &str) -> Result<String> {
    let title = tracker
        .catalog()
        .module(module_id)
        .map(|m| m.title.clone())
        .ok_or_else(|| anyhow!("Unknown module '{}'", module_id))?;
    tracker.set_note(module_id, text);
    Ok(format!("Saved note for {}", title))
}

pub fn link<S: KeyValueStore>(tracker: &mut Tracker<S>, link_id: &str, url: &str) -> Result<String> {
    let label = tracker
        .catalog()
        .link(link_id)
        .map(|l| l.label.clone())
        .ok_or_else(|| anyhow!("Unknown link '{}'", link_id))?;
    tracker.set_link_override(link_id, url);
    Ok(format!("{} -> {}", label, url))
}

pub fn links<S: KeyValueStore>(tracker: &Tracker<S>) -> String {
    let mut out = String::new();
    for link in &tracker.catalog().links {
        let url = catalog::effective_url(link, tracker.state());
        let _ = writeln!(
            out,
            "{:<18} {:<12} {:<34} {}",
            link.id,
            link.status.label(),
            link.label,
            url
        );
        if let Some(note) = &link.note {
            let _ = writeln!(out, "{:<18} {}", "", note);
        }
    }
    out
}

/// Field-by-field dump of the current plan
pub fn plan_show<S: KeyValueStore>(tracker: &Tracker<S>) -> String {
    let plan = &tracker.state().weekly_planner;
    let mut out = format!("{:<16} {}\n", "Week #", plan.week_number);
    for field in PlannerField::ALL {
        let _ = writeln!(out, "{:<16} {}", field.label(), field.get(plan));
    }
    out
}

pub fn plan_generate<S: KeyValueStore>(tracker: &mut Tracker<S>) -> String {
    tracker.dispatch(Event::GeneratePlan);
    plan_show(tracker)
}

pub fn plan_set<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    field: &str,
    value: &str,
) -> Result<String> {
    let field: PlannerField = field.parse()?;
    tracker.set_planner_field(field, value);
    Ok(format!("{} = {}", field.label(), value))
}

pub fn plan_week<S: KeyValueStore>(tracker: &mut Tracker<S>, week: u32) -> String {
    tracker.dispatch(Event::SetWeekNumber(week));
    format!("Week {}", tracker.state().weekly_planner.week_number)
}

pub fn plan_export<S: KeyValueStore>(tracker: &Tracker<S>, output: Option<&Path>) -> Result<String> {
    let text = planner::render_export(&tracker.state().weekly_planner);
    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            Ok(format!("Wrote {}", path.display()))
        }
        None => Ok(text),
    }
}

/// Every completion key, or one section's, with its label and mark
pub fn keys<S: KeyValueStore>(tracker: &Tracker<S>, section_id: Option<&str>) -> Result<String> {
    let catalog = tracker.catalog();
    let keys = match section_id {
        Some(id) => {
            if catalog.section(id).is_none() {
                bail!("Unknown section '{}'", id);
            }
            progress::section_keys(catalog, id)
        }
        None => progress::compute_completion_keys(catalog),
    };

    let mut out = String::new();
    for key in keys {
        let mark = if tracker.state().is_checked(&key) {
            "[x]"
        } else {
            "[ ]"
        };
        let label = catalog.resolve(&key).unwrap_or("?");
        writeln!(out, "{} {:<28} {}", mark, key.to_string(), label)?;
    }
    Ok(out)
}

pub fn reset<S: KeyValueStore>(tracker: &mut Tracker<S>) -> String {
    tracker.reset();
    "Progress reset.".to_string()
}

//! Presentation: text formatters for command results (comfy-table and styled headings).

use crate::orchestrator::{DispatchSummary, SummaryKind};
use crate::plan::{SlotStatus, WeeklyPlan};
use crate::repair::{DayAdjustment, DayMapping, RepairReport};
use crate::week::day_label;
use chrono::Weekday;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// One reel written to disk by `ideas --export-dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReel {
    pub day: Weekday,
    pub path: PathBuf,
    pub calendar_url: Option<String>,
}

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn status_label(status: SlotStatus) -> String {
    match status {
        SlotStatus::Idle => "idle".dimmed().to_string(),
        SlotStatus::Pending => "pending".yellow().to_string(),
        SlotStatus::Ready => "ready".green().to_string(),
        SlotStatus::Failed => "failed".red().to_string(),
    }
}

/// One row per day: status, title and idea (or the failure), plus the script when expanded.
pub fn format_reel_week(plan: &WeeklyPlan, niche: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Reel week: {}", niche.trim()))
    ));
    let status = plan.global_status();
    if status.is_settled() {
        out.push_str(&format!("Status: {}\n\n", status));
    } else {
        out.push_str(&format!("Status: {} (results still arriving)\n\n", status));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Day", "Status", "Title", "Idea", "Script"]);
    for slot in plan.slots() {
        let (title, idea) = match (slot.idea(), slot.error()) {
            (Some(idea), _) => (idea.title.clone(), idea.one_line_idea.clone()),
            (None, Some(error)) => ("-".to_string(), error.to_string()),
            (None, None) => ("-".to_string(), "-".to_string()),
        };
        let script = match (slot.script(), slot.preview().error()) {
            (Some(script), _) => {
                let mut text = script.script.clone();
                if !script.caption.is_empty() {
                    text.push_str(&format!("\n\nCaption: {}", script.caption));
                }
                if !script.tags.is_empty() {
                    text.push_str(&format!("\n{}", script.tags.join(" ")));
                }
                text
            }
            (None, Some(error)) => error.to_string(),
            (None, None) => "-".to_string(),
        };
        table.add_row(vec![
            slot.label().to_string(),
            status_label(slot.status()),
            title,
            idea,
            script,
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_exported_reels(exported: &[ExportedReel]) -> String {
    if exported.is_empty() {
        return "No expanded scripts to export.".to_string();
    }
    let mut out = format!("{}\n", format_section_heading("Exported reels"));
    for reel in exported {
        out.push_str(&format!("  {}: {}\n", day_label(reel.day), reel.path.display()));
        if let Some(url) = &reel.calendar_url {
            out.push_str(&format!("    calendar: {}\n", url));
        }
    }
    out
}

/// Closing line for a dispatch, coloured by how it went.
pub fn format_summary(summary: &DispatchSummary) -> String {
    match summary.message() {
        None => format!(
            "{}",
            format!("All {} days generated.", summary.succeeded).green()
        ),
        Some(message) => match summary.kind() {
            SummaryKind::TotalOverload | SummaryKind::PartialOverload => {
                format!("{}", message.yellow())
            }
            _ => format!("{}", message.red()),
        },
    }
}

/// Human-readable notes on how a weekly post schedule was repaired.
pub fn format_repair_report(report: &RepairReport) -> Option<String> {
    match report {
        RepairReport::StructurallyInvalid { entries } => Some(format!(
            "Schedule discarded: expected 7 days, got {}.",
            entries
        )),
        RepairReport::Repaired {
            mapping,
            adjustments,
        } => {
            let mut notes: Vec<String> = adjustments
                .iter()
                .filter_map(|(day, adjustment)| match adjustment {
                    DayAdjustment::Unchanged => None,
                    DayAdjustment::Truncated { dropped } => {
                        Some(format!("  - {}: dropped {} extra post(s)", day_label(*day), dropped))
                    }
                    DayAdjustment::Padded { added } => Some(format!(
                        "  - {}: added {} placeholder post(s)",
                        day_label(*day),
                        added
                    )),
                })
                .collect();
            if *mapping == DayMapping::ByPosition {
                notes.insert(0, "  - day labels were unusable; assigned by position".to_string());
            }
            if notes.is_empty() {
                None
            } else {
                notes.insert(0, "Schedule adjusted:".to_string());
                Some(notes.join("\n"))
            }
        }
    }
}

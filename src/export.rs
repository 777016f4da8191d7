//! Rendering finished plans for download or hand-off to storage.

use crate::generation::request::ReelScript;
use crate::plan::{SlotState, WeeklyPlan};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};
use reqwest::Url;
use serde::{Deserialize, Serialize};

const EVENT_HOUR: u32 = 10;
const EVENT_DURATION_HOURS: i64 = 1;
const CALENDAR_BASE_URL: &str = "https://www.google.com/calendar/render";

/// Shape handed to the persistence collaborator for one generated day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedReelDay {
    pub day: String,
    pub title: String,
    pub one_line_idea: String,
    pub script: Option<ReelScript>,
}

/// Ready idea slots only, in canonical order.
pub fn saved_reel_days(plan: &WeeklyPlan) -> Vec<SavedReelDay> {
    plan.slots()
        .filter_map(|slot| {
            slot.idea().map(|idea| SavedReelDay {
                day: slot.label().to_string(),
                title: idea.title.clone(),
                one_line_idea: idea.one_line_idea.clone(),
                script: slot.script().cloned(),
            })
        })
        .collect()
}

/// Plain-text week of posts, one section per day.
pub fn render_post_schedule(plan: &WeeklyPlan) -> String {
    let mut out = String::from("Weekly Post Schedule:\n\n");
    for slot in plan.slots() {
        out.push_str(&format!("## {}\n\n", slot.label()));
        if let Some(posts) = slot.posts() {
            for (index, post) in posts.iter().enumerate() {
                out.push_str(&format!("Post {}:\n{}\n\n", index + 1, post));
            }
        } else if let Some(error) = slot.error() {
            out.push_str(&format!("{}\n\n", error));
        } else {
            out.push_str("(not generated)\n\n");
        }
        out.push_str("---\n\n");
    }
    out
}

/// Full text of one reel. `None` until the day has an idea and a cached script.
pub fn render_reel_content(slot: &SlotState) -> Option<String> {
    let idea = slot.idea()?;
    let script = slot.script()?;
    Some(format!(
        "Reel Title: {}\nReel Idea: {}\nDay: {}\n\nScript:\n{}\n\nCaption:\n{}\n\nHashtags:\n{}",
        idea.title,
        idea.one_line_idea,
        slot.label(),
        script.script.trim(),
        script.caption.trim(),
        script.tags.join(" ")
    ))
}

/// `<Title_With_Underscores>_reel_content.txt`
pub fn reel_content_filename(title: &str) -> String {
    let stem = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");
    let stem = if stem.is_empty() { "reel".to_string() } else { stem };
    format!("{}_reel_content.txt", stem)
}

/// Posting slot for a day: 10:00 local on the next date falling on that weekday
/// (today included), one hour long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventWindow {
    /// `None` when 10:00 does not exist on that date in `now`'s time zone.
    pub fn next_for<Tz: TimeZone>(day: Weekday, now: &DateTime<Tz>) -> Option<Self> {
        let today = now.date_naive();
        let ahead = (7 + day.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
        let date = today + Duration::days(i64::from(ahead));
        let local = now
            .timezone()
            .from_local_datetime(&date.and_hms_opt(EVENT_HOUR, 0, 0)?)
            .earliest()?;
        let start = local.with_timezone(&Utc);
        Some(Self {
            start,
            end: start + Duration::hours(EVENT_DURATION_HOURS),
        })
    }

    /// `start/end` in the compact UTC form calendar links expect.
    pub fn dates_param(&self) -> String {
        format!(
            "{}/{}",
            self.start.format("%Y%m%dT%H%M%SZ"),
            self.end.format("%Y%m%dT%H%M%SZ")
        )
    }
}

/// Pre-filled Google Calendar event for a reel with an expanded script.
pub fn calendar_event_url(slot: &SlotState, window: &EventWindow) -> Option<String> {
    let idea = slot.idea()?;
    let script = slot.script()?;
    let details = format!(
        "Reel Idea: {}\n\nScript Preview:\n{}...\n\nCaption Preview:\n{}...\n\nHashtags: {}",
        idea.one_line_idea,
        script.script.chars().take(200).collect::<String>(),
        script.caption.chars().take(150).collect::<String>(),
        script.tags.join(" ")
    );
    let url = Url::parse_with_params(
        CALENDAR_BASE_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", idea.title.as_str()),
            ("dates", window.dates_param().as_str()),
            ("details", details.as_str()),
            ("sf", "true"),
            ("output", "xml"),
        ],
    )
    .ok()?;
    Some(url.to_string())
}

//! Schedule repair for aggregate weekly responses.
//!
//! Normalises a single whole-week response into exactly seven days of exactly
//! `N` items each. Pure and deterministic: no I/O, same input, same output.

use crate::generation::request::{DayPosts, PostsPerDay, WeeklyPostsResponse};
use crate::week::{day_label, parse_day_label, DAYS_IN_WEEK, WEEK};
use chrono::Weekday;
use std::collections::HashSet;
use tracing::{debug, warn};

/// How response entries were assigned to canonical days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMapping {
    /// Every entry carried a distinct recognisable day label.
    ByLabel,
    /// Labels were missing, duplicated or unrecognised; array order was used.
    ByPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAdjustment {
    Unchanged,
    Truncated { dropped: usize },
    Padded { added: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairReport {
    Repaired {
        mapping: DayMapping,
        adjustments: [(Weekday, DayAdjustment); 7],
    },
    StructurallyInvalid {
        entries: usize,
    },
}

impl RepairReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, RepairReport::Repaired { .. })
    }
}

/// Repaired week: one result per canonical day, plus what was done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedSchedule {
    pub days: [(Weekday, Result<Vec<String>, String>); 7],
    pub report: RepairReport,
}

pub fn placeholder_post(index: usize, day: Weekday) -> String {
    format!(
        "Placeholder post {} for {} - please revise.",
        index,
        day_label(day)
    )
}

pub fn structural_failure_message(entries: usize) -> String {
    format!(
        "The generated schedule was structurally invalid (expected {} days, got {}). Please retry the whole request.",
        DAYS_IN_WEEK, entries
    )
}

/// Enforce exactly 7 days and exactly `per_day` items per day.
pub fn repair_schedule(response: WeeklyPostsResponse, per_day: PostsPerDay) -> RepairedSchedule {
    let entries = response.schedule.len();
    if entries != DAYS_IN_WEEK {
        warn!(
            entries,
            "Weekly schedule response does not contain exactly seven days"
        );
        let message = structural_failure_message(entries);
        return RepairedSchedule {
            days: WEEK.map(|day| (day, Err(message.clone()))),
            report: RepairReport::StructurallyInvalid { entries },
        };
    }

    let (mapping, ordered) = order_by_day(response.schedule);
    let target = per_day.get();
    let mut adjustments = WEEK.map(|day| (day, DayAdjustment::Unchanged));
    let mut days = WEEK.map(|day| (day, Ok(Vec::new())));

    for (index, (day, posts)) in ordered.into_iter().enumerate() {
        let (posts, adjustment) = fit_to_count(posts, target, day);
        if adjustment != DayAdjustment::Unchanged {
            debug!(day = day_label(day), ?adjustment, "Adjusted day to requested count");
        }
        adjustments[index] = (day, adjustment);
        days[index] = (day, Ok(posts));
    }

    RepairedSchedule {
        days,
        report: RepairReport::Repaired {
            mapping,
            adjustments,
        },
    }
}

fn fit_to_count(mut posts: Vec<String>, target: usize, day: Weekday) -> (Vec<String>, DayAdjustment) {
    let len = posts.len();
    if len > target {
        posts.truncate(target);
        (posts, DayAdjustment::Truncated { dropped: len - target })
    } else if len < target {
        let added = target - len;
        posts.extend((1..=added).map(|index| placeholder_post(index, day)));
        (posts, DayAdjustment::Padded { added })
    } else {
        (posts, DayAdjustment::Unchanged)
    }
}

/// Pair each of the 7 entries with a canonical day, in canonical order.
fn order_by_day(entries: Vec<DayPosts>) -> (DayMapping, Vec<(Weekday, Vec<String>)>) {
    let parsed: Vec<Option<Weekday>> = entries
        .iter()
        .map(|entry| parse_day_label(&entry.day))
        .collect();
    let distinct: HashSet<Weekday> = parsed.iter().flatten().copied().collect();

    if parsed.iter().all(Option::is_some) && distinct.len() == DAYS_IN_WEEK {
        let mut by_day: Vec<(Weekday, Vec<String>)> = parsed
            .into_iter()
            .flatten()
            .zip(entries)
            .map(|(day, entry)| (day, entry.posts))
            .collect();
        by_day.sort_by_key(|(day, _)| day.num_days_from_monday());
        return (DayMapping::ByLabel, by_day);
    }

    debug!("Day labels unusable, assigning weekly entries by position");
    let by_position = WEEK
        .into_iter()
        .zip(entries)
        .map(|(day, entry)| (day, entry.posts))
        .collect();
    (DayMapping::ByPosition, by_position)
}

//! Aggregate error summary for a dispatch.

use crate::error::is_overload_message;
use crate::week::day_label;
use chrono::Weekday;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotFailure {
    pub day: Weekday,
    pub message: String,
}

impl SlotFailure {
    pub fn is_overloaded(&self) -> bool {
        is_overload_message(&self.message)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SummaryKind {
    /// Every applied result succeeded.
    Clean,
    /// Every failure was an overload signal, and no dispatched day produced anything.
    TotalOverload,
    /// Every failure was an overload signal, some days succeeded.
    PartialOverload,
    /// At least one failure was not an overload signal.
    Failed,
}

/// Outcome of one dispatch once all of its calls settled.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DispatchSummary {
    pub dispatched: usize,
    pub succeeded: usize,
    pub failures: Vec<SlotFailure>,
    /// Results discarded because a newer attempt owned the slot by then.
    pub superseded: usize,
}

impl DispatchSummary {
    pub fn new(dispatched: usize) -> Self {
        Self {
            dispatched,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, day: Weekday, message: String) {
        self.failures.push(SlotFailure { day, message });
        self.failures
            .sort_by_key(|failure| failure.day.num_days_from_monday());
    }

    pub fn record_superseded(&mut self) {
        self.superseded += 1;
    }

    pub fn failed_days(&self) -> Vec<Weekday> {
        self.failures.iter().map(|failure| failure.day).collect()
    }

    pub fn kind(&self) -> SummaryKind {
        if self.failures.is_empty() {
            return SummaryKind::Clean;
        }
        let overloaded = self.failures.iter().filter(|f| f.is_overloaded()).count();
        if overloaded < self.failures.len() {
            SummaryKind::Failed
        } else if self.succeeded == 0 && self.superseded == 0 {
            SummaryKind::TotalOverload
        } else {
            SummaryKind::PartialOverload
        }
    }

    /// User-facing message, `None` when nothing failed.
    pub fn message(&self) -> Option<String> {
        let days = self
            .failures
            .iter()
            .map(|failure| day_label(failure.day))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind() {
            SummaryKind::Clean => None,
            SummaryKind::TotalOverload => Some(format!(
                "The AI service is currently overloaded. Nothing could be generated for {}. Please try again later.",
                days
            )),
            SummaryKind::PartialOverload => Some(format!(
                "The AI service is currently overloaded. Could not generate {}. Please try again later or shuffle the affected days.",
                days
            )),
            SummaryKind::Failed => {
                let overloaded = self.failures.iter().filter(|f| f.is_overloaded()).count();
                let mut message = format!(
                    "{} of {} days could not be generated ({}). Check individual day statuses or try again.",
                    self.failures.len(),
                    self.dispatched,
                    days
                );
                if overloaded > 0 {
                    message.push_str(" Some failures may be due to AI service overload.");
                }
                Some(message)
            }
        }
    }
}

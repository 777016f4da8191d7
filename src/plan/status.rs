//! Plan-wide status derived from the slot statuses.

use crate::plan::slot::SlotStatus;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum GlobalStatus {
    /// Nothing dispatched yet.
    Idle,
    /// At least one slot still waiting on its call.
    InProgress,
    /// Some dispatched slots failed, others succeeded.
    PartialFailure,
    /// Every dispatched slot failed.
    TotalFailure,
    /// Every dispatched slot succeeded.
    Complete,
}

impl GlobalStatus {
    pub fn derive<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = SlotStatus>,
    {
        let (mut pending, mut ready, mut failed) = (0usize, 0usize, 0usize);
        for status in statuses {
            match status {
                SlotStatus::Idle => {}
                SlotStatus::Pending => pending += 1,
                SlotStatus::Ready => ready += 1,
                SlotStatus::Failed => failed += 1,
            }
        }
        match (pending, ready, failed) {
            (p, _, _) if p > 0 => GlobalStatus::InProgress,
            (_, 0, 0) => GlobalStatus::Idle,
            (_, 0, _) => GlobalStatus::TotalFailure,
            (_, _, 0) => GlobalStatus::Complete,
            _ => GlobalStatus::PartialFailure,
        }
    }

    pub fn is_settled(self) -> bool {
        !matches!(self, GlobalStatus::InProgress)
    }
}

impl fmt::Display for GlobalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GlobalStatus::Idle => "idle",
            GlobalStatus::InProgress => "in progress",
            GlobalStatus::PartialFailure => "partial failure",
            GlobalStatus::TotalFailure => "total failure",
            GlobalStatus::Complete => "complete",
        };
        f.write_str(label)
    }
}

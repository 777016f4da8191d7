//! Per-day slot state.

use crate::generation::request::{DayIdea, ReelScript};
use crate::preview::PreviewState;
use crate::week::day_label;
use chrono::Weekday;
use serde::Serialize;

/// Generation status of a slot.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Content a slot holds once its generation succeeded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum SlotPayload {
    Idea(DayIdea),
    Posts(Vec<String>),
}

impl SlotPayload {
    pub fn as_idea(&self) -> Option<&DayIdea> {
        match self {
            SlotPayload::Idea(idea) => Some(idea),
            SlotPayload::Posts(_) => None,
        }
    }

    pub fn as_posts(&self) -> Option<&[String]> {
        match self {
            SlotPayload::Posts(posts) => Some(posts),
            SlotPayload::Idea(_) => None,
        }
    }
}

/// Payload and error live in one enum so they can never coexist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) enum SlotOutcome {
    Idle,
    Pending,
    Ready(SlotPayload),
    Failed(String),
}

/// Identifies one generation attempt on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptTicket {
    pub day: Weekday,
    pub attempt: u64,
}

/// Whether a settling call's result was applied or fenced off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotState {
    day: Weekday,
    attempt: u64,
    outcome: SlotOutcome,
    pub(crate) preview: PreviewState,
    pub(crate) preview_requests: u64,
}

impl SlotState {
    pub(crate) fn new(day: Weekday) -> Self {
        Self {
            day,
            attempt: 0,
            outcome: SlotOutcome::Idle,
            preview: PreviewState::NotRequested,
            preview_requests: 0,
        }
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn label(&self) -> &'static str {
        day_label(self.day)
    }

    /// Attempt counter; bumps on every (re)dispatch.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn status(&self) -> SlotStatus {
        match self.outcome {
            SlotOutcome::Idle => SlotStatus::Idle,
            SlotOutcome::Pending => SlotStatus::Pending,
            SlotOutcome::Ready(_) => SlotStatus::Ready,
            SlotOutcome::Failed(_) => SlotStatus::Failed,
        }
    }

    pub fn payload(&self) -> Option<&SlotPayload> {
        match &self.outcome {
            SlotOutcome::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn idea(&self) -> Option<&DayIdea> {
        self.payload().and_then(SlotPayload::as_idea)
    }

    pub fn posts(&self) -> Option<&[String]> {
        self.payload().and_then(SlotPayload::as_posts)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SlotOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn script(&self) -> Option<&ReelScript> {
        self.preview.cached()
    }

    pub fn ticket(&self) -> AttemptTicket {
        AttemptTicket {
            day: self.day,
            attempt: self.attempt,
        }
    }

    /// Start a new attempt: clears payload, error and any cached preview.
    pub(crate) fn begin(&mut self) -> AttemptTicket {
        self.attempt += 1;
        self.outcome = SlotOutcome::Pending;
        self.preview = PreviewState::NotRequested;
        self.ticket()
    }

    pub(crate) fn settle(
        &mut self,
        ticket: AttemptTicket,
        result: Result<SlotPayload, String>,
    ) -> Settlement {
        if ticket.day != self.day || ticket.attempt != self.attempt {
            return Settlement::Stale;
        }
        self.outcome = match result {
            Ok(payload) => SlotOutcome::Ready(payload),
            Err(message) => SlotOutcome::Failed(message),
        };
        Settlement::Applied
    }
}

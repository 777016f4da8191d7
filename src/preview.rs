//! Preview expansion: lazily generate a slot's full script and cache it.
//!
//! Sub-state per slot: `NotRequested -> Pending -> Cached | Failed`. The
//! sub-state never changes the slot's own status or payload. Re-dispatching the
//! slot resets it to `NotRequested`.

use crate::error::PlannerError;
use crate::generation::client::ScriptClient;
use crate::generation::request::{ReelParams, ReelScript, ScriptRequest};
use crate::plan::{Settlement, SharedPlan, SlotState, SlotStatus};
use crate::week::day_label;
use chrono::Weekday;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    NotRequested,
    Pending {
        request: u64,
    },
    Cached(ReelScript),
    Failed(String),
}

impl PreviewState {
    pub fn cached(&self) -> Option<&ReelScript> {
        match self {
            PreviewState::Cached(script) => Some(script),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PreviewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PreviewState::Pending { .. })
    }
}

/// Fences a script call to both the slot attempt and the preview request it
/// was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    pub day: Weekday,
    pub attempt: u64,
    pub request: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStart {
    Cached(ReelScript),
    Started(PreviewTicket, ScriptRequest),
}

/// What a caller of `expand` gets back once the call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Served from the slot cache, no call made.
    Cached(ReelScript),
    Generated(ReelScript),
    /// The call failed; the message is stored on the slot.
    Failed(String),
    /// The slot changed while the call was in flight; result discarded.
    Superseded,
}

impl PreviewOutcome {
    pub fn script(&self) -> Option<&ReelScript> {
        match self {
            PreviewOutcome::Cached(script) | PreviewOutcome::Generated(script) => Some(script),
            _ => None,
        }
    }
}

/// Check the cache and preconditions, and mark the preview Pending if a call
/// is needed.
pub fn begin_preview(
    slot: &mut SlotState,
    params: &ReelParams,
) -> Result<PreviewStart, PlannerError> {
    if let Some(script) = slot.preview.cached() {
        return Ok(PreviewStart::Cached(script.clone()));
    }
    if slot.status() == SlotStatus::Failed {
        return Err(PlannerError::Precondition(format!(
            "Cannot generate script because the initial idea failed: {}",
            slot.error().unwrap_or("unknown error")
        )));
    }
    let idea = slot.idea().cloned().ok_or_else(|| {
        PlannerError::Precondition(format!(
            "Cannot generate script because there is no idea for {} yet",
            slot.label()
        ))
    })?;
    params.validate()?;

    slot.preview_requests += 1;
    slot.preview = PreviewState::Pending {
        request: slot.preview_requests,
    };
    let ticket = PreviewTicket {
        day: slot.day(),
        attempt: slot.attempt(),
        request: slot.preview_requests,
    };
    let request = ScriptRequest {
        title: idea.title,
        one_line_idea: idea.one_line_idea,
        niche: params.niche.trim().to_string(),
        series_name: params.series(),
        tone: params.tone.resolve(),
    };
    Ok(PreviewStart::Started(ticket, request))
}

pub fn settle_preview(
    slot: &mut SlotState,
    ticket: PreviewTicket,
    result: Result<ReelScript, String>,
) -> Settlement {
    let current = matches!(
        slot.preview,
        PreviewState::Pending { request } if request == ticket.request
    );
    if ticket.day != slot.day() || ticket.attempt != slot.attempt() || !current {
        return Settlement::Stale;
    }
    slot.preview = match result {
        Ok(script) => PreviewState::Cached(script),
        Err(message) => PreviewState::Failed(message),
    };
    Settlement::Applied
}

/// Issues script calls on behalf of an orchestrator.
pub struct PreviewExpander<S: ?Sized> {
    client: Arc<S>,
}

impl<S: ScriptClient + ?Sized> PreviewExpander<S> {
    pub fn new(client: Arc<S>) -> Self {
        Self { client }
    }

    pub async fn expand(
        &self,
        plan: &SharedPlan,
        day: Weekday,
        params: &ReelParams,
    ) -> Result<PreviewOutcome, PlannerError> {
        let start = plan.update(|plan| begin_preview(plan.slot_mut(day), params))?;
        let (ticket, request) = match start {
            PreviewStart::Cached(script) => {
                debug!(day = day_label(day), "Script served from cache");
                return Ok(PreviewOutcome::Cached(script));
            }
            PreviewStart::Started(ticket, request) => (ticket, request),
        };

        info!(
            day = day_label(day),
            attempt = ticket.attempt,
            request = ticket.request,
            "Script generation started"
        );
        let outcome = match self.client.generate_script(request).await {
            Ok(script) => Ok(script),
            Err(err) => {
                warn!(day = day_label(day), error = %err, "Script generation failed");
                Err(format!("Failed to generate script. {}", err.user_message()))
            }
        };

        let settlement = plan.update(|plan| {
            settle_preview(plan.slot_mut(day), ticket, outcome.clone())
        });
        Ok(match (settlement, outcome) {
            (Settlement::Stale, _) => {
                debug!(day = day_label(day), "Discarded superseded script result");
                PreviewOutcome::Superseded
            }
            (Settlement::Applied, Ok(script)) => PreviewOutcome::Generated(script),
            (Settlement::Applied, Err(message)) => PreviewOutcome::Failed(message),
        })
    }
}

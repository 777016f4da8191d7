//! Weekly orchestrator for the day-idea variant: seven independent calls, one
//! per day, each owning only its own slot.

use crate::error::PlannerError;
use crate::generation::client::{DayIdeaClient, ScriptClient};
use crate::generation::request::{DayIdea, DayIdeaRequest, ReelParams};
use crate::orchestrator::summary::DispatchSummary;
use crate::plan::{AttemptTicket, GlobalStatus, Settlement, SharedPlan, SlotPayload, WeeklyPlan};
use crate::preview::{PreviewExpander, PreviewOutcome};
use crate::week::day_label;
use chrono::Weekday;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct WeeklyOrchestrator<I: ?Sized, S: ?Sized> {
    ideas: Arc<I>,
    preview: PreviewExpander<S>,
    plan: SharedPlan,
}

impl<I, S> WeeklyOrchestrator<I, S>
where
    I: DayIdeaClient + ?Sized,
    S: ScriptClient + ?Sized,
{
    pub fn new(ideas: Arc<I>, scripts: Arc<S>) -> Self {
        Self {
            ideas,
            preview: PreviewExpander::new(scripts),
            plan: SharedPlan::new(),
        }
    }

    pub fn snapshot(&self) -> WeeklyPlan {
        self.plan.snapshot()
    }

    pub fn global_status(&self) -> GlobalStatus {
        self.plan.read(WeeklyPlan::global_status)
    }

    /// Receives a full plan snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<WeeklyPlan> {
        self.plan.subscribe()
    }

    /// Generate ideas for the whole week.
    ///
    /// Slots update individually as their calls settle; the returned summary
    /// is computed once all seven have settled.
    pub async fn dispatch_all(&self, params: &ReelParams) -> Result<DispatchSummary, PlannerError> {
        params.validate()?;
        let tickets = self.plan.update(WeeklyPlan::begin_all);
        info!(niche = %params.niche.trim(), "Dispatching weekly idea generation");
        let summary = self.run(&tickets, params).await;
        info!(
            succeeded = summary.succeeded,
            failed = summary.failures.len(),
            superseded = summary.superseded,
            "Weekly idea generation settled"
        );
        Ok(summary)
    }

    /// Regenerate ("shuffle") a single day. Never touches sibling slots.
    pub async fn dispatch_one(
        &self,
        day: Weekday,
        params: &ReelParams,
    ) -> Result<DispatchSummary, PlannerError> {
        params.validate()?;
        let ticket = self.plan.update(|plan| plan.begin(day));
        debug!(day = day_label(day), attempt = ticket.attempt, "Shuffling day");
        Ok(self.run(&[ticket], params).await)
    }

    /// Fetch the full script for a day, from cache when already generated.
    pub async fn expand_preview(
        &self,
        day: Weekday,
        params: &ReelParams,
    ) -> Result<PreviewOutcome, PlannerError> {
        self.preview.expand(&self.plan, day, params).await
    }

    async fn run(&self, tickets: &[AttemptTicket], params: &ReelParams) -> DispatchSummary {
        let mut summary = DispatchSummary::new(tickets.len());
        let mut calls = FuturesUnordered::new();
        for ticket in tickets.iter().copied() {
            let request = DayIdeaRequest {
                niche: params.niche.trim().to_string(),
                day: day_label(ticket.day).to_string(),
                series_name: params.series(),
                tone: params.tone.resolve(),
            };
            calls.push(async move { (ticket, self.ideas.generate_idea(request).await) });
        }

        while let Some((ticket, result)) = calls.next().await {
            self.settle(ticket, result, &mut summary);
        }
        summary
    }

    fn settle(
        &self,
        ticket: AttemptTicket,
        result: Result<DayIdea, PlannerError>,
        summary: &mut DispatchSummary,
    ) {
        let label = day_label(ticket.day);
        let outcome = match result {
            Ok(idea) => Ok(SlotPayload::Idea(idea)),
            Err(err) => {
                warn!(day = label, attempt = ticket.attempt, error = %err, "Idea generation failed");
                Err(format!(
                    "Failed to generate idea for {}. {}",
                    label,
                    err.user_message()
                ))
            }
        };

        let failure = outcome.as_ref().err().cloned();
        match self.plan.update(|plan| plan.settle(ticket, outcome)) {
            Settlement::Stale => {
                debug!(day = label, attempt = ticket.attempt, "Discarded superseded idea result");
                summary.record_superseded();
            }
            Settlement::Applied => match failure {
                Some(message) => summary.record_failure(ticket.day, message),
                None => summary.record_success(),
            },
        }
    }
}

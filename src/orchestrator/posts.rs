//! Weekly orchestrator for the post variant: one aggregate call for the whole
//! week, repaired and assigned to all seven slots in a single update.

use crate::error::PlannerError;
use crate::generation::client::WeeklyPostClient;
use crate::generation::request::{PostParams, WeeklyPostsRequest};
use crate::orchestrator::summary::DispatchSummary;
use crate::plan::{AttemptTicket, GlobalStatus, Settlement, SharedPlan, SlotPayload, WeeklyPlan};
use crate::repair::{repair_schedule, RepairReport};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Result of one weekly post generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDispatch {
    pub summary: DispatchSummary,
    /// Absent when the call itself failed.
    pub report: Option<RepairReport>,
}

pub struct WeeklyPostOrchestrator<P: ?Sized> {
    client: Arc<P>,
    plan: SharedPlan,
}

impl<P: WeeklyPostClient + ?Sized> WeeklyPostOrchestrator<P> {
    pub fn new(client: Arc<P>) -> Self {
        Self {
            client,
            plan: SharedPlan::new(),
        }
    }

    pub fn snapshot(&self) -> WeeklyPlan {
        self.plan.snapshot()
    }

    pub fn global_status(&self) -> GlobalStatus {
        self.plan.read(WeeklyPlan::global_status)
    }

    pub fn subscribe(&self) -> watch::Receiver<WeeklyPlan> {
        self.plan.subscribe()
    }

    pub async fn generate(&self, params: &PostParams) -> Result<PostDispatch, PlannerError> {
        params.validate()?;
        let tickets = self.plan.update(WeeklyPlan::begin_all);
        let request = WeeklyPostsRequest {
            topic: params.topic.trim().to_string(),
            strategy: params.strategy,
            posts_per_day: params.posts_per_day,
            tone: params.tone.resolve(),
        };
        info!(
            topic = %request.topic,
            strategy = %request.strategy,
            per_day = request.posts_per_day.get(),
            "Dispatching weekly post generation"
        );

        let (results, report): ([Result<Vec<String>, String>; 7], Option<RepairReport>) =
            match self.client.generate_week(request).await {
                Ok(response) => {
                    let repaired = repair_schedule(response, params.posts_per_day);
                    if let RepairReport::StructurallyInvalid { entries } = repaired.report {
                        warn!(entries, "Discarded structurally invalid weekly schedule");
                    }
                    let results = repaired.days.map(|(_, result)| result);
                    (results, Some(repaired.report))
                }
                Err(err) => {
                    warn!(error = %err, "Weekly post generation failed");
                    let message = format!("Failed to generate posts. {}", err.user_message());
                    (std::array::from_fn(|_| Err(message.clone())), None)
                }
            };

        let summary = self.assign_week(&tickets, results);
        Ok(PostDispatch { summary, report })
    }

    fn assign_week(
        &self,
        tickets: &[AttemptTicket; 7],
        results: [Result<Vec<String>, String>; 7],
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::new(tickets.len());
        self.plan.update(|plan| {
            for (ticket, result) in tickets.iter().copied().zip(results) {
                let failure = result.as_ref().err().cloned();
                match plan.settle(ticket, result.map(SlotPayload::Posts)) {
                    Settlement::Stale => summary.record_superseded(),
                    Settlement::Applied => match failure {
                        Some(message) => summary.record_failure(ticket.day, message),
                        None => summary.record_success(),
                    },
                }
            }
        });
        summary
    }
}

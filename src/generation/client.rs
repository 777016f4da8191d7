//! Generation client contracts, one per content kind.
//!
//! The orchestrators treat these as opaque async capabilities: a call either
//! resolves with a structured response or fails with a `PlannerError`.
//! Timeouts belong to the implementation, never to the caller.

use crate::error::PlannerError;
use crate::generation::request::{
    DayIdea, DayIdeaRequest, ReelScript, ScriptRequest, WeeklyPostsRequest, WeeklyPostsResponse,
};
use async_trait::async_trait;

/// Produces the title and one-line idea for a single day.
#[async_trait]
pub trait DayIdeaClient: Send + Sync {
    async fn generate_idea(&self, request: DayIdeaRequest) -> Result<DayIdea, PlannerError>;
}

/// Produces the full script for an existing idea.
#[async_trait]
pub trait ScriptClient: Send + Sync {
    async fn generate_script(&self, request: ScriptRequest) -> Result<ReelScript, PlannerError>;
}

/// Produces the whole week of posts in one aggregate call.
#[async_trait]
pub trait WeeklyPostClient: Send + Sync {
    async fn generate_week(
        &self,
        request: WeeklyPostsRequest,
    ) -> Result<WeeklyPostsResponse, PlannerError>;
}

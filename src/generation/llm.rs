//! Generation clients backed by a chat-completion provider.

use crate::error::PlannerError;
use crate::generation::client::{DayIdeaClient, ScriptClient, WeeklyPostClient};
use crate::generation::prompts::{
    render_idea_prompt, render_posts_prompt, render_script_prompt, IDEA_SYSTEM_PROMPT,
    POSTS_SYSTEM_PROMPT, SCRIPT_SYSTEM_PROMPT,
};
use crate::generation::request::{
    DayIdea, DayIdeaRequest, ReelScript, ScriptRequest, WeeklyPostsRequest, WeeklyPostsResponse,
};
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Implements every generation contract over a single provider client.
#[derive(Clone)]
pub struct LlmGenerator {
    provider: Arc<dyn ModelProviderClient>,
    options: CompletionOptions,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn ModelProviderClient>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        system: &str,
        prompt: String,
    ) -> Result<T, PlannerError> {
        let messages = vec![ChatMessage::system(system), ChatMessage::user(prompt)];
        let response = self
            .provider
            .complete(messages, self.options.clone())
            .await?;
        debug!(
            kind,
            provider = self.provider.provider_name(),
            model = %response.model,
            finish_reason = ?response.finish_reason,
            "Completion received"
        );
        parse_json_payload(&response.content).map_err(|e| {
            PlannerError::Generation(format!("Could not read {} from model output: {}", kind, e))
        })
    }
}

/// Extract a JSON document from model output, tolerating Markdown code fences.
pub fn parse_json_payload<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim())
}

#[async_trait]
impl DayIdeaClient for LlmGenerator {
    async fn generate_idea(&self, request: DayIdeaRequest) -> Result<DayIdea, PlannerError> {
        self.ask("idea", IDEA_SYSTEM_PROMPT, render_idea_prompt(&request))
            .await
    }
}

#[async_trait]
impl ScriptClient for LlmGenerator {
    async fn generate_script(&self, request: ScriptRequest) -> Result<ReelScript, PlannerError> {
        self.ask("script", SCRIPT_SYSTEM_PROMPT, render_script_prompt(&request))
            .await
    }
}

#[async_trait]
impl WeeklyPostClient for LlmGenerator {
    async fn generate_week(
        &self,
        request: WeeklyPostsRequest,
    ) -> Result<WeeklyPostsResponse, PlannerError> {
        self.ask("schedule", POSTS_SYSTEM_PROMPT, render_posts_prompt(&request))
            .await
    }
}

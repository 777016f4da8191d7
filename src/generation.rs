//! Generation clients: the request/response contracts the orchestrators consume,
//! prompt rendering, and the provider-backed implementation.

pub mod client;
pub mod llm;
pub mod prompts;
pub mod request;

pub use client::{DayIdeaClient, ScriptClient, WeeklyPostClient};
pub use llm::LlmGenerator;
pub use request::{
    DayIdea, DayIdeaRequest, DayPosts, PostParams, PostStrategy, PostsPerDay, ReelParams,
    ReelScript, ScriptRequest, WeeklyPostsRequest, WeeklyPostsResponse,
};

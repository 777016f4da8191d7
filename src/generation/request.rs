//! Value objects exchanged with generation clients.

use crate::error::PlannerError;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Global parameters for the day-idea variant of a weekly plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReelParams {
    pub niche: String,
    pub series_name: Option<String>,
    pub tone: Tone,
}

impl ReelParams {
    pub fn new(niche: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            series_name: None,
            tone: Tone::None,
        }
    }

    pub fn with_series(mut self, series_name: impl Into<String>) -> Self {
        self.series_name = Some(series_name.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.niche.trim().is_empty() {
            return Err(PlannerError::Validation(
                "A niche is required to generate ideas".to_string(),
            ));
        }
        Ok(())
    }

    /// Series name with blank values treated as absent.
    pub fn series(&self) -> Option<String> {
        self.series_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayIdeaRequest {
    pub niche: String,
    pub day: String,
    pub series_name: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayIdea {
    #[serde(alias = "reelTitle")]
    pub title: String,
    #[serde(alias = "oneLineIdea")]
    pub one_line_idea: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptRequest {
    pub title: String,
    pub one_line_idea: String,
    pub niche: String,
    pub series_name: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReelScript {
    #[serde(alias = "reelScript")]
    pub script: String,
    pub caption: String,
    #[serde(default, alias = "hashtags")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PostStrategy {
    #[serde(rename = "Engagement-focused")]
    Engagement,
    #[serde(rename = "Educational")]
    Educational,
    #[serde(rename = "Promotional")]
    Promotional,
    #[serde(rename = "Brand Building")]
    BrandBuilding,
    #[serde(rename = "Thought Leadership")]
    ThoughtLeadership,
    #[default]
    #[serde(rename = "Mixed / Balanced")]
    Mixed,
}

impl PostStrategy {
    pub const ALL: [PostStrategy; 6] = [
        PostStrategy::Engagement,
        PostStrategy::Educational,
        PostStrategy::Promotional,
        PostStrategy::BrandBuilding,
        PostStrategy::ThoughtLeadership,
        PostStrategy::Mixed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PostStrategy::Engagement => "Engagement-focused",
            PostStrategy::Educational => "Educational",
            PostStrategy::Promotional => "Promotional",
            PostStrategy::BrandBuilding => "Brand Building",
            PostStrategy::ThoughtLeadership => "Thought Leadership",
            PostStrategy::Mixed => "Mixed / Balanced",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            PostStrategy::Engagement => {
                "Posts should start conversations, ask questions, run polls, or encourage replies."
            }
            PostStrategy::Educational => {
                "Posts should provide valuable tips, interesting facts, or concise insights."
            }
            PostStrategy::Promotional => {
                "Posts should highlight products, services, or calls to action."
            }
            PostStrategy::BrandBuilding => {
                "Posts should reflect company values, share behind-the-scenes content, or tell brand stories."
            }
            PostStrategy::ThoughtLeadership => {
                "Posts should offer unique opinions, analyze industry trends, or provide commentary."
            }
            PostStrategy::Mixed => {
                "Posts should mix the approaches above across the week."
            }
        }
    }
}

impl fmt::Display for PostStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PostStrategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PostStrategy::ALL
            .into_iter()
            .find(|strategy| {
                let label = strategy.label().to_lowercase();
                label == wanted || label.split([' ', '-', '/']).next() == Some(wanted.as_str())
            })
            .ok_or_else(|| PlannerError::Validation(format!("Unknown post strategy: {}", s)))
    }
}

/// Items requested per day in the weekly-post variant, always within 1..=5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "usize", into = "usize")]
pub struct PostsPerDay(usize);

impl PostsPerDay {
    pub const MIN: usize = 1;
    pub const MAX: usize = 5;

    pub fn new(count: usize) -> Result<Self, PlannerError> {
        if !(Self::MIN..=Self::MAX).contains(&count) {
            return Err(PlannerError::Validation(format!(
                "Posts per day must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                count
            )));
        }
        Ok(Self(count))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PostsPerDay {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for PostsPerDay {
    type Error = PlannerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostsPerDay> for usize {
    fn from(value: PostsPerDay) -> Self {
        value.0
    }
}

/// Global parameters for the weekly-post variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostParams {
    pub topic: String,
    pub strategy: PostStrategy,
    pub posts_per_day: PostsPerDay,
    pub tone: Tone,
}

impl PostParams {
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.topic.trim().is_empty() {
            return Err(PlannerError::Validation(
                "A topic is required to generate posts".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPostsRequest {
    pub topic: String,
    pub strategy: PostStrategy,
    pub posts_per_day: PostsPerDay,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPosts {
    pub day: String,
    #[serde(default, alias = "tweets")]
    pub posts: Vec<String>,
}

impl DayPosts {
    pub fn new(day: impl Into<String>, posts: Vec<String>) -> Self {
        Self {
            day: day.into(),
            posts,
        }
    }
}

/// Aggregate response: one call covering the whole week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPostsResponse {
    #[serde(default, alias = "weeklySchedule")]
    pub schedule: Vec<DayPosts>,
}

//! Error types for the weekly content planner.

use thiserror::Error;

/// Substrings that identify a backend capacity signal in an error message.
const OVERLOAD_PATTERNS: &[&str] = &[
    "503 service unavailable",
    "model is overloaded",
    "overloaded_error",
    "experiencing high demand",
];

/// User-facing text shown in place of any raw overload error.
pub const OVERLOAD_MESSAGE: &str = "The AI service is currently experiencing high demand and is temporarily unavailable. Please try again in a few moments.";

/// Planner errors
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Service overloaded: {0}")]
    Overloaded(String),

    #[error("Structurally invalid response: {0}")]
    StructurallyInvalid(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    /// Whether this error is a backend capacity signal rather than a hard failure.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, PlannerError::Overloaded(_)) || is_overload_message(&self.to_string())
    }

    /// Message suitable for display next to a failed slot.
    pub fn user_message(&self) -> String {
        if self.is_overloaded() {
            return OVERLOAD_MESSAGE.to_string();
        }
        match self {
            PlannerError::Generation(msg)
            | PlannerError::Validation(msg)
            | PlannerError::Precondition(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Check a free-form message against the known overload patterns.
pub fn is_overload_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    OVERLOAD_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

impl From<config::ConfigError> for PlannerError {
    fn from(err: config::ConfigError) -> Self {
        PlannerError::ConfigError(err.to_string())
    }
}

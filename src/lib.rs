//! reelweek: weekly content generation
//!
//! Plans a week of short-form content with an LLM backend. Seven day slots are
//! generated concurrently, each settling on its own; failures stay isolated to
//! their day and can be regenerated individually.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod logging;
pub mod orchestrator;
pub mod plan;
pub mod preview;
pub mod provider;
pub mod repair;
pub mod tone;
pub mod week;

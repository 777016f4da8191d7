//! Configuration System
//!
//! Layered planner configuration: built-in defaults, the user config file,
//! an explicit `--config` file, then `REELWEEK__SECTION__KEY` environment
//! overrides. Validation runs after every load.

use crate::error::PlannerError;
use crate::generation::request::{PostStrategy, PostsPerDay};
use crate::logging::LoggingConfig;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use crate::provider::{ProviderConfig, ProviderType};

mod merge {
    pub(super) mod merge_policy;
}
mod sources {
    pub(super) mod environment;
    pub(super) mod explicit_file;
    pub(super) mod global_file;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    /// Text-generation backend
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Defaults applied when the command line leaves a parameter out
    #[serde(default)]
    pub defaults: GenerationDefaults,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation parameters used when none are given explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationDefaults {
    #[serde(default)]
    pub posts_per_day: PostsPerDay,

    #[serde(default)]
    pub strategy: PostStrategy,

    /// Preset name or free-text description
    #[serde(default)]
    pub tone: Option<String>,
}

impl GenerationDefaults {
    pub fn tone(&self) -> Tone {
        self.tone.as_deref().map(Tone::parse).unwrap_or_default()
    }
}

impl PlannerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), PlannerError> {
        let mut errors = Vec::new();
        if let Err(e) = self.provider.validate() {
            errors.push(format!("Provider: {}", e));
        }
        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(format!("Logging: invalid format '{}'", self.logging.format));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(format!("Logging: invalid output '{}'", self.logging.output));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}

/// Builds a `PlannerConfig` from every configured source.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load using the user config file from the platform config directory.
    pub fn load(explicit: Option<&Path>) -> Result<PlannerConfig, PlannerError> {
        let global = Self::global_config_path();
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load with an explicit user config location (`None` skips that layer).
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<PlannerConfig, PlannerError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder, global)?;
        if let Some(path) = explicit {
            builder = sources::explicit_file::add_to_builder(builder, path)?;
        }
        builder = sources::environment::add_to_builder(builder);

        let config: PlannerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            provider = ?config.provider.provider_type,
            model = %config.provider.model,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/reelweek/config.toml` on Linux.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}

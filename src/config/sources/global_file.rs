//! User config file source: $XDG_CONFIG_HOME/reelweek/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the user config file, when a home directory can be resolved.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "reelweek")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the user config file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = path else {
        return Ok(builder);
    };
    if path.exists() {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        builder = builder.add_source(File::from(canonical).format(FileFormat::Toml).required(false));
    } else {
        debug!(
            config_path = %path.display(),
            "No user configuration file; using built-in defaults"
        );
    }
    Ok(builder)
}

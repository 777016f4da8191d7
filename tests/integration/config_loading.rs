//! Layered configuration loading from the user config directory.

use reelweek::config::{ConfigLoader, ProviderType};
use reelweek::generation::PostStrategy;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

#[test]
fn test_user_config_file_is_picked_up() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let Some(path) = ConfigLoader::global_config_path() else {
            return;
        };
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"
[provider]
provider_type = "anthropic"
model = "claude-3-5-haiku-latest"
api_key_env = "REELWEEK_TEST_KEY"

[defaults]
posts_per_day = 4
strategy = "Promotional"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Anthropic);
        assert_eq!(config.defaults.posts_per_day.get(), 4);
        assert_eq!(config.defaults.strategy, PostStrategy::Promotional);
    });
}

#[test]
fn test_explicit_file_layers_over_user_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        if let Some(path) = ConfigLoader::global_config_path() {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "[defaults]\nposts_per_day = 2\ntone = \"bold\"\n").unwrap();
        }
        let explicit = test_dir.path().join("override.toml");
        std::fs::write(&explicit, "[defaults]\ntone = \"calm and warm\"\n").unwrap();

        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(
            config.defaults.tone().resolve().as_deref(),
            Some("calm and warm")
        );
    });
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let explicit = test_dir.path().join("broken.toml");
        std::fs::write(&explicit, "[provider\nmodel = ").unwrap();
        let err = ConfigLoader::load(Some(&explicit)).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    });
}

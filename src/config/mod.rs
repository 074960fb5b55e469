mod types;

pub use types::*;

use anyhow::{Context, Result};
use hushcut_enhance::AttenuationLimit;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./hushcut.toml",
        "~/.config/hushcut/config.toml",
        "/etc/hushcut/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(db) = config.model.attenuation_limit_db {
        if AttenuationLimit::new(db).is_err() {
            anyhow::bail!(
                "model.attenuation_limit_db must be between {} and {} dB, got {}",
                AttenuationLimit::MIN_DB,
                AttenuationLimit::MAX_DB,
                db
            );
        }
    }

    if let Some(dir) = &config.model.dir {
        if !dir.is_dir() {
            tracing::warn!("Model directory does not exist: {:?}", dir);
        }
    }

    if let Some(root) = &config.workspace.root {
        if !root.exists() {
            tracing::warn!("Workspace root does not exist: {:?}", root);
        }
    }

    if config.output.audio_codec.trim().is_empty() {
        anyhow::bail!("output.audio_codec cannot be empty");
    }
    if config.output.audio_bitrate.trim().is_empty() {
        anyhow::bail!("output.audio_bitrate cannot be empty");
    }

    Ok(())
}

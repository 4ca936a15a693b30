//! Reading and parsing the TOML file. Validation is left to the caller.

use std::io::ErrorKind;
use std::path::Path;

use chatterbox_common::ConfigError;
use tracing::info;

use crate::schema::ChatterboxConfig;

use super::paths::{create_default_config, default_config_path};

/// Parse the file at `path`. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<ChatterboxConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("invalid TOML in {}: {e}", path.display()))
    })?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse the platform default file, writing the template first if there is
/// none. A fresh template means defaults.
pub fn load_default() -> Result<ChatterboxConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            load_from_path(&path)
        }
        other => other,
    }
}

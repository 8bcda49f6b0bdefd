//! Config file discovery.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `./opsq.toml` (project-local) or an explicitly given path
//! 3. Process environment (`OPSQ_BIND`, `LOKI_MCP_URL`, ...)

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::types::OpsqConfig;

/// Default filename for project-local config.
pub const PROJECT_CONFIG_FILE: &str = "opsq.toml";

/// Load configuration from an explicit path or the project-local default,
/// then apply environment overrides.
///
/// An explicitly given path must exist and parse; the project-local file
/// is optional and silently skipped when absent.
pub fn load_config(path: Option<&Path>) -> Result<OpsqConfig> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => {
            let local = Path::new(PROJECT_CONFIG_FILE);
            if local.exists() {
                load_config_file(local)?
            } else {
                OpsqConfig::default()
            }
        }
    };
    config.apply_env();
    Ok(config)
}

/// Load and parse one TOML config file.
pub fn load_config_file(path: &Path) -> Result<OpsqConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    OpsqConfig::from_toml(&contents)
}

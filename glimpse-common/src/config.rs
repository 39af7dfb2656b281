//! Configuration loading and resolution
//!
//! Config file resolution priority order:
//! 1. Explicit path (command-line argument, highest priority)
//! 2. `GLIMPSE_CONFIG` environment variable
//! 3. `~/.config/glimpse/config.toml`
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default HTTP port for the campus dashboard service
pub const DEFAULT_PORT: u16 = 5730;

/// Default admin secret, matching the seed deployment
///
/// This is a soft UI gate compared by exact string equality: no hashing,
/// no rate limiting, no lockout. It provides no security guarantee and
/// must not be treated as a trust boundary.
pub const DEFAULT_ADMIN_SECRET: &str = "root@123";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimpseConfig {
    pub host: String,
    pub port: u16,
    pub admin_secret: String,
    pub inference: InferenceConfig,
}

/// Vision inference service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// API key for the external vision service; empty disables the adapter
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GlimpseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            inference: InferenceConfig::default(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GlimpseConfig {
    /// Load configuration following the resolution priority order.
    ///
    /// A missing config file falls back to defaults; a present but
    /// malformed file is an error (silently ignoring it would mask typos).
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(cli_path) {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        // Environment overrides for secrets, so they stay out of the file
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.inference.api_key = key;
        }
        if let Ok(secret) = std::env::var("GLIMPSE_ADMIN_SECRET") {
            config.admin_secret = secret;
        }

        Ok(config)
    }

    /// Load and parse a specific TOML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Resolve the config file path, or None when no file exists anywhere
fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("GLIMPSE_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // Priority 3: User config directory
    if let Some(path) = dirs::config_dir().map(|d| d.join("glimpse").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    // Priority 4: Compiled defaults
    None
}

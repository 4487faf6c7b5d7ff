//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chirp/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The signed-in identity also comes from here: chirp deliberately has no
//! ambient "current user" global. The resolved `Option<Session>` is
//! injected into the composer and comment threads; absence means
//! unauthenticated and submission controls are not offered.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::api::Session;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChirpConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// None = unauthenticated; reads work, writes are not offered.
    pub session: Option<Session>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chirp/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chirp").join("config.toml"))
}

/// Load config from `~/.chirp/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChirpConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChirpConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChirpConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChirpConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ChirpConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Chirp Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "http://localhost:3000"   # Feed service root (or CHIRP_BASE_URL)

# Without an identity you can read the feed but not post or comment.
# [identity]
# display_name = "alice"               # Or CHIRP_DISPLAY_NAME
# avatar_url = "https://example.com/alice.png"   # Or CHIRP_AVATAR_URL
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI overrides (None = flag not given).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChirpConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("CHIRP_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Identity: CLI → env → config. A session exists only if a display
    // name was resolved; the avatar falls back to empty.
    let display_name = cli
        .display_name
        .clone()
        .or_else(|| std::env::var("CHIRP_DISPLAY_NAME").ok())
        .or_else(|| config.identity.display_name.clone());
    let avatar_url = cli
        .avatar_url
        .clone()
        .or_else(|| std::env::var("CHIRP_AVATAR_URL").ok())
        .or_else(|| config.identity.avatar_url.clone());

    let session = display_name.map(|display_name| Session {
        display_name,
        avatar_url: avatar_url.unwrap_or_default(),
    });

    ResolvedConfig { base_url, session }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ChirpConfig::default();
        assert!(config.general.base_url.is_none());
        assert!(config.identity.display_name.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ChirpConfig {
            general: GeneralConfig {
                base_url: Some("http://feed.example".to_string()),
            },
            identity: IdentityConfig {
                display_name: Some("alice".to_string()),
                avatar_url: Some("https://img.example/a.png".to_string()),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.base_url, "http://feed.example");
        let session = resolved.session.unwrap();
        assert_eq!(session.display_name, "alice");
        assert_eq!(session.avatar_url, "https://img.example/a.png");
    }

    #[test]
    fn test_resolve_cli_wins_over_config() {
        let config = ChirpConfig {
            general: GeneralConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&config, &cli).base_url, "http://from-cli");
    }

    #[test]
    fn test_no_display_name_means_no_session() {
        let config = ChirpConfig {
            identity: IdentityConfig {
                display_name: None,
                avatar_url: Some("ignored".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        if std::env::var("CHIRP_DISPLAY_NAME").is_err() {
            assert!(resolved.session.is_none());
        }
    }

    #[test]
    fn test_session_without_avatar_falls_back_to_empty() {
        let cli = CliOverrides {
            display_name: Some("bob".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&ChirpConfig::default(), &cli);
        let session = resolved.session.unwrap();
        assert_eq!(session.display_name, "bob");
        if std::env::var("CHIRP_AVATAR_URL").is_err() {
            assert_eq!(session.avatar_url, "");
        }
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[identity]
display_name = "alice"
"#;
        let config: ChirpConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.identity.display_name.as_deref(), Some("alice"));
        assert!(config.general.base_url.is_none());
        assert!(config.identity.avatar_url.is_none());
    }
}

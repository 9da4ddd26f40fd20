//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Organizer behaviour.
    #[serde(default)]
    pub organizer: OrganizerConfig,
    /// Sessions directory.
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,
}

/// Organizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    /// Ignore files and folders that look like samples or extras.
    pub skip_samples: bool,
    /// Verify checksums when a move has to copy across filesystems.
    pub verify_checksum: bool,
    /// Store a copy of every generated plan in the sessions directory.
    pub save_sessions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organizer: OrganizerConfig::default(),
            sessions_dir: default_sessions_dir(),
        }
    }
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            skip_samples: true,
            verify_checksum: true,
            save_sessions: true,
        }
    }
}

fn default_sessions_dir() -> PathBuf {
    dirs_config_path().join("sessions")
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("show_organizer")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {:?}: {}", config_path, e),
            },
            Err(e) => tracing::warn!("Failed to read config {:?}: {}", config_path, e),
        }
    }

    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[organizer]\nskip_samples = false\n").unwrap();
        assert!(!config.organizer.skip_samples);
        assert!(config.organizer.verify_checksum);
        assert!(config.sessions_dir.ends_with("sessions"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.organizer.save_sessions);
    }
}

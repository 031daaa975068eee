//! Naming policy configuration.
//!
//! The configuration is a small JSON document owned by the host plugin shell.
//! The policy only ever reads it; missing fields fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Placeholder year used by [`YearPolicy::Placeholder`] when none is configured.
pub const DEFAULT_PLACEHOLDER_YEAR: i32 = 1900;

/// Title used for single-episode movies whose episode title is a placeholder.
pub const DEFAULT_MOVIE_TITLE: &str = "Complete Movie";

/// How the destination folder handles a series without a known air date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum YearPolicy {
    /// Leave the ` [year]` suffix out entirely.
    #[default]
    Omit,
    /// Use a fixed year instead.
    Placeholder {
        /// Year written when the air date is unknown.
        #[serde(default = "default_placeholder_year")]
        year: i32,
    },
}

impl YearPolicy {
    /// Year to write for a series, if any.
    #[must_use]
    pub const fn resolve(self, known: Option<i32>) -> Option<i32> {
        match (known, self) {
            (Some(year), _) => Some(year),
            (None, Self::Omit) => None,
            (None, Self::Placeholder { year }) => Some(year),
        }
    }
}

const fn default_placeholder_year() -> i32 {
    DEFAULT_PLACEHOLDER_YEAR
}

fn default_movie_title() -> String {
    DEFAULT_MOVIE_TITLE.to_string()
}

const fn default_true() -> bool {
    true
}

/// Renamer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenamerConfig {
    /// Behavior for series without an air date.
    #[serde(default)]
    pub year_policy: YearPolicy,
    /// Substitute title for single-episode movies with a placeholder title.
    #[serde(default = "default_movie_title")]
    pub movie_title: String,
    /// Append ` [group]` to filenames when the release group is known.
    #[serde(default = "default_true")]
    pub release_group_suffix: bool,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            year_policy: YearPolicy::default(),
            movie_title: default_movie_title(),
            release_group_suffix: true,
        }
    }
}

impl RenamerConfig {
    /// Load configuration from the default location, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        if !config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        info!("Loaded config from {}", path.display());
        debug!(
            year_policy = ?config.year_policy,
            release_group_suffix = config.release_group_suffix,
            "Renamer configuration"
        );

        Ok(config)
    }

    /// Set the year policy.
    #[must_use]
    pub const fn with_year_policy(mut self, year_policy: YearPolicy) -> Self {
        self.year_policy = year_policy;
        self
    }

    /// Set the substitute title for placeholder-titled movies.
    #[must_use]
    pub fn with_movie_title(mut self, movie_title: impl Into<String>) -> Self {
        self.movie_title = movie_title.into();
        self
    }

    /// Enable or disable the release group suffix.
    #[must_use]
    pub const fn with_release_group_suffix(mut self, enabled: bool) -> Self {
        self.release_group_suffix = enabled;
        self
    }
}

/// Get the default configuration directory.
#[must_use]
pub fn default_config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subrenamer")
}

/// Get the path of the default configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    default_config_directory().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RenamerConfig::default();
        assert_eq!(config.year_policy, YearPolicy::Omit);
        assert_eq!(config.movie_title, "Complete Movie");
        assert!(config.release_group_suffix);
    }

    #[test]
    fn test_year_policy_resolve() {
        assert_eq!(YearPolicy::Omit.resolve(Some(2004)), Some(2004));
        assert_eq!(YearPolicy::Omit.resolve(None), None);

        let placeholder = YearPolicy::Placeholder { year: 1970 };
        assert_eq!(placeholder.resolve(Some(2004)), Some(2004));
        assert_eq!(placeholder.resolve(None), Some(1970));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RenamerConfig = serde_json::from_str("{}").expect("valid config");
        assert_eq!(config, RenamerConfig::default());

        let config: RenamerConfig =
            serde_json::from_str(r#"{"year_policy": {"mode": "placeholder"}}"#)
                .expect("valid config");
        assert_eq!(
            config.year_policy,
            YearPolicy::Placeholder {
                year: DEFAULT_PLACEHOLDER_YEAR
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "year_policy": {"mode": "placeholder", "year": 1999},
                "movie_title": "Full Movie",
                "release_group_suffix": false
            }"#,
        )
        .expect("Write should succeed");

        let config = RenamerConfig::load_from(&path).expect("Load should succeed");
        assert_eq!(config.year_policy, YearPolicy::Placeholder { year: 1999 });
        assert_eq!(config.movie_title, "Full Movie");
        assert!(!config.release_group_suffix);
    }

    #[test]
    fn test_load_from_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").expect("Write should succeed");

        let result = RenamerConfig::load_from(&path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RenamerConfig::load_from(Path::new("/nonexistent/subrenamer.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_builder() {
        let config = RenamerConfig::default()
            .with_year_policy(YearPolicy::Placeholder { year: 2000 })
            .with_movie_title("Movie")
            .with_release_group_suffix(false);

        assert_eq!(config.year_policy, YearPolicy::Placeholder { year: 2000 });
        assert_eq!(config.movie_title, "Movie");
        assert!(!config.release_group_suffix);
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("subrenamer/config.json"));
    }
}

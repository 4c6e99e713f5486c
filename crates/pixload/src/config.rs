//! Loader configuration (YAML).
//!
//! ```yaml
//! search_paths:
//!   - tests/resources
//!   - /opt/share/images
//! use_env: true
//! tolerance: 1.0
//! ```

use crate::compare::PIXEL_TOLERANCE;
use crate::loader::ImageLoader;
use crate::repository::{DataRepository, DATA_PATH_ENV};
use crate::result::{PixloadError, PixloadResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for building a loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Search directories, highest priority first
    pub search_paths: Vec<PathBuf>,
    /// Append the directories listed in `PIXLOAD_DATA_PATH`
    pub use_env: bool,
    /// Average per-byte tolerance for lossy comparison
    pub tolerance: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            use_env: true,
            tolerance: PIXEL_TOLERANCE,
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search directory after the existing ones
    #[must_use]
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Set whether `PIXLOAD_DATA_PATH` is consulted
    #[must_use]
    pub const fn with_use_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Set the lossy tolerance
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Parse from YAML text
    pub fn from_yaml_str(yaml: &str) -> PixloadResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> PixloadResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> PixloadResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> PixloadResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PixloadError::config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Build a fresh repository: configured paths first, then the
    /// environment's when enabled
    #[must_use]
    pub fn build_repository(&self) -> DataRepository {
        let repo = DataRepository::from_paths(self.search_paths.iter().cloned());
        if self.use_env {
            for dir in DataRepository::from_env(DATA_PATH_ENV).paths() {
                if !repo.paths().contains(&dir) {
                    repo.add_last_path(dir);
                }
            }
        }
        repo
    }

    /// Build a loader over [`Self::build_repository`]
    #[must_use]
    pub fn build_loader(&self) -> ImageLoader {
        ImageLoader::new(self.build_repository())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert!(config.search_paths.is_empty());
        assert!(config.use_env);
        assert_eq!(config.tolerance, PIXEL_TOLERANCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::new()
            .with_search_path("a")
            .with_search_path("b")
            .with_use_env(false)
            .with_tolerance(2.5);
        assert_eq!(config.search_paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(!config.use_env);
        assert_eq!(config.tolerance, 2.5);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = LoaderConfig::from_yaml_str("search_paths: [fixtures, /data]\n").unwrap();
        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("fixtures"), PathBuf::from("/data")]
        );
        assert!(config.use_env);
        assert_eq!(config.tolerance, PIXEL_TOLERANCE);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_field() {
        let err = LoaderConfig::from_yaml_str("search_path: [x]\n").unwrap_err();
        assert!(matches!(err, PixloadError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_rejects_bad_tolerance() {
        let err = LoaderConfig::from_yaml_str("tolerance: -1.0\n").unwrap_err();
        assert!(matches!(err, PixloadError::Config { .. }));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = LoaderConfig::new()
            .with_search_path("fixtures")
            .with_use_env(false);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(LoaderConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixload.yaml");
        std::fs::write(&path, "use_env: false\ntolerance: 0.5\n").unwrap();
        let config = LoaderConfig::from_file(&path).unwrap();
        assert!(!config.use_env);
        assert_eq!(config.tolerance, 0.5);

        let missing = LoaderConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, PixloadError::Io(_)));
    }

    #[test]
    fn test_build_repository_without_env() {
        let config = LoaderConfig::new()
            .with_search_path("first")
            .with_search_path("second")
            .with_use_env(false);
        let loader = config.build_loader();
        assert_eq!(
            loader.repository().paths(),
            vec![PathBuf::from("first"), PathBuf::from("second")]
        );
    }
}

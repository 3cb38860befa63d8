//! # Lineup Configuration Module
//!
//! Tuning constants for layout and automated selection, kept in one place.
//!
//! ## Usage
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::default();
//! let compact = LineupConfig::compact();
//! assert!(compact.resolver.min_distance < config.resolver.min_distance);
//! ```
//!
//! ## Environment Variables
//!
//! - `LINEUP_PROFILE`: Select preset (compact, spacious, default)
//! - `LINEUP_CONFIG_PATH`: JSON or YAML file read by [`LineupConfig::from_env_path`]

mod recommender_config;
mod resolver_config;

pub use recommender_config::RecommenderConfig;
pub use resolver_config::ResolverConfig;

use crate::error::{LineupError, Result};
use crate::tactics::Orientation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};
use tracing::info;

pub const PROFILE_ENV: &str = "LINEUP_PROFILE";
pub const CONFIG_PATH_ENV: &str = "LINEUP_CONFIG_PATH";

/// Complete builder configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct LineupConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
    #[serde(default)]
    pub orientation: Orientation,
}

impl LineupConfig {
    /// Small pitch widgets (mobile): tighter spacing
    pub fn compact() -> Self {
        let mut cfg = Self::default();
        cfg.resolver.min_distance = 6.0;
        cfg
    }

    /// Large landscape board: wider spacing, more nudges
    pub fn spacious() -> Self {
        let mut cfg = Self::default();
        cfg.resolver.min_distance = 10.0;
        cfg.resolver.max_attempts = 12;
        cfg.orientation = Orientation::Landscape;
        cfg
    }

    /// Select a preset by name; unknown names fall back to the default.
    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "compact" => Self::compact(),
            "spacious" => Self::spacious(),
            _ => Self::default(),
        }
    }

    /// Load from environment variable LINEUP_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        let profile = env::var(PROFILE_ENV).unwrap_or_default();
        if !profile.is_empty() {
            info!(profile = %profile, "lineup config profile selected");
        }
        Self::from_profile(&profile)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a `.json` file as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let config = if is_json { Self::from_json(&content)? } else { Self::from_yaml(&content)? };
        info!(path = %path.display(), "lineup config loaded");
        Ok(config)
    }

    /// File named by LINEUP_CONFIG_PATH if set, otherwise the profile preset.
    pub fn from_env_path() -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => Ok(Self::from_env_or_default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.resolver.validate().map_err(LineupError::Config)?;
        self.recommender.validate().map_err(LineupError::Config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_documented_constants() {
        let cfg = LineupConfig::default();
        assert_eq!(cfg.resolver.min_distance, 8.0);
        assert_eq!(cfg.resolver.max_attempts, 8);
        assert_eq!(cfg.resolver.vertical_step, 4.0);
        assert_eq!(cfg.resolver.horizontal_step, 1.5);
        assert_eq!((cfg.resolver.min_coord, cfg.resolver.max_coord), (6.0, 94.0));
        assert_eq!(cfg.recommender.risk_level, 35);
        assert_eq!(cfg.orientation, Orientation::Portrait);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for name in ["compact", "spacious", "default", "nonsense"] {
            assert!(LineupConfig::from_profile(name).validate().is_ok(), "{}", name);
        }
        assert_eq!(LineupConfig::from_profile(" Spacious ").orientation, Orientation::Landscape);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = LineupConfig::from_json(r#"{"resolver":{"min_distance":5.0}}"#).unwrap();
        assert_eq!(cfg.resolver.min_distance, 5.0);
        assert_eq!(cfg.resolver.max_attempts, 8);
        assert_eq!(cfg.recommender, RecommenderConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = LineupConfig::from_json(r#"{"resolver":{"min_distance":0.0}}"#).unwrap_err();
        assert!(matches!(err, LineupError::Config(_)));

        let err = LineupConfig::from_yaml("recommender:\n  xi_threshold: 1.5\n").unwrap_err();
        assert!(matches!(err, LineupError::Config(_)));

        let err = LineupConfig::from_yaml("resolver:\n  min_coord: 50\n  max_coord: 40\n").unwrap_err();
        assert!(matches!(err, LineupError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let err = LineupConfig::from_yaml("resolver: [unclosed").unwrap_err();
        assert!(matches!(err, LineupError::ConfigParse(_)));
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("lineup.yaml");
        let mut f = fs::File::create(&yaml_path).unwrap();
        writeln!(f, "orientation: landscape\nresolver:\n  max_attempts: 3").unwrap();
        let cfg = LineupConfig::from_path(&yaml_path).unwrap();
        assert_eq!(cfg.orientation, Orientation::Landscape);
        assert_eq!(cfg.resolver.max_attempts, 3);

        let json_path = dir.path().join("lineup.json");
        fs::write(&json_path, r#"{"recommender":{"risk_level":80}}"#).unwrap();
        let cfg = LineupConfig::from_path(&json_path).unwrap();
        assert_eq!(cfg.recommender.risk_level, 80);

        let missing = LineupConfig::from_path(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, LineupError::Io(_)));
    }
}

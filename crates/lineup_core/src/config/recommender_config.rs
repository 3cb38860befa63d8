//! Lineup Recommender Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scoring knobs for the automated lineup and captaincy suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RecommenderConfig {
    /// 0 = safest picks, 100 = chase upside (default: 35)
    pub risk_level: u8,
    /// Bonus defenders for leagues with a defence modifier (default: false)
    pub prefer_defenders: bool,
    /// Minimum start probability for the first pass (default: 0.7)
    pub xi_threshold: f32,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { risk_level: 35, prefer_defenders: false, xi_threshold: 0.7 }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.risk_level > 100 {
            return Err(format!("risk_level must be 0..=100, got {}", self.risk_level));
        }
        if !(0.0..=1.0).contains(&self.xi_threshold) {
            return Err(format!("xi_threshold must be 0..=1, got {}", self.xi_threshold));
        }
        Ok(())
    }
}

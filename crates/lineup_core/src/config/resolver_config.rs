//! Collision Resolver Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overlap-avoidance parameters, in normalized pitch units (0..100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum Euclidean separation between two placed entries (default: 8.0)
    pub min_distance: f32,
    /// Nudges tried before an overlap is accepted (default: 8)
    pub max_attempts: u32,
    /// Vertical nudge magnitude (default: 4.0)
    pub vertical_step: f32,
    /// Horizontal nudge magnitude (default: 1.5)
    pub horizontal_step: f32,
    /// Lower clamp bound on both axes (default: 6.0)
    pub min_coord: f32,
    /// Upper clamp bound on both axes (default: 94.0)
    pub max_coord: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_distance: 8.0,
            max_attempts: 8,
            vertical_step: 4.0,
            horizontal_step: 1.5,
            min_coord: 6.0,
            max_coord: 94.0,
        }
    }
}

impl ResolverConfig {
    pub fn with_min_distance(min_distance: f32) -> Self {
        Self { min_distance, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_distance.is_nan() || self.min_distance <= 0.0 {
            return Err(format!("min_distance must be > 0, got {}", self.min_distance));
        }
        if self.max_attempts > 64 {
            return Err(format!("max_attempts must be <= 64, got {}", self.max_attempts));
        }
        if self.vertical_step < 0.0 || self.horizontal_step < 0.0 {
            return Err("nudge steps must be non-negative".to_string());
        }
        if !(0.0..=100.0).contains(&self.min_coord)
            || !(0.0..=100.0).contains(&self.max_coord)
            || self.min_coord >= self.max_coord
        {
            return Err(format!(
                "clamp bounds must satisfy 0 <= min < max <= 100, got [{}, {}]",
                self.min_coord, self.max_coord
            ));
        }
        Ok(())
    }
}

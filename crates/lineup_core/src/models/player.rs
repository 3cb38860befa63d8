use crate::error::{LineupError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use validator::{Validate, ValidationError};

/// Opaque player identity supplied by the data-fetch collaborator.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Position group a player is listed under.
///
/// Accepts the Italian fantasy-football codes (`POR`/`DIF`/`CEN`/`ATT`) as
/// aliases so imported rosters deserialize unchanged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum PositionGroup {
    #[serde(rename = "GK", alias = "POR")]
    Goalkeeper,
    #[serde(rename = "DEF", alias = "DIF")]
    Defender,
    #[serde(rename = "MID", alias = "CEN")]
    Midfielder,
    #[serde(rename = "FWD", alias = "ATT")]
    Forward,
}

impl PositionGroup {
    /// Pitch order: goal line first, attack line last.
    pub const ALL: [PositionGroup; 4] = [
        PositionGroup::Goalkeeper,
        PositionGroup::Defender,
        PositionGroup::Midfielder,
        PositionGroup::Forward,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            PositionGroup::Goalkeeper => "GK",
            PositionGroup::Defender => "DEF",
            PositionGroup::Midfielder => "MID",
            PositionGroup::Forward => "FWD",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, PositionGroup::Goalkeeper)
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RiskTag {
    Safe,
    Upside,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Ok,
    Injured,
    Suspended,
    Doubtful,
}

impl PlayerStatus {
    /// Injured and suspended players cannot be picked by automated selection.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PlayerStatus::Injured | PlayerStatus::Suspended)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SetPieces {
    #[serde(default)]
    pub penalties: bool,
    #[serde(default)]
    pub free_kicks: bool,
    #[serde(default)]
    pub corners: bool,
}

/// Candidate player as supplied by the host.
///
/// The core never creates or mutates players; they are read-only inputs to
/// slot assignment, recommendation and captaincy scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct Player {
    #[validate(custom = "validate_player_id")]
    pub id: PlayerId,
    pub name: String,
    #[serde(alias = "role")]
    pub group: PositionGroup,
    #[serde(default)]
    pub team: String,
    /// e.g. "vs JUV" / "@ INT"
    #[serde(default)]
    pub opponent: String,
    /// Free-text kickoff, e.g. "Sat 18:00".
    #[serde(default)]
    pub kickoff: String,
    /// Probability of starting, 0..=1.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub xi_prob: f32,
    #[serde(default = "default_exp_minutes")]
    #[validate(range(min = 0, max = 90))]
    pub exp_minutes: u8,
    /// Conservative expected-points bound.
    #[serde(default = "default_ci_low")]
    pub ci_low: f32,
    /// Upside expected-points bound.
    #[serde(default = "default_ci_high")]
    pub ci_high: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlayerStatus>,
    #[serde(default)]
    pub set_pieces: SetPieces,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<String>,
}

fn default_exp_minutes() -> u8 {
    90
}

fn default_ci_low() -> f32 {
    2.0
}

fn default_ci_high() -> f32 {
    8.0
}

fn validate_player_id(id: &PlayerId) -> std::result::Result<(), ValidationError> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::new("empty_player_id"));
    }
    Ok(())
}

impl Player {
    /// New player with import defaults: no projection data, 90 expected
    /// minutes, a 2..8 point interval.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, group: PositionGroup) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            team: String::new(),
            opponent: String::new(),
            kickoff: String::new(),
            xi_prob: 0.0,
            exp_minutes: default_exp_minutes(),
            ci_low: default_ci_low(),
            ci_high: default_ci_high(),
            risk: None,
            status: None,
            set_pieces: SetPieces::default(),
            news: None,
        }
    }

    pub fn with_projection(mut self, ci_low: f32, ci_high: f32, xi_prob: f32) -> Self {
        self.ci_low = ci_low;
        self.ci_high = ci_high;
        self.xi_prob = xi_prob;
        self
    }

    pub fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_set_pieces(mut self, set_pieces: SetPieces) -> Self {
        self.set_pieces = set_pieces;
        self
    }

    /// Midpoint of the expected-points interval.
    pub fn expected_points(&self) -> f32 {
        (self.ci_low + self.ci_high) / 2.0
    }

    pub fn is_available(&self) -> bool {
        !self.status.map(|s| s.is_unavailable()).unwrap_or(false)
    }

    /// Field-level validation plus the interval ordering check.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(|source| LineupError::InvalidPlayer {
            id: self.id.to_string(),
            source,
        })?;
        if self.ci_low > self.ci_high {
            return Err(LineupError::InvertedInterval {
                id: self.id.to_string(),
                low: self.ci_low,
                high: self.ci_high,
            });
        }
        Ok(())
    }
}

/// Upsert `incoming` into `current` by id.
///
/// Existing players keep their position in the list and take the incoming
/// attributes; new ids are appended in incoming order.
pub fn merge_players(current: &[Player], incoming: &[Player]) -> Vec<Player> {
    let mut merged: Vec<Player> = current.to_vec();
    for player in incoming {
        match merged.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => merged.push(player.clone()),
        }
    }
    merged
}

// crates/lineup_core/src/tactics/formation_catalog.rs
// Formation catalog: scheme identifiers -> hand-tuned pitch slots
// Provides 7 schemes with portrait coordinates and a landscape projection

use crate::error::{LineupError, Result};
use crate::models::PositionGroup;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported formation schemes (7 schemes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FormationScheme {
    #[serde(rename = "3-4-3")]
    F343,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-5-1")]
    F451,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "5-4-1")]
    F541,
}

/// Slot count per position group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroupCounts {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl GroupCounts {
    pub fn get(&self, group: PositionGroup) -> usize {
        match group {
            PositionGroup::Goalkeeper => self.goalkeepers,
            PositionGroup::Defender => self.defenders,
            PositionGroup::Midfielder => self.midfielders,
            PositionGroup::Forward => self.forwards,
        }
    }

    pub fn total(&self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }
}

impl FormationScheme {
    pub fn all() -> Vec<FormationScheme> {
        vec![
            Self::F343,
            Self::F433,
            Self::F442,
            Self::F352,
            Self::F451,
            Self::F532,
            Self::F541,
        ]
    }

    /// Canonical scheme identifier (e.g., "4-3-3").
    pub fn code(&self) -> &'static str {
        match self {
            Self::F343 => "3-4-3",
            Self::F433 => "4-3-3",
            Self::F442 => "4-4-2",
            Self::F352 => "3-5-2",
            Self::F451 => "4-5-1",
            Self::F532 => "5-3-2",
            Self::F541 => "5-4-1",
        }
    }

    pub fn counts(&self) -> GroupCounts {
        let (defenders, midfielders, forwards) = match self {
            Self::F343 => (3, 4, 3),
            Self::F433 => (4, 3, 3),
            Self::F442 => (4, 4, 2),
            Self::F352 => (3, 5, 2),
            Self::F451 => (4, 5, 1),
            Self::F532 => (5, 3, 2),
            Self::F541 => (5, 4, 1),
        };
        GroupCounts { goalkeepers: 1, defenders, midfielders, forwards }
    }

    /// Total number of pitch slots; the advisory cap on the starting eleven.
    pub fn total_slots(&self) -> usize {
        self.counts().total()
    }

    /// Portrait slots in pitch order (GK, DEF, MID, FWD; left to right).
    pub fn slots(&self) -> Vec<Slot> {
        CATALOG[self].clone()
    }

    pub fn slots_for(&self, group: PositionGroup) -> Vec<Slot> {
        self.slots().into_iter().filter(|s| s.group == group).collect()
    }
}

impl fmt::Display for FormationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormationScheme {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Self::all()
            .into_iter()
            .find(|scheme| scheme.code() == code)
            .ok_or_else(|| LineupError::UnknownScheme(code.to_string()))
    }
}

/// Pitch orientation used when projecting slots for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Own goal at the bottom, attack toward the top.
    #[default]
    Portrait,
    /// Own goal on the left, attack toward the right.
    Landscape,
}

impl Orientation {
    /// Map a canonical (portrait) coordinate into this orientation.
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        match self {
            Orientation::Portrait => (x, y),
            Orientation::Landscape => (100.0 - y, x),
        }
    }
}

/// Fixed display position of one scheme slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Slot {
    pub scheme: FormationScheme,
    pub group: PositionGroup,
    /// Index within the group, left to right.
    pub index: usize,
    pub x: f32, // 0 = left touchline, 100 = right touchline
    pub y: f32, // 0 = opponent goal line, 100 = own goal line
}

impl Slot {
    fn new(scheme: FormationScheme, group: PositionGroup, index: usize, x: f32, y: f32) -> Self {
        Self { scheme, group, index, x: x.clamp(0.0, 100.0), y: y.clamp(0.0, 100.0) }
    }

    pub fn projected(&self, orientation: Orientation) -> Slot {
        let (x, y) = orientation.project(self.x, self.y);
        Slot { x, y, ..*self }
    }
}

/// Catalog lookup by scheme identifier.
pub fn layout_for(scheme_id: &str) -> Result<Vec<Slot>> {
    let scheme: FormationScheme = scheme_id.parse()?;
    Ok(scheme.slots())
}

/// Built from `all()`, so every scheme has an entry.
static CATALOG: Lazy<HashMap<FormationScheme, Vec<Slot>>> = Lazy::new(|| {
    FormationScheme::all().into_iter().map(|scheme| (scheme, build_slots(scheme))).collect()
});

// ============================================================================
// Scheme Definitions
// ============================================================================

const GK_SPOT: (f32, f32) = (50.0, 90.0);
const DEF_LINE_Y: f32 = 74.0;
const MID_LINE_Y: f32 = 55.0;

const BACK_THREE: &[f32] = &[25.0, 50.0, 75.0];
const BACK_FOUR: &[f32] = &[15.0, 32.0, 68.0, 85.0];
const BACK_FIVE: &[f32] = &[12.0, 31.0, 50.0, 69.0, 88.0];

const MID_THREE: &[f32] = &[21.0, 50.0, 79.0];
const MID_FOUR: &[f32] = &[18.0, 38.0, 62.0, 82.0];
const MID_FOUR_WIDE: &[f32] = &[15.0, 37.0, 63.0, 85.0];
const MID_FIVE: &[f32] = &[12.0, 31.0, 50.0, 69.0, 88.0];

const FRONT_THREE: &[f32] = &[29.0, 50.0, 71.0];
const FRONT_THREE_NARROW: &[f32] = &[28.0, 50.0, 72.0];
const FRONT_TWO: &[f32] = &[38.0, 62.0];
const LONE_STRIKER: &[f32] = &[50.0];

/// (group, x positions, line y) for the three outfield lines.
fn lines(scheme: FormationScheme) -> [(PositionGroup, &'static [f32], f32); 3] {
    use PositionGroup::{Defender, Forward, Midfielder};
    match scheme {
        FormationScheme::F433 => [
            (Defender, BACK_FOUR, DEF_LINE_Y),
            (Midfielder, MID_THREE, MID_LINE_Y),
            (Forward, FRONT_THREE, 29.0),
        ],
        FormationScheme::F343 => [
            (Defender, BACK_THREE, DEF_LINE_Y),
            (Midfielder, MID_FOUR_WIDE, MID_LINE_Y),
            (Forward, FRONT_THREE_NARROW, 29.0),
        ],
        FormationScheme::F442 => [
            (Defender, BACK_FOUR, DEF_LINE_Y),
            (Midfielder, MID_FOUR, MID_LINE_Y),
            (Forward, FRONT_TWO, 30.0),
        ],
        FormationScheme::F352 => [
            (Defender, BACK_THREE, DEF_LINE_Y),
            (Midfielder, MID_FIVE, MID_LINE_Y),
            (Forward, FRONT_TWO, 30.0),
        ],
        FormationScheme::F451 => [
            (Defender, BACK_FOUR, DEF_LINE_Y),
            (Midfielder, MID_FIVE, MID_LINE_Y),
            (Forward, LONE_STRIKER, 29.0),
        ],
        FormationScheme::F532 => [
            (Defender, BACK_FIVE, DEF_LINE_Y),
            (Midfielder, MID_THREE, MID_LINE_Y),
            (Forward, FRONT_TWO, 30.0),
        ],
        FormationScheme::F541 => [
            (Defender, BACK_FIVE, DEF_LINE_Y),
            (Midfielder, MID_FOUR, MID_LINE_Y),
            (Forward, LONE_STRIKER, 29.0),
        ],
    }
}

fn build_slots(scheme: FormationScheme) -> Vec<Slot> {
    let mut slots = vec![Slot::new(scheme, PositionGroup::Goalkeeper, 0, GK_SPOT.0, GK_SPOT.1)];
    for (group, xs, y) in lines(scheme) {
        slots.extend(xs.iter().enumerate().map(|(i, &x)| Slot::new(scheme, group, i, x, y)));
    }
    slots
}

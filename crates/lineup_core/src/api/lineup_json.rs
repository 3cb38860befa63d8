//! JSON facade for presentation hosts
//!
//! A host (web view, game UI, FFI bridge) sends one request per redraw and
//! receives ready-to-render pins. Errors are flattened to strings at this
//! boundary only.

use crate::config::LineupConfig;
use crate::error::{LineupError, Result};
use crate::lineup::build_layout;
use crate::models::{Player, PlayerId, PositionGroup};
use crate::selection::{SelectionAction, SelectionSnapshot, SelectionState};
use crate::tactics::{FormationScheme, Orientation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutRequest {
    pub schema_version: u8,
    /// Scheme code, e.g. "4-3-3".
    pub scheme: String,
    /// Falls back to the configured orientation.
    #[serde(default)]
    pub orientation: Option<Orientation>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub selection: Option<SelectionSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutResponse {
    pub schema_version: u8,
    pub scheme: FormationScheme,
    pub orientation: Orientation,
    pub pins: Vec<PitchPin>,
    pub placeholders: Vec<PlaceholderPin>,
    /// Players without a pin, in roster order.
    pub bench: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchPin {
    pub player_id: PlayerId,
    pub label: String,
    pub group: PositionGroup,
    /// Slot index within the group.
    pub slot: usize,
    pub x: f32,
    pub y: f32,
    pub captain: bool,
    pub vice_captain: bool,
    pub locked: bool,
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaceholderPin {
    pub group: PositionGroup,
    pub slot: usize,
    pub x: f32,
    pub y: f32,
}

/// Compact pin label: the last name when it fits, otherwise a first name
/// plus initial, otherwise a truncated name.
pub fn short_label(name: &str) -> String {
    fn truncate(word: &str) -> String {
        if word.chars().count() > 8 {
            let head: String = word.chars().take(8).collect();
            format!("{head}…")
        } else {
            word.to_string()
        }
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => truncate(only),
        [first, .., last] => {
            if last.chars().count() <= 10 {
                last.to_string()
            } else if first.chars().count() <= 6 {
                let initial = last.chars().next().map(String::from).unwrap_or_default();
                format!("{first} {initial}.")
            } else {
                truncate(last)
            }
        }
    }
}

fn build_response(request: LayoutRequest, config: &LineupConfig) -> Result<LayoutResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(LineupError::UnsupportedSchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    let scheme: FormationScheme = request.scheme.parse()?;
    for player in &request.players {
        player.check()?;
    }

    let orientation = request.orientation.unwrap_or(config.orientation);
    let selection: SelectionState = request.selection.map(SelectionState::from).unwrap_or_default();

    let on_pitch: Vec<&Player> = if selection.starting_eleven().is_empty() {
        request.players.iter().collect()
    } else {
        selection.starters(&request.players)
    };
    let layout = build_layout(on_pitch, scheme, orientation, &config.resolver);

    let pins: Vec<PitchPin> = layout
        .occupied()
        .filter_map(|spot| {
            let player = spot.player?;
            let id = player.id.as_str();
            Some(PitchPin {
                player_id: player.id.clone(),
                label: short_label(&player.name),
                group: player.group,
                slot: spot.slot.index,
                x: spot.x,
                y: spot.y,
                captain: selection.is_captain(id),
                vice_captain: selection.is_vice_captain(id),
                locked: selection.is_locked(id),
                excluded: selection.is_excluded(id),
            })
        })
        .collect();
    let placeholders = layout
        .placeholders()
        .map(|spot| PlaceholderPin { group: spot.slot.group, slot: spot.slot.index, x: spot.x, y: spot.y })
        .collect();
    let bench = request
        .players
        .iter()
        .filter(|p| !pins.iter().any(|pin| pin.player_id == p.id))
        .map(|p| p.id.clone())
        .collect();

    Ok(LayoutResponse { schema_version: SCHEMA_VERSION, scheme, orientation, pins, placeholders, bench })
}

/// Build a render-ready pitch layout from a JSON request with the default
/// configuration.
pub fn build_layout_json(request_json: &str) -> std::result::Result<String, String> {
    build_layout_json_with(request_json, &LineupConfig::default())
}

/// Build a layout with a host-supplied configuration.
///
/// The host loads its configuration once (e.g. [`LineupConfig::from_env_path`]);
/// the output depends only on the request and `config`.
pub fn build_layout_json_with(
    request_json: &str,
    config: &LineupConfig,
) -> std::result::Result<String, String> {
    let request: LayoutRequest =
        serde_json::from_str(request_json).map_err(|e| LineupError::from(e).to_string())?;
    debug!(scheme = %request.scheme, players = request.players.len(), "build_layout_json");

    let response = build_response(request, config).map_err(|e| {
        warn!(error = %e, "layout request rejected");
        e.to_string()
    })?;
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

/// Apply one selection action to a serialized selection state.
pub fn apply_action_json(state_json: &str, action_json: &str) -> std::result::Result<String, String> {
    let state: SelectionState =
        serde_json::from_str(state_json).map_err(|e| LineupError::from(e).to_string())?;
    let action: SelectionAction =
        serde_json::from_str(action_json).map_err(|e| LineupError::from(e).to_string())?;
    debug!(action = action.name(), "apply_action_json");

    let next = state.apply(&action);
    serde_json::to_string(&next).map_err(|e| format!("Failed to serialize state: {e}"))
}

/// JSON schema of [`LayoutRequest`], for host-side validation.
pub fn request_schema_json() -> std::result::Result<String, String> {
    let schema = schemars::schema_for!(LayoutRequest);
    serde_json::to_string_pretty(&schema).map_err(|e| format!("Failed to serialize schema: {e}"))
}

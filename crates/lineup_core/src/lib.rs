//! # lineup_core - Deterministic Lineup Builder
//!
//! Places a squad onto a pitch for a chosen formation and tracks the
//! user's squad selection (starting eleven, captaincy, locks, exclusions).
//!
//! ## Features
//! - Fixed formation catalog with normalized 0..100 pitch coordinates
//! - Deterministic slot assignment and overlap avoidance
//! - Pure selection transitions that keep captaincy consistent
//! - Lineup and captaincy recommendations
//! - JSON API for presentation hosts

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod error;
pub mod lineup;
pub mod models;
pub mod recommend;
pub mod selection;
pub mod session;
pub mod tactics;

// Re-export main API functions
pub use api::{
    apply_action_json, build_layout_json, build_layout_json_with, request_schema_json, LayoutRequest,
    LayoutResponse, PitchPin, PlaceholderPin, SCHEMA_VERSION,
};
pub use error::{LineupError, Result};

pub use config::LineupConfig;
pub use lineup::{build_layout, resolve, PitchLayout, PitchSpot, Placement, PlacementRequest};
pub use models::{Player, PlayerId, PlayerStatus, PositionGroup};
pub use recommend::{recommend, suggest_captaincy, Recommendation};
pub use selection::{SelectionAction, SelectionState};
pub use session::LineupSession;
pub use tactics::{layout_for, FormationScheme, Orientation, Slot};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

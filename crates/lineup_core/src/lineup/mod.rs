//! Pitch layout pipeline: slot assignment, collision resolution and the
//! combined layout snapshot.

pub mod assignment;
pub mod collision;
pub mod layout;

pub use assignment::{assign, overflow, SlotAssignment};
pub use collision::{
    min_pairwise_distance, resolve, resolve_with, Placement, PlacementRequest,
};
pub use layout::{build_layout, PitchLayout, PitchSpot};

// crates/lineup_core/src/tactics/mod.rs
// Formation catalog module

pub mod formation_catalog;

// Re-export main types
pub use formation_catalog::{layout_for, FormationScheme, GroupCounts, Orientation, Slot};

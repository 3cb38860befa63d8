//! Lineup recommendation and captaincy suggestions

pub mod captaincy;
pub mod optimizer;

pub use captaincy::{captain_score, suggest_captaincy};
pub use optimizer::{adjusted_score, recommend, select_group, Recommendation};

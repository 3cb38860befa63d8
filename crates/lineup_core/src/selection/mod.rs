//! Squad selection state machine

pub mod action;
pub mod state;

pub use action::SelectionAction;
pub use state::{SelectionSnapshot, SelectionState};

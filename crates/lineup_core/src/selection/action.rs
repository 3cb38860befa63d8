//! Selection actions as data, so hosts can queue, log and replay them.

use super::state::SelectionState;
use crate::models::PlayerId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum SelectionAction {
    SetCaptain(PlayerId),
    SetViceCaptain(PlayerId),
    ToggleLock(PlayerId),
    ToggleExclude(PlayerId),
    AddToXi(PlayerId),
    SendToBench(PlayerId),
    ClearAll,
}

impl SelectionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionAction::SetCaptain(_) => "set_captain",
            SelectionAction::SetViceCaptain(_) => "set_vice_captain",
            SelectionAction::ToggleLock(_) => "toggle_lock",
            SelectionAction::ToggleExclude(_) => "toggle_exclude",
            SelectionAction::AddToXi(_) => "add_to_xi",
            SelectionAction::SendToBench(_) => "send_to_bench",
            SelectionAction::ClearAll => "clear_all",
        }
    }
}

impl SelectionState {
    /// Reducer entry point: one action in, next state out.
    pub fn apply(&self, action: &SelectionAction) -> SelectionState {
        match action {
            SelectionAction::SetCaptain(id) => self.set_captain(id.as_str()),
            SelectionAction::SetViceCaptain(id) => self.set_vice_captain(id.as_str()),
            SelectionAction::ToggleLock(id) => self.toggle_lock(id.as_str()),
            SelectionAction::ToggleExclude(id) => self.toggle_exclude(id.as_str()),
            SelectionAction::AddToXi(id) => self.add_to_xi(id.as_str()),
            SelectionAction::SendToBench(id) => self.send_to_bench(id.as_str()),
            SelectionAction::ClearAll => self.clear_all(),
        }
    }

    /// Fold an ordered action log over this state.
    pub fn replay<'a, I>(&self, actions: I) -> SelectionState
    where
        I: IntoIterator<Item = &'a SelectionAction>,
    {
        actions.into_iter().fold(self.clone(), |state, action| state.apply(action))
    }
}

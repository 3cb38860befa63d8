//! Squad selection state
//!
//! `SelectionState` is a value: every transition takes `&self` and returns
//! the next state, so a host can keep history, diff two states or replay an
//! action log without any locking inside the core.
//!
//! Invariants kept by every transition:
//! - captain and vice-captain are never the same player
//! - once the starting eleven is non-empty, both roles belong to it
//!
//! `locked` and `excluded` are independent toggles: a locked player can be
//! benched and excluding the captain keeps the captaincy.

use crate::models::{Player, PlayerId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Serialized shape of a selection, as produced by persistence or a remote
/// peer. Converting it into a [`SelectionState`] repairs role invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionSnapshot {
    #[serde(default)]
    pub starting_eleven: BTreeSet<PlayerId>,
    #[serde(default)]
    pub locked: BTreeSet<PlayerId>,
    #[serde(default)]
    pub excluded: BTreeSet<PlayerId>,
    #[serde(default)]
    pub captain_id: Option<PlayerId>,
    #[serde(default)]
    pub vice_captain_id: Option<PlayerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionSnapshot")]
pub struct SelectionState {
    starting_eleven: BTreeSet<PlayerId>,
    locked: BTreeSet<PlayerId>,
    excluded: BTreeSet<PlayerId>,
    captain_id: Option<PlayerId>,
    vice_captain_id: Option<PlayerId>,
}

impl From<SelectionSnapshot> for SelectionState {
    fn from(snapshot: SelectionSnapshot) -> Self {
        let mut state = Self {
            starting_eleven: snapshot.starting_eleven,
            locked: snapshot.locked,
            excluded: snapshot.excluded,
            captain_id: snapshot.captain_id,
            vice_captain_id: snapshot.vice_captain_id,
        };
        if state.vice_captain_id.is_some() && state.vice_captain_id == state.captain_id {
            state.vice_captain_id = None;
        }
        state.retain_roles_in_xi();
        state
    }
}

impl From<&SelectionState> for SelectionSnapshot {
    fn from(state: &SelectionState) -> Self {
        Self {
            starting_eleven: state.starting_eleven.clone(),
            locked: state.locked.clone(),
            excluded: state.excluded.clone(),
            captain_id: state.captain_id.clone(),
            vice_captain_id: state.vice_captain_id.clone(),
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Queries
    // ========================

    pub fn starting_eleven(&self) -> &BTreeSet<PlayerId> {
        &self.starting_eleven
    }

    pub fn locked(&self) -> &BTreeSet<PlayerId> {
        &self.locked
    }

    pub fn excluded(&self) -> &BTreeSet<PlayerId> {
        &self.excluded
    }

    pub fn captain(&self) -> Option<&PlayerId> {
        self.captain_id.as_ref()
    }

    pub fn vice_captain(&self) -> Option<&PlayerId> {
        self.vice_captain_id.as_ref()
    }

    pub fn is_in_xi(&self, id: &str) -> bool {
        self.starting_eleven.contains(id)
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.locked.contains(id)
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(id)
    }

    pub fn is_captain(&self, id: &str) -> bool {
        self.captain_id.as_ref().map(|c| c.as_str()) == Some(id)
    }

    pub fn is_vice_captain(&self, id: &str) -> bool {
        self.vice_captain_id.as_ref().map(|v| v.as_str()) == Some(id)
    }

    /// Known players in the starting eleven, in roster order.
    pub fn starters<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.is_in_xi(p.id.as_str())).collect()
    }

    /// Known players not in the starting eleven, in roster order.
    pub fn bench<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| !self.is_in_xi(p.id.as_str())).collect()
    }

    /// True when the role invariants hold.
    pub fn is_consistent(&self) -> bool {
        let distinct = self.captain_id.is_none() || self.captain_id != self.vice_captain_id;
        let in_xi = |role: &Option<PlayerId>| {
            self.starting_eleven.is_empty()
                || role.as_ref().map_or(true, |id| self.starting_eleven.contains(id))
        };
        distinct && in_xi(&self.captain_id) && in_xi(&self.vice_captain_id)
    }

    // ========================
    // Transitions
    // ========================

    /// Toggle the captaincy on `id`; takes the armband off the vice if needed.
    ///
    /// With a non-empty eleven, a player outside it cannot become captain and
    /// the call leaves the state unchanged.
    pub fn set_captain(&self, id: &str) -> Self {
        let mut next = self.clone();
        if self.is_captain(id) {
            next.captain_id = None;
        } else if self.can_lead(id) {
            next.captain_id = Some(PlayerId::from(id));
            if self.is_vice_captain(id) {
                next.vice_captain_id = None;
            }
        } else {
            debug!(%id, "captaincy ignored: player is not in the starting eleven");
            return next;
        }
        debug!(%id, captain = ?next.captain_id, vice = ?next.vice_captain_id, "set_captain");
        next
    }

    /// Symmetric to [`set_captain`](Self::set_captain).
    pub fn set_vice_captain(&self, id: &str) -> Self {
        let mut next = self.clone();
        if self.is_vice_captain(id) {
            next.vice_captain_id = None;
        } else if self.can_lead(id) {
            next.vice_captain_id = Some(PlayerId::from(id));
            if self.is_captain(id) {
                next.captain_id = None;
            }
        } else {
            debug!(%id, "vice-captaincy ignored: player is not in the starting eleven");
            return next;
        }
        debug!(%id, captain = ?next.captain_id, vice = ?next.vice_captain_id, "set_vice_captain");
        next
    }

    pub fn toggle_lock(&self, id: &str) -> Self {
        let mut next = self.clone();
        let now_locked = toggle(&mut next.locked, id);
        debug!(%id, locked = now_locked, "toggle_lock");
        next
    }

    pub fn toggle_exclude(&self, id: &str) -> Self {
        let mut next = self.clone();
        let now_excluded = toggle(&mut next.excluded, id);
        debug!(%id, excluded = now_excluded, "toggle_exclude");
        next
    }

    /// Insert into the eleven. No capacity check here; the host stops
    /// offering the action once the scheme's slots are full.
    pub fn add_to_xi(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.starting_eleven.insert(PlayerId::from(id));
        next.retain_roles_in_xi();
        debug!(%id, xi = next.starting_eleven.len(), "add_to_xi");
        next
    }

    /// Remove from the eleven, dropping any leadership role it held.
    pub fn send_to_bench(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.starting_eleven.remove(id);
        if next.is_captain(id) {
            next.captain_id = None;
        }
        if next.is_vice_captain(id) {
            next.vice_captain_id = None;
        }
        debug!(%id, xi = next.starting_eleven.len(), "send_to_bench");
        next
    }

    /// Empty the eleven; captain and vice go with it.
    pub fn clear_all(&self) -> Self {
        let mut next = self.clone();
        next.starting_eleven.clear();
        next.captain_id = None;
        next.vice_captain_id = None;
        debug!("clear_all");
        next
    }

    /// Replace the eleven wholesale (e.g. with a recommendation), keeping
    /// roles that remain in it.
    pub fn with_starting_eleven<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = PlayerId>,
    {
        let mut next = self.clone();
        next.starting_eleven = ids.into_iter().collect();
        next.retain_roles_in_xi();
        debug!(xi = next.starting_eleven.len(), "with_starting_eleven");
        next
    }

    /// Apply a captain/vice suggestion through the regular transitions.
    pub fn with_leadership(&self, captain: Option<&PlayerId>, vice: Option<&PlayerId>) -> Self {
        let mut next = self.clone();
        if let Some(c) = captain {
            if !next.is_captain(c.as_str()) {
                next = next.set_captain(c.as_str());
            }
        }
        if let Some(v) = vice {
            if captain != Some(v) && !next.is_vice_captain(v.as_str()) {
                next = next.set_vice_captain(v.as_str());
            }
        }
        next
    }

    fn can_lead(&self, id: &str) -> bool {
        self.starting_eleven.is_empty() || self.starting_eleven.contains(id)
    }

    fn retain_roles_in_xi(&mut self) {
        if self.starting_eleven.is_empty() {
            return;
        }
        if let Some(c) = &self.captain_id {
            if !self.starting_eleven.contains(c) {
                self.captain_id = None;
            }
        }
        if let Some(v) = &self.vice_captain_id {
            if !self.starting_eleven.contains(v) {
                self.vice_captain_id = None;
            }
        }
    }
}

/// Flip membership; returns whether `id` is now a member.
fn toggle(set: &mut BTreeSet<PlayerId>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(PlayerId::from(id));
        true
    }
}

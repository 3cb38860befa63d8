//! Slot assignment: players -> formation slots
//!
//! Per position group, players are taken in input order and zipped with
//! that group's slots. Missing players leave an empty slot; excess players
//! overflow off the pitch view (they stay on the bench side).

use crate::models::{Player, PositionGroup};
use crate::tactics::Slot;
use std::collections::BTreeMap;

/// One slot and the player shown in it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAssignment<'a> {
    pub slot: Slot,
    pub player: Option<&'a Player>,
}

impl SlotAssignment<'_> {
    pub fn is_placeholder(&self) -> bool {
        self.player.is_none()
    }
}

fn group_players<'a, I>(players: I) -> BTreeMap<PositionGroup, Vec<&'a Player>>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut by_group: BTreeMap<PositionGroup, Vec<&'a Player>> = BTreeMap::new();
    for player in players {
        by_group.entry(player.group).or_default().push(player);
    }
    by_group
}

/// Pair players with slots, keeping the order of `slots`.
pub fn assign<'a, I>(players: I, slots: &[Slot]) -> Vec<SlotAssignment<'a>>
where
    I: IntoIterator<Item = &'a Player>,
{
    let by_group = group_players(players);
    let mut used: BTreeMap<PositionGroup, usize> = BTreeMap::new();

    slots
        .iter()
        .map(|slot| {
            let cursor = used.entry(slot.group).or_insert(0);
            let player = by_group.get(&slot.group).and_then(|ps| ps.get(*cursor)).copied();
            *cursor += 1;
            SlotAssignment { slot: *slot, player }
        })
        .collect()
}

/// Players left without a slot, in input order.
pub fn overflow<'a, I>(players: I, slots: &[Slot]) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut remaining: BTreeMap<PositionGroup, usize> = BTreeMap::new();
    for slot in slots {
        *remaining.entry(slot.group).or_insert(0) += 1;
    }

    players
        .into_iter()
        .filter(|player| match remaining.get_mut(&player.group) {
            Some(left) if *left > 0 => {
                *left -= 1;
                false
            }
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactics::FormationScheme;

    fn squad(spec: &[(&str, PositionGroup)]) -> Vec<Player> {
        spec.iter().map(|(id, g)| Player::new(*id, id.to_uppercase(), *g)).collect()
    }

    fn canonical_433() -> Vec<Player> {
        use PositionGroup::*;
        squad(&[
            ("gk", Goalkeeper),
            ("d1", Defender),
            ("d2", Defender),
            ("d3", Defender),
            ("d4", Defender),
            ("m1", Midfielder),
            ("m2", Midfielder),
            ("m3", Midfielder),
            ("f1", Forward),
            ("f2", Forward),
            ("f3", Forward),
        ])
    }

    #[test]
    fn test_complete_433_is_a_bijection() {
        let players = canonical_433();
        let slots = FormationScheme::F433.slots();
        let assigned = assign(&players, &slots);

        assert_eq!(assigned.len(), 11);
        assert!(assigned.iter().all(|a| !a.is_placeholder()));
        for a in &assigned {
            assert_eq!(a.player.map(|p| p.group), Some(a.slot.group));
        }
        let mut ids: Vec<&str> = assigned.iter().filter_map(|a| a.player).map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 11);
        assert!(overflow(&players, &slots).is_empty());
    }

    #[test]
    fn test_input_order_decides_slot_order() {
        let players = canonical_433();
        let slots = FormationScheme::F433.slots_for(PositionGroup::Defender);
        let assigned = assign(&players, &slots);
        let ids: Vec<&str> = assigned.iter().map(|a| a.player.unwrap().id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3", "d4"]);
        assert_eq!(assigned[2].slot.index, 2);
    }

    #[test]
    fn test_second_goalkeeper_overflows() {
        use PositionGroup::*;
        let players = squad(&[("gk1", Goalkeeper), ("d1", Defender), ("gk2", Goalkeeper)]);
        let slots = FormationScheme::F433.slots();
        let assigned = assign(&players, &slots);

        let gk_slot = assigned.iter().find(|a| a.slot.group == Goalkeeper).unwrap();
        assert_eq!(gk_slot.player.unwrap().id.as_str(), "gk1");
        assert!(assigned.iter().filter_map(|a| a.player).all(|p| p.id.as_str() != "gk2"));

        let spill: Vec<&str> = overflow(&players, &slots).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(spill, vec!["gk2"]);
    }

    #[test]
    fn test_short_groups_leave_placeholders() {
        use PositionGroup::*;
        let players = squad(&[("d1", Defender), ("f1", Forward)]);
        let assigned = assign(&players, &FormationScheme::F442.slots());

        assert_eq!(assigned.len(), 11);
        assert_eq!(assigned.iter().filter(|a| a.is_placeholder()).count(), 9);
        let def: Vec<_> = assigned.iter().filter(|a| a.slot.group == Defender).collect();
        assert_eq!(def[0].player.unwrap().id.as_str(), "d1");
        assert!(def[1..].iter().all(|a| a.is_placeholder()));
    }

    #[test]
    fn test_empty_inputs() {
        let players: Vec<Player> = Vec::new();
        assert!(assign(&players, &[]).is_empty());
        let assigned = assign(&players, &FormationScheme::F352.slots());
        assert!(assigned.iter().all(|a| a.is_placeholder()));
    }

    #[test]
    fn test_accepts_borrowed_subsets() {
        let players = canonical_433();
        let forwards: Vec<&Player> = players.iter().filter(|p| p.group == PositionGroup::Forward).collect();
        let assigned = assign(forwards, &FormationScheme::F442.slots());
        assert_eq!(assigned.iter().filter(|a| !a.is_placeholder()).count(), 2);
    }
}

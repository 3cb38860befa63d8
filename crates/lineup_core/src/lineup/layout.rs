//! Pitch layout: catalog -> slot assignment -> collision resolver
//!
//! Occupied slots are run through the resolver in pitch order; empty slots
//! keep their catalog coordinates as placeholders.

use super::assignment::{assign, overflow};
use super::collision::{resolve_with, PlacementRequest};
use crate::config::ResolverConfig;
use crate::models::Player;
use crate::tactics::{FormationScheme, Orientation, Slot};

/// One pitch position: a slot, its player (or a placeholder) and where to
/// draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSpot<'a> {
    pub slot: Slot,
    pub player: Option<&'a Player>,
    pub x: f32,
    pub y: f32,
}

/// Immutable layout snapshot for one (players, scheme) input.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchLayout<'a> {
    pub scheme: FormationScheme,
    pub orientation: Orientation,
    pub spots: Vec<PitchSpot<'a>>,
    /// Players with no free slot in their group, in input order.
    pub overflow: Vec<&'a Player>,
}

impl<'a> PitchLayout<'a> {
    pub fn occupied(&self) -> impl Iterator<Item = &PitchSpot<'a>> {
        self.spots.iter().filter(|s| s.player.is_some())
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &PitchSpot<'a>> {
        self.spots.iter().filter(|s| s.player.is_none())
    }

    pub fn spot_of(&self, player_id: &str) -> Option<&PitchSpot<'a>> {
        self.spots.iter().find(|s| s.player.map(|p| p.id.as_str()) == Some(player_id))
    }
}

pub fn build_layout<'a, I>(
    players: I,
    scheme: FormationScheme,
    orientation: Orientation,
    resolver: &ResolverConfig,
) -> PitchLayout<'a>
where
    I: IntoIterator<Item = &'a Player>,
{
    let players: Vec<&'a Player> = players.into_iter().collect();
    let slots: Vec<Slot> = scheme.slots().iter().map(|s| s.projected(orientation)).collect();
    let assignments = assign(players.iter().copied(), &slots);

    let requests: Vec<PlacementRequest<usize>> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.player.is_some())
        .map(|(i, a)| PlacementRequest::new(i, a.slot.x, a.slot.y))
        .collect();
    let placements = resolve_with(&requests, resolver);

    let mut spots: Vec<PitchSpot<'a>> = assignments
        .iter()
        .map(|a| PitchSpot { slot: a.slot, player: a.player, x: a.slot.x, y: a.slot.y })
        .collect();
    for placement in placements {
        let spot = &mut spots[placement.id];
        spot.x = placement.x;
        spot.y = placement.y;
    }

    PitchLayout { scheme, orientation, spots, overflow: overflow(players.iter().copied(), &slots) }
}

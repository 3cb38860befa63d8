//! Collision resolver for pitch pins
//!
//! Entries are placed one at a time in input order. A candidate that lands
//! within `min_distance` of an already-placed entry is nudged back and forth
//! (vertical and horizontal step, sign flipping every retry) and clamped to
//! the pitch margins. After `max_attempts` nudges the candidate is accepted
//! as-is, so the result is bounded effort rather than a zero-overlap
//! guarantee.

use crate::config::ResolverConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Desired position for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlacementRequest<K> {
    pub id: K,
    pub desired_x: f32,
    pub desired_y: f32,
}

impl<K> PlacementRequest<K> {
    pub fn new(id: K, desired_x: f32, desired_y: f32) -> Self {
        Self { id, desired_x, desired_y }
    }
}

/// Resolved position for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Placement<K> {
    pub id: K,
    pub x: f32,
    pub y: f32,
}

impl<K> Placement<K> {
    /// Feed a placement back in as a request (used for re-resolving a layout).
    pub fn to_request(&self) -> PlacementRequest<K>
    where
        K: Clone,
    {
        PlacementRequest::new(self.id.clone(), self.x, self.y)
    }
}

#[inline]
fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    (ax - bx).hypot(ay - by)
}

/// Resolve with the default nudge parameters and the given separation.
pub fn resolve<K>(entries: &[PlacementRequest<K>], min_distance: f32) -> Vec<Placement<K>>
where
    K: Clone + fmt::Debug,
{
    resolve_with(entries, &ResolverConfig::with_min_distance(min_distance))
}

pub fn resolve_with<K>(entries: &[PlacementRequest<K>], config: &ResolverConfig) -> Vec<Placement<K>>
where
    K: Clone + fmt::Debug,
{
    let (lo, hi) = (config.min_coord, config.max_coord);
    let mut placed: Vec<Placement<K>> = Vec::with_capacity(entries.len());

    for entry in entries {
        let mut x = entry.desired_x.clamp(lo, hi);
        let mut y = entry.desired_y.clamp(lo, hi);
        let conflicts = |x: f32, y: f32, placed: &[Placement<K>]| {
            placed.iter().any(|q| distance(q.x, q.y, x, y) < config.min_distance)
        };

        let mut tries = 0;
        while tries < config.max_attempts && conflicts(x, y, &placed) {
            let dir = if tries % 2 == 0 { 1.0 } else { -1.0 };
            y = (y + dir * config.vertical_step).clamp(lo, hi);
            x = (x + dir * config.horizontal_step).clamp(lo, hi);
            tries += 1;
        }

        if tries == config.max_attempts && config.max_attempts > 0 && conflicts(x, y, &placed) {
            warn!(id = ?entry.id, x, y, "collision budget exhausted; accepting overlap");
        }

        placed.push(Placement { id: entry.id.clone(), x, y });
    }

    placed
}

/// Smallest pairwise distance among placements (`None` for fewer than two).
pub fn min_pairwise_distance<K>(placements: &[Placement<K>]) -> Option<f32> {
    let mut best: Option<f32> = None;
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            let d = distance(a.x, a.y, b.x, b.y);
            best = Some(best.map_or(d, |cur| cur.min(d)));
        }
    }
    best
}

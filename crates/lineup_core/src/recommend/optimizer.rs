//! Automated lineup recommendation
//!
//! Picks a starting eleven per position group for a scheme. Players already
//! in the eleven and locked players are must-starts; excluded and
//! unavailable players are never picked.

use crate::config::RecommenderConfig;
use crate::models::{Player, PlayerId, PositionGroup};
use crate::selection::SelectionState;
use crate::tactics::FormationScheme;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Start probability under which a player takes a flat penalty.
const STARTER_PROB_CUTOFF: f32 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub scheme: FormationScheme,
    /// Pitch order: GK, DEF, MID, FWD; best first within a group.
    pub starting_eleven: Vec<PlayerId>,
    pub bench: Vec<PlayerId>,
    pub team_expected_points: f32,
}

impl Recommendation {
    /// Replace the eleven of `state` with this recommendation.
    pub fn apply_to(&self, state: &SelectionState) -> SelectionState {
        state.with_starting_eleven(self.starting_eleven.iter().cloned())
    }

    /// Slots the scheme has but the pool could not fill.
    pub fn missing_slots(&self) -> usize {
        self.scheme.total_slots().saturating_sub(self.starting_eleven.len())
    }
}

/// Risk-adjusted expected points (risk_level: 0 safe .. 100 upside).
pub fn adjusted_score(player: &Player, risk_level: u8, prefer_defenders: bool) -> f32 {
    let risk = f32::from(risk_level.min(100)) / 100.0;
    let base = player.expected_points();
    let upside_boost = (player.ci_high - base) * risk;
    let safety_boost = (base - player.ci_low) * (1.0 - risk);
    let role_bonus =
        if prefer_defenders && player.group == PositionGroup::Defender { 0.35 } else { 0.0 };
    let xi_penalty = if player.xi_prob < STARTER_PROB_CUTOFF { -0.75 } else { 0.0 };
    base + upside_boost * 0.5 + safety_boost * 0.15 + role_bonus + xi_penalty
}

fn bench_score(player: &Player) -> f32 {
    let keeper_bonus = if player.group.is_goalkeeper() { 0.2 } else { 0.0 };
    player.xi_prob * 2.0 + player.expected_points() * 0.5 + keeper_bonus
}

fn sort_by_score_desc<'a>(players: &mut [&'a Player], config: &RecommenderConfig) {
    players.sort_by(|a, b| {
        let sa = adjusted_score(a, config.risk_level, config.prefer_defenders);
        let sb = adjusted_score(b, config.risk_level, config.prefer_defenders);
        sb.total_cmp(&sa)
    });
}

/// Pick up to `count` players of one group.
pub fn select_group<'a>(
    players: &'a [Player],
    group: PositionGroup,
    count: usize,
    selection: &SelectionState,
    config: &RecommenderConfig,
) -> Vec<&'a Player> {
    let must_start = |p: &Player| {
        let id = p.id.as_str();
        selection.is_in_xi(id) || selection.is_locked(id)
    };
    let healthy: Vec<&Player> = players
        .iter()
        .filter(|p| {
            p.group == group
                && p.is_available()
                && !selection.is_excluded(p.id.as_str())
                && (p.xi_prob > 0.0 || must_start(p))
        })
        .collect();

    // 1) Eleven picks and locked players first, in roster order
    let mut picked: Vec<&Player> =
        healthy.iter().copied().filter(|p| must_start(p)).take(count).collect();

    // 2) Eligible pool respecting the threshold, best first
    let mut eligible: Vec<&Player> = healthy
        .iter()
        .copied()
        .filter(|p| !must_start(p) && p.xi_prob >= config.xi_threshold)
        .collect();
    sort_by_score_desc(&mut eligible, config);
    for p in eligible {
        if picked.len() >= count {
            break;
        }
        picked.push(p);
    }

    // 3) Back-fill ignoring the threshold
    if picked.len() < count {
        let mut backfill: Vec<&Player> = healthy
            .iter()
            .copied()
            .filter(|p| !picked.iter().any(|x| x.id == p.id))
            .collect();
        sort_by_score_desc(&mut backfill, config);
        let missing = count - picked.len();
        picked.extend(backfill.into_iter().take(missing));
    }

    picked
}

/// Recommend a starting eleven and bench order for `scheme`.
pub fn recommend(
    players: &[Player],
    scheme: FormationScheme,
    selection: &SelectionState,
    config: &RecommenderConfig,
) -> Recommendation {
    let counts = scheme.counts();
    let xi: Vec<&Player> = PositionGroup::ALL
        .iter()
        .flat_map(|&group| select_group(players, group, counts.get(group), selection, config))
        .collect();

    let mut bench: Vec<&Player> = players
        .iter()
        .filter(|p| {
            !xi.iter().any(|x| x.id == p.id)
                && !selection.is_excluded(p.id.as_str())
                && p.xi_prob > 0.0
        })
        .collect();
    bench.sort_by(|a, b| bench_score(b).total_cmp(&bench_score(a)));

    let team_expected_points = xi.iter().map(|p| p.expected_points()).sum();
    debug!(
        scheme = %scheme,
        xi = xi.len(),
        bench = bench.len(),
        team_expected_points,
        "lineup recommendation built"
    );

    Recommendation {
        scheme,
        starting_eleven: xi.iter().map(|p| p.id.clone()).collect(),
        bench: bench.iter().map(|p| p.id.clone()).collect(),
        team_expected_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerStatus;

    fn player(id: &str, group: PositionGroup, low: f32, high: f32, xi: f32) -> Player {
        Player::new(id, id.to_uppercase(), group).with_projection(low, high, xi)
    }

    fn ids(v: &[PlayerId]) -> Vec<&str> {
        v.iter().map(|p| p.as_str()).collect()
    }

    fn pool() -> Vec<Player> {
        use PositionGroup::*;
        vec![
            player("gk1", Goalkeeper, 3.0, 6.0, 0.95),
            player("gk2", Goalkeeper, 2.0, 4.0, 0.10),
            player("d1", Defender, 4.0, 7.0, 0.9),
            player("d2", Defender, 3.0, 6.0, 0.9),
            player("d3", Defender, 3.5, 6.5, 0.85),
            player("d4", Defender, 2.0, 5.0, 0.8),
            player("d5", Defender, 1.0, 3.0, 0.5),
            player("m1", Midfielder, 5.0, 9.0, 0.9),
            player("m2", Midfielder, 4.0, 8.0, 0.9),
            player("m3", Midfielder, 3.0, 7.0, 0.8),
            player("m4", Midfielder, 2.0, 4.0, 0.3),
            player("f1", Forward, 6.0, 11.0, 0.95),
            player("f2", Forward, 5.0, 9.0, 0.9),
            player("f3", Forward, 4.0, 8.0, 0.75),
            player("f4", Forward, 1.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_adjusted_score_formula() {
        // base 6, upside 2*0.35=0.7, safety 2*0.65=1.3 -> 6 + 0.35 + 0.195
        let p = player("a", PositionGroup::Midfielder, 4.0, 8.0, 0.9);
        assert!((adjusted_score(&p, 35, false) - 6.545).abs() < 1e-4);
        let doubtful = player("b", PositionGroup::Midfielder, 4.0, 8.0, 0.5);
        assert!((adjusted_score(&doubtful, 35, false) - 5.795).abs() < 1e-4);
        let def = player("c", PositionGroup::Defender, 4.0, 8.0, 0.9);
        assert!((adjusted_score(&def, 35, true) - 6.895).abs() < 1e-4);
    }

    #[test]
    fn test_recommend_fills_433() {
        let players = pool();
        let rec = recommend(&players, FormationScheme::F433, &SelectionState::new(), &RecommenderConfig::default());
        assert_eq!(
            ids(&rec.starting_eleven),
            vec!["gk1", "d1", "d3", "d2", "d4", "m1", "m2", "m3", "f1", "f2", "f3"]
        );
        assert_eq!(rec.missing_slots(), 0);
        // f4 has no start probability and is left off the bench too
        assert_eq!(ids(&rec.bench), vec!["m4", "d5", "gk2"]);
        let expected: f32 = [4.5, 5.5, 5.0, 4.5, 3.5, 7.0, 6.0, 5.0, 8.5, 7.0, 6.0].iter().sum();
        assert!((rec.team_expected_points - expected).abs() < 1e-3);
    }

    #[test]
    fn test_locked_player_starts_and_excluded_player_does_not() {
        let players = pool();
        let selection = SelectionState::new().toggle_lock("d5").toggle_exclude("d1");
        let rec = recommend(&players, FormationScheme::F433, &selection, &RecommenderConfig::default());
        let xi = ids(&rec.starting_eleven);
        assert!(xi.contains(&"d5"));
        assert!(!xi.contains(&"d1"));
        assert!(!ids(&rec.bench).contains(&"d1"));
        assert_eq!(xi[1], "d5", "locked players lead their group");
    }

    #[test]
    fn test_unavailable_players_are_skipped() {
        let mut players = pool();
        players[0] = players[0].clone().with_status(PlayerStatus::Injured);
        let rec = recommend(&players, FormationScheme::F442, &SelectionState::new(), &RecommenderConfig::default());
        assert_eq!(rec.starting_eleven[0].as_str(), "gk2", "backfill ignores the threshold");
    }

    #[test]
    fn test_short_pool_reports_missing_slots() {
        let players = vec![player("gk1", PositionGroup::Goalkeeper, 3.0, 6.0, 0.9)];
        let rec = recommend(&players, FormationScheme::F352, &SelectionState::new(), &RecommenderConfig::default());
        assert_eq!(rec.starting_eleven.len(), 1);
        assert_eq!(rec.missing_slots(), 10);
    }

    #[test]
    fn test_manual_eleven_picks_are_kept() {
        let players = pool();
        let state = SelectionState::new().add_to_xi("d5").set_captain("d5");
        let rec = recommend(&players, FormationScheme::F433, &state, &RecommenderConfig::default());
        assert_eq!(
            ids(&rec.starting_eleven),
            vec!["gk1", "d5", "d1", "d3", "d2", "m1", "m2", "m3", "f1", "f2", "f3"]
        );
        assert!(ids(&rec.bench).contains(&"d4"));

        let next = rec.apply_to(&state);
        assert_eq!(next.starting_eleven().len(), 11);
        assert!(next.is_in_xi("d5"));
        assert!(next.is_captain("d5"));
    }

    #[test]
    fn test_eleven_picks_are_capped_per_group() {
        let players = pool();
        let state = ["d5", "d4", "d3", "d2", "d1"]
            .iter()
            .fold(SelectionState::new(), |s, id| s.add_to_xi(id));
        let rec = recommend(&players, FormationScheme::F433, &state, &RecommenderConfig::default());
        assert_eq!(&ids(&rec.starting_eleven)[1..5], &["d1", "d2", "d3", "d4"]);
        assert!(ids(&rec.bench).contains(&"d5"));
    }
}

use crate::models::{Player, PlayerId, PositionGroup};

/// Captaincy preference: attackers > midfielders > defenders > goalkeeper.
fn role_weight(group: PositionGroup) -> f32 {
    match group {
        PositionGroup::Forward => 0.8,
        PositionGroup::Midfielder => 0.4,
        PositionGroup::Defender => 0.1,
        PositionGroup::Goalkeeper => -0.6,
    }
}

/// Captain score: projection + starter reliability + upside lever + role and
/// set-piece bonuses.
pub fn captain_score(player: &Player, risk_level: u8) -> f32 {
    let base = player.expected_points();
    let mut score = base;
    score += player.xi_prob * 2.2;
    score += (player.ci_high - base) * (f32::from(risk_level.min(100)) / 100.0) * 0.8;
    score += role_weight(player.group);
    if player.set_pieces.penalties {
        score += 0.6;
    }
    if player.set_pieces.free_kicks {
        score += 0.25;
    }
    if player.set_pieces.corners {
        score += 0.15;
    }
    score
}

/// Best two players of `eleven` as (captain, vice). Ties keep roster order.
pub fn suggest_captaincy(eleven: &[&Player], risk_level: u8) -> (Option<PlayerId>, Option<PlayerId>) {
    let mut ranked: Vec<(&Player, f32)> =
        eleven.iter().map(|p| (*p, captain_score(p, risk_level))).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let captain = ranked.first().map(|(p, _)| p.id.clone());
    let vice = ranked
        .iter()
        .skip(1)
        .map(|(p, _)| p.id.clone())
        .find(|id| Some(id) != captain.as_ref());
    (captain, vice)
}

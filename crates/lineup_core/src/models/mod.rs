pub mod player;

pub use player::{
    merge_players, Player, PlayerId, PlayerStatus, PositionGroup, RiskTag, SetPieces,
};

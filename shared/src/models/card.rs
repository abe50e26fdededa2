//! Match card events

use serde::{Deserialize, Serialize};

/// Card colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CardType {
    Yellow,
    Red,
}

/// A card shown during a match (read-only slice of the match event log)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CardEvent {
    pub event_id: i64,
    pub season_id: i64,
    pub match_id: i64,
    pub team_id: i64,
    pub player_id: i64,
    pub card_type: CardType,
    /// Match minute the card was shown
    pub minute: i32,
}

//! Card Summary Model (球员红黄牌汇总)

use serde::{Deserialize, Serialize};

/// Per-player card ledger for one season.
///
/// Derived data: a recalculation replaces the whole set, rows are never
/// incremented in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CardSummary {
    pub season_id: i64,
    pub player_id: i64,
    pub team_id: i64,
    /// Raw yellow count, including yellows later paired into a sending-off
    pub yellow_cards: i64,
    pub red_cards: i64,
    /// Matches the player's team has completed this season
    pub matches_played: i64,
}

/// Card summary list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardSummaryQuery {
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
}

//! Fixture, season and roster models
//!
//! These rows belong to the fixture / roster collaborators; the discipline
//! engine only reads them.

use serde::{Deserialize, Serialize};

/// Season (赛季)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Season {
    pub season_id: i64,
    pub name: String,
}

/// Total, season-scoped processing order of matches.
///
/// Compared as (kickoff, matchday, match id); the match id breaks ties between
/// matches sharing a kickoff time. Field order defines the derived `Ord` and
/// must not change, recomputation depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchSequenceKey {
    /// Kickoff timestamp (Unix millis)
    pub kickoff_at: i64,
    pub matchday: i32,
    pub match_id: i64,
}

/// Fixture list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Match {
    pub match_id: i64,
    pub season_id: i64,
    pub matchday: i32,
    /// Kickoff timestamp (Unix millis)
    pub kickoff_at: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

impl Match {
    pub fn sequence_key(&self) -> MatchSequenceKey {
        MatchSequenceKey {
            kickoff_at: self.kickoff_at,
            matchday: self.matchday,
            match_id: self.match_id,
        }
    }

    /// Whether the team plays in this match
    pub fn involves(&self, team_id: i64) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// One team finishing one match, as reported by the fixture service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MatchCompletion {
    pub season_id: i64,
    pub match_id: i64,
    pub team_id: i64,
    /// Unix millis
    pub completed_at: i64,
}

/// "Match completed" notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCompleted {
    pub team_id: i64,
}

/// Result of a completion notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingOutcome {
    /// False when the (match, team) completion had already been recorded
    pub recorded: bool,
    /// Suspensions whose served count moved
    pub advanced: u32,
    /// Suspensions that reached `served` with this match
    pub completed: u32,
}

/// Player-to-team assignment for a season (名单)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RosterEntry {
    pub season_id: i64,
    pub player_id: i64,
    pub team_id: i64,
}

//! Suspension Model (停赛)

use serde::{Deserialize, Serialize};

/// Why a suspension was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SuspensionReason {
    /// Straight red card
    RedCard,
    /// Second yellow card in the same match
    TwoYellowCards,
    ViolentConduct,
    /// Season yellow tally reached the accumulation threshold
    Accumulation,
    Other,
}

/// Suspension lifecycle status
///
/// ```text
/// active ──(serving complete)──> served
///   │                              │
///   └──(admin)──> cancelled <──(admin)
///
/// active | served | cancelled ──(recalculation)──> archived
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SuspensionStatus {
    Active,
    Served,
    Cancelled,
    Archived,
}

impl SuspensionStatus {
    /// Whether `self -> next` is an edge of the lifecycle state machine
    pub fn can_transition_to(self, next: SuspensionStatus) -> bool {
        use SuspensionStatus::*;
        matches!(
            (self, next),
            (Active, Served)
                | (Active, Cancelled)
                | (Served, Cancelled)
                | (Active, Archived)
                | (Served, Archived)
                | (Cancelled, Archived)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuspensionStatus::Active => "active",
            SuspensionStatus::Served => "served",
            SuspensionStatus::Cancelled => "cancelled",
            SuspensionStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for SuspensionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted suspension record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Suspension {
    pub suspension_id: i64,
    pub season_id: i64,
    pub player_id: i64,
    pub team_id: i64,
    pub reason: SuspensionReason,
    /// Match in which the (first) triggering card was shown
    pub trigger_match_id: i64,
    /// Total matches owed, grows when further bans stack onto an active one
    pub matches_banned: i64,
    pub served_matches: i64,
    pub status: SuspensionStatus,
    /// Unix millis
    pub created_at: i64,
}

impl Suspension {
    /// Matches still to be served
    pub fn remaining(&self) -> i64 {
        (self.matches_banned - self.served_matches).max(0)
    }
}

/// Suspension list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuspensionQuery {
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub status: Option<SuspensionStatus>,
    pub reason: Option<SuspensionReason>,
}

/// Outcome of a season recalculation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcSummary {
    /// Suspension rows inserted by this pass
    pub created: u64,
    /// Previously live rows flipped to `archived`
    pub archived: u64,
    /// Card summary rows written
    pub summaries: u64,
    /// Decisions emitted by the rule engine (stacked ones included)
    pub decisions: u64,
}

/// Lineup eligibility answer for one player and one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub player_id: i64,
    pub match_id: i64,
    pub suspended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_id: Option<i64>,
    /// Matches of the ban still outstanding at the queried match
    pub remaining_matches: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use SuspensionStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Active.can_transition_to(Served));
        assert!(Active.can_transition_to(Cancelled));
        assert!(Served.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Archived));
        assert!(Served.can_transition_to(Archived));
        assert!(Cancelled.can_transition_to(Archived));
    }

    #[test]
    fn test_archived_is_terminal() {
        for next in [Active, Served, Cancelled, Archived] {
            assert!(!Archived.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_reactivation() {
        assert!(!Served.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_serde_casing() {
        assert_eq!(serde_json::to_string(&Active).unwrap(), "\"active\"");
        assert_eq!(
            serde_json::to_string(&SuspensionReason::TwoYellowCards).unwrap(),
            "\"TWO_YELLOW_CARDS\""
        );
        let reason: SuspensionReason = serde_json::from_str("\"ACCUMULATION\"").unwrap();
        assert_eq!(reason, SuspensionReason::Accumulation);
    }

    #[test]
    fn test_remaining() {
        let s = Suspension {
            suspension_id: 1,
            season_id: 7,
            player_id: 42,
            team_id: 1,
            reason: SuspensionReason::RedCard,
            trigger_match_id: 1,
            matches_banned: 3,
            served_matches: 1,
            status: Active,
            created_at: 0,
        };
        assert_eq!(s.remaining(), 2);
    }
}

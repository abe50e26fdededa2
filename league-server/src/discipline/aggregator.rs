//! Card Aggregator
//!
//! Validates a season's card events against the fixture list and roster,
//! puts them into processing order and folds them into the per-player
//! [`CardSummary`] ledger. Pure: everything it needs arrives in a
//! [`SeasonSnapshot`].

use super::error::{DisciplineError, DisciplineResult};
use shared::models::{
    CardEvent, CardSummary, CardType, Match, MatchCompletion, MatchSequenceKey, RosterEntry,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Everything a recalculation reads for one season
#[derive(Debug, Clone, Default)]
pub struct SeasonSnapshot {
    pub season_id: i64,
    /// Fixture list, any order
    pub matches: Vec<Match>,
    pub roster: Vec<RosterEntry>,
    pub completions: Vec<MatchCompletion>,
    pub events: Vec<CardEvent>,
}

impl SeasonSnapshot {
    pub fn match_index(&self) -> HashMap<i64, &Match> {
        self.matches.iter().map(|m| (m.match_id, m)).collect()
    }

    /// Fixture list in sequence order
    pub fn ordered_matches(&self) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self.matches.iter().collect();
        matches.sort_by_key(|m| m.sequence_key());
        matches
    }
}

/// A validated event carrying its match's sequence key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEvent {
    pub key: MatchSequenceKey,
    pub event: CardEvent,
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Events sorted by (sequence key, minute, event id)
    pub events: Vec<OrderedEvent>,
    /// One row per player, ordered by player id
    pub summaries: Vec<CardSummary>,
}

/// Validate, order and fold the season's card events.
///
/// The first invalid event (lowest event id) aborts the whole pass.
pub fn aggregate(snapshot: &SeasonSnapshot) -> DisciplineResult<Aggregation> {
    let events = order_events(snapshot)?;
    let summaries = build_summaries(snapshot, &events);
    Ok(Aggregation { events, summaries })
}

fn order_events(snapshot: &SeasonSnapshot) -> DisciplineResult<Vec<OrderedEvent>> {
    let matches = snapshot.match_index();
    let roster: HashMap<i64, i64> = snapshot
        .roster
        .iter()
        .map(|r| (r.player_id, r.team_id))
        .collect();
    let known_teams: HashSet<i64> = snapshot
        .roster
        .iter()
        .map(|r| r.team_id)
        .chain(
            snapshot
                .matches
                .iter()
                .flat_map(|m| [m.home_team_id, m.away_team_id]),
        )
        .collect();

    let mut raw: Vec<&CardEvent> = snapshot.events.iter().collect();
    raw.sort_by_key(|e| e.event_id);

    let mut ordered = Vec::with_capacity(raw.len());
    for event in raw {
        let Some(m) = matches.get(&event.match_id) else {
            return Err(DisciplineError::UnknownMatch {
                event_id: event.event_id,
                match_id: event.match_id,
            });
        };
        if !known_teams.contains(&event.team_id) {
            return Err(DisciplineError::UnknownTeam {
                event_id: event.event_id,
                team_id: event.team_id,
            });
        }
        let Some(&roster_team_id) = roster.get(&event.player_id) else {
            return Err(DisciplineError::UnknownPlayer {
                event_id: event.event_id,
                player_id: event.player_id,
            });
        };
        if roster_team_id != event.team_id {
            return Err(DisciplineError::TeamMismatch {
                event_id: event.event_id,
                player_id: event.player_id,
                event_team_id: event.team_id,
                roster_team_id,
            });
        }
        if !m.involves(event.team_id) {
            return Err(DisciplineError::EventTeamNotInMatch {
                event_id: event.event_id,
                team_id: event.team_id,
                match_id: event.match_id,
            });
        }
        ordered.push(OrderedEvent {
            key: m.sequence_key(),
            event: event.clone(),
        });
    }

    ordered.sort_by_key(|o| (o.key, o.event.minute, o.event.event_id));
    Ok(ordered)
}

fn build_summaries(snapshot: &SeasonSnapshot, events: &[OrderedEvent]) -> Vec<CardSummary> {
    // (yellow, red) per player, raw counts
    let mut tally: HashMap<i64, (i64, i64)> = HashMap::new();
    for OrderedEvent { event, .. } in events {
        let entry = tally.entry(event.player_id).or_default();
        match event.card_type {
            CardType::Yellow => entry.0 += 1,
            CardType::Red => entry.1 += 1,
        }
    }

    // Completed matches per team, only fixtures of this season count
    let season_matches: HashSet<i64> = snapshot.matches.iter().map(|m| m.match_id).collect();
    let mut played: HashMap<i64, HashSet<i64>> = HashMap::new();
    for c in &snapshot.completions {
        if season_matches.contains(&c.match_id) {
            played.entry(c.team_id).or_default().insert(c.match_id);
        }
    }

    let mut summaries = BTreeMap::new();
    for entry in &snapshot.roster {
        let (yellow_cards, red_cards) = tally.get(&entry.player_id).copied().unwrap_or_default();
        let matches_played = played.get(&entry.team_id).map_or(0, |s| s.len() as i64);
        if yellow_cards == 0 && red_cards == 0 && matches_played == 0 {
            continue;
        }
        summaries.insert(
            entry.player_id,
            CardSummary {
                season_id: snapshot.season_id,
                player_id: entry.player_id,
                team_id: entry.team_id,
                yellow_cards,
                red_cards,
                matches_played,
            },
        );
    }
    summaries.into_values().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEAM_A: i64 = 1;
    pub(crate) const TEAM_B: i64 = 2;
    pub(crate) const TEAM_C: i64 = 3;

    pub(crate) fn fixture(match_id: i64, matchday: i32, home: i64, away: i64) -> Match {
        Match {
            match_id,
            season_id: 7,
            matchday,
            kickoff_at: 1_700_000_000_000 + i64::from(matchday) * 604_800_000,
            home_team_id: home,
            away_team_id: away,
        }
    }

    pub(crate) fn card(
        event_id: i64,
        match_id: i64,
        team_id: i64,
        player_id: i64,
        card_type: CardType,
        minute: i32,
    ) -> CardEvent {
        CardEvent {
            event_id,
            season_id: 7,
            match_id,
            team_id,
            player_id,
            card_type,
            minute,
        }
    }

    pub(crate) fn roster(entries: &[(i64, i64)]) -> Vec<RosterEntry> {
        entries
            .iter()
            .map(|&(player_id, team_id)| RosterEntry {
                season_id: 7,
                player_id,
                team_id,
            })
            .collect()
    }

    pub(crate) fn completion(match_id: i64, team_id: i64) -> MatchCompletion {
        MatchCompletion {
            season_id: 7,
            match_id,
            team_id,
            completed_at: 0,
        }
    }

    pub(crate) fn base_snapshot() -> SeasonSnapshot {
        SeasonSnapshot {
            season_id: 7,
            matches: vec![
                fixture(1, 1, TEAM_A, TEAM_B),
                fixture(2, 2, TEAM_C, TEAM_A),
                fixture(3, 3, TEAM_A, TEAM_B),
                fixture(4, 4, TEAM_B, TEAM_C),
            ],
            roster: roster(&[(42, TEAM_A), (43, TEAM_A), (50, TEAM_B)]),
            completions: vec![],
            events: vec![],
        }
    }

    #[test]
    fn test_events_sorted_by_sequence_then_minute_then_id() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![
            card(10, 3, TEAM_A, 42, CardType::Yellow, 5),
            card(11, 1, TEAM_A, 42, CardType::Yellow, 80),
            card(12, 1, TEAM_B, 50, CardType::Yellow, 20),
            card(9, 1, TEAM_A, 43, CardType::Yellow, 20),
        ];

        let agg = aggregate(&snapshot).unwrap();
        let ids: Vec<i64> = agg.events.iter().map(|o| o.event.event_id).collect();
        assert_eq!(ids, vec![9, 12, 11, 10]);
    }

    #[test]
    fn test_raw_counts_include_paired_yellows() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 30),
            card(2, 1, TEAM_A, 42, CardType::Yellow, 70),
            card(3, 3, TEAM_A, 42, CardType::Red, 12),
        ];
        snapshot.completions = vec![completion(1, TEAM_A), completion(2, TEAM_A)];

        let agg = aggregate(&snapshot).unwrap();
        let p42 = agg.summaries.iter().find(|s| s.player_id == 42).unwrap();
        assert_eq!(p42.yellow_cards, 2);
        assert_eq!(p42.red_cards, 1);
        assert_eq!(p42.matches_played, 2);
        assert_eq!(p42.team_id, TEAM_A);
    }

    #[test]
    fn test_summary_rows_for_card_or_completed_match() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![card(1, 1, TEAM_B, 50, CardType::Yellow, 10)];

        // 没有完赛记录时只有领到牌的球员
        let agg = aggregate(&snapshot).unwrap();
        assert_eq!(agg.summaries.len(), 1);
        assert_eq!(agg.summaries[0].player_id, 50);

        snapshot.completions = vec![completion(1, TEAM_A)];
        let agg = aggregate(&snapshot).unwrap();
        let players: Vec<i64> = agg.summaries.iter().map(|s| s.player_id).collect();
        assert_eq!(players, vec![42, 43, 50]);
    }

    #[test]
    fn test_unknown_match_names_event() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![card(5, 99, TEAM_A, 42, CardType::Yellow, 10)];
        let err = aggregate(&snapshot).unwrap_err();
        assert!(matches!(
            err,
            DisciplineError::UnknownMatch {
                event_id: 5,
                match_id: 99
            }
        ));
    }

    #[test]
    fn test_unknown_player() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![card(6, 1, TEAM_A, 777, CardType::Red, 10)];
        let err = aggregate(&snapshot).unwrap_err();
        assert_eq!(err.event_id(), Some(6));
        assert!(matches!(err, DisciplineError::UnknownPlayer { .. }));
    }

    #[test]
    fn test_unknown_team() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![card(7, 1, 555, 42, CardType::Yellow, 10)];
        let err = aggregate(&snapshot).unwrap_err();
        assert!(matches!(err, DisciplineError::UnknownTeam { team_id: 555, .. }));
    }

    #[test]
    fn test_roster_mismatch() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![card(8, 1, TEAM_B, 42, CardType::Yellow, 10)];
        let err = aggregate(&snapshot).unwrap_err();
        assert!(matches!(
            err,
            DisciplineError::TeamMismatch {
                roster_team_id: TEAM_A,
                ..
            }
        ));
    }

    #[test]
    fn test_team_not_in_match() {
        let mut snapshot = base_snapshot();
        // match 4 is B vs C
        snapshot.events = vec![card(9, 4, TEAM_A, 42, CardType::Yellow, 10)];
        let err = aggregate(&snapshot).unwrap_err();
        assert!(matches!(err, DisciplineError::EventTeamNotInMatch { .. }));
    }

    #[test]
    fn test_first_bad_event_wins() {
        let mut snapshot = base_snapshot();
        snapshot.events = vec![
            card(30, 99, TEAM_A, 42, CardType::Yellow, 10),
            card(20, 1, TEAM_A, 777, CardType::Yellow, 10),
        ];
        assert_eq!(aggregate(&snapshot).unwrap_err().event_id(), Some(20));
    }
}

//! Suspension Rule Engine
//!
//! Turns ordered card events into suspension decisions. Precedence per event:
//!
//! 1. 直接红牌 → `RED_CARD`
//! 2. 同场第二张黄牌 → `TWO_YELLOW_CARDS` (both yellows are consumed)
//! 3. 未被消耗的黄牌累计到阈值倍数 → `ACCUMULATION`
//!
//! The engine looks ahead inside each match, so a yellow that is later paired
//! never touches the accumulation tally.

use super::aggregator::OrderedEvent;
use super::policy::DisciplinePolicy;
use shared::models::{CardType, MatchSequenceKey, SuspensionReason};
use std::collections::HashMap;

/// A suspension the rules say should exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub player_id: i64,
    pub team_id: i64,
    pub reason: SuspensionReason,
    pub trigger_match_id: i64,
    pub trigger_key: MatchSequenceKey,
    pub matches_banned: i64,
}

/// Yellow pair of one player inside one match
#[derive(Debug, Clone, Copy)]
struct YellowPair {
    first_event_id: i64,
    second_event_id: i64,
    second_minute: i32,
}

/// Evaluate the full ordered event history of a season.
///
/// `events` must already be in processing order (see the aggregator).
pub fn evaluate(events: &[OrderedEvent], policy: &DisciplinePolicy) -> Vec<Decision> {
    let threshold = i64::from(policy.accumulation_threshold.max(1));
    let mut tally: HashMap<i64, i64> = HashMap::new();
    let mut decisions = Vec::new();

    for group in events.chunk_by(|a, b| a.key == b.key) {
        let pairs = yellow_pairs(group);

        for OrderedEvent { key, event } in group {
            let decide = |reason: SuspensionReason, banned: u32| Decision {
                player_id: event.player_id,
                team_id: event.team_id,
                reason,
                trigger_match_id: event.match_id,
                trigger_key: *key,
                matches_banned: i64::from(banned),
            };
            let pair = pairs.get(&event.player_id);

            match event.card_type {
                CardType::Red => {
                    // 第二黄同一分钟的红牌只是罚下的记录
                    if pair.is_some_and(|p| p.second_minute == event.minute) {
                        continue;
                    }
                    decisions.push(decide(SuspensionReason::RedCard, policy.red_card_ban));
                }
                CardType::Yellow => match pair {
                    Some(p) if p.first_event_id == event.event_id => {}
                    Some(p) if p.second_event_id == event.event_id => {
                        decisions.push(decide(
                            SuspensionReason::TwoYellowCards,
                            policy.second_yellow_ban,
                        ));
                    }
                    _ => {
                        let count = tally.entry(event.player_id).or_insert(0);
                        *count += 1;
                        if *count % threshold == 0 {
                            tracing::debug!(
                                player_id = event.player_id,
                                yellow_tally = *count,
                                match_id = event.match_id,
                                "Accumulation threshold reached"
                            );
                            decisions.push(decide(
                                SuspensionReason::Accumulation,
                                policy.accumulation_ban,
                            ));
                        }
                    }
                },
            }
        }
    }

    decisions
}

/// First two yellows of each player in one match. A third one stays unpaired.
fn yellow_pairs(group: &[OrderedEvent]) -> HashMap<i64, YellowPair> {
    let mut firsts: HashMap<i64, i64> = HashMap::new();
    let mut pairs = HashMap::new();
    for OrderedEvent { event, .. } in group {
        if event.card_type != CardType::Yellow || pairs.contains_key(&event.player_id) {
            continue;
        }
        match firsts.get(&event.player_id) {
            Some(&first_event_id) => {
                pairs.insert(
                    event.player_id,
                    YellowPair {
                        first_event_id,
                        second_event_id: event.event_id,
                        second_minute: event.minute,
                    },
                );
            }
            None => {
                firsts.insert(event.player_id, event.event_id);
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discipline::aggregator::tests::{TEAM_A, TEAM_B, base_snapshot, card, fixture};
    use crate::discipline::aggregator::{SeasonSnapshot, aggregate};
    use shared::models::CardEvent;

    fn run(snapshot: &SeasonSnapshot, policy: &DisciplinePolicy) -> Vec<Decision> {
        let agg = aggregate(snapshot).unwrap();
        evaluate(&agg.events, policy)
    }

    fn with_events(events: Vec<CardEvent>) -> SeasonSnapshot {
        let mut snapshot = base_snapshot();
        snapshot.events = events;
        snapshot
    }

    #[test]
    fn test_two_yellows_same_match() {
        // Season 7, player 42 of team A: 30' and 70' in match 1
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 30),
            card(2, 1, TEAM_A, 42, CardType::Yellow, 70),
        ]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::TwoYellowCards);
        assert_eq!(decisions[0].trigger_match_id, 1);
        assert_eq!(decisions[0].matches_banned, 1);
        assert_eq!(decisions[0].player_id, 42);
    }

    #[test]
    fn test_red_card() {
        let snapshot = with_events(vec![card(1, 2, TEAM_A, 42, CardType::Red, 55)]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::RedCard);
        assert_eq!(decisions[0].trigger_match_id, 2);
    }

    #[test]
    fn test_red_after_second_yellow_is_not_a_second_ban() {
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 30),
            card(2, 1, TEAM_A, 42, CardType::Yellow, 70),
            card(3, 1, TEAM_A, 42, CardType::Red, 70),
        ]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::TwoYellowCards);
    }

    #[test]
    fn test_red_later_in_match_still_counts() {
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 1, TEAM_A, 42, CardType::Red, 60),
        ]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::RedCard);
    }

    #[test]
    fn test_accumulation_at_three_and_six() {
        let events = vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 2, TEAM_A, 42, CardType::Yellow, 10),
            card(3, 3, TEAM_A, 42, CardType::Yellow, 10),
        ];
        let mut snapshot = with_events(events);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::Accumulation);
        assert_eq!(decisions[0].trigger_match_id, 3);

        // three more yellows in later fixtures
        snapshot.matches.push(fixture(5, 5, TEAM_A, TEAM_B));
        snapshot.matches.push(fixture(6, 6, TEAM_B, TEAM_A));
        snapshot.matches.push(fixture(7, 7, TEAM_A, TEAM_B));
        for (i, m) in [5, 6, 7].into_iter().enumerate() {
            snapshot
                .events
                .push(card(10 + i as i64, m, TEAM_A, 42, CardType::Yellow, 44));
        }
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        let triggers: Vec<i64> = decisions.iter().map(|d| d.trigger_match_id).collect();
        assert_eq!(triggers, vec![3, 7]);
        assert!(
            decisions
                .iter()
                .all(|d| d.reason == SuspensionReason::Accumulation)
        );
    }

    #[test]
    fn test_paired_yellows_never_accumulate() {
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 2, TEAM_A, 42, CardType::Yellow, 20),
            card(3, 2, TEAM_A, 42, CardType::Yellow, 80),
            card(4, 3, TEAM_A, 42, CardType::Yellow, 5),
        ]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        // 1 unpaired + pair + 1 unpaired = tally 2, no accumulation
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].reason, SuspensionReason::TwoYellowCards);
        assert_eq!(decisions[0].trigger_match_id, 2);
    }

    #[test]
    fn test_third_yellow_in_match_is_plain_yellow() {
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 1, TEAM_A, 42, CardType::Yellow, 20),
            card(3, 1, TEAM_A, 42, CardType::Yellow, 30),
            card(4, 2, TEAM_A, 42, CardType::Yellow, 30),
            card(5, 3, TEAM_A, 42, CardType::Yellow, 30),
        ]);
        let decisions = run(&snapshot, &DisciplinePolicy::default());
        let reasons: Vec<SuspensionReason> = decisions.iter().map(|d| d.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SuspensionReason::TwoYellowCards,
                SuspensionReason::Accumulation
            ]
        );
        assert_eq!(decisions[1].trigger_match_id, 3);
    }

    #[test]
    fn test_tally_is_per_player() {
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 1, TEAM_A, 43, CardType::Yellow, 10),
            card(3, 2, TEAM_A, 42, CardType::Yellow, 10),
            card(4, 3, TEAM_A, 43, CardType::Yellow, 10),
        ]);
        assert!(run(&snapshot, &DisciplinePolicy::default()).is_empty());
    }

    #[test]
    fn test_policy_values_apply() {
        let policy = DisciplinePolicy {
            accumulation_threshold: 2,
            red_card_ban: 3,
            second_yellow_ban: 2,
            accumulation_ban: 1,
        };
        let snapshot = with_events(vec![
            card(1, 1, TEAM_A, 42, CardType::Yellow, 10),
            card(2, 2, TEAM_A, 42, CardType::Yellow, 10),
            card(3, 3, TEAM_B, 50, CardType::Red, 10),
        ]);
        let decisions = run(&snapshot, &policy);
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].reason, SuspensionReason::Accumulation);
        assert_eq!(decisions[0].matches_banned, 1);
        assert_eq!(decisions[1].reason, SuspensionReason::RedCard);
        assert_eq!(decisions[1].matches_banned, 3);
    }
}

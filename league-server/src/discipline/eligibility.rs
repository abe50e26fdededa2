//! Eligibility Query Service (球员是否停赛)
//!
//! Read-only, runs on the pool without taking the season lock.

use super::error::{DisciplineError, DisciplineResult};
use crate::db::repository::{fixture, roster, suspension};
use shared::models::{Eligibility, Match, MatchCompletion, Suspension};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::collections::HashSet;

pub async fn check(
    pool: &SqlitePool,
    player_id: i64,
    match_id: i64,
) -> DisciplineResult<Eligibility> {
    let target = fixture::find_match(pool, match_id)
        .await?
        .ok_or(DisciplineError::MatchNotFound(match_id))?;
    let entry = roster::find_player(pool, target.season_id, player_id)
        .await?
        .ok_or(DisciplineError::PlayerNotFound {
            season_id: target.season_id,
            player_id,
        })?;

    let active: Vec<Suspension> =
        suspension::find_active_for_player(pool, target.season_id, player_id)
            .await?
            .into_iter()
            .filter(|s| s.team_id == entry.team_id)
            .collect();

    let mut answer = Eligibility {
        player_id,
        match_id,
        suspended: false,
        suspension_id: None,
        remaining_matches: 0,
    };
    if active.is_empty() {
        return Ok(answer);
    }

    let fixtures = fixture::find_by_season(pool, target.season_id).await?;
    let completions = fixture::find_completions_by_season(pool, target.season_id).await?;
    let window = ServingWindow {
        fixtures: &fixtures,
        completions: &completions,
        now: now_millis(),
    };
    for s in &active {
        if let Some(remaining) = window.remaining_at(s, &target) {
            answer.suspended = true;
            answer.suspension_id = Some(s.suspension_id);
            answer.remaining_matches = remaining;
            break;
        }
    }
    Ok(answer)
}

/// Season state an active suspension is measured against
pub struct ServingWindow<'a> {
    pub fixtures: &'a [Match],
    pub completions: &'a [MatchCompletion],
    /// Unix millis
    pub now: i64,
}

impl ServingWindow<'_> {
    /// Ban matches still outstanding when `target` kicks off, `None` when the
    /// suspension does not cover it.
    ///
    /// Starts from what is left after `served_matches`. Team fixtures strictly
    /// between the trigger and `target` that are not completed yet but still
    /// ahead of `now` will be played first and serve one match each. Fixtures
    /// whose kickoff passed without a completion (postponed) serve nothing.
    pub fn remaining_at(&self, s: &Suspension, target: &Match) -> Option<i64> {
        let trigger = self
            .fixtures
            .iter()
            .find(|m| m.match_id == s.trigger_match_id)?;
        let (from, to) = (trigger.sequence_key(), target.sequence_key());
        if from >= to {
            return None;
        }
        let completed: HashSet<i64> = self
            .completions
            .iter()
            .filter(|c| c.team_id == s.team_id)
            .map(|c| c.match_id)
            .collect();
        let upcoming = self
            .fixtures
            .iter()
            .filter(|m| m.involves(s.team_id) && !completed.contains(&m.match_id))
            .filter(|m| m.kickoff_at > self.now)
            .filter(|m| {
                let key = m.sequence_key();
                from < key && key < to
            })
            .count() as i64;
        let remaining = s.remaining() - upcoming;
        (remaining > 0).then_some(remaining)
    }
}

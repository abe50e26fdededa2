//! Suspension Lifecycle Manager
//!
//! Owns every write to suspension records:
//! - creation / stacking of decisions (replayed in memory during recalculation)
//! - serving as the team completes later matches
//! - admin cancellation

use super::error::{DisciplineError, DisciplineResult};
use super::rules::Decision;
use crate::db::repository::{fixture, suspension};
use shared::models::{
    Match, MatchCompletion, ServingOutcome, Suspension, SuspensionReason, SuspensionStatus,
};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};

/// Identity used to carry an admin cancellation across a recalculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarryKey {
    pub player_id: i64,
    pub team_id: i64,
    pub reason: SuspensionReason,
    pub trigger_match_id: i64,
}

impl From<&Suspension> for CarryKey {
    fn from(s: &Suspension) -> Self {
        Self {
            player_id: s.player_id,
            team_id: s.team_id,
            reason: s.reason,
            trigger_match_id: s.trigger_match_id,
        }
    }
}

/// Suspension state computed by a replay, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSuspension {
    pub player_id: i64,
    pub team_id: i64,
    pub reason: SuspensionReason,
    pub trigger_match_id: i64,
    pub matches_banned: i64,
    pub served_matches: i64,
    pub status: SuspensionStatus,
}

impl DraftSuspension {
    fn carry_key(&self) -> CarryKey {
        CarryKey {
            player_id: self.player_id,
            team_id: self.team_id,
            reason: self.reason,
            trigger_match_id: self.trigger_match_id,
        }
    }
}

/// One serving step: served count after the match and the resulting status
pub fn next_progress(served_matches: i64, matches_banned: i64) -> (i64, SuspensionStatus) {
    let served = (served_matches + 1).min(matches_banned);
    let status = if served >= matches_banned {
        SuspensionStatus::Served
    } else {
        SuspensionStatus::Active
    };
    (served, status)
}

/// Admin cancellations to carry into a replay, with the total number of
/// matches the cancelled record covered when it was archived
pub type CancelledBans = HashMap<CarryKey, i64>;

/// Chronological simulation of the season.
///
/// Walks the fixture list in sequence order; at each match the completions
/// are applied first (serving suspensions triggered earlier), then the
/// decisions triggered in that match (create, or stack onto the player's
/// active record). A created record whose identity was cancelled before the
/// recalculation starts out `cancelled`.
///
/// A cancelled record keeps serving in the simulation and absorbs the
/// decisions that stacked onto it before it was cancelled, up to the total
/// it covered then. Anything beyond that total is a new ban.
pub fn replay(
    ordered_matches: &[&Match],
    completions: &[MatchCompletion],
    decisions: &[Decision],
    cancelled: &CancelledBans,
) -> Vec<DraftSuspension> {
    let mut completed_by_match: HashMap<i64, HashSet<i64>> = HashMap::new();
    for c in completions {
        completed_by_match
            .entry(c.match_id)
            .or_default()
            .insert(c.team_id);
    }
    let mut decisions_by_match: HashMap<i64, Vec<&Decision>> = HashMap::new();
    for d in decisions {
        decisions_by_match
            .entry(d.trigger_match_id)
            .or_default()
            .push(d);
    }

    let mut drafts: Vec<DraftSuspension> = Vec::new();
    // draft index -> matches_banned cap of a carried cancellation
    let mut caps: HashMap<usize, i64> = HashMap::new();
    for m in ordered_matches {
        if let Some(teams) = completed_by_match.get(&m.match_id) {
            for (idx, draft) in drafts.iter_mut().enumerate() {
                if !teams.contains(&draft.team_id) {
                    continue;
                }
                match draft.status {
                    SuspensionStatus::Active => {
                        let (served, status) =
                            next_progress(draft.served_matches, draft.matches_banned);
                        draft.served_matches = served;
                        draft.status = status;
                    }
                    SuspensionStatus::Cancelled
                        if caps.contains_key(&idx)
                            && draft.served_matches < draft.matches_banned =>
                    {
                        draft.served_matches += 1;
                    }
                    _ => {}
                }
            }
        }

        let Some(triggered) = decisions_by_match.get(&m.match_id) else {
            continue;
        };
        for d in triggered {
            let same_player =
                |s: &DraftSuspension| s.team_id == d.team_id && s.player_id == d.player_id;
            let active = drafts
                .iter()
                .position(|s| s.status == SuspensionStatus::Active && same_player(s));
            let absorbing = || {
                drafts.iter().enumerate().position(|(idx, s)| {
                    same_player(s)
                        && s.status == SuspensionStatus::Cancelled
                        && s.served_matches < s.matches_banned
                        && caps
                            .get(&idx)
                            .is_some_and(|cap| s.matches_banned + d.matches_banned <= *cap)
                })
            };
            match active.or_else(absorbing) {
                Some(idx) => drafts[idx].matches_banned += d.matches_banned,
                None => {
                    let mut draft = DraftSuspension {
                        player_id: d.player_id,
                        team_id: d.team_id,
                        reason: d.reason,
                        trigger_match_id: d.trigger_match_id,
                        matches_banned: d.matches_banned,
                        served_matches: 0,
                        status: SuspensionStatus::Active,
                    };
                    if let Some(cap) = cancelled.get(&draft.carry_key()) {
                        draft.status = SuspensionStatus::Cancelled;
                        caps.insert(drafts.len(), *cap);
                    }
                    drafts.push(draft);
                }
            }
        }
    }
    drafts
}

/// Apply a "match completed" notification for one team.
///
/// The caller holds the season lock. A repeated (match, team) notification is
/// recorded once and serves nothing the second time.
pub async fn record_completion(
    pool: &SqlitePool,
    m: &Match,
    team_id: i64,
    completed_at: i64,
) -> DisciplineResult<ServingOutcome> {
    if !m.involves(team_id) {
        return Err(DisciplineError::TeamNotInMatch {
            match_id: m.match_id,
            team_id,
        });
    }

    let mut tx = pool.begin().await?;

    let recorded =
        fixture::insert_completion(&mut *tx, m.season_id, m.match_id, team_id, completed_at)
            .await?;
    if !recorded {
        tracing::info!(
            match_id = m.match_id,
            team_id,
            "Duplicate completion notification ignored"
        );
        return Ok(ServingOutcome::default());
    }

    let keys: HashMap<i64, _> = fixture::find_by_season(&mut *tx, m.season_id)
        .await?
        .into_iter()
        .map(|f| (f.match_id, f.sequence_key()))
        .collect();
    let current = m.sequence_key();

    let mut outcome = ServingOutcome {
        recorded: true,
        ..Default::default()
    };
    let active = suspension::find_active_by_team(&mut *tx, m.season_id, team_id).await?;
    for s in active {
        let played_after_trigger = keys
            .get(&s.trigger_match_id)
            .is_some_and(|trigger| *trigger < current);
        if !played_after_trigger {
            continue;
        }
        let (served, status) = next_progress(s.served_matches, s.matches_banned);
        suspension::update_progress(&mut tx, s.suspension_id, served, status).await?;
        outcome.advanced += 1;
        if status == SuspensionStatus::Served {
            outcome.completed += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        season_id = m.season_id,
        match_id = m.match_id,
        team_id,
        advanced = outcome.advanced,
        completed = outcome.completed,
        "Match completion applied"
    );
    Ok(outcome)
}

/// Admin override: `active | served → cancelled`
pub async fn cancel(pool: &SqlitePool, suspension_id: i64) -> DisciplineResult<Suspension> {
    let current = suspension::find_by_id(pool, suspension_id)
        .await?
        .ok_or(DisciplineError::SuspensionNotFound(suspension_id))?;

    let to = SuspensionStatus::Cancelled;
    if !current.status.can_transition_to(to) {
        return Err(DisciplineError::InvalidTransition {
            suspension_id,
            from: current.status,
            to,
        });
    }

    if !suspension::update_status(pool, suspension_id, current.status, to).await? {
        // 状态在读取之后被改变 (例如并发的重算)
        let from = suspension::find_by_id(pool, suspension_id)
            .await?
            .map_or(current.status, |s| s.status);
        return Err(DisciplineError::InvalidTransition {
            suspension_id,
            from,
            to,
        });
    }

    tracing::info!(
        suspension_id,
        season_id = current.season_id,
        player_id = current.player_id,
        from = %current.status,
        "Suspension cancelled"
    );

    suspension::find_by_id(pool, suspension_id)
        .await?
        .ok_or(DisciplineError::SuspensionNotFound(suspension_id))
}

//! Recalculation Coordinator
//!
//! Archive-then-recreate rebuild of a season's discipline state. Everything
//! happens in one SQLite transaction: any error (including a data-integrity
//! failure in the card events) rolls back and leaves prior state untouched.

use super::aggregator::{self, SeasonSnapshot};
use super::error::{DisciplineError, DisciplineResult};
use super::lifecycle::{self, CancelledBans, CarryKey};
use super::policy::DisciplinePolicy;
use super::rules;
use crate::db::repository::{card_event, card_summary, fixture, roster, season, suspension};
use shared::models::{RecalcSummary, SuspensionStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Recompute the discipline state of one season from its card events.
///
/// The caller holds the season lock and the in-flight marker.
pub async fn recalculate(
    pool: &SqlitePool,
    policy: &DisciplinePolicy,
    season_id: i64,
) -> DisciplineResult<RecalcSummary> {
    season::find_by_id(pool, season_id)
        .await?
        .ok_or(DisciplineError::SeasonNotFound(season_id))?;

    let mut tx = pool.begin().await?;

    // 第一条语句就是写操作，事务随即持有写锁，之后的读取都是最新数据
    let deleted = card_summary::delete_by_season(&mut *tx, season_id).await?;
    tracing::info!(season_id, deleted, "Card summaries cleared for recalculation");

    let mut cancelled = CancelledBans::new();
    for s in suspension::find_live_by_season(&mut *tx, season_id).await? {
        if s.status == SuspensionStatus::Cancelled {
            let cap = cancelled.entry(CarryKey::from(&s)).or_default();
            *cap = (*cap).max(s.matches_banned);
        }
    }
    let archived = suspension::archive_live_by_season(&mut tx, season_id).await?;

    let snapshot = SeasonSnapshot {
        season_id,
        matches: fixture::find_by_season(&mut *tx, season_id).await?,
        roster: roster::find_by_season(&mut *tx, season_id).await?,
        completions: fixture::find_completions_by_season(&mut *tx, season_id).await?,
        events: card_event::find_by_season(&mut *tx, season_id).await?,
    };

    let aggregation = match aggregator::aggregate(&snapshot) {
        Ok(agg) => agg,
        Err(e) => {
            tracing::warn!(season_id, error = %e, "Recalculation aborted, card events are inconsistent");
            return Err(e);
        }
    };
    let decisions = rules::evaluate(&aggregation.events, policy);

    for summary in &aggregation.summaries {
        card_summary::insert(&mut tx, summary).await?;
    }

    let drafts = lifecycle::replay(
        &snapshot.ordered_matches(),
        &snapshot.completions,
        &decisions,
        &cancelled,
    );
    let created_at = now_millis();
    for draft in &drafts {
        let data = suspension::NewSuspension {
            season_id,
            player_id: draft.player_id,
            team_id: draft.team_id,
            reason: draft.reason,
            trigger_match_id: draft.trigger_match_id,
            matches_banned: draft.matches_banned,
            served_matches: draft.served_matches,
            status: draft.status,
            created_at,
        };
        suspension::insert(&mut tx, &data).await?;
    }

    tx.commit().await?;

    let summary = RecalcSummary {
        created: drafts.len() as u64,
        archived,
        summaries: aggregation.summaries.len() as u64,
        decisions: decisions.len() as u64,
    };
    tracing::info!(
        season_id,
        created = summary.created,
        archived = summary.archived,
        summaries = summary.summaries,
        decisions = summary.decisions,
        carried_cancellations = cancelled.len(),
        "Season discipline recalculated"
    );
    Ok(summary)
}

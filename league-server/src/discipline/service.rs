//! Discipline service facade used by the HTTP handlers

use super::error::{DisciplineError, DisciplineResult};
use super::lock::SeasonLocks;
use super::policy::DisciplinePolicy;
use super::{eligibility, lifecycle, recalc};
use crate::db::repository::{card_summary, fixture, season, suspension};
use shared::models::{
    CardSummary, CardSummaryQuery, Eligibility, RecalcSummary, ServingOutcome, Suspension,
    SuspensionQuery,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct DisciplineService {
    pool: SqlitePool,
    policy: DisciplinePolicy,
    locks: SeasonLocks,
}

impl DisciplineService {
    pub fn new(pool: SqlitePool, policy: DisciplinePolicy) -> Self {
        Self {
            pool,
            policy,
            locks: SeasonLocks::new(),
        }
    }

    pub fn locks(&self) -> &SeasonLocks {
        &self.locks
    }

    /// Full idempotent rebuild of one season.
    ///
    /// Rejected with [`DisciplineError::RecalculationInProgress`] while another
    /// recalculation of the same season runs.
    pub async fn recalculate(&self, season_id: i64) -> DisciplineResult<RecalcSummary> {
        let _in_flight = self
            .locks
            .try_begin_recalc(season_id)
            .ok_or(DisciplineError::RecalculationInProgress(season_id))?;
        let _season = self.locks.lock(season_id).await;

        tracing::info!(season_id, "Recalculating season discipline");
        recalc::recalculate(&self.pool, &self.policy, season_id).await
    }

    /// "Match completed" notification from the fixture service
    pub async fn match_completed(
        &self,
        match_id: i64,
        team_id: i64,
    ) -> DisciplineResult<ServingOutcome> {
        let m = fixture::find_match(&self.pool, match_id)
            .await?
            .ok_or(DisciplineError::MatchNotFound(match_id))?;

        let _season = self.locks.lock(m.season_id).await;
        lifecycle::record_completion(&self.pool, &m, team_id, now_millis()).await
    }

    pub async fn cancel(&self, suspension_id: i64) -> DisciplineResult<Suspension> {
        lifecycle::cancel(&self.pool, suspension_id).await
    }

    pub async fn eligibility(&self, player_id: i64, match_id: i64) -> DisciplineResult<Eligibility> {
        eligibility::check(&self.pool, player_id, match_id).await
    }

    /// `true` iff the player may not be fielded in the match
    pub async fn is_suspended(&self, player_id: i64, match_id: i64) -> DisciplineResult<bool> {
        Ok(self.eligibility(player_id, match_id).await?.suspended)
    }

    // ========== Read API ==========

    pub async fn card_summaries(
        &self,
        season_id: i64,
        query: &CardSummaryQuery,
    ) -> DisciplineResult<Vec<CardSummary>> {
        self.ensure_season(season_id).await?;
        Ok(card_summary::find_by_season(&self.pool, season_id, query).await?)
    }

    pub async fn suspensions(
        &self,
        season_id: i64,
        query: &SuspensionQuery,
    ) -> DisciplineResult<Vec<Suspension>> {
        self.ensure_season(season_id).await?;
        Ok(suspension::find_by_season(&self.pool, season_id, query).await?)
    }

    pub async fn suspension(&self, suspension_id: i64) -> DisciplineResult<Suspension> {
        suspension::find_by_id(&self.pool, suspension_id)
            .await?
            .ok_or(DisciplineError::SuspensionNotFound(suspension_id))
    }

    async fn ensure_season(&self, season_id: i64) -> DisciplineResult<()> {
        season::find_by_id(&self.pool, season_id)
            .await?
            .map(|_| ())
            .ok_or(DisciplineError::SeasonNotFound(season_id))
    }
}

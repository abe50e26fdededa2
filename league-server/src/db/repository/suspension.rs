//! Suspension Repository
//!
//! The discipline lifecycle owns every write to this table. Status changes go
//! through [`update_status`], a compare-and-set on the previous status so two
//! writers can never both move the same record.

use super::{RepoError, RepoResult};
use shared::models::{Suspension, SuspensionQuery, SuspensionReason, SuspensionStatus};
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "suspension_id, season_id, player_id, team_id, reason, trigger_match_id, \
     matches_banned, served_matches, status, created_at";

/// Insert payload (id assigned by SQLite)
#[derive(Debug, Clone)]
pub struct NewSuspension {
    pub season_id: i64,
    pub player_id: i64,
    pub team_id: i64,
    pub reason: SuspensionReason,
    pub trigger_match_id: i64,
    pub matches_banned: i64,
    pub served_matches: i64,
    pub status: SuspensionStatus,
    pub created_at: i64,
}

pub async fn find_by_id<'e, E>(db: E, suspension_id: i64) -> RepoResult<Option<Suspension>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {COLUMNS} FROM suspensions WHERE suspension_id = ?");
    let row = sqlx::query_as::<_, Suspension>(&sql)
        .bind(suspension_id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn find_by_season<'e, E>(
    db: E,
    season_id: i64,
    query: &SuspensionQuery,
) -> RepoResult<Vec<Suspension>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {COLUMNS} FROM suspensions \
         WHERE season_id = ?1 \
           AND (?2 IS NULL OR team_id = ?2) \
           AND (?3 IS NULL OR player_id = ?3) \
           AND (?4 IS NULL OR status = ?4) \
           AND (?5 IS NULL OR reason = ?5) \
         ORDER BY suspension_id"
    );
    let rows = sqlx::query_as::<_, Suspension>(&sql)
        .bind(season_id)
        .bind(query.team_id)
        .bind(query.player_id)
        .bind(query.status)
        .bind(query.reason)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Active suspensions of one team, oldest first
pub async fn find_active_by_team<'e, E>(
    db: E,
    season_id: i64,
    team_id: i64,
) -> RepoResult<Vec<Suspension>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {COLUMNS} FROM suspensions \
         WHERE season_id = ? AND team_id = ? AND status = 'active' \
         ORDER BY suspension_id"
    );
    let rows = sqlx::query_as::<_, Suspension>(&sql)
        .bind(season_id)
        .bind(team_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Active suspensions of one player across every team of the season
pub async fn find_active_for_player<'e, E>(
    db: E,
    season_id: i64,
    player_id: i64,
) -> RepoResult<Vec<Suspension>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {COLUMNS} FROM suspensions \
         WHERE season_id = ? AND player_id = ? AND status = 'active' \
         ORDER BY suspension_id"
    );
    let rows = sqlx::query_as::<_, Suspension>(&sql)
        .bind(season_id)
        .bind(player_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Every record of the season that a recalculation would archive
pub async fn find_live_by_season<'e, E>(db: E, season_id: i64) -> RepoResult<Vec<Suspension>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {COLUMNS} FROM suspensions \
         WHERE season_id = ? AND status <> 'archived' \
         ORDER BY suspension_id"
    );
    let rows = sqlx::query_as::<_, Suspension>(&sql)
        .bind(season_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Flip every non-archived record of the season to `archived`
pub async fn archive_live_by_season(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    season_id: i64,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE suspensions SET status = 'archived' WHERE season_id = ? AND status <> 'archived'",
    )
    .bind(season_id)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected())
}

pub async fn insert(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    data: &NewSuspension,
) -> RepoResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO suspensions (
            season_id, player_id, team_id, reason, trigger_match_id,
            matches_banned, served_matches, status, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(data.season_id)
    .bind(data.player_id)
    .bind(data.team_id)
    .bind(data.reason)
    .bind(data.trigger_match_id)
    .bind(data.matches_banned)
    .bind(data.served_matches)
    .bind(data.status)
    .bind(data.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Persist a serving step. Only touches records that are still active.
pub async fn update_progress(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    suspension_id: i64,
    served_matches: i64,
    status: SuspensionStatus,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE suspensions SET served_matches = ?, status = ? \
         WHERE suspension_id = ? AND status = 'active'",
    )
    .bind(served_matches)
    .bind(status)
    .bind(suspension_id)
    .execute(&mut **tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "active suspension {suspension_id}"
        )));
    }
    Ok(())
}

/// Compare-and-set status change. Returns `false` when the row was not in
/// `from` any more (or does not exist).
pub async fn update_status<'e, E>(
    db: E,
    suspension_id: i64,
    from: SuspensionStatus,
    to: SuspensionStatus,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result =
        sqlx::query("UPDATE suspensions SET status = ? WHERE suspension_id = ? AND status = ?")
            .bind(to)
            .bind(suspension_id)
            .bind(from)
            .execute(db)
            .await?;
    Ok(result.rows_affected() > 0)
}

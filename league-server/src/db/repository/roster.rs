//! Roster Repository (player → team per season)

use super::RepoResult;
use shared::models::RosterEntry;
use sqlx::{Executor, Sqlite};

pub async fn find_by_season<'e, E>(db: E, season_id: i64) -> RepoResult<Vec<RosterEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, RosterEntry>(
        "SELECT season_id, player_id, team_id FROM roster WHERE season_id = ? ORDER BY player_id",
    )
    .bind(season_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_player<'e, E>(
    db: E,
    season_id: i64,
    player_id: i64,
) -> RepoResult<Option<RosterEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, RosterEntry>(
        "SELECT season_id, player_id, team_id FROM roster WHERE season_id = ? AND player_id = ?",
    )
    .bind(season_id)
    .bind(player_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

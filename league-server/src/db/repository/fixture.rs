//! Fixture Repository (matches and completion notifications)

use super::RepoResult;
use shared::models::{Match, MatchCompletion};
use sqlx::{Executor, Sqlite};

const MATCH_COLUMNS: &str = "match_id, season_id, matchday, kickoff_at, home_team_id, away_team_id";

pub async fn find_match<'e, E>(db: E, match_id: i64) -> RepoResult<Option<Match>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = ?");
    let row = sqlx::query_as::<_, Match>(&sql)
        .bind(match_id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Season fixture list in match sequence order (kickoff, matchday, match id)
pub async fn find_by_season<'e, E>(db: E, season_id: i64) -> RepoResult<Vec<Match>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE season_id = ? ORDER BY kickoff_at, matchday, match_id"
    );
    let rows = sqlx::query_as::<_, Match>(&sql)
        .bind(season_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find_completions_by_season<'e, E>(
    db: E,
    season_id: i64,
) -> RepoResult<Vec<MatchCompletion>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, MatchCompletion>(
        r#"
        SELECT season_id, match_id, team_id, completed_at
        FROM match_completions
        WHERE season_id = ?
        ORDER BY match_id, team_id
        "#,
    )
    .bind(season_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Record a team finishing a match. Returns `false` when the completion was
/// already known, so repeated notifications never serve twice.
pub async fn insert_completion<'e, E>(
    db: E,
    season_id: i64,
    match_id: i64,
    team_id: i64,
    completed_at: i64,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO match_completions (season_id, match_id, team_id, completed_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (match_id, team_id) DO NOTHING
        "#,
    )
    .bind(season_id)
    .bind(match_id)
    .bind(team_id)
    .bind(completed_at)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

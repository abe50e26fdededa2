//! Card Event Repository (read-only view of the match event log)

use super::RepoResult;
use shared::models::CardEvent;
use sqlx::{Executor, Sqlite};

/// All card events of a season, in storage order. Callers sort by the
/// match sequence key themselves.
pub async fn find_by_season<'e, E>(db: E, season_id: i64) -> RepoResult<Vec<CardEvent>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CardEvent>(
        r#"
        SELECT event_id, season_id, match_id, team_id, player_id, card_type, minute
        FROM card_events
        WHERE season_id = ?
        ORDER BY event_id
        "#,
    )
    .bind(season_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

//! Card Summary Repository

use super::RepoResult;
use shared::models::{CardSummary, CardSummaryQuery};
use sqlx::{Executor, Sqlite};

pub async fn find_by_season<'e, E>(
    db: E,
    season_id: i64,
    query: &CardSummaryQuery,
) -> RepoResult<Vec<CardSummary>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CardSummary>(
        r#"
        SELECT season_id, player_id, team_id, yellow_cards, red_cards, matches_played
        FROM card_summary
        WHERE season_id = ?1
            AND (?2 IS NULL OR team_id = ?2)
            AND (?3 IS NULL OR player_id = ?3)
        ORDER BY team_id, player_id
        "#,
    )
    .bind(season_id)
    .bind(query.team_id)
    .bind(query.player_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Drop the whole derived ledger of a season. Returns the number of rows removed.
pub async fn delete_by_season<'e, E>(db: E, season_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM card_summary WHERE season_id = ?")
        .bind(season_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    summary: &CardSummary,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO card_summary (season_id, player_id, team_id, yellow_cards, red_cards, matches_played)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(summary.season_id)
    .bind(summary.player_id)
    .bind(summary.team_id)
    .bind(summary.yellow_cards)
    .bind(summary.red_cards)
    .bind(summary.matches_played)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

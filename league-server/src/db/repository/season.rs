//! Season Repository

use super::RepoResult;
use shared::models::Season;
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(db: E, season_id: i64) -> RepoResult<Option<Season>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let season = sqlx::query_as::<_, Season>("SELECT season_id, name FROM seasons WHERE season_id = ?")
        .bind(season_id)
        .fetch_optional(db)
        .await?;
    Ok(season)
}

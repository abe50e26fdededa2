//! Match completion API Handlers

use axum::extract::State;

use crate::api::extract::{Json, Path};
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{MatchCompleted, ServingOutcome};

/// POST /api/matches/:match_id/completed - 球队完赛通知
///
/// 同一 (match, team) 重复通知只计一次，第二次返回 `recorded: false`
pub async fn completed(
    State(state): State<ServerState>,
    Path(match_id): Path<i64>,
    Json(payload): Json<MatchCompleted>,
) -> AppResult<axum::Json<ServingOutcome>> {
    let outcome = state
        .discipline
        .match_completed(match_id, payload.team_id)
        .await?;
    Ok(axum::Json(outcome))
}

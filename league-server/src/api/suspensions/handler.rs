//! Suspension API Handlers

use axum::{Json, extract::State};

use crate::api::extract::Path;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::Suspension;

/// GET /api/suspensions/:id - 获取单条停赛记录
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Suspension>> {
    Ok(Json(state.discipline.suspension(id).await?))
}

/// POST /api/suspensions/:id/cancel - 管理员取消停赛
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Suspension>> {
    let suspension = state.discipline.cancel(id).await?;
    Ok(Json(suspension))
}

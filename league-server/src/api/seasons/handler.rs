//! Season discipline API Handlers

use axum::{Json, extract::State};

use crate::api::extract::{Path, Query};
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CardSummary, CardSummaryQuery, RecalcSummary, Suspension, SuspensionQuery};

/// POST /api/seasons/:season_id/discipline/recalc - 重算赛季纪律数据
pub async fn recalculate(
    State(state): State<ServerState>,
    Path(season_id): Path<i64>,
) -> AppResult<Json<RecalcSummary>> {
    let summary = state.discipline.recalculate(season_id).await?;
    Ok(Json(summary))
}

/// GET /api/seasons/:season_id/card-summaries - 红黄牌汇总
pub async fn card_summaries(
    State(state): State<ServerState>,
    Path(season_id): Path<i64>,
    Query(query): Query<CardSummaryQuery>,
) -> AppResult<Json<Vec<CardSummary>>> {
    let rows = state.discipline.card_summaries(season_id, &query).await?;
    Ok(Json(rows))
}

/// GET /api/seasons/:season_id/suspensions - 停赛记录列表
pub async fn suspensions(
    State(state): State<ServerState>,
    Path(season_id): Path<i64>,
    Query(query): Query<SuspensionQuery>,
) -> AppResult<Json<Vec<Suspension>>> {
    let rows = state.discipline.suspensions(season_id, &query).await?;
    Ok(Json(rows))
}

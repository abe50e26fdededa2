//! Eligibility API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::api::extract::Query;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::Eligibility;

#[derive(Debug, Deserialize)]
pub struct EligibilityQuery {
    pub player_id: i64,
    pub match_id: i64,
}

/// GET /api/eligibility?player_id=&match_id= - 球员能否出场
pub async fn check(
    State(state): State<ServerState>,
    Query(query): Query<EligibilityQuery>,
) -> AppResult<Json<Eligibility>> {
    let answer = state
        .discipline
        .eligibility(query.player_id, query.match_id)
        .await?;
    Ok(Json(answer))
}

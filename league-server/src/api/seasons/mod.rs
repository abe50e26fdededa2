//! Season discipline API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seasons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{season_id}/discipline/recalc", post(handler::recalculate))
        .route("/{season_id}/card-summaries", get(handler::card_summaries))
        .route("/{season_id}/suspensions", get(handler::suspensions))
}

//! Match completion API 模块 (赛程服务回调)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/matches/{match_id}/completed", post(handler::completed))
}

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::leaderboard::LeaderboardResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Participants ranked by progress toward their goal", body = LeaderboardResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> Result<Response, WebError> {
    let board = services::get_leaderboard(db.pool()).await?;

    Ok(Json(LeaderboardResponse::from(board)).into_response())
}

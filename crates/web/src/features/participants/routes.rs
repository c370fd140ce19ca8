use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_participant, get_participant, list_participants, log_money, log_weight,
    patch_participant, reset_participant, set_goal,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_participants).post(create_participant))
        .route("/:id", get(get_participant).patch(patch_participant))
        .route("/:id/goal", put(set_goal))
        .route("/:id/weights", post(log_weight))
        .route("/:id/contributions", post(log_money))
        .route("/:id/reset", post(reset_participant))
}

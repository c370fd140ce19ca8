use std::time::Duration;

use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::WebError;
use crate::features::{leaderboard, participants};

#[derive(OpenApi)]
#[openapi(
    paths(
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::create_participant,
        participants::handlers::patch_participant,
        participants::handlers::set_goal,
        participants::handlers::log_weight,
        participants::handlers::log_money,
        participants::handlers::reset_participant,
        leaderboard::handlers::get_leaderboard,
    ),
    components(
        schemas(
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ParticipantDetailResponse,
            storage::dto::participant::WeightEntry,
            storage::dto::participant::ContributionEntry,
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::SetGoalRequest,
            storage::dto::participant::LogWeightRequest,
            storage::dto::participant::LogMoneyRequest,
            storage::dto::participant::ParticipantPatchRequest,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::models::OnboardingState,
        )
    ),
    tags(
        (name = "participants", description = "Participant goals, weigh-ins and contributions"),
        (name = "leaderboard", description = "Progress ranking"),
    )
)]
pub struct ApiDoc;

async fn not_found() -> WebError {
    WebError::NotFound
}

pub fn build_router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/participants", participants::routes::routes())
        .nest("/leaderboard", leaderboard::routes::routes());

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::participant::{
        CreateParticipantRequest, LogMoneyRequest, LogWeightRequest, ParticipantDetailResponse,
        ParticipantPatchRequest, ParticipantResponse, SetGoalRequest,
    },
    services::tracker::ParticipantAction,
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;

use super::services;

async fn respond_with_update(
    db: &Database,
    participant_id: i32,
    action: ParticipantAction,
) -> Result<Response, WebError> {
    let updated = services::apply_action(db.pool(), participant_id, action).await?;

    Ok(Json(ParticipantDetailResponse::from(updated)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "List all participants successfully", body = Vec<ParticipantResponse>)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let participants = services::list_participants(db.pool()).await?;

    let response: Vec<ParticipantResponse> =
        participants.iter().map(ParticipantResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant with weight and contribution history", body = ParticipantDetailResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(db.pool(), participant_id).await?;

    Ok(Json(ParticipantDetailResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantDetailResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::create_participant(db.pool(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantDetailResponse::from(participant)),
    )
        .into_response())
}

#[utoipa::path(
    patch,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    request_body = ParticipantPatchRequest,
    responses(
        (status = 200, description = "Participant updated successfully", body = ParticipantDetailResponse),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn patch_participant(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
    ApiJson(patch): ApiJson<ParticipantPatchRequest>,
) -> Result<Response, WebError> {
    let action = patch.into_action()?;

    respond_with_update(&db, participant_id, action).await
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/goal",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    request_body = SetGoalRequest,
    responses(
        (status = 200, description = "Goal set successfully", body = ParticipantDetailResponse),
        (status = 400, description = "Validation error or goal not below the starting weight"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn set_goal(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
    ApiJson(req): ApiJson<SetGoalRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    respond_with_update(&db, participant_id, req.into_action()?).await
}

#[utoipa::path(
    post,
    path = "/api/participants/{id}/weights",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    request_body = LogWeightRequest,
    responses(
        (status = 200, description = "Weight logged successfully", body = ParticipantDetailResponse),
        (status = 400, description = "Validation error or no goal configured"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn log_weight(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
    ApiJson(req): ApiJson<LogWeightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    respond_with_update(&db, participant_id, req.into_action()?).await
}

#[utoipa::path(
    post,
    path = "/api/participants/{id}/contributions",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    request_body = LogMoneyRequest,
    responses(
        (status = 200, description = "Contribution logged successfully", body = ParticipantDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn log_money(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
    ApiJson(req): ApiJson<LogMoneyRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    respond_with_update(&db, participant_id, req.into_action()?).await
}

#[utoipa::path(
    post,
    path = "/api/participants/{id}/reset",
    params(
        ("id" = i32, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant history deleted and goal cleared", body = ParticipantDetailResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn reset_participant(
    State(db): State<Database>,
    Path(participant_id): Path<i32>,
) -> Result<Response, WebError> {
    respond_with_update(&db, participant_id, ParticipantAction::Reset).await
}

use sqlx::PgPool;
use storage::{
    dto::participant::CreateParticipantRequest,
    error::Result,
    models::{NewParticipant, TrackedParticipant},
    repository::{ParticipantStore, participant::ParticipantRepository},
    services::tracker::{self, ParticipantAction},
};

/// List all participants with their history
pub async fn list_participants(pool: &PgPool) -> Result<Vec<TrackedParticipant>> {
    let repo = ParticipantRepository::new(pool);
    repo.list_participants().await
}

/// Get a participant with its history
pub async fn get_participant(pool: &PgPool, participant_id: i32) -> Result<TrackedParticipant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_participant(participant_id).await
}

/// Register a new participant
pub async fn create_participant(
    pool: &PgPool,
    request: CreateParticipantRequest,
) -> Result<TrackedParticipant> {
    let repo = ParticipantRepository::new(pool);
    let new_participant: NewParticipant = request.into();
    tracker::create_participant(&repo, &new_participant).await
}

/// Apply a goal edit, weigh-in, contribution or reset
pub async fn apply_action(
    pool: &PgPool,
    participant_id: i32,
    action: ParticipantAction,
) -> Result<TrackedParticipant> {
    let repo = ParticipantRepository::new(pool);
    tracker::apply(&repo, participant_id, action).await
}

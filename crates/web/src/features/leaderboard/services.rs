use sqlx::PgPool;
use storage::{
    error::Result,
    repository::{ParticipantStore, participant::ParticipantRepository},
    services::leaderboard::{self, Leaderboard},
};

/// Rank every participant from a fresh read of the store
pub async fn get_leaderboard(pool: &PgPool) -> Result<Leaderboard> {
    let repo = ParticipantRepository::new(pool);
    let participants = repo.list_participants().await?;

    Ok(leaderboard::build_leaderboard(participants))
}

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{MoneyRecord, NewParticipant, Participant, TrackedParticipant, WeightRecord};
use crate::services::tracker::{GoalPlan, GoalUpdate};

pub mod participant;

/// A committed change together with the participant as read inside the
/// same transaction.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub change: T,
    pub participant: TrackedParticipant,
}

/// Record store consumed by the tracker services.
///
/// Each mutating method is atomic: implementations lock the participant,
/// apply the transition rules, write, and re-read the participant before
/// committing, or leave everything untouched.
/// A missing participant is reported as `StorageError::NotFound`.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn find_participant(&self, participant_id: i32) -> Result<TrackedParticipant>;

    /// All participants ordered by id, each with its full history.
    async fn list_participants(&self) -> Result<Vec<TrackedParticipant>>;

    async fn create_participant(&self, new: &NewParticipant) -> Result<Participant>;

    async fn set_goal(
        &self,
        participant_id: i32,
        update: GoalUpdate,
    ) -> Result<Committed<GoalPlan>>;

    async fn append_weight(
        &self,
        participant_id: i32,
        weight: Decimal,
    ) -> Result<Committed<WeightRecord>>;

    async fn append_money(
        &self,
        participant_id: i32,
        amount: Decimal,
    ) -> Result<Committed<MoneyRecord>>;

    /// Deletes every record of the participant and clears its goal.
    async fn reset(&self, participant_id: i32) -> Result<TrackedParticipant>;
}

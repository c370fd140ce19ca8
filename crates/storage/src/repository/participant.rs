use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use super::{Committed, ParticipantStore};
use crate::error::{Result, StorageError};
use crate::models::{MoneyRecord, NewParticipant, Participant, TrackedParticipant, WeightRecord};
use crate::services::tracker::{self, GoalPlan, GoalUpdate};

const PARTICIPANT_COLUMNS: &str = r#"
    participant_id, name, photo_url, color, initial_weight, weight_goal, created_at
"#;

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a roster in one transaction, optionally wiping existing participants first
    pub async fn replace_roster(
        &self,
        roster: &[NewParticipant],
        keep_existing: bool,
    ) -> Result<Vec<Participant>> {
        for new in roster {
            tracker::validate_new_participant(new)?;
        }

        let mut tx = self.pool.begin().await?;

        if !keep_existing {
            // Records go with their participants through ON DELETE CASCADE
            let removed = sqlx::query("DELETE FROM participants")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tracing::info!(removed, "Cleared existing participants");
        }

        let mut created = Vec::with_capacity(roster.len());
        for new in roster {
            created.push(Self::insert_participant(&mut tx, new).await?);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn insert_participant(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewParticipant,
    ) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (name, photo_url, color)
            VALUES ($1, $2, $3)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.photo_url)
        .bind(&new.color)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(participant)
    }

    /// Lock the participant row for the rest of the transaction
    async fn lock_participant(
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    async fn insert_weight(
        tx: &mut Transaction<'_, Postgres>,
        participant_id: i32,
        weight: Decimal,
    ) -> Result<WeightRecord> {
        let record = sqlx::query_as::<_, WeightRecord>(
            r#"
            INSERT INTO weight_records (participant_id, weight)
            VALUES ($1, $2)
            RETURNING weight_record_id, participant_id, weight, recorded_at
            "#,
        )
        .bind(participant_id)
        .bind(weight)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(record)
    }

    /// Read-only transaction seeing one consistent snapshot
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Participant and both logs as seen by the given transaction
    async fn load_tracked(
        tx: &mut Transaction<'_, Postgres>,
        participant_id: i32,
    ) -> Result<TrackedParticipant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1"
        ))
        .bind(participant_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let weights = Self::weight_history(tx, participant_id).await?;
        let money = Self::money_history(tx, participant_id).await?;

        Ok(TrackedParticipant::new(participant, weights, money))
    }

    async fn weight_history(
        tx: &mut Transaction<'_, Postgres>,
        participant_id: i32,
    ) -> Result<Vec<WeightRecord>> {
        let records = sqlx::query_as::<_, WeightRecord>(
            r#"
            SELECT weight_record_id, participant_id, weight, recorded_at
            FROM weight_records
            WHERE participant_id = $1
            ORDER BY recorded_at DESC, weight_record_id DESC
            "#,
        )
        .bind(participant_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(records)
    }

    async fn money_history(
        tx: &mut Transaction<'_, Postgres>,
        participant_id: i32,
    ) -> Result<Vec<MoneyRecord>> {
        let records = sqlx::query_as::<_, MoneyRecord>(
            r#"
            SELECT money_record_id, participant_id, amount, recorded_at
            FROM money_records
            WHERE participant_id = $1
            ORDER BY recorded_at DESC, money_record_id DESC
            "#,
        )
        .bind(participant_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(records)
    }
}

#[async_trait]
impl<'a> ParticipantStore for ParticipantRepository<'a> {
    async fn find_participant(&self, participant_id: i32) -> Result<TrackedParticipant> {
        let mut tx = self.begin_snapshot().await?;
        let tracked = Self::load_tracked(&mut tx, participant_id).await?;
        tx.commit().await?;

        Ok(tracked)
    }

    async fn list_participants(&self) -> Result<Vec<TrackedParticipant>> {
        let mut tx = self.begin_snapshot().await?;

        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY participant_id"
        ))
        .fetch_all(&mut *tx)
        .await?;

        let weights = sqlx::query_as::<_, WeightRecord>(
            r#"
            SELECT weight_record_id, participant_id, weight, recorded_at
            FROM weight_records
            ORDER BY participant_id, recorded_at DESC, weight_record_id DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let money = sqlx::query_as::<_, MoneyRecord>(
            r#"
            SELECT money_record_id, participant_id, amount, recorded_at
            FROM money_records
            ORDER BY participant_id, recorded_at DESC, money_record_id DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut weights_by_participant: HashMap<i32, Vec<WeightRecord>> = HashMap::new();
        for record in weights {
            weights_by_participant
                .entry(record.participant_id)
                .or_default()
                .push(record);
        }

        let mut money_by_participant: HashMap<i32, Vec<MoneyRecord>> = HashMap::new();
        for record in money {
            money_by_participant
                .entry(record.participant_id)
                .or_default()
                .push(record);
        }

        let tracked = participants
            .into_iter()
            .map(|participant| {
                let id = participant.participant_id;
                TrackedParticipant::new(
                    participant,
                    weights_by_participant.remove(&id).unwrap_or_default(),
                    money_by_participant.remove(&id).unwrap_or_default(),
                )
            })
            .collect();

        Ok(tracked)
    }

    async fn create_participant(&self, new: &NewParticipant) -> Result<Participant> {
        let mut tx = self.pool.begin().await?;
        let participant = Self::insert_participant(&mut tx, new).await?;
        tx.commit().await?;

        Ok(participant)
    }

    async fn set_goal(
        &self,
        participant_id: i32,
        update: GoalUpdate,
    ) -> Result<Committed<GoalPlan>> {
        let mut tx = self.pool.begin().await?;

        let participant = Self::lock_participant(&mut tx, participant_id).await?;
        let plan = update.plan(&participant);

        sqlx::query(
            r#"
            UPDATE participants
            SET initial_weight = $2,
                weight_goal = $3
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .bind(update.initial_weight())
        .bind(update.weight_goal())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        if plan.append_anchor {
            Self::insert_weight(&mut tx, participant_id, update.initial_weight()).await?;
        }

        let participant = Self::load_tracked(&mut tx, participant_id).await?;
        tx.commit().await?;

        Ok(Committed {
            change: plan,
            participant,
        })
    }

    async fn append_weight(
        &self,
        participant_id: i32,
        weight: Decimal,
    ) -> Result<Committed<WeightRecord>> {
        let mut tx = self.pool.begin().await?;

        let participant = Self::lock_participant(&mut tx, participant_id).await?;
        tracker::ensure_accepts_weight(&participant)?;

        let record = Self::insert_weight(&mut tx, participant_id, weight).await?;

        let participant = Self::load_tracked(&mut tx, participant_id).await?;
        tx.commit().await?;

        Ok(Committed {
            change: record,
            participant,
        })
    }

    async fn append_money(
        &self,
        participant_id: i32,
        amount: Decimal,
    ) -> Result<Committed<MoneyRecord>> {
        let mut tx = self.pool.begin().await?;

        Self::lock_participant(&mut tx, participant_id).await?;

        let record = sqlx::query_as::<_, MoneyRecord>(
            r#"
            INSERT INTO money_records (participant_id, amount)
            VALUES ($1, $2)
            RETURNING money_record_id, participant_id, amount, recorded_at
            "#,
        )
        .bind(participant_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        let participant = Self::load_tracked(&mut tx, participant_id).await?;
        tx.commit().await?;

        Ok(Committed {
            change: record,
            participant,
        })
    }

    async fn reset(&self, participant_id: i32) -> Result<TrackedParticipant> {
        let mut tx = self.pool.begin().await?;

        Self::lock_participant(&mut tx, participant_id).await?;

        let weights = sqlx::query("DELETE FROM weight_records WHERE participant_id = $1")
            .bind(participant_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let contributions = sqlx::query("DELETE FROM money_records WHERE participant_id = $1")
            .bind(participant_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query(
            r#"
            UPDATE participants
            SET initial_weight = 0,
                weight_goal = 0
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .execute(&mut *tx)
        .await?;

        let participant = Self::load_tracked(&mut tx, participant_id).await?;
        tx.commit().await?;

        tracing::debug!(participant_id, weights, contributions, "Deleted participant records");

        Ok(participant)
    }
}

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use storage::error::{Result, StorageError};
use storage::models::{MoneyRecord, NewParticipant, Participant, TrackedParticipant, WeightRecord};
use storage::repository::{Committed, ParticipantStore};
use storage::services::tracker::{self, GoalPlan, GoalUpdate};

#[derive(Default)]
struct State {
    participants: BTreeMap<i32, Participant>,
    weights: Vec<WeightRecord>,
    money: Vec<MoneyRecord>,
    next_id: i32,
    ticks: i64,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    // Strictly increasing clock so record order is deterministic
    fn now(&mut self) -> NaiveDateTime {
        self.ticks += 1;
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            + TimeDelta::minutes(self.ticks)
    }

    fn tracked_by_id(&self, participant_id: i32) -> Result<TrackedParticipant> {
        let participant = self
            .participants
            .get(&participant_id)
            .ok_or(StorageError::NotFound)?;
        Ok(self.tracked(participant))
    }

    fn tracked(&self, participant: &Participant) -> TrackedParticipant {
        let id = participant.participant_id;
        TrackedParticipant::new(
            participant.clone(),
            self.weights
                .iter()
                .filter(|r| r.participant_id == id)
                .cloned()
                .collect(),
            self.money
                .iter()
                .filter(|r| r.participant_id == id)
                .cloned()
                .collect(),
        )
    }
}

/// In-memory record store; the single mutex plays the role of the row lock.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub async fn with_participants(names: &[&str]) -> Self {
        let store = Self::default();
        for name in names {
            store
                .create_participant(&NewParticipant {
                    name: name.to_string(),
                    photo_url: None,
                    color: "#9333EA".to_string(),
                })
                .await
                .unwrap();
        }
        store
    }

    pub async fn record_counts(&self) -> (usize, usize) {
        let state = self.state.lock().await;
        (state.weights.len(), state.money.len())
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn find_participant(&self, participant_id: i32) -> Result<TrackedParticipant> {
        let state = self.state.lock().await;
        state.tracked_by_id(participant_id)
    }

    async fn list_participants(&self) -> Result<Vec<TrackedParticipant>> {
        let state = self.state.lock().await;
        Ok(state
            .participants
            .values()
            .map(|participant| state.tracked(participant))
            .collect())
    }

    async fn create_participant(&self, new: &NewParticipant) -> Result<Participant> {
        let mut state = self.state.lock().await;
        let participant = Participant {
            participant_id: state.next_id(),
            name: new.name.clone(),
            photo_url: new.photo_url.clone(),
            color: new.color.clone(),
            initial_weight: Decimal::ZERO,
            weight_goal: Decimal::ZERO,
            created_at: state.now(),
        };
        state
            .participants
            .insert(participant.participant_id, participant.clone());
        Ok(participant)
    }

    async fn set_goal(
        &self,
        participant_id: i32,
        update: GoalUpdate,
    ) -> Result<Committed<GoalPlan>> {
        let mut state = self.state.lock().await;
        let participant = state
            .participants
            .get(&participant_id)
            .cloned()
            .ok_or(StorageError::NotFound)?;
        let plan = update.plan(&participant);

        if plan.append_anchor {
            let record = WeightRecord {
                weight_record_id: state.next_id(),
                participant_id,
                weight: update.initial_weight(),
                recorded_at: state.now(),
            };
            state.weights.push(record);
        }

        let stored = state
            .participants
            .get_mut(&participant_id)
            .ok_or(StorageError::NotFound)?;
        stored.initial_weight = update.initial_weight();
        stored.weight_goal = update.weight_goal();

        Ok(Committed {
            change: plan,
            participant: state.tracked_by_id(participant_id)?,
        })
    }

    async fn append_weight(
        &self,
        participant_id: i32,
        weight: Decimal,
    ) -> Result<Committed<WeightRecord>> {
        let mut state = self.state.lock().await;
        let participant = state
            .participants
            .get(&participant_id)
            .ok_or(StorageError::NotFound)?;
        tracker::ensure_accepts_weight(participant)?;

        let record = WeightRecord {
            weight_record_id: state.next_id(),
            participant_id,
            weight,
            recorded_at: state.now(),
        };
        state.weights.push(record.clone());
        Ok(Committed {
            change: record,
            participant: state.tracked_by_id(participant_id)?,
        })
    }

    async fn append_money(
        &self,
        participant_id: i32,
        amount: Decimal,
    ) -> Result<Committed<MoneyRecord>> {
        let mut state = self.state.lock().await;
        if !state.participants.contains_key(&participant_id) {
            return Err(StorageError::NotFound);
        }

        let record = MoneyRecord {
            money_record_id: state.next_id(),
            participant_id,
            amount,
            recorded_at: state.now(),
        };
        state.money.push(record.clone());
        Ok(Committed {
            change: record,
            participant: state.tracked_by_id(participant_id)?,
        })
    }

    async fn reset(&self, participant_id: i32) -> Result<TrackedParticipant> {
        let mut state = self.state.lock().await;
        let participant = state
            .participants
            .get_mut(&participant_id)
            .ok_or(StorageError::NotFound)?;
        participant.initial_weight = Decimal::ZERO;
        participant.weight_goal = Decimal::ZERO;

        state.weights.retain(|r| r.participant_id != participant_id);
        state.money.retain(|r| r.participant_id != participant_id);
        state.tracked_by_id(participant_id)
    }
}

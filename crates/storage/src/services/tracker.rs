//! Mutations of a participant's goal and record logs.
//!
//! Input checks happen here; the locked, transactional part of every
//! transition is delegated to a [`ParticipantStore`], which applies the
//! same rules (through [`GoalUpdate::plan`] and [`ensure_accepts_weight`])
//! while holding the participant row. Every operation returns the
//! participant as re-read inside the mutating transaction, so callers never
//! patch stale copies and a committed change is never reported as failed.

use rust_decimal::Decimal;

use crate::error::{Result, StorageError};
use crate::models::{NewParticipant, OnboardingState, Participant, TrackedParticipant};
use crate::repository::ParticipantStore;
use crate::services::progress::round_cents;

fn max_weight() -> Decimal {
    Decimal::new(500, 0)
}

fn max_contribution() -> Decimal {
    Decimal::new(1_000_000, 0)
}

/// A validated starting weight and goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalUpdate {
    initial_weight: Decimal,
    weight_goal: Decimal,
}

/// What a goal update does to a given participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalPlan {
    /// Append a weigh-in equal to the starting weight so progress has an anchor.
    pub append_anchor: bool,
}

impl GoalUpdate {
    pub fn new(initial_weight: Decimal, weight_goal: Decimal) -> Result<Self> {
        let initial_weight = validate_weight(initial_weight, "initial_weight")?;
        let weight_goal = validate_weight(weight_goal, "weight_goal")?;

        if weight_goal >= initial_weight {
            return Err(StorageError::invalid(
                "weight_goal must be lower than initial_weight",
            ));
        }

        Ok(Self {
            initial_weight,
            weight_goal,
        })
    }

    pub fn initial_weight(&self) -> Decimal {
        self.initial_weight
    }

    pub fn weight_goal(&self) -> Decimal {
        self.weight_goal
    }

    /// Only the first goal of an onboarding cycle gets an anchor weigh-in;
    /// later edits leave the log alone.
    pub fn plan(&self, participant: &Participant) -> GoalPlan {
        GoalPlan {
            append_anchor: participant.state() == OnboardingState::Unconfigured,
        }
    }
}

/// A mutation requested by a client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticipantAction {
    SetGoal {
        initial_weight: Decimal,
        weight_goal: Decimal,
    },
    LogWeight(Decimal),
    LogMoney(Decimal),
    Reset,
}

/// Rounds a weight to 2 places (halves up) and checks it lies in `(0, 500]`.
pub fn validate_weight(weight: Decimal, field: &str) -> Result<Decimal> {
    let weight = round_cents(weight);
    if weight <= Decimal::ZERO || weight > max_weight() {
        return Err(StorageError::invalid(format!(
            "{field} must be greater than 0 and at most {}",
            max_weight()
        )));
    }
    Ok(weight)
}

/// Rounds an amount to 2 places and checks it lies in `(0, 1_000_000]`.
pub fn validate_amount(amount: Decimal) -> Result<Decimal> {
    let amount = round_cents(amount);
    if amount <= Decimal::ZERO || amount > max_contribution() {
        return Err(StorageError::invalid(format!(
            "amount must be greater than 0 and at most {}",
            max_contribution()
        )));
    }
    Ok(amount)
}

/// Weigh-ins are only accepted once a goal is configured.
pub fn ensure_accepts_weight(participant: &Participant) -> Result<()> {
    match participant.state() {
        OnboardingState::Configured => Ok(()),
        OnboardingState::Unconfigured => Err(StorageError::invalid(
            "participant has no goal configured",
        )),
    }
}

pub fn validate_new_participant(new: &NewParticipant) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(StorageError::invalid("name must not be empty"));
    }
    if new.color.trim().is_empty() {
        return Err(StorageError::invalid("color must not be empty"));
    }
    Ok(())
}

pub async fn create_participant<S: ParticipantStore + ?Sized>(
    store: &S,
    new: &NewParticipant,
) -> Result<TrackedParticipant> {
    validate_new_participant(new)?;

    let participant = store.create_participant(new).await?;
    tracing::info!(
        participant_id = participant.participant_id,
        name = %participant.name,
        "Participant created"
    );

    Ok(TrackedParticipant::new(participant, Vec::new(), Vec::new()))
}

pub async fn set_goal<S: ParticipantStore + ?Sized>(
    store: &S,
    participant_id: i32,
    initial_weight: Decimal,
    weight_goal: Decimal,
) -> Result<TrackedParticipant> {
    let update = GoalUpdate::new(initial_weight, weight_goal)?;

    let committed = store.set_goal(participant_id, update).await?;
    tracing::info!(
        participant_id,
        initial_weight = %update.initial_weight(),
        weight_goal = %update.weight_goal(),
        anchored = committed.change.append_anchor,
        "Goal set"
    );

    Ok(committed.participant)
}

pub async fn log_weight<S: ParticipantStore + ?Sized>(
    store: &S,
    participant_id: i32,
    weight: Decimal,
) -> Result<TrackedParticipant> {
    let weight = validate_weight(weight, "weight")?;

    let committed = store.append_weight(participant_id, weight).await?;
    tracing::info!(
        participant_id,
        weight_record_id = committed.change.weight_record_id,
        weight = %committed.change.weight,
        "Weight logged"
    );

    Ok(committed.participant)
}

pub async fn log_money<S: ParticipantStore + ?Sized>(
    store: &S,
    participant_id: i32,
    amount: Decimal,
) -> Result<TrackedParticipant> {
    let amount = validate_amount(amount)?;

    let committed = store.append_money(participant_id, amount).await?;
    tracing::info!(
        participant_id,
        money_record_id = committed.change.money_record_id,
        amount = %committed.change.amount,
        "Contribution logged"
    );

    Ok(committed.participant)
}

pub async fn reset<S: ParticipantStore + ?Sized>(
    store: &S,
    participant_id: i32,
) -> Result<TrackedParticipant> {
    let participant = store.reset(participant_id).await?;
    tracing::info!(participant_id, "Participant reset");

    Ok(participant)
}

pub async fn apply<S: ParticipantStore + ?Sized>(
    store: &S,
    participant_id: i32,
    action: ParticipantAction,
) -> Result<TrackedParticipant> {
    match action {
        ParticipantAction::SetGoal {
            initial_weight,
            weight_goal,
        } => set_goal(store, participant_id, initial_weight, weight_goal).await,
        ParticipantAction::LogWeight(weight) => log_weight(store, participant_id, weight).await,
        ParticipantAction::LogMoney(amount) => log_money(store, participant_id, amount).await,
        ParticipantAction::Reset => reset(store, participant_id).await,
    }
}

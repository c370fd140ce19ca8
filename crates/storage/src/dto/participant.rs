use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{decimal_from_f64, decimal_to_f64};
use crate::error::{Result, StorageError};
use crate::models::{NewParticipant, OnboardingState, TrackedParticipant};
use crate::services::tracker::ParticipantAction;

/// Participant with its aggregates folded from the record logs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub color: String,
    pub initial_weight: f64,
    pub weight_goal: f64,
    pub current_weight: f64,
    pub money_added: f64,
    /// Percent of the goal reached, absent while no goal is set
    pub progress: Option<f64>,
    pub state: OnboardingState,
    pub weight_record_count: usize,
    pub created_at: NaiveDateTime,
}

/// Participant with both record logs, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDetailResponse {
    #[serde(flatten)]
    pub participant: ParticipantResponse,
    pub weight_history: Vec<WeightEntry>,
    pub money_history: Vec<ContributionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeightEntry {
    pub weight_record_id: i32,
    pub weight: f64,
    /// Kilograms lost since the previous weigh-in (or the starting weight)
    pub difference: f64,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContributionEntry {
    pub money_record_id: i32,
    pub amount: f64,
    pub recorded_at: NaiveDateTime,
}

/// Request payload for registering a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 500))]
    pub photo_url: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Color is required"))]
    pub color: String,
}

/// Request payload for setting or editing the goal
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetGoalRequest {
    #[validate(range(exclusive_min = 0.0, max = 500.0))]
    pub initial_weight: f64,

    #[validate(range(exclusive_min = 0.0, max = 500.0))]
    pub weight_goal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogWeightRequest {
    #[validate(range(exclusive_min = 0.0, max = 500.0))]
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogMoneyRequest {
    #[validate(range(exclusive_min = 0.0, max = 1_000_000.0))]
    pub amount: f64,
}

/// Single-endpoint update accepted for compatibility with older clients.
///
/// Exactly one change is applied, picked in this order: reset, goal,
/// weigh-in, contribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ParticipantPatchRequest {
    #[serde(default, alias = "newWeight")]
    pub new_weight: Option<f64>,
    #[serde(default, alias = "initialWeight")]
    pub initial_weight: Option<f64>,
    #[serde(default, alias = "weightGoal")]
    pub weight_goal: Option<f64>,
    #[serde(default, alias = "moneyToAdd")]
    pub money_to_add: Option<f64>,
    #[serde(default)]
    pub reset: Option<bool>,
}

impl From<CreateParticipantRequest> for NewParticipant {
    fn from(req: CreateParticipantRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            photo_url: req.photo_url.filter(|url| !url.trim().is_empty()),
            color: req.color.trim().to_string(),
        }
    }
}

impl SetGoalRequest {
    pub fn into_action(self) -> Result<ParticipantAction> {
        Ok(ParticipantAction::SetGoal {
            initial_weight: decimal_from_f64(self.initial_weight, "initial_weight")?,
            weight_goal: decimal_from_f64(self.weight_goal, "weight_goal")?,
        })
    }
}

impl LogWeightRequest {
    pub fn into_action(self) -> Result<ParticipantAction> {
        Ok(ParticipantAction::LogWeight(decimal_from_f64(
            self.weight,
            "weight",
        )?))
    }
}

impl LogMoneyRequest {
    pub fn into_action(self) -> Result<ParticipantAction> {
        Ok(ParticipantAction::LogMoney(decimal_from_f64(
            self.amount,
            "amount",
        )?))
    }
}

impl ParticipantPatchRequest {
    pub fn into_action(self) -> Result<ParticipantAction> {
        if self.reset == Some(true) {
            return Ok(ParticipantAction::Reset);
        }

        if let (Some(initial_weight), Some(weight_goal)) = (self.initial_weight, self.weight_goal) {
            return SetGoalRequest {
                initial_weight,
                weight_goal,
            }
            .into_action();
        }

        if let Some(weight) = self.new_weight {
            return LogWeightRequest { weight }.into_action();
        }

        if let Some(amount) = self.money_to_add {
            return LogMoneyRequest { amount }.into_action();
        }

        Err(StorageError::invalid("invalid data"))
    }
}

impl From<&TrackedParticipant> for ParticipantResponse {
    fn from(tracked: &TrackedParticipant) -> Self {
        let participant = &tracked.participant;
        Self {
            participant_id: participant.participant_id,
            name: participant.name.clone(),
            photo_url: participant.photo_url.clone(),
            color: participant.color.clone(),
            initial_weight: decimal_to_f64(participant.initial_weight),
            weight_goal: decimal_to_f64(participant.weight_goal),
            current_weight: decimal_to_f64(tracked.current_weight()),
            money_added: decimal_to_f64(tracked.money_added()),
            progress: tracked.progress().map(decimal_to_f64),
            state: tracked.state(),
            weight_record_count: tracked.weight_history.len(),
            created_at: participant.created_at,
        }
    }
}

impl From<TrackedParticipant> for ParticipantDetailResponse {
    fn from(tracked: TrackedParticipant) -> Self {
        let summary = ParticipantResponse::from(&tracked);
        let initial_weight = tracked.participant.initial_weight;

        let history = &tracked.weight_history;
        let weight_history = history
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let previous = history
                    .get(i + 1)
                    .map(|older| older.weight)
                    .unwrap_or(initial_weight);
                WeightEntry {
                    weight_record_id: record.weight_record_id,
                    weight: decimal_to_f64(record.weight),
                    difference: decimal_to_f64(previous - record.weight),
                    recorded_at: record.recorded_at,
                }
            })
            .collect();

        let money_history = tracked
            .money_history
            .iter()
            .map(|record| ContributionEntry {
                money_record_id: record.money_record_id,
                amount: decimal_to_f64(record.amount),
                recorded_at: record.recorded_at,
            })
            .collect();

        Self {
            participant: summary,
            weight_history,
            money_history,
        }
    }
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A challenge participant as stored in the `participants` table.
///
/// `initial_weight` and `weight_goal` are zero until the first goal is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub color: String,
    pub initial_weight: Decimal,
    pub weight_goal: Decimal,
    pub created_at: NaiveDateTime,
}

impl Participant {
    /// Both the starting weight and the goal are set.
    pub fn is_data_complete(&self) -> bool {
        self.initial_weight > Decimal::ZERO && self.weight_goal > Decimal::ZERO
    }

    pub fn state(&self) -> OnboardingState {
        if self.is_data_complete() {
            OnboardingState::Configured
        } else {
            OnboardingState::Unconfigured
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingState {
    Unconfigured,
    Configured,
}

/// Fields needed to insert a participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub photo_url: Option<String>,
    pub color: String,
}

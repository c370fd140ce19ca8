use rust_decimal::Decimal;

use super::{MoneyRecord, OnboardingState, Participant, WeightRecord};
use crate::services::progress;

/// A participant together with its record logs, newest first.
///
/// Every aggregate shown to users is folded from the logs here; nothing is
/// cached on the participant row.
#[derive(Debug, Clone)]
pub struct TrackedParticipant {
    pub participant: Participant,
    pub weight_history: Vec<WeightRecord>,
    pub money_history: Vec<MoneyRecord>,
}

impl TrackedParticipant {
    /// Builds a tracked participant, ordering both logs newest first.
    pub fn new(
        participant: Participant,
        mut weight_history: Vec<WeightRecord>,
        mut money_history: Vec<MoneyRecord>,
    ) -> Self {
        weight_history.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then(b.weight_record_id.cmp(&a.weight_record_id))
        });
        money_history.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then(b.money_record_id.cmp(&a.money_record_id))
        });

        Self {
            participant,
            weight_history,
            money_history,
        }
    }

    pub fn id(&self) -> i32 {
        self.participant.participant_id
    }

    pub fn state(&self) -> OnboardingState {
        self.participant.state()
    }

    /// Latest weigh-in, falling back to the starting weight.
    pub fn current_weight(&self) -> Decimal {
        self.weight_history
            .first()
            .map(|record| record.weight)
            .unwrap_or(self.participant.initial_weight)
    }

    pub fn money_added(&self) -> Decimal {
        self.money_history.iter().map(|record| record.amount).sum()
    }

    pub fn has_weight_history(&self) -> bool {
        !self.weight_history.is_empty()
    }

    pub fn progress(&self) -> Option<Decimal> {
        progress::compute_progress(
            self.participant.initial_weight,
            self.participant.weight_goal,
            self.current_weight(),
        )
    }
}

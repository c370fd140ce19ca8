pub mod money_record;
pub mod participant;
pub mod tracked_participant;
pub mod weight_record;

pub use money_record::MoneyRecord;
pub use participant::{NewParticipant, OnboardingState, Participant};
pub use tracked_participant::TrackedParticipant;
pub use weight_record::WeightRecord;

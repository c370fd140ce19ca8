use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A single weigh-in. Records are never updated, only appended or wiped by a reset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeightRecord {
    pub weight_record_id: i32,
    pub participant_id: i32,
    pub weight: Decimal,
    pub recorded_at: NaiveDateTime,
}

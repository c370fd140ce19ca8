use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MoneyRecord {
    pub money_record_id: i32,
    pub participant_id: i32,
    pub amount: Decimal,
    pub recorded_at: NaiveDateTime,
}

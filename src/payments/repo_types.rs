use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Recorded mock payment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: f64,
    pub txn_id: String,    // TEST-<4 digits>
    pub status: String,
    pub created_at: OffsetDateTime,
}

use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Transaction;

impl Transaction {
    pub async fn record(
        db: &SqlitePool,
        amount: f64,
        txn_id: &str,
        status: &str,
        user_id: Option<Uuid>,
        created_at: OffsetDateTime,
    ) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, user_id, amount, txn_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, user_id, amount, txn_id, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(amount)
        .bind(txn_id)
        .bind(status)
        .bind(created_at)
        .fetch_one(db)
        .await
    }
}

use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;

impl User {
    /// Find a user by email. Exact match, no case folding.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. A taken email surfaces as a unique-violation
    /// database error.
    pub async fn create(
        db: &SqlitePool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }
}

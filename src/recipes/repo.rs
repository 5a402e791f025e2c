use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{NewRecipe, Recipe};

impl Recipe {
    pub async fn record(
        db: &SqlitePool,
        new: &NewRecipe,
        user_id: Option<Uuid>,
    ) -> Result<Recipe, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, user_id, ingredients, recipe, servings, prep_time, region, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, user_id, ingredients, recipe, servings, prep_time, region, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id) // Option<Uuid> → NULL allowed
        .bind(&new.ingredients)
        .bind(&new.recipe)
        .bind(&new.servings)
        .bind(&new.prep_time)
        .bind(&new.region)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }

    pub async fn list_by_user(
        db: &SqlitePool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, ingredients, recipe, servings, prep_time, region, created_at
            FROM recipes
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, ingredients, recipe, servings, prep_time, region, created_at
            FROM recipes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted result of one generate-recipe call.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Option<Uuid>, // informational link, no foreign key
    pub ingredients: String,
    pub recipe: String,
    pub servings: String,
    pub prep_time: String,
    pub region: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub ingredients: String,
    pub recipe: String,
    pub servings: String,
    pub prep_time: String,
    pub region: String,
}

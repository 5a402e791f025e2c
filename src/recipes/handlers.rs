use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{CurrentUser, Session},
    error::AppError,
    state::AppState,
};

use super::{
    composer::compose,
    dto::{
        as_text, non_empty_text, GetRecipeRequest, Pagination, RecipeListItem, RecipeResponse, DEFAULT_PREP_TIME,
        DEFAULT_REGION, DEFAULT_SERVINGS,
    },
    repo_types::{NewRecipe, Recipe},
};

pub fn generate_routes() -> Router<AppState> {
    Router::new().route("/get_recipe", post(get_recipe))
}

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_saved_recipe))
}

#[instrument(skip(state, body))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Session(user_id): Session,
    body: Result<Json<GetRecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let Json(body) = body?;
    let Some(ingredients) = non_empty_text(body.ingredients.as_ref()) else {
        warn!("get_recipe without ingredients");
        return Err(AppError::Validation("No ingredients provided".into()));
    };
    let servings = as_text(body.servings.as_ref()).unwrap_or_else(|| DEFAULT_SERVINGS.into());
    let prep_time = as_text(body.prep_time.as_ref()).unwrap_or_else(|| DEFAULT_PREP_TIME.into());
    let region = as_text(body.region.as_ref()).unwrap_or_else(|| DEFAULT_REGION.into());

    let recipe = compose(&ingredients, &servings, &prep_time, &region);

    let new = NewRecipe {
        ingredients,
        recipe,
        servings,
        prep_time,
        region,
    };
    let saved = Recipe::record(&state.db, &new, user_id).await?;

    info!(recipe_id = %saved.id, user_id = ?saved.user_id, "recipe generated");
    Ok(Json(RecipeResponse {
        recipe: saved.recipe,
    }))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<RecipeListItem>>, AppError> {
    let recipes = Recipe::list_by_user(&state.db, user_id, p.limit, p.offset).await?;
    let items = recipes.into_iter().map(RecipeListItem::from).collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_saved_recipe(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeListItem>, AppError> {
    match Recipe::find_by_id(&state.db, id).await? {
        Some(recipe) if recipe.user_id == Some(user_id) => Ok(Json(recipe.into())),
        _ => {
            warn!(%user_id, %id, "recipe not found for user");
            Err(AppError::NotFound("Recipe not found".into()))
        }
    }
}

impl From<Recipe> for RecipeListItem {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            ingredients: r.ingredients,
            recipe: r.recipe,
            servings: r.servings,
            prep_time: r.prep_time,
            region: r.region,
            created_at: r.created_at,
        }
    }
}
